use anyhow::anyhow;
use eframe::egui;
use reading_overlay::gui::ControlApp;
use reading_overlay::logging;
use reading_overlay::overlay::StateStore;
use reading_overlay::settings::{default_settings_path, Settings};

fn main() -> anyhow::Result<()> {
    let settings_path = default_settings_path();
    let (settings, settings_error) = Settings::load_or_default(&settings_path.to_string_lossy());
    logging::init(settings.debug_logging, settings.log_path());
    if let Some(e) = settings_error {
        tracing::warn!(settings = %settings_path.display(), "invalid settings file, using defaults: {e:#}");
    }
    tracing::info!(settings = %settings_path.display(), "starting reading overlay");

    let store = StateStore::new(settings.state_path());
    let state = store.load();
    tracing::debug!(path = %store.path().display(), ?state, "loaded overlay state");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Reading Overlay")
            .with_inner_size([380.0, 560.0])
            .with_min_inner_size([320.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Reading Overlay",
        native_options,
        Box::new(move |cc| Box::new(ControlApp::new(cc, &settings, store, state))),
    )
    .map_err(|e| anyhow!("control window failed: {e}"))
}
