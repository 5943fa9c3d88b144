use crate::overlay::messages::{ControlToOwner, OwnerToControl};
use crate::overlay::render::parse_css_color;
use crate::overlay::state::{
    BorderStyle, OverlayPatch, OverlayState, SizeMode, OPACITY_UI_MAX, OPACITY_UI_MIN,
};
use eframe::egui;
use std::sync::mpsc::Sender;

/// Settings widgets. Holds a local copy of the state for display and sends
/// every edit to the owner as a single-field patch.
pub struct ControlPanel {
    draft: OverlayState,
    active: bool,
    loaded: bool,
    color_text: String,
    border_color_text: String,
    persist_error: Option<String>,
    hotkey_hints: Vec<(String, String)>,
    to_owner: Sender<ControlToOwner>,
}

impl ControlPanel {
    pub fn new(to_owner: Sender<ControlToOwner>, hotkey_hints: Vec<(String, String)>) -> Self {
        let draft = OverlayState::default();
        Self {
            color_text: draft.color.clone(),
            border_color_text: draft.reading_guide_border_color.clone(),
            active: draft.is_active,
            draft,
            loaded: false,
            persist_error: None,
            hotkey_hints,
            to_owner,
        }
    }

    pub fn draft(&self) -> &OverlayState {
        &self.draft
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn persist_error(&self) -> Option<&str> {
        self.persist_error.as_deref()
    }

    pub fn view_ready(&self) {
        self.send(ControlToOwner::ViewReady);
    }

    pub fn request_toggle(&self) {
        self.send(ControlToOwner::ToggleOverlay);
    }

    pub fn handle(&mut self, msg: OwnerToControl) {
        match msg {
            OwnerToControl::LoadSavedState(state) => {
                self.loaded = true;
                self.replace_draft(state);
            }
            OwnerToControl::OverlayState(state) => self.replace_draft(state),
            OwnerToControl::OverlayToggled(active) => {
                self.active = active;
                self.draft.is_active = active;
            }
            OwnerToControl::PersistFailed { error } => self.persist_error = Some(error),
        }
    }

    /// Apply `patch` locally and forward it to the owner.
    pub fn submit(&mut self, patch: OverlayPatch) {
        if patch.is_empty() {
            return;
        }
        self.draft.apply(&patch);
        self.send(ControlToOwner::UpdateOverlay(patch));
    }

    fn replace_draft(&mut self, state: OverlayState) {
        self.color_text = state.color.clone();
        self.border_color_text = state.reading_guide_border_color.clone();
        self.active = state.is_active;
        self.draft = state;
    }

    fn send(&self, msg: ControlToOwner) {
        if self.to_owner.send(msg).is_err() {
            tracing::warn!("overlay owner is gone; dropping control request");
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Reading Overlay");
        ui.add_space(4.0);

        let label = if self.active { "Hide overlay" } else { "Show overlay" };
        if ui.add_sized([160.0, 28.0], egui::Button::new(label)).clicked() {
            self.request_toggle();
        }
        ui.separator();

        self.tint_section(ui);
        ui.separator();
        self.size_section(ui);
        ui.separator();
        self.guide_section(ui);

        if let Some(err) = &self.persist_error {
            ui.separator();
            ui.colored_label(egui::Color32::RED, format!("Settings not saved: {err}"));
            if ui.small_button("Dismiss").clicked() {
                self.persist_error = None;
            }
        }

        if !self.hotkey_hints.is_empty() {
            ui.separator();
            ui.label(egui::RichText::new("Hotkeys").strong());
            egui::Grid::new("hotkey_hints").num_columns(2).show(ui, |ui| {
                for (action, combo) in &self.hotkey_hints {
                    ui.label(action);
                    ui.monospace(combo);
                    ui.end_row();
                }
            });
        }
    }

    fn tint_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Tint").strong());
        ui.horizontal(|ui| {
            ui.label("Color");
            if let Some(color) = color_picker(ui, &self.draft.color) {
                self.color_text = color.clone();
                self.submit(OverlayPatch {
                    color: Some(color),
                    ..Default::default()
                });
            }
            let resp = ui.add(egui::TextEdit::singleline(&mut self.color_text).desired_width(120.0));
            if resp.lost_focus() && self.color_text != self.draft.color {
                let color = self.color_text.trim().to_string();
                self.submit(OverlayPatch {
                    color: Some(color),
                    ..Default::default()
                });
            }
        });

        let mut opacity = self.draft.opacity.clamp(OPACITY_UI_MIN, OPACITY_UI_MAX);
        if ui
            .add(egui::Slider::new(&mut opacity, OPACITY_UI_MIN..=OPACITY_UI_MAX).text("Opacity"))
            .changed()
        {
            self.submit(OverlayPatch {
                opacity: Some(opacity),
                ..Default::default()
            });
        }
    }

    fn size_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Size").strong());
        let mut size = self.draft.size;
        egui::ComboBox::from_id_source("overlay_size")
            .selected_text(size.label())
            .show_ui(ui, |ui| {
                for mode in SizeMode::ALL {
                    ui.selectable_value(&mut size, mode, mode.label());
                }
            });
        if size != self.draft.size {
            self.submit(OverlayPatch {
                size: Some(size),
                ..Default::default()
            });
        }

        if self.draft.size == SizeMode::Custom {
            // Unclamped: a clamp range rewrites out-of-range values every frame.
            let mut width = self.draft.custom_width;
            let mut height = self.draft.custom_height;
            let mut patch = OverlayPatch::default();
            ui.horizontal(|ui| {
                ui.label("Width");
                if ui.add(egui::DragValue::new(&mut width).suffix(" px")).changed() {
                    patch.custom_width = Some(width);
                }
                ui.label("Height");
                if ui.add(egui::DragValue::new(&mut height).suffix(" px")).changed() {
                    patch.custom_height = Some(height);
                }
            });
            self.submit(patch);
        }
    }

    fn guide_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Reading guide").strong());
        let mut enabled = self.draft.reading_guide_enabled;
        if ui.checkbox(&mut enabled, "Show reading guide").changed() {
            self.submit(OverlayPatch {
                reading_guide_enabled: Some(enabled),
                ..Default::default()
            });
        }
        if !self.draft.reading_guide_enabled {
            return;
        }

        let mut patch = OverlayPatch::default();
        let mut height = self.draft.reading_guide_height;
        // Slider values are seeded in range so drawing never rewrites them.
        let mut position = self.draft.reading_guide_position.clamp(0.0, 100.0);
        let mut step = self.draft.reading_guide_step_size;
        let mut border_width = self.draft.reading_guide_border_width;
        let mut border_style = self.draft.reading_guide_border_style;

        egui::Grid::new("guide_settings").num_columns(2).show(ui, |ui| {
            ui.label("Height");
            if ui
                .add(egui::DragValue::new(&mut height).suffix(" px"))
                .changed()
            {
                patch.reading_guide_height = Some(height);
            }
            ui.end_row();

            ui.label("Position");
            if ui
                .add(egui::Slider::new(&mut position, 0.0..=100.0).suffix(" %"))
                .changed()
            {
                patch.reading_guide_position = Some(position);
            }
            ui.end_row();

            ui.label("Step");
            if ui
                .add(egui::DragValue::new(&mut step).speed(0.1).suffix(" %"))
                .changed()
            {
                patch.reading_guide_step_size = Some(step);
            }
            ui.end_row();

            ui.label("Border width");
            if ui
                .add(egui::DragValue::new(&mut border_width).suffix(" px"))
                .changed()
            {
                patch.reading_guide_border_width = Some(border_width);
            }
            ui.end_row();

            ui.label("Border style");
            egui::ComboBox::from_id_source("guide_border_style")
                .selected_text(border_style.label())
                .show_ui(ui, |ui| {
                    for style in BorderStyle::ALL {
                        ui.selectable_value(&mut border_style, style, style.label());
                    }
                });
            if border_style != self.draft.reading_guide_border_style {
                patch.reading_guide_border_style = Some(border_style);
            }
            ui.end_row();

            ui.label("Border color");
            ui.horizontal(|ui| {
                if let Some(color) = color_picker(ui, &self.draft.reading_guide_border_color) {
                    self.border_color_text = color.clone();
                    patch.reading_guide_border_color = Some(color);
                }
                let resp = ui.add(
                    egui::TextEdit::singleline(&mut self.border_color_text).desired_width(120.0),
                );
                if resp.lost_focus()
                    && self.border_color_text != self.draft.reading_guide_border_color
                {
                    patch.reading_guide_border_color =
                        Some(self.border_color_text.trim().to_string());
                }
            });
            ui.end_row();
        });

        self.submit(patch);
    }
}

/// sRGB picker seeded from a CSS color. Returns a hex string when changed.
fn color_picker(ui: &mut egui::Ui, current: &str) -> Option<String> {
    let seed = parse_css_color(current).unwrap_or(egui::Color32::WHITE);
    let [r, g, b, _] = seed.to_srgba_unmultiplied();
    let mut rgb = [r, g, b];
    if ui.color_edit_button_srgb(&mut rgb).changed() {
        Some(format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2]))
    } else {
        None
    }
}
