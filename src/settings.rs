use crate::hotkey::{
    parse_hotkey, Hotkey, HotkeyAction, HotkeyBinding, DEFAULT_GUIDE_DOWN_HOTKEY,
    DEFAULT_GUIDE_UP_HOTKEY, DEFAULT_SHOW_CONTROLS_HOTKEY, DEFAULT_TOGGLE_HOTKEY,
};
use crate::overlay::store::OVERLAY_STATE_FILE_NAME;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const SETTINGS_FILE_NAME: &str = "settings.json";
const APP_DIR_NAME: &str = "reading-overlay";

/// Per-user configuration directory, created on first use. Falls back to the
/// executable's folder when the platform has no config dir.
pub fn app_dir() -> PathBuf {
    static DIR: Lazy<PathBuf> = Lazy::new(|| {
        let base = dirs_next::config_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .or_else(|| {
                std::env::current_exe()
                    .ok()
                    .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            })
            .unwrap_or_else(|| PathBuf::from("."));
        let _ = std::fs::create_dir_all(&base);
        base
    });
    DIR.clone()
}

pub fn default_settings_path() -> PathBuf {
    app_dir().join(SETTINGS_FILE_NAME)
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_toggle_hotkey")]
    pub toggle_hotkey: Option<String>,
    #[serde(default = "default_guide_up_hotkey")]
    pub guide_up_hotkey: Option<String>,
    #[serde(default = "default_guide_down_hotkey")]
    pub guide_down_hotkey: Option<String>,
    /// Brings the control window back when it was hidden by closing it.
    #[serde(default = "default_show_controls_hotkey")]
    pub show_controls_hotkey: Option<String>,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Write logs to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Overrides where the overlay state is persisted.
    #[serde(default)]
    pub state_file: Option<String>,
    /// Keep running after the control window closes. Defaults to the
    /// platform convention when unset.
    #[serde(default)]
    pub stay_resident_on_close: Option<bool>,
}

fn default_toggle_hotkey() -> Option<String> {
    Some(DEFAULT_TOGGLE_HOTKEY.into())
}

fn default_guide_up_hotkey() -> Option<String> {
    Some(DEFAULT_GUIDE_UP_HOTKEY.into())
}

fn default_guide_down_hotkey() -> Option<String> {
    Some(DEFAULT_GUIDE_DOWN_HOTKEY.into())
}

fn default_show_controls_hotkey() -> Option<String> {
    Some(DEFAULT_SHOW_CONTROLS_HOTKEY.into())
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            toggle_hotkey: default_toggle_hotkey(),
            guide_up_hotkey: default_guide_up_hotkey(),
            guide_down_hotkey: default_guide_down_hotkey(),
            show_controls_hotkey: default_show_controls_hotkey(),
            debug_logging: false,
            log_file: None,
            state_file: None,
            stay_resident_on_close: None,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Like [`Settings::load`], but a malformed file yields the defaults. The
    /// error is handed back so it can be logged once logging is up.
    pub fn load_or_default(path: &str) -> (Self, Option<anyhow::Error>) {
        match Self::load(path) {
            Ok(settings) => (settings, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn state_path(&self) -> PathBuf {
        match &self.state_file {
            Some(path) => PathBuf::from(path),
            None => app_dir().join(OVERLAY_STATE_FILE_NAME),
        }
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.as_ref().map(PathBuf::from)
    }

    pub fn stays_resident(&self) -> bool {
        self.stay_resident_on_close
            .unwrap_or_else(crate::visibility::platform_stays_resident)
    }

    pub fn toggle_hotkey(&self) -> Option<Hotkey> {
        resolve_hotkey("toggle_hotkey", &self.toggle_hotkey, DEFAULT_TOGGLE_HOTKEY)
    }

    pub fn guide_up_hotkey(&self) -> Option<Hotkey> {
        resolve_hotkey("guide_up_hotkey", &self.guide_up_hotkey, DEFAULT_GUIDE_UP_HOTKEY)
    }

    pub fn guide_down_hotkey(&self) -> Option<Hotkey> {
        resolve_hotkey(
            "guide_down_hotkey",
            &self.guide_down_hotkey,
            DEFAULT_GUIDE_DOWN_HOTKEY,
        )
    }

    pub fn show_controls_hotkey(&self) -> Option<Hotkey> {
        resolve_hotkey(
            "show_controls_hotkey",
            &self.show_controls_hotkey,
            DEFAULT_SHOW_CONTROLS_HOTKEY,
        )
    }

    /// Every configured hotkey paired with what it does.
    pub fn hotkey_bindings(&self) -> Vec<HotkeyBinding> {
        [
            (self.toggle_hotkey(), HotkeyAction::ToggleOverlay),
            (self.guide_up_hotkey(), HotkeyAction::GuideUp),
            (self.guide_down_hotkey(), HotkeyAction::GuideDown),
            (self.show_controls_hotkey(), HotkeyAction::ShowControls),
        ]
        .into_iter()
        .filter_map(|(hotkey, action)| hotkey.map(|hotkey| HotkeyBinding { hotkey, action }))
        .collect()
    }
}

/// `None` in the settings disables the hotkey; an unparsable string falls
/// back to the default combination.
fn resolve_hotkey(name: &str, configured: &Option<String>, default: &str) -> Option<Hotkey> {
    let raw = configured.as_ref()?;
    match parse_hotkey(raw) {
        Some(k) => Some(k),
        None => {
            tracing::warn!(
                "provided {} string '{}' is invalid; using default {}",
                name,
                raw,
                default
            );
            parse_hotkey(default)
        }
    }
}
