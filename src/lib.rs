pub mod gui;
pub mod hotkey;
pub mod logging;
pub mod overlay;
pub mod settings;
pub mod visibility;
