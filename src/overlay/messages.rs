use crate::overlay::state::{OverlayPatch, OverlayState};

/// Requests from the control window to the overlay owner.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlToOwner {
    UpdateOverlay(OverlayPatch),
    GetOverlayState,
    ToggleOverlay,
    ViewReady,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OwnerToControl {
    OverlayToggled(bool),
    LoadSavedState(OverlayState),
    OverlayState(OverlayState),
    PersistFailed { error: String },
}

/// Full snapshots only; the overlay never receives deltas.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnerToOverlay {
    UpdateOverlay(OverlayState),
}
