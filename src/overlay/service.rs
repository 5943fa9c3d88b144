use crate::overlay::geometry::{resolve_placement, Placement, WorkArea};
use crate::overlay::messages::{ControlToOwner, OwnerToControl, OwnerToOverlay};
use crate::overlay::state::{nudged_guide_position, GuideDirection, OverlayPatch, OverlayState};
use crate::overlay::store::StatePersistence;
use crate::overlay::surface::OverlaySurface;
use std::sync::mpsc::Sender;

/// Sole owner of the overlay state. Every mutation goes through here and ends
/// with persist and broadcast calls.
pub struct OverlayOwner<S, P> {
    state: OverlayState,
    surface: S,
    store: P,
    work_area: WorkArea,
    to_control: Sender<OwnerToControl>,
    control_loaded: bool,
}

impl<S: OverlaySurface, P: StatePersistence> OverlayOwner<S, P> {
    pub fn new(
        state: OverlayState,
        surface: S,
        store: P,
        work_area: WorkArea,
        to_control: Sender<OwnerToControl>,
    ) -> Self {
        Self {
            state,
            surface,
            store,
            work_area,
            to_control,
            control_loaded: false,
        }
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn placement(&self) -> Placement {
        resolve_placement(
            self.state.size,
            self.state.custom_width,
            self.state.custom_height,
            self.work_area,
        )
    }

    /// Place the surface and reveal it when the loaded state says so.
    pub fn start(&mut self) {
        self.surface.apply_placement(self.placement());
        self.push();
        self.reconcile_visibility();
        tracing::info!(active = self.state.is_active, size = ?self.state.size, "overlay owner started");
    }

    pub fn handle(&mut self, msg: ControlToOwner) {
        match msg {
            ControlToOwner::UpdateOverlay(patch) => self.update(&patch),
            ControlToOwner::GetOverlayState => {
                self.notify(OwnerToControl::OverlayState(self.state.clone()));
            }
            ControlToOwner::ToggleOverlay => {
                self.toggle();
            }
            ControlToOwner::ViewReady => self.control_ready(),
        }
    }

    /// Merge, persist, re-place if the size changed, broadcast, then make the
    /// surface visibility match `is_active`.
    pub fn update(&mut self, patch: &OverlayPatch) {
        let previous = self.state.clone();
        self.state.apply(patch);
        tracing::debug!(?patch, "overlay state updated");
        self.persist();
        if previous.geometry_differs(&self.state) {
            let placement = self.placement();
            tracing::debug!(?placement, "overlay geometry changed");
            self.surface.apply_placement(placement);
        }
        self.push();
        self.reconcile_visibility();
    }

    /// Flip activation from what is actually on screen. Returns the new value.
    pub fn toggle(&mut self) -> bool {
        let active = !self.surface.is_visible();
        self.state.is_active = active;
        self.push();
        if active {
            self.surface.show();
        } else {
            self.surface.hide();
        }
        self.persist();
        tracing::info!(active, "overlay toggled");
        self.notify(OwnerToControl::OverlayToggled(active));
        active
    }

    /// Returns false when the guide is disabled or the overlay inactive.
    pub fn nudge_guide(&mut self, direction: GuideDirection) -> bool {
        if !self.state.guide_nudge_allowed() {
            return false;
        }
        self.state.reading_guide_position = nudged_guide_position(
            self.state.reading_guide_position,
            self.state.reading_guide_step_size,
            direction,
        );
        tracing::debug!(
            ?direction,
            position = self.state.reading_guide_position,
            "reading guide moved"
        );
        self.push();
        self.persist();
        true
    }

    /// One-time delivery of the loaded state to the control window.
    pub fn control_ready(&mut self) {
        if self.control_loaded {
            return;
        }
        self.control_loaded = true;
        self.notify(OwnerToControl::LoadSavedState(self.state.clone()));
    }

    pub fn set_work_area(&mut self, area: WorkArea) {
        if area == self.work_area {
            return;
        }
        tracing::debug!(?area, "primary work area changed");
        self.work_area = area;
        self.surface.apply_placement(self.placement());
    }

    fn push(&mut self) {
        self.surface
            .handle(OwnerToOverlay::UpdateOverlay(self.state.clone()));
    }

    fn reconcile_visibility(&mut self) {
        let visible = self.surface.is_visible();
        if self.state.is_active && !visible {
            self.surface.show();
        } else if !self.state.is_active && visible {
            self.surface.hide();
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.state) {
            tracing::warn!("failed to save overlay state: {e:#}");
            self.notify(OwnerToControl::PersistFailed {
                error: format!("{e:#}"),
            });
        }
    }

    fn notify(&self, msg: OwnerToControl) {
        if self.to_control.send(msg).is_err() {
            tracing::debug!("control window is gone; dropping notification");
        }
    }
}
