mod control_panel;

pub use control_panel::ControlPanel;

use crate::hotkey::{HotkeyAction, HotkeyDispatcher};
use crate::overlay::messages::{ControlToOwner, OwnerToControl};
use crate::overlay::monitor;
use crate::overlay::state::{GuideDirection, OverlayState};
use crate::overlay::store::StatePersistence;
use crate::overlay::surface::OverlaySurface;
use crate::overlay::{OverlayOwner, OverlayWindow, StateStore, WorkArea};
use crate::settings::Settings;
use crate::visibility;
use eframe::egui;
use std::sync::mpsc::{channel, Receiver};

/// Routes messages between the control panel and the overlay owner. Both
/// ends live on the UI thread; channels keep them decoupled.
pub struct MessageHub<S, P> {
    pub owner: OverlayOwner<S, P>,
    pub panel: ControlPanel,
    from_panel: Receiver<ControlToOwner>,
    to_panel: Receiver<OwnerToControl>,
}

impl<S: OverlaySurface, P: StatePersistence> MessageHub<S, P> {
    pub fn new(
        state: OverlayState,
        surface: S,
        store: P,
        work_area: WorkArea,
        hotkey_hints: Vec<(String, String)>,
    ) -> Self {
        let (panel_tx, from_panel) = channel();
        let (owner_tx, to_panel) = channel();
        let owner = OverlayOwner::new(state, surface, store, work_area, owner_tx);
        let panel = ControlPanel::new(panel_tx, hotkey_hints);
        Self {
            owner,
            panel,
            from_panel,
            to_panel,
        }
    }

    /// Deliver queued messages in both directions until both queues are empty.
    /// Returns true if anything was delivered.
    pub fn pump(&mut self) -> bool {
        let mut delivered = false;
        loop {
            let requests: Vec<_> = self.from_panel.try_iter().collect();
            let replies: Vec<_> = self.to_panel.try_iter().collect();
            if requests.is_empty() && replies.is_empty() {
                return delivered;
            }
            delivered = true;
            for msg in replies {
                self.panel.handle(msg);
            }
            for msg in requests {
                self.owner.handle(msg);
            }
        }
    }

    /// Apply one hotkey action. Returns false for actions the owner does not
    /// handle (showing the control window).
    pub fn apply_hotkey(&mut self, action: HotkeyAction) -> bool {
        match action {
            HotkeyAction::ToggleOverlay => {
                self.owner.toggle();
            }
            HotkeyAction::GuideUp | HotkeyAction::GuideDown => {
                let direction = if action == HotkeyAction::GuideUp {
                    GuideDirection::Up
                } else {
                    GuideDirection::Down
                };
                if self.owner.nudge_guide(direction) {
                    // Keep the panel's position slider in step.
                    self.owner.handle(ControlToOwner::GetOverlayState);
                }
            }
            HotkeyAction::ShowControls => return false,
        }
        true
    }
}

pub struct ControlApp {
    hub: MessageHub<OverlayWindow, StateStore>,
    hotkeys: HotkeyDispatcher,
    stay_resident: bool,
}

impl ControlApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: &Settings,
        store: StateStore,
        state: OverlayState,
    ) -> Self {
        let bindings = settings.hotkey_bindings();
        let hints = bindings
            .iter()
            .map(|b| (action_label(b.action).to_string(), b.hotkey.to_string()))
            .collect();
        let work_area = monitor::primary_work_area(&cc.egui_ctx).unwrap_or_default();

        let mut hub = MessageHub::new(state, OverlayWindow::new(), store, work_area, hints);
        hub.owner.start();
        hub.panel.view_ready();
        hub.pump();

        let hotkeys = HotkeyDispatcher::new(bindings);
        let wake = cc.egui_ctx.clone();
        hotkeys.start_listener(move || wake.request_repaint());

        Self {
            hub,
            hotkeys,
            stay_resident: settings.stays_resident(),
        }
    }

    fn dispatch_hotkeys(&mut self, ctx: &egui::Context) {
        for action in self.hotkeys.drain() {
            if !self.hub.apply_hotkey(action) {
                visibility::show_controls(ctx);
            }
        }
    }
}

fn action_label(action: HotkeyAction) -> &'static str {
    match action {
        HotkeyAction::ToggleOverlay => "Toggle overlay",
        HotkeyAction::GuideUp => "Guide up",
        HotkeyAction::GuideDown => "Guide down",
        HotkeyAction::ShowControls => "Show controls",
    }
}

impl eframe::App for ControlApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(area) = monitor::primary_work_area(ctx) {
            self.hub.owner.set_work_area(area);
        }
        self.dispatch_hotkeys(ctx);
        self.hub.pump();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| self.hub.panel.ui(ui));
        });

        if self.hub.pump() {
            ctx.request_repaint();
        }

        self.hub.owner.surface_mut().show_viewport(ctx);

        if ctx.input(|i| i.viewport().close_requested()) {
            visibility::handle_control_close(ctx, self.stay_resident);
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // Shared by the overlay viewport, which must start see-through.
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.hotkeys.release_all();
    }
}
