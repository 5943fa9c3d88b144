use crate::overlay::geometry::Placement;
use crate::overlay::messages::OwnerToOverlay;
use crate::overlay::render::{self, OverlayPaint};
use crate::overlay::state::OverlayState;
use eframe::egui;

pub const OVERLAY_VIEWPORT_TITLE: &str = "Reading Overlay Tint";

/// The tint window as the owner sees it. Implementations only render what
/// they are pushed and report whether they are actually on screen.
pub trait OverlaySurface {
    fn is_visible(&self) -> bool;
    fn show(&mut self);
    fn hide(&mut self);
    fn apply_placement(&mut self, placement: Placement);
    fn handle(&mut self, msg: OwnerToOverlay);
}

/// Viewport commands that move the overlay to `placement`. Bounded
/// placements leave full screen before moving.
pub fn placement_commands(placement: Placement) -> Vec<egui::ViewportCommand> {
    match placement {
        Placement::Fullscreen => vec![egui::ViewportCommand::Fullscreen(true)],
        Placement::Bounds(b) => vec![
            egui::ViewportCommand::Fullscreen(false),
            egui::ViewportCommand::OuterPosition(egui::pos2(b.x as f32, b.y as f32)),
            egui::ViewportCommand::InnerSize(egui::vec2(b.width as f32, b.height as f32)),
        ],
    }
}

pub fn overlay_viewport_id() -> egui::ViewportId {
    egui::ViewportId::from_hash_of("reading_overlay_tint")
}

/// Builder used whenever the overlay window is (re)created.
pub fn viewport_builder(placement: Placement) -> egui::ViewportBuilder {
    let builder = egui::ViewportBuilder::default()
        .with_title(OVERLAY_VIEWPORT_TITLE)
        .with_transparent(true)
        .with_decorations(false)
        .with_always_on_top()
        .with_mouse_passthrough(true)
        .with_taskbar(false)
        .with_resizable(false);
    match placement {
        Placement::Fullscreen => builder.with_fullscreen(true),
        Placement::Bounds(b) => builder
            .with_fullscreen(false)
            .with_position(egui::pos2(b.x as f32, b.y as f32))
            .with_inner_size(egui::vec2(b.width as f32, b.height as f32)),
    }
}

/// egui immediate viewport showing the tint.
pub struct OverlayWindow {
    visible: bool,
    placement: Placement,
    paint: Option<OverlayPaint>,
    pending: Vec<egui::ViewportCommand>,
}

impl Default for OverlayWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayWindow {
    pub fn new() -> Self {
        Self {
            visible: false,
            placement: Placement::Fullscreen,
            paint: None,
            pending: Vec::new(),
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn paint(&self) -> Option<&OverlayPaint> {
        self.paint.as_ref()
    }

    pub fn pending_commands(&self) -> &[egui::ViewportCommand] {
        &self.pending
    }

    /// Draw the overlay for this frame. Must be called every frame from the
    /// root viewport; not calling it closes the window.
    pub fn show_viewport(&mut self, ctx: &egui::Context) {
        if !self.visible {
            self.pending.clear();
            return;
        }
        let id = overlay_viewport_id();
        for cmd in self.pending.drain(..) {
            ctx.send_viewport_cmd_to(id, cmd);
        }
        let paint = self.paint.clone();
        let closed = ctx.show_viewport_immediate(id, viewport_builder(self.placement), |ctx, _class| {
            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    if let Some(paint) = &paint {
                        render::paint(ui.painter(), ui.max_rect(), paint);
                    }
                });
            ctx.input(|i| i.viewport().close_requested())
        });
        if closed {
            // The platform closed us behind the owner's back; the next toggle
            // reads this rather than the stored flag.
            tracing::debug!("overlay viewport closed externally");
            self.visible = false;
        }
    }

    fn push(&mut self, snapshot: &OverlayState) {
        self.paint = Some(render::derive_paint(snapshot));
    }
}

impl OverlaySurface for OverlayWindow {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn apply_placement(&mut self, placement: Placement) {
        self.placement = placement;
        if self.visible {
            self.pending.extend(placement_commands(placement));
        }
    }

    fn handle(&mut self, msg: OwnerToOverlay) {
        match msg {
            OwnerToOverlay::UpdateOverlay(snapshot) => self.push(&snapshot),
        }
    }
}
