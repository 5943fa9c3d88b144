use eframe::egui;

/// The slice of an egui context the control window's visibility logic needs.
pub trait ViewportCtx {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand);
    fn request_repaint(&self);
}

impl ViewportCtx for egui::Context {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand) {
        egui::Context::send_viewport_cmd(self, cmd);
    }

    fn request_repaint(&self) {
        egui::Context::request_repaint(self);
    }
}

/// Whether closing the control window leaves the process running. macOS apps
/// stay resident until quit; elsewhere closing the last window exits.
pub fn platform_stays_resident() -> bool {
    cfg!(target_os = "macos")
}

/// React to a close request on the control window. Returns true when the
/// process should keep running with the control window hidden.
pub fn handle_control_close<C: ViewportCtx>(ctx: &C, stay_resident: bool) -> bool {
    if !stay_resident {
        tracing::info!("control window closed, exiting");
        return false;
    }
    tracing::debug!("control window hidden, staying resident");
    ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
    ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
    true
}

/// Bring the control window back to the front.
pub fn show_controls<C: ViewportCtx>(ctx: &C) {
    ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
    ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(false));
    ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
    ctx.request_repaint();
}
