use eframe::egui::ViewportCommand;
use reading_overlay::visibility::{handle_control_close, show_controls};

use mock_ctx::MockCtx;

#[test]
fn resident_close_hides_instead_of_exiting() {
    let ctx = MockCtx::default();
    assert!(handle_control_close(&ctx, true));
    assert_eq!(
        ctx.commands.lock().unwrap().as_slice(),
        &[ViewportCommand::CancelClose, ViewportCommand::Visible(false)]
    );
}

#[test]
fn non_resident_close_lets_the_window_go() {
    let ctx = MockCtx::default();
    assert!(!handle_control_close(&ctx, false));
    assert!(ctx.commands.lock().unwrap().is_empty());
}

#[test]
fn show_controls_restores_and_focuses() {
    let ctx = MockCtx::default();
    show_controls(&ctx);
    assert_eq!(
        ctx.commands.lock().unwrap().as_slice(),
        &[
            ViewportCommand::Visible(true),
            ViewportCommand::Minimized(false),
            ViewportCommand::Focus,
        ]
    );
    assert_eq!(*ctx.repaints.lock().unwrap(), 1);
}
