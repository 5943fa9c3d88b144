use reading_overlay::overlay::messages::{ControlToOwner, OwnerToControl};
use reading_overlay::overlay::{
    Bounds, GuideDirection, OverlayOwner, OverlayPatch, OverlayState, Placement, SizeMode,
    WorkArea,
};
use std::sync::mpsc::{channel, Receiver};

use fake_surface::{FakeSurface, RecordingStore, SurfaceEvent};

struct Harness {
    owner: OverlayOwner<FakeSurface, RecordingStore>,
    surface: FakeSurface,
    store: RecordingStore,
    control: Receiver<OwnerToControl>,
}

fn harness(state: OverlayState) -> Harness {
    let surface = FakeSurface::default();
    let store = RecordingStore::default();
    let (tx, control) = channel();
    let owner = OverlayOwner::new(
        state,
        surface.clone(),
        store.clone(),
        WorkArea::new(1920, 1080),
        tx,
    );
    Harness {
        owner,
        surface,
        store,
        control,
    }
}

fn active_with_guide() -> OverlayState {
    OverlayState {
        is_active: true,
        reading_guide_enabled: true,
        reading_guide_position: 50.0,
        reading_guide_step_size: 5.0,
        ..Default::default()
    }
}

#[test]
fn update_merges_persists_and_broadcasts_full_snapshot() {
    let mut h = harness(OverlayState::default());
    h.owner.update(&OverlayPatch {
        color: Some("#00FF00".into()),
        ..Default::default()
    });

    let expected = OverlayState {
        color: "#00FF00".into(),
        ..Default::default()
    };
    assert_eq!(h.owner.state(), &expected);
    assert_eq!(h.store.saves.borrow().as_slice(), &[expected.clone()]);
    assert_eq!(
        h.surface.events.borrow().as_slice(),
        &[SurfaceEvent::Push(expected)]
    );
}

#[test]
fn size_change_places_window_before_broadcast() {
    let mut h = harness(OverlayState::default());
    h.owner.update(&OverlayPatch {
        size: Some(SizeMode::TopHalf),
        ..Default::default()
    });

    let events = h.surface.events.borrow();
    assert_eq!(
        events[0],
        SurfaceEvent::Place(Placement::Bounds(Bounds {
            x: 0,
            y: 0,
            width: 1920,
            height: 540
        }))
    );
    assert!(matches!(events[1], SurfaceEvent::Push(_)));
    assert_eq!(events.len(), 2);
}

#[test]
fn unchanged_size_does_not_touch_geometry() {
    let mut h = harness(OverlayState::default());
    h.owner.update(&OverlayPatch {
        size: Some(SizeMode::Fullscreen),
        opacity: Some(0.6),
        ..Default::default()
    });
    assert!(!h
        .surface
        .events
        .borrow()
        .iter()
        .any(|e| matches!(e, SurfaceEvent::Place(_))));
}

#[test]
fn update_reconciles_visibility_with_is_active() {
    let mut h = harness(OverlayState::default());

    h.owner.update(&OverlayPatch {
        is_active: Some(true),
        ..Default::default()
    });
    assert!(h.surface.visible.get());
    assert_eq!(h.surface.events.borrow().last(), Some(&SurfaceEvent::Show));

    h.surface.clear();
    h.owner.update(&OverlayPatch {
        opacity: Some(0.4),
        ..Default::default()
    });
    assert!(!h
        .surface
        .events
        .borrow()
        .iter()
        .any(|e| matches!(e, SurfaceEvent::Show | SurfaceEvent::Hide)));

    h.owner.update(&OverlayPatch {
        is_active: Some(false),
        ..Default::default()
    });
    assert!(!h.surface.visible.get());
}

#[test]
fn toggle_twice_follows_actual_visibility_despite_drift() {
    // Stored flag claims active while the surface is hidden.
    let mut h = harness(OverlayState {
        is_active: true,
        ..Default::default()
    });

    assert!(h.owner.toggle());
    assert!(h.owner.state().is_active);
    assert!(h.surface.visible.get());

    assert!(!h.owner.toggle());
    assert!(!h.owner.state().is_active);
    assert!(!h.surface.visible.get());

    let notices: Vec<_> = h.control.try_iter().collect();
    assert_eq!(
        notices,
        vec![
            OwnerToControl::OverlayToggled(true),
            OwnerToControl::OverlayToggled(false)
        ]
    );
}

#[test]
fn activation_pushes_snapshot_before_reveal() {
    let mut h = harness(OverlayState::default());
    h.owner.toggle();

    let events = h.surface.events.borrow();
    let push = events
        .iter()
        .position(|e| matches!(e, SurfaceEvent::Push(s) if s.is_active))
        .expect("active snapshot pushed");
    let show = events
        .iter()
        .position(|e| *e == SurfaceEvent::Show)
        .expect("surface shown");
    assert!(push < show);
}

#[test]
fn toggle_persists_new_flag() {
    let mut h = harness(OverlayState::default());
    h.owner.toggle();
    assert_eq!(h.store.saves.borrow().last().map(|s| s.is_active), Some(true));
}

#[test]
fn nudge_moves_pushes_and_persists() {
    let mut h = harness(active_with_guide());
    assert!(h.owner.nudge_guide(GuideDirection::Up));
    assert_eq!(h.owner.state().reading_guide_position, 45.0);
    assert_eq!(h.surface.last_push().map(|s| s.reading_guide_position), Some(45.0));
    assert_eq!(h.store.saves.borrow().len(), 1);

    assert!(h.owner.nudge_guide(GuideDirection::Down));
    assert!(h.owner.nudge_guide(GuideDirection::Down));
    assert_eq!(h.owner.state().reading_guide_position, 55.0);
}

#[test]
fn rapid_nudges_clamp_independently() {
    let mut h = harness(OverlayState {
        reading_guide_position: 97.0,
        ..active_with_guide()
    });
    for _ in 0..10 {
        h.owner.nudge_guide(GuideDirection::Down);
    }
    assert_eq!(h.owner.state().reading_guide_position, 100.0);
    assert_eq!(h.store.saves.borrow().len(), 10);
    assert!(h
        .store
        .saves
        .borrow()
        .iter()
        .all(|s| (0.0..=100.0).contains(&s.reading_guide_position)));
}

#[test]
fn nudge_is_noop_when_guide_disabled_or_overlay_inactive() {
    for state in [
        OverlayState {
            reading_guide_enabled: false,
            ..active_with_guide()
        },
        OverlayState {
            is_active: false,
            ..active_with_guide()
        },
    ] {
        let mut h = harness(state.clone());
        assert!(!h.owner.nudge_guide(GuideDirection::Up));
        assert!(!h.owner.nudge_guide(GuideDirection::Down));
        assert_eq!(h.owner.state(), &state);
        assert!(h.store.saves.borrow().is_empty());
        assert_eq!(h.surface.pushes(), 0);
    }
}

#[test]
fn control_messages_are_routed() {
    let mut h = harness(OverlayState::default());

    h.owner.handle(ControlToOwner::UpdateOverlay(OverlayPatch {
        opacity: Some(0.7),
        ..Default::default()
    }));
    h.owner.handle(ControlToOwner::GetOverlayState);
    h.owner.handle(ControlToOwner::ToggleOverlay);

    let replies: Vec<_> = h.control.try_iter().collect();
    assert_eq!(
        replies,
        vec![
            OwnerToControl::OverlayState(OverlayState {
                opacity: 0.7,
                ..Default::default()
            }),
            OwnerToControl::OverlayToggled(true),
        ]
    );
}

#[test]
fn saved_state_is_delivered_to_control_once() {
    let mut h = harness(active_with_guide());
    h.owner.handle(ControlToOwner::ViewReady);
    h.owner.handle(ControlToOwner::ViewReady);

    let replies: Vec<_> = h.control.try_iter().collect();
    assert_eq!(replies, vec![OwnerToControl::LoadSavedState(active_with_guide())]);
}

#[test]
fn persist_failure_is_reported_and_state_still_applied() {
    let mut h = harness(OverlayState::default());
    h.store.fail.set(true);

    h.owner.update(&OverlayPatch {
        color: Some("teal".into()),
        ..Default::default()
    });

    assert_eq!(h.owner.state().color, "teal");
    assert_eq!(h.surface.pushes(), 1);
    match h.control.try_recv() {
        Ok(OwnerToControl::PersistFailed { error }) => assert!(error.contains("disk full")),
        other => panic!("expected persist failure, got {other:?}"),
    }
}

#[test]
fn start_places_and_reveals_active_state() {
    let mut h = harness(OverlayState {
        is_active: true,
        size: SizeMode::Center,
        ..Default::default()
    });
    h.owner.start();

    let events = h.surface.events.borrow();
    assert_eq!(
        events[0],
        SurfaceEvent::Place(Placement::Bounds(Bounds {
            x: 288,
            y: 162,
            width: 1344,
            height: 756
        }))
    );
    assert!(matches!(events[1], SurfaceEvent::Push(_)));
    assert_eq!(events[2], SurfaceEvent::Show);
}

#[test]
fn work_area_change_re_resolves_placement() {
    let mut h = harness(OverlayState {
        size: SizeMode::LeftHalf,
        ..Default::default()
    });
    h.owner.set_work_area(WorkArea::new(1920, 1080));
    assert!(h.surface.events.borrow().is_empty());

    h.owner.set_work_area(WorkArea::new(2560, 1440));
    assert_eq!(
        h.surface.events.borrow().as_slice(),
        &[SurfaceEvent::Place(Placement::Bounds(Bounds {
            x: 0,
            y: 0,
            width: 1280,
            height: 1440
        }))]
    );
}
