use reading_overlay::overlay::{resolve_placement, Bounds, Placement, SizeMode, WorkArea};

const DISPLAY: WorkArea = WorkArea::new(1920, 1080);

fn bounds(size: SizeMode, w: u32, h: u32) -> Bounds {
    match resolve_placement(size, w, h, DISPLAY) {
        Placement::Bounds(b) => b,
        Placement::Fullscreen => panic!("{size:?} should resolve to bounds"),
    }
}

#[test]
fn fullscreen_sets_the_flag_without_bounds() {
    assert_eq!(
        resolve_placement(SizeMode::Fullscreen, 10, 10, DISPLAY),
        Placement::Fullscreen
    );
}

#[test]
fn halves_split_the_display() {
    assert_eq!(
        bounds(SizeMode::TopHalf, 0, 0),
        Bounds { x: 0, y: 0, width: 1920, height: 540 }
    );
    assert_eq!(
        bounds(SizeMode::BottomHalf, 0, 0),
        Bounds { x: 0, y: 540, width: 1920, height: 540 }
    );
    assert_eq!(
        bounds(SizeMode::LeftHalf, 0, 0),
        Bounds { x: 0, y: 0, width: 960, height: 1080 }
    );
    assert_eq!(
        bounds(SizeMode::RightHalf, 0, 0),
        Bounds { x: 960, y: 0, width: 960, height: 1080 }
    );
}

#[test]
fn center_is_seventy_percent_and_centered() {
    assert_eq!(
        bounds(SizeMode::Center, 0, 0),
        Bounds { x: 288, y: 162, width: 1344, height: 756 }
    );
}

#[test]
fn center_floors_on_odd_displays() {
    let placement = resolve_placement(SizeMode::Center, 0, 0, WorkArea::new(1001, 333));
    assert_eq!(
        placement,
        Placement::Bounds(Bounds { x: 150, y: 50, width: 700, height: 233 })
    );
}

#[test]
fn custom_is_clamped_to_the_display_and_centered() {
    assert_eq!(
        bounds(SizeMode::Custom, 3000, 600),
        Bounds { x: 0, y: 240, width: 1920, height: 600 }
    );
    assert_eq!(
        bounds(SizeMode::Custom, 800, 5000),
        Bounds { x: 560, y: 0, width: 800, height: 1080 }
    );
}

#[test]
fn custom_zero_size_is_passed_through() {
    assert_eq!(
        bounds(SizeMode::Custom, 0, 0),
        Bounds { x: 960, y: 540, width: 0, height: 0 }
    );
}
