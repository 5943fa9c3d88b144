use eframe::egui::{Color32, Pos2, Rect};
use reading_overlay::overlay::render::{
    border_layers, derive_paint, guide_rect, layer_rect, painted_opacity, GuideEdge,
};
use reading_overlay::overlay::{BorderStyle, OverlayState};

fn active() -> OverlayState {
    OverlayState {
        is_active: true,
        ..Default::default()
    }
}

#[test]
fn inactive_overlay_paints_nothing_but_keeps_stored_opacity() {
    let state = OverlayState {
        opacity: 0.6,
        ..Default::default()
    };
    assert_eq!(painted_opacity(&state), 0.0);
    assert_eq!(derive_paint(&state).tint.a(), 0);
    assert_eq!(state.opacity, 0.6);
}

#[test]
fn active_tint_uses_stored_opacity() {
    let paint = derive_paint(&OverlayState {
        opacity: 0.5,
        ..active()
    });
    assert_eq!(paint.tint.a(), 128);
}

#[test]
fn invalid_color_paints_transparent() {
    let paint = derive_paint(&OverlayState {
        color: "definitely not a color".into(),
        ..active()
    });
    assert_eq!(paint.tint, Color32::TRANSPARENT);
}

#[test]
fn guide_only_painted_when_enabled_and_active() {
    let enabled = OverlayState {
        reading_guide_enabled: true,
        ..active()
    };
    assert!(derive_paint(&enabled).guide.is_some());

    let inactive = OverlayState {
        is_active: false,
        ..enabled.clone()
    };
    assert!(derive_paint(&inactive).guide.is_none());

    assert!(derive_paint(&active()).guide.is_none());
}

#[test]
fn single_border_is_one_layer() {
    let layers = border_layers(&OverlayState {
        reading_guide_border_style: BorderStyle::Single,
        reading_guide_border_width: 3,
        reading_guide_border_color: "#FF0000".into(),
        ..Default::default()
    });
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].width, 3.0);
    assert_eq!(layers[0].color, Color32::from_rgb(255, 0, 0));
}

#[test]
fn double_border_mirrors_width_and_color() {
    let layers = border_layers(&OverlayState {
        reading_guide_border_style: BorderStyle::Double,
        reading_guide_border_width: 4,
        reading_guide_border_color: "navy".into(),
        ..Default::default()
    });
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].edge, GuideEdge::Leading);
    assert_eq!(layers[1].edge, GuideEdge::Trailing);
    assert_eq!(layers[0].width, layers[1].width);
    assert_eq!(layers[0].color, layers[1].color);
}

#[test]
fn border_layers_sit_outside_the_band() {
    let state = OverlayState {
        reading_guide_enabled: true,
        reading_guide_height: 40,
        reading_guide_position: 50.0,
        reading_guide_border_style: BorderStyle::Double,
        reading_guide_border_width: 2,
        ..active()
    };
    let guide = derive_paint(&state).guide.expect("guide painted");
    let surface = Rect::from_min_max(Pos2::ZERO, Pos2::new(800.0, 600.0));
    let band = guide_rect(surface, &guide);
    assert_eq!((band.top(), band.bottom()), (280.0, 320.0));

    let top = layer_rect(band, &guide.layers[0]);
    let bottom = layer_rect(band, &guide.layers[1]);
    assert_eq!((top.top(), top.bottom()), (278.0, 280.0));
    assert_eq!((bottom.top(), bottom.bottom()), (320.0, 322.0));
    assert_eq!(top.width(), 800.0);
}

#[test]
fn guide_position_is_clamped_for_painting() {
    let state = OverlayState {
        reading_guide_enabled: true,
        reading_guide_position: 140.0,
        ..active()
    };
    let guide = derive_paint(&state).guide.expect("guide painted");
    assert_eq!(guide.position_percent, 100.0);
}
