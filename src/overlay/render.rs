//! Turns a state snapshot into paint for the overlay surface.
//!
//! Every snapshot is derived from scratch; nothing carries over between
//! frames except what the snapshot says.

use crate::overlay::state::{BorderStyle, OverlayState};
use eframe::egui::{self, Color32, Pos2, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPaint {
    pub tint: Color32,
    pub guide: Option<GuidePaint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuidePaint {
    /// Center of the band as a percentage of the surface height.
    pub position_percent: f32,
    pub height: f32,
    pub layers: Vec<BorderLayer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideEdge {
    Leading,
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderLayer {
    pub edge: GuideEdge,
    pub width: f32,
    pub color: Color32,
}

/// Opacity used for painting. The stored value is never touched.
pub fn painted_opacity(state: &OverlayState) -> f32 {
    if state.is_active {
        state.opacity.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub fn derive_paint(state: &OverlayState) -> OverlayPaint {
    let opacity = painted_opacity(state);
    let tint = parse_css_color(&state.color)
        .map(|c| with_alpha_factor(c, opacity))
        .unwrap_or(Color32::TRANSPARENT);

    let guide = (state.reading_guide_enabled && state.is_active).then(|| GuidePaint {
        position_percent: state.reading_guide_position.clamp(0.0, 100.0),
        height: state.reading_guide_height as f32,
        layers: border_layers(state),
    });

    OverlayPaint { tint, guide }
}

pub fn border_layers(state: &OverlayState) -> Vec<BorderLayer> {
    let width = state.reading_guide_border_width as f32;
    let color = parse_css_color(&state.reading_guide_border_color).unwrap_or(Color32::TRANSPARENT);
    let layer = |edge| BorderLayer { edge, width, color };
    match state.reading_guide_border_style {
        BorderStyle::Single => vec![layer(GuideEdge::Leading)],
        BorderStyle::Double => vec![layer(GuideEdge::Leading), layer(GuideEdge::Trailing)],
    }
}

pub fn guide_rect(surface: Rect, guide: &GuidePaint) -> Rect {
    let center_y = surface.top() + surface.height() * guide.position_percent / 100.0;
    let half = guide.height / 2.0;
    Rect::from_min_max(
        Pos2::new(surface.left(), center_y - half),
        Pos2::new(surface.right(), center_y + half),
    )
}

/// Strip of a border layer, drawn outside the band like a CSS box shadow.
pub fn layer_rect(band: Rect, layer: &BorderLayer) -> Rect {
    match layer.edge {
        GuideEdge::Leading => Rect::from_min_max(
            Pos2::new(band.left(), band.top() - layer.width),
            Pos2::new(band.right(), band.top()),
        ),
        GuideEdge::Trailing => Rect::from_min_max(
            Pos2::new(band.left(), band.bottom()),
            Pos2::new(band.right(), band.bottom() + layer.width),
        ),
    }
}

pub fn paint(painter: &egui::Painter, surface: Rect, paint: &OverlayPaint) {
    painter.rect_filled(surface, 0.0, paint.tint);
    if let Some(guide) = &paint.guide {
        let band = guide_rect(surface, guide);
        for layer in &guide.layers {
            if layer.width > 0.0 {
                painter.rect_filled(layer_rect(band, layer), 0.0, layer.color);
            }
        }
    }
}

fn with_alpha_factor(color: Color32, factor: f32) -> Color32 {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let alpha = (a as f32 * factor.clamp(0.0, 1.0)).round() as u8;
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("pink", [255, 192, 203]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("silver", [192, 192, 192]),
    ("cyan", [0, 255, 255]),
    ("aqua", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("fuchsia", [255, 0, 255]),
    ("navy", [0, 0, 128]),
    ("teal", [0, 128, 128]),
    ("maroon", [128, 0, 0]),
    ("olive", [128, 128, 0]),
    ("lightblue", [173, 216, 230]),
    ("lightgreen", [144, 238, 144]),
    ("lightyellow", [255, 255, 224]),
    ("lightpink", [255, 182, 193]),
    ("lavender", [230, 230, 250]),
    ("peachpuff", [255, 218, 185]),
    ("wheat", [245, 222, 179]),
    ("beige", [245, 245, 220]),
    ("mintcream", [245, 255, 250]),
    ("aquamarine", [127, 255, 212]),
];

/// Parse the CSS color forms the control window produces: hex (`#rgb`,
/// `#rgba`, `#rrggbb`, `#rrggbbaa`), `rgb()` / `rgba()` and common names.
pub fn parse_css_color(value: &str) -> Option<Color32> {
    let value = value.trim().to_ascii_lowercase();
    if value == "transparent" {
        return Some(Color32::TRANSPARENT);
    }
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_args(args);
    }
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, [r, g, b])| Color32::from_rgb(*r, *g, *b))
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Color32::from_rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Color32::from_rgba_unmultiplied(
            nibble(0)?,
            nibble(1)?,
            nibble(2)?,
            nibble(3)?,
        )),
        6 => Some(Color32::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color32::from_rgba_unmultiplied(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            byte(6)?,
        )),
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Color32> {
    let parts: Vec<&str> = args
        .split(|c| c == ',' || c == '/' || c == ' ')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |p: &str| -> Option<u8> {
        let v = match p.strip_suffix('%') {
            Some(pct) => pct.parse::<f32>().ok()? * 2.55,
            None => p.parse::<f32>().ok()?,
        };
        Some(v.clamp(0.0, 255.0).round() as u8)
    };
    let alpha = match parts.get(3) {
        Some(p) => {
            let v = match p.strip_suffix('%') {
                Some(pct) => pct.parse::<f32>().ok()? / 100.0,
                None => p.parse::<f32>().ok()?,
            };
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        None => 255,
    };
    Some(Color32::from_rgba_unmultiplied(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}
