use crate::overlay::state::SizeMode;

/// Usable area of the primary display, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkArea {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl WorkArea {
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

impl Default for WorkArea {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Full screen and explicit bounds are mutually exclusive window states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Fullscreen,
    Bounds(Bounds),
}

pub fn resolve_placement(
    size: SizeMode,
    custom_width: u32,
    custom_height: u32,
    area: WorkArea,
) -> Placement {
    let (w, h) = (area.width, area.height);
    let local = match size {
        SizeMode::Fullscreen => return Placement::Fullscreen,
        SizeMode::TopHalf => Bounds {
            x: 0,
            y: 0,
            width: w,
            height: h / 2,
        },
        SizeMode::BottomHalf => Bounds {
            x: 0,
            y: offset(h, h / 2),
            width: w,
            height: h / 2,
        },
        SizeMode::LeftHalf => Bounds {
            x: 0,
            y: 0,
            width: w / 2,
            height: h,
        },
        SizeMode::RightHalf => Bounds {
            x: offset(w, w / 2),
            y: 0,
            width: w / 2,
            height: h,
        },
        SizeMode::Center => centered(w, h, scale_70(w), scale_70(h)),
        SizeMode::Custom => centered(w, h, custom_width.min(w), custom_height.min(h)),
    };
    Placement::Bounds(Bounds {
        x: area.x + local.x,
        y: area.y + local.y,
        ..local
    })
}

fn scale_70(value: u32) -> u32 {
    (u64::from(value) * 7 / 10) as u32
}

/// Distance from the origin that leaves `inner` flush against the far edge.
fn offset(outer: u32, inner: u32) -> i32 {
    i32::try_from(outer.saturating_sub(inner)).unwrap_or(i32::MAX)
}

fn centered(outer_w: u32, outer_h: u32, width: u32, height: u32) -> Bounds {
    Bounds {
        x: offset(outer_w, width) / 2,
        y: offset(outer_h, height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_area_origin_shifts_bounds() {
        let area = WorkArea {
            x: 100,
            y: 40,
            width: 1000,
            height: 800,
        };
        assert_eq!(
            resolve_placement(SizeMode::RightHalf, 0, 0, area),
            Placement::Bounds(Bounds {
                x: 600,
                y: 40,
                width: 500,
                height: 800
            })
        );
    }

    #[test]
    fn odd_heights_keep_bottom_half_flush_with_the_edge() {
        let placement = resolve_placement(SizeMode::BottomHalf, 0, 0, WorkArea::new(1000, 1081));
        let Placement::Bounds(bounds) = placement else {
            panic!("expected bounds");
        };
        assert_eq!(bounds.height, 540);
        assert_eq!(bounds.y as u32 + bounds.height, 1081);
    }
}
