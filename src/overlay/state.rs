use serde::{Deserialize, Serialize};

pub const GUIDE_POSITION_MIN: f32 = 0.0;
pub const GUIDE_POSITION_MAX: f32 = 100.0;

/// Range the control window offers for the tint opacity.
pub const OPACITY_UI_MIN: f32 = 0.1;
pub const OPACITY_UI_MAX: f32 = 0.8;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SizeMode {
    #[default]
    Fullscreen,
    TopHalf,
    BottomHalf,
    LeftHalf,
    RightHalf,
    Center,
    Custom,
}

impl SizeMode {
    pub const ALL: [SizeMode; 7] = [
        SizeMode::Fullscreen,
        SizeMode::TopHalf,
        SizeMode::BottomHalf,
        SizeMode::LeftHalf,
        SizeMode::RightHalf,
        SizeMode::Center,
        SizeMode::Custom,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SizeMode::Fullscreen => "Full screen",
            SizeMode::TopHalf => "Top half",
            SizeMode::BottomHalf => "Bottom half",
            SizeMode::LeftHalf => "Left half",
            SizeMode::RightHalf => "Right half",
            SizeMode::Center => "Center",
            SizeMode::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Single,
    Double,
}

impl BorderStyle {
    pub const ALL: [BorderStyle; 2] = [BorderStyle::Single, BorderStyle::Double];

    pub fn label(self) -> &'static str {
        match self {
            BorderStyle::Single => "Single",
            BorderStyle::Double => "Double",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideDirection {
    Up,
    Down,
}

/// The overlay configuration record. One instance is owned by
/// [`crate::overlay::service::OverlayOwner`]; everything else sees snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverlayState {
    pub color: String,
    pub opacity: f32,
    pub is_active: bool,
    pub size: SizeMode,
    pub custom_width: u32,
    pub custom_height: u32,
    pub reading_guide_enabled: bool,
    pub reading_guide_height: u32,
    pub reading_guide_position: f32,
    pub reading_guide_step_size: f32,
    pub reading_guide_border_width: u32,
    pub reading_guide_border_color: String,
    pub reading_guide_border_style: BorderStyle,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            color: "#FFEB3B".into(),
            opacity: 0.3,
            is_active: false,
            size: SizeMode::Fullscreen,
            custom_width: 800,
            custom_height: 600,
            reading_guide_enabled: false,
            reading_guide_height: 40,
            reading_guide_position: 50.0,
            reading_guide_step_size: 2.0,
            reading_guide_border_width: 2,
            reading_guide_border_color: "#000000".into(),
            reading_guide_border_style: BorderStyle::Single,
        }
    }
}

/// A partial update. Fields left as `None` keep their previous value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_guide_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_guide_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_guide_position: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_guide_step_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_guide_border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_guide_border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_guide_border_style: Option<BorderStyle>,
}

impl OverlayPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fold `other` into `self`; fields set in `other` win.
    pub fn absorb(&mut self, other: OverlayPatch) {
        fn take<T>(slot: &mut Option<T>, incoming: Option<T>) {
            if incoming.is_some() {
                *slot = incoming;
            }
        }
        take(&mut self.color, other.color);
        take(&mut self.opacity, other.opacity);
        take(&mut self.is_active, other.is_active);
        take(&mut self.size, other.size);
        take(&mut self.custom_width, other.custom_width);
        take(&mut self.custom_height, other.custom_height);
        take(&mut self.reading_guide_enabled, other.reading_guide_enabled);
        take(&mut self.reading_guide_height, other.reading_guide_height);
        take(&mut self.reading_guide_position, other.reading_guide_position);
        take(&mut self.reading_guide_step_size, other.reading_guide_step_size);
        take(
            &mut self.reading_guide_border_width,
            other.reading_guide_border_width,
        );
        take(
            &mut self.reading_guide_border_color,
            other.reading_guide_border_color,
        );
        take(
            &mut self.reading_guide_border_style,
            other.reading_guide_border_style,
        );
    }
}

impl OverlayState {
    /// Field-by-field merge. Returns a new record; `self` is unchanged.
    pub fn merge(&self, patch: &OverlayPatch) -> OverlayState {
        let mut next = self.clone();
        next.apply(patch);
        next
    }

    pub fn apply(&mut self, patch: &OverlayPatch) {
        fn set<T: Clone>(slot: &mut T, incoming: &Option<T>) {
            if let Some(value) = incoming {
                *slot = value.clone();
            }
        }
        set(&mut self.color, &patch.color);
        set(&mut self.opacity, &patch.opacity);
        set(&mut self.is_active, &patch.is_active);
        set(&mut self.size, &patch.size);
        set(&mut self.custom_width, &patch.custom_width);
        set(&mut self.custom_height, &patch.custom_height);
        set(&mut self.reading_guide_enabled, &patch.reading_guide_enabled);
        set(&mut self.reading_guide_height, &patch.reading_guide_height);
        set(&mut self.reading_guide_position, &patch.reading_guide_position);
        set(&mut self.reading_guide_step_size, &patch.reading_guide_step_size);
        set(
            &mut self.reading_guide_border_width,
            &patch.reading_guide_border_width,
        );
        set(
            &mut self.reading_guide_border_color,
            &patch.reading_guide_border_color,
        );
        set(
            &mut self.reading_guide_border_style,
            &patch.reading_guide_border_style,
        );
    }

    /// True when `other` would resolve to different window bounds.
    pub fn geometry_differs(&self, other: &OverlayState) -> bool {
        self.size != other.size
            || self.custom_width != other.custom_width
            || self.custom_height != other.custom_height
    }

    pub fn guide_nudge_allowed(&self) -> bool {
        self.reading_guide_enabled && self.is_active
    }
}

/// Move a guide position by one step. Up moves toward the top of the surface.
pub fn nudged_guide_position(position: f32, step: f32, direction: GuideDirection) -> f32 {
    let next = match direction {
        GuideDirection::Up => position - step,
        GuideDirection::Down => position + step,
    };
    if next.is_nan() {
        return position.clamp(GUIDE_POSITION_MIN, GUIDE_POSITION_MAX);
    }
    next.clamp(GUIDE_POSITION_MIN, GUIDE_POSITION_MAX)
}
