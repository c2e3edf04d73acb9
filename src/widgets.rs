//! Slider and checkbox widgets.
//!
//! Widgets own geometry and ranges only.  Slider values live in the shared
//! [`LaunchParameters`]; each slider reads and writes the field named by its
//! [`SliderId`], so there is exactly one copy of every parameter.
//!
//! All geometry is in screen pixels (top-left origin, +y down).

use crate::config::VisualizerConfig;
use crate::physics::LaunchParameters;
use bevy::prelude::*;

// ── Slider ────────────────────────────────────────────────────────────────────

/// Identifies a slider and the launch parameter bound to it.
///
/// Declaration order is the fixed hit-testing order.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderId {
    Speed,
    Height,
    TimeScale,
    Angle,
}

impl SliderId {
    pub const ALL: [SliderId; 4] = [
        SliderId::Speed,
        SliderId::Height,
        SliderId::TimeScale,
        SliderId::Angle,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Speed => "Speed (m/s)",
            Self::Height => "Height (m)",
            Self::TimeScale => "Time scale",
            Self::Angle => "Angle (°)",
        }
    }

    /// Handle colour.
    pub fn color(self) -> Color {
        match self {
            Self::Speed => Color::srgb_u8(255, 100, 100),
            Self::Height => Color::srgb_u8(100, 150, 255),
            Self::TimeScale => Color::srgb_u8(100, 255, 100),
            Self::Angle => Color::srgb_u8(255, 200, 0),
        }
    }

    /// Read the bound parameter.
    pub fn get(self, params: &LaunchParameters) -> f32 {
        match self {
            Self::Speed => params.speed,
            Self::Height => params.initial_height,
            Self::TimeScale => params.time_scale,
            Self::Angle => params.angle_deg,
        }
    }

    /// Write the bound parameter.
    pub fn set(self, params: &mut LaunchParameters, value: f32) {
        match self {
            Self::Speed => params.speed = value,
            Self::Height => params.initial_height = value,
            Self::TimeScale => params.time_scale = value,
            Self::Angle => params.angle_deg = value,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Speed => 0,
            Self::Height => 1,
            Self::TimeScale => 2,
            Self::Angle => 3,
        }
    }
}

/// A horizontal track with a draggable handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    pub id: SliderId,
    pub min: f32,
    pub max: f32,
    /// Track rectangle in screen pixels.
    pub track: Rect,
    pub handle_radius: f32,
}

impl Slider {
    /// Lay out `id` from the configuration; sliders stack downwards in
    /// [`SliderId::ALL`] order.
    pub fn from_config(id: SliderId, config: &VisualizerConfig) -> Self {
        let (min, max) = match id {
            SliderId::Speed => (config.speed_min, config.speed_max),
            SliderId::Height => (config.height_min, config.height_max),
            SliderId::TimeScale => (config.time_scale_min, config.time_scale_max),
            SliderId::Angle => (config.angle_min, config.angle_max),
        };
        let top = config.slider_top + id.index() as f32 * config.slider_spacing;
        Self {
            id,
            min,
            max,
            track: Rect::new(
                config.slider_x,
                top,
                config.slider_x + config.slider_width,
                top + config.slider_height,
            ),
            handle_radius: config.slider_handle_radius,
        }
    }

    /// Screen position of the handle center for `value`.
    pub fn handle_center(&self, value: f32) -> Vec2 {
        let ratio = (value - self.min) / (self.max - self.min);
        Vec2::new(
            self.track.min.x + ratio * self.track.width(),
            self.track.center().y,
        )
    }

    /// True when `pointer` lies strictly within `tolerance` pixels of the
    /// handle on both axes.
    pub fn hits_handle(&self, value: f32, pointer: Vec2, tolerance: f32) -> bool {
        let delta = (pointer - self.handle_center(value)).abs();
        delta.x < tolerance && delta.y < tolerance
    }

    /// Value for a pointer at screen x, clamped to the track.
    ///
    /// Piecewise linear: `min` at or left of the track start, `max` at or
    /// right of the track end.
    pub fn value_at(&self, pointer_x: f32) -> f32 {
        let ratio = ((pointer_x - self.track.min.x) / self.track.width()).clamp(0.0, 1.0);
        self.min + ratio * (self.max - self.min)
    }

    /// Text shown to the right of the track.
    pub fn caption(&self, value: f32) -> String {
        format!("{}: {:.1}", self.id.label(), value)
    }
}

// ── Checkbox ──────────────────────────────────────────────────────────────────

/// Identifies one of the overlay checkboxes.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckboxId {
    ForceVector,
    VelocityVectors,
}

impl CheckboxId {
    pub const ALL: [CheckboxId; 2] = [CheckboxId::ForceVector, CheckboxId::VelocityVectors];

    pub fn label(self) -> &'static str {
        match self {
            Self::ForceVector => "Show force vector",
            Self::VelocityVectors => "Show velocity vectors",
        }
    }

    /// Top-left of the label text relative to the box's top-left corner.
    pub fn label_offset(self) -> Vec2 {
        match self {
            Self::ForceVector => Vec2::new(20.0, -10.0),
            Self::VelocityVectors => Vec2::new(30.0, -10.0),
        }
    }
}

/// A toggle with a square hit region; no drag state.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkbox {
    pub id: CheckboxId,
    pub enabled: bool,
    pub hit_region: Rect,
}

impl Checkbox {
    /// Build an unchecked box from the configured position.
    pub fn from_config(id: CheckboxId, config: &VisualizerConfig) -> Self {
        let [x, y] = match id {
            CheckboxId::ForceVector => config.force_checkbox_pos,
            CheckboxId::VelocityVectors => config.velocity_checkbox_pos,
        };
        Self {
            id,
            enabled: false,
            hit_region: Rect::new(x, y, x + config.checkbox_size, y + config.checkbox_size),
        }
    }

    /// Screen position of the label's top-left corner.
    pub fn label_position(&self) -> Vec2 {
        self.hit_region.min + self.id.label_offset()
    }

    /// Flip `enabled` if `pointer` is inside the hit region.  Returns whether
    /// the box was hit.
    pub fn toggle_if_hit(&mut self, pointer: Vec2) -> bool {
        if self.hit_region.contains(pointer) {
            self.enabled = !self.enabled;
            true
        } else {
            false
        }
    }
}
