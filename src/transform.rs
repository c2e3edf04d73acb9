//! Physical ↔ screen ↔ world coordinate conversion.
//!
//! Three spaces are involved:
//!
//! | Space    | Units  | Origin                 | +y    |
//! |----------|--------|------------------------|-------|
//! | Physical | meters | launch point at h = 0  | up    |
//! | Screen   | px     | canvas top-left corner | down  |
//! | World    | px     | canvas center (Bevy)   | up    |
//!
//! All layout and hit-testing happens in screen space; only the rendering
//! systems convert to Bevy world space.

use crate::config::VisualizerConfig;
use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use bevy::prelude::*;

/// Fixed meters-to-pixels mapping anchored at the launch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    /// Pixels per meter.
    pub scale: f32,
    /// Screen x of physical x = 0.
    pub origin_x: f32,
    /// Screen y of physical h = 0.
    pub ground_y: f32,
}

impl CoordinateTransform {
    pub fn from_config(config: &VisualizerConfig) -> Self {
        Self {
            scale: config.pixels_per_meter,
            origin_x: config.origin_x,
            ground_y: config.ground_y,
        }
    }

    /// Physical (x, h) in meters → screen pixels.
    pub fn to_screen(&self, physical: Vec2) -> Vec2 {
        Vec2::new(
            self.origin_x + physical.x * self.scale,
            self.ground_y - physical.y * self.scale,
        )
    }

    /// Screen pixels → physical (x, h) in meters.
    pub fn to_physical(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            (screen.x - self.origin_x) / self.scale,
            (self.ground_y - screen.y) / self.scale,
        )
    }

    /// Physical velocity (m/s) → screen-space pixel delta per second.
    ///
    /// Flips the vertical axis but applies no translation.
    pub fn velocity_to_screen(&self, velocity: Vec2) -> Vec2 {
        Vec2::new(velocity.x * self.scale, -velocity.y * self.scale)
    }
}

/// The fixed-size canvas, used to map screen pixels into Bevy world space.
///
/// Always the size of the window, which is created before any config is read,
/// so it is not configurable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }
}

impl Canvas {

    /// Screen pixel (top-left origin, y down) → Bevy world (center origin, y up).
    ///
    /// Assumes the default `Camera2d` with a 1:1 projection.
    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(screen.x - self.width * 0.5, self.height * 0.5 - screen.y)
    }

    /// Inverse of [`Canvas::to_world`].
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x + self.width * 0.5, self.height * 0.5 - world.y)
    }
}
