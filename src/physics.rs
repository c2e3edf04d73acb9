//! Closed-form projectile kinematics.
//!
//! Motion is evaluated directly from elapsed simulated time; there is no
//! stepped integrator and no accumulated error between frames.

use crate::config::VisualizerConfig;
use bevy::prelude::*;

/// Inputs to a launch.  Edited through the sliders; snapshotted at launch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchParameters {
    /// Launch speed (m/s), ≥ 0.
    pub speed: f32,
    /// Launch angle above the horizontal (degrees), in [0, 90].
    pub angle_deg: f32,
    /// Height of the launch point (m); may be negative.
    pub initial_height: f32,
    /// Simulated seconds per real second, > 0.
    pub time_scale: f32,
}

impl LaunchParameters {
    /// The slider initial values from the configuration.
    pub fn from_config(config: &VisualizerConfig) -> Self {
        Self {
            speed: config.speed_initial,
            angle_deg: config.angle_initial,
            initial_height: config.height_initial,
            time_scale: config.time_scale_initial,
        }
    }

    /// Launch velocity split into (horizontal, vertical) components.
    pub fn initial_velocity(&self) -> Vec2 {
        let (sin, cos) = self.angle_deg.to_radians().sin_cos();
        Vec2::new(self.speed * cos, self.speed * sin)
    }
}

/// Gravity and ground plane shared by every evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ballistics {
    /// Downward acceleration (m/s²).
    pub gravity: f32,
    /// Height (m) at which the trajectory is clamped and terminated.
    pub ground_clamp_height: f32,
}

impl Ballistics {
    pub fn from_config(config: &VisualizerConfig) -> Self {
        Self {
            gravity: config.gravity,
            ground_clamp_height: config.ground_clamp_height,
        }
    }

    /// Evaluate the trajectory at simulated time `t` (seconds, clamped to ≥ 0).
    ///
    /// When the height reaches the ground plane it is clamped there and the
    /// sample is flagged `grounded`.
    pub fn evaluate(&self, params: &LaunchParameters, t: f32) -> KinematicSample {
        let t = t.max(0.0);
        let v0 = params.initial_velocity();

        let x = v0.x * t;
        let mut h = params.initial_height + v0.y * t - 0.5 * self.gravity * t * t;
        let velocity = Vec2::new(v0.x, v0.y - self.gravity * t);

        let grounded = h <= self.ground_clamp_height;
        if grounded {
            h = self.ground_clamp_height;
        }

        KinematicSample {
            time: t,
            position: Vec2::new(x, h),
            velocity,
            grounded,
        }
    }
}

/// Position and velocity of the projectile at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicSample {
    /// Simulated time (s) of this sample.
    pub time: f32,
    /// (x, h) in meters.
    pub position: Vec2,
    /// (vx, vy) in m/s, +y up.
    pub velocity: Vec2,
    /// The ground plane was reached; `position.y` is clamped.
    pub grounded: bool,
}
