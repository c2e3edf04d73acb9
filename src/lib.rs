//! Interactive projectile-motion visualizer.
//!
//! A ball is launched from a configurable height, speed and angle and follows
//! the closed-form ballistic trajectory in real time, leaving a trail and
//! (optionally) showing its force and velocity vectors.

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod graphics;
pub mod lifecycle;
pub mod physics;
pub mod rendering;
pub mod scene;
pub mod simulation;
pub mod trail_raster;
pub mod transform;
pub mod widgets;

use bevy::prelude::*;

/// Everything the windowed app needs on top of `DefaultPlugins`.
pub struct VisualizerPlugin;

impl Plugin for VisualizerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            simulation::SimulationPlugin,
            rendering::RenderingPlugin,
            simulation::FramePacingPlugin,
        ));
    }
}
