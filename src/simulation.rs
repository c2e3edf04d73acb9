//! Headless simulation core: input handling, the lifecycle step, and frame
//! pacing.
//!
//! Nothing here needs a window or a renderer, so integration tests can drive
//! [`SimulationPlugin`] with `MinimalPlugins` and `app.update()`.

use crate::config::{load_visualizer_config, VisualizerConfig};
use crate::controller::{
    apply_input_system, capture_input_system, Controls, CursorTracker, InputQueue,
};
use crate::lifecycle::{Phase, Simulation};
use crate::physics::Ballistics;
use crate::transform::CoordinateTransform;
use bevy::prelude::*;
use bevy::window::WindowEvent;
use std::time::{Duration, Instant};

/// Update-schedule systems that mutate simulation state.  Rendering syncs run
/// after this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoreSystems;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<WindowEvent>()
            .init_resource::<VisualizerConfig>()
            .init_resource::<InputQueue>()
            .init_resource::<CursorTracker>()
            .init_resource::<Simulation>()
            .add_systems(Startup, (load_visualizer_config, init_controls).chain())
            .add_systems(
                Update,
                (
                    capture_input_system,
                    apply_input_system,
                    advance_simulation_system,
                )
                    .chain()
                    .in_set(CoreSystems),
            );
    }
}

/// Build the widget state from the (possibly reloaded) config.
pub fn init_controls(mut commands: Commands, config: Res<VisualizerConfig>) {
    commands.insert_resource(Controls::from_config(&config));
}

/// Step a running flight to the current real time.
pub fn advance_simulation_system(
    mut sim: ResMut<Simulation>,
    time: Res<Time<Real>>,
    config: Res<VisualizerConfig>,
) {
    // Read through `Deref` so idle frames don't flag the resource as changed.
    if sim.phase() != Phase::Running {
        return;
    }
    let ballistics = Ballistics::from_config(&config);
    let transform = CoordinateTransform::from_config(&config);
    sim.advance(time.elapsed_secs_f64(), &ballistics, &transform);
}

// ── Frame pacing ──────────────────────────────────────────────────────────────

/// Caps the frame rate at `target_fps` by sleeping at the end of each frame.
///
/// Kept out of [`SimulationPlugin`] so headless tests run at full speed.
pub struct FramePacingPlugin;

impl Plugin for FramePacingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Last, frame_pacing_system);
    }
}

/// Time the previous tick ended.
#[derive(Default)]
pub struct FramePacer {
    last_tick: Option<Instant>,
}

/// Time left to sleep so that a frame which has taken `elapsed` lasts one
/// tick at `target_fps`.  Zero when the frame already ran long or the tick
/// length is not representable.
pub fn remaining_frame_time(elapsed: Duration, target_fps: f32) -> Duration {
    if target_fps.is_nan() || target_fps <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(1.0 / f64::from(target_fps))
        .map_or(Duration::ZERO, |tick| tick.saturating_sub(elapsed))
}

pub fn frame_pacing_system(mut pacer: Local<FramePacer>, config: Res<VisualizerConfig>) {
    if let Some(last) = pacer.last_tick {
        let sleep = remaining_frame_time(last.elapsed(), config.target_fps);
        if !sleep.is_zero() {
            std::thread::sleep(sleep);
        }
    }
    pacer.last_tick = Some(Instant::now());
}
