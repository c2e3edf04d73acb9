//! Simulation lifecycle: Idle → Running → Terminated, and reset back to Idle.
//!
//! ## Transitions
//!
//! | From                | Trigger         | To          | Effect                                   |
//! |---------------------|-----------------|-------------|------------------------------------------|
//! | Idle / Terminated   | launch          | Running     | snapshot parameters, record start, clear trail |
//! | Running             | launch          | Running     | ignored                                  |
//! | Running             | ground impact   | Terminated  | position and trail freeze                |
//! | any                 | reset           | Idle        | clear trail, discard snapshot            |
//!
//! [`Simulation::advance`] is called once per frame and appends exactly one
//! trail point per Running frame, including the frame of ground impact.

use crate::physics::{Ballistics, KinematicSample, LaunchParameters};
use crate::transform::CoordinateTransform;
use bevy::prelude::*;

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Terminated,
}

/// Screen-space positions visited by the ball during the current run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trail {
    points: Vec<Vec2>,
}

impl Trail {
    /// Append a point.  Returns the new segment from the previous point, if any.
    pub fn push(&mut self, point: Vec2) -> Option<(Vec2, Vec2)> {
        let segment = self.points.last().map(|&prev| (prev, point));
        self.points.push(point);
        segment
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Per-run state, present from launch until reset.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    /// Parameters frozen at launch; later slider edits do not affect the run.
    pub launched: LaunchParameters,
    /// Real-clock time (s) of the launch.
    pub start_time_real: f64,
    /// Most recent evaluation.
    pub sample: KinematicSample,
}

/// The lifecycle resource.  Owns the phase, the current flight and the trail.
#[derive(Resource, Debug, Clone, Default)]
pub struct Simulation {
    phase: Phase,
    flight: Option<Flight>,
    trail: Trail,
    /// Incremented on every launch and reset so trail consumers can detect a
    /// wholesale clear.
    run_id: u64,
}

impl Simulation {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn flight(&self) -> Option<&Flight> {
        self.flight.as_ref()
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Sliders accept new drags and edits only while no run is in progress.
    pub fn parameters_editable(&self) -> bool {
        self.phase != Phase::Running
    }

    /// True once a run has been launched and not yet reset.
    pub fn has_launched(&self) -> bool {
        self.flight.is_some()
    }

    /// Start a run with a snapshot of `params`.
    ///
    /// Ignored while Running.  Returns whether the launch happened.
    pub fn launch(&mut self, params: LaunchParameters, now: f64) -> bool {
        if self.phase == Phase::Running {
            return false;
        }
        self.phase = Phase::Running;
        self.trail.clear();
        self.run_id += 1;
        self.flight = Some(Flight {
            launched: params,
            start_time_real: now,
            sample: KinematicSample {
                time: 0.0,
                position: Vec2::new(0.0, params.initial_height),
                velocity: params.initial_velocity(),
                grounded: false,
            },
        });
        info!(
            "Launch: speed {:.2} m/s, angle {:.1}°, height {:.2} m, time scale {:.2}",
            params.speed, params.angle_deg, params.initial_height, params.time_scale
        );
        true
    }

    /// Return to Idle from any phase.
    pub fn reset(&mut self) {
        if self.phase != Phase::Idle {
            info!("Reset from {:?}", self.phase);
        }
        self.phase = Phase::Idle;
        self.flight = None;
        self.trail.clear();
        self.run_id += 1;
    }

    /// Simulated seconds elapsed since launch at real time `now`, floored at 0.
    pub fn elapsed_sim_time(&self, now: f64) -> Option<f32> {
        self.flight
            .as_ref()
            .map(|f| (((now - f.start_time_real) * f.launched.time_scale as f64).max(0.0)) as f32)
    }

    /// Per-frame step.  While Running: evaluate the trajectory, append the
    /// screen position to the trail, and terminate on ground impact.
    ///
    /// Returns the newly appended trail segment, if any.  Does nothing outside
    /// the Running phase.
    pub fn advance(
        &mut self,
        now: f64,
        ballistics: &Ballistics,
        transform: &CoordinateTransform,
    ) -> Option<(Vec2, Vec2)> {
        if self.phase != Phase::Running {
            return None;
        }
        let t = self.elapsed_sim_time(now)?;
        let flight = self.flight.as_mut()?;
        let sample = ballistics.evaluate(&flight.launched, t);
        flight.sample = sample;

        if sample.grounded {
            self.phase = Phase::Terminated;
            info!(
                "Ground impact after {:.2} s simulated, range {:.2} m",
                sample.time, sample.position.x
            );
        }
        self.trail.push(transform.to_screen(sample.position))
    }

    /// Physical position of the ball: the live sample once launched, otherwise
    /// the unclamped preview at `(0, preview.initial_height)`.
    pub fn ball_position(&self, preview: &LaunchParameters) -> Vec2 {
        match &self.flight {
            Some(flight) => flight.sample.position,
            None => Vec2::new(0.0, preview.initial_height),
        }
    }

    /// Canonical instantaneous velocity of the current flight.
    pub fn velocity(&self) -> Option<Vec2> {
        self.flight.as_ref().map(|f| f.sample.velocity)
    }
}
