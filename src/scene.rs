//! Per-frame scene composition.
//!
//! Decides *what* to draw and *where*, in screen pixels, without touching
//! Bevy's renderer.  [`crate::rendering`] executes the resulting
//! [`DrawCommand`]s with gizmos and positions the retained widget entities.

use crate::config::VisualizerConfig;
use crate::controller::Controls;
use crate::lifecycle::Simulation;
use crate::transform::CoordinateTransform;
use crate::widgets::CheckboxId;
use bevy::prelude::*;

// ── Colours ───────────────────────────────────────────────────────────────────

pub fn force_color() -> Color {
    Color::srgb_u8(255, 0, 0)
}
pub fn resultant_color() -> Color {
    Color::srgb_u8(255, 0, 0)
}
pub fn horizontal_color() -> Color {
    Color::srgb_u8(0, 150, 0)
}
pub fn vertical_color() -> Color {
    Color::srgb_u8(0, 0, 255)
}
pub fn guide_color() -> Color {
    Color::srgb_u8(180, 180, 180)
}

// ── Draw commands ─────────────────────────────────────────────────────────────

/// Line weight.  Each maps to a gizmo config group with a fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    /// 3 px.
    Bold,
    /// 2 px.
    Regular,
    /// 1 px.
    Hairline,
}

impl Stroke {
    pub fn width(self) -> f32 {
        match self {
            Self::Bold => 3.0,
            Self::Regular => 2.0,
            Self::Hairline => 1.0,
        }
    }
}

/// Which overlay label a [`DrawCommand::Label`] fills in.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorTag {
    Force,
    Velocity,
    VelocityX,
    VelocityY,
}

impl VectorTag {
    pub const ALL: [VectorTag; 4] = [
        VectorTag::Force,
        VectorTag::Velocity,
        VectorTag::VelocityX,
        VectorTag::VelocityY,
    ];

    pub fn text(self) -> &'static str {
        match self {
            Self::Force => "mg",
            Self::Velocity => "v",
            Self::VelocityX => "vx",
            Self::VelocityY => "vy",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Force => force_color(),
            Self::Velocity => resultant_color(),
            Self::VelocityX => horizontal_color(),
            Self::VelocityY => vertical_color(),
        }
    }
}

/// One overlay primitive in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Shaft from `start` to `end`; the head belongs to `tag`.
    Arrow {
        tag: VectorTag,
        start: Vec2,
        end: Vec2,
        color: Color,
        stroke: Stroke,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        stroke: Stroke,
    },
    /// Text whose top-left corner sits at `position`.
    Label { tag: VectorTag, position: Vec2 },
}

// ── Arrow primitive ───────────────────────────────────────────────────────────

/// Shaft and triangular head of an arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowShape {
    pub start: Vec2,
    pub tip: Vec2,
    /// `[tip, left, right]`.
    pub head: [Vec2; 3],
}

/// Build an arrow from `start` to `end`.  The head's base points lie
/// `head_size` back from the tip at ±`head_angle_deg` around the shaft.
///
/// A zero-length arrow has a degenerate head collapsed onto the tip.
pub fn arrow_shape(start: Vec2, end: Vec2, head_size: f32, head_angle_deg: f32) -> ArrowShape {
    let d = end - start;
    let angle = d.y.atan2(d.x);
    let spread = head_angle_deg.to_radians();
    let back = |a: f32| end - head_size * Vec2::new(a.cos(), a.sin());
    let head = if d == Vec2::ZERO {
        [end, end, end]
    } else {
        [end, back(angle - spread), back(angle + spread)]
    };
    ArrowShape {
        start,
        tip: end,
        head,
    }
}

// ── Composition ───────────────────────────────────────────────────────────────

/// Screen position of the ball center this frame.
pub fn ball_screen_position(
    sim: &Simulation,
    controls: &Controls,
    transform: &CoordinateTransform,
) -> Vec2 {
    transform.to_screen(sim.ball_position(&controls.params))
}

/// Force and velocity overlays for this frame.
///
/// Empty until a run has been launched; each group appears only when its
/// checkbox is ticked.  Velocity is the canonical kinematic velocity of the
/// current sample.
pub fn compose_vector_overlay(
    sim: &Simulation,
    controls: &Controls,
    config: &VisualizerConfig,
) -> Vec<DrawCommand> {
    let mut commands = Vec::new();
    if !sim.has_launched() {
        return commands;
    }
    let transform = CoordinateTransform::from_config(config);
    let ball = ball_screen_position(sim, controls, &transform);

    if controls.is_enabled(CheckboxId::ForceVector) {
        let len = config.force_arrow_length;
        commands.push(DrawCommand::Arrow {
            tag: VectorTag::Force,
            start: ball,
            end: ball + Vec2::new(0.0, len),
            color: force_color(),
            stroke: Stroke::Bold,
        });
        commands.push(DrawCommand::Label {
            tag: VectorTag::Force,
            position: ball + Vec2::new(10.0, len * 0.5),
        });
    }

    if controls.is_enabled(CheckboxId::VelocityVectors) {
        if let Some(velocity) = sim.velocity() {
            let v = transform.velocity_to_screen(velocity) * config.velocity_arrow_scale;
            let end_total = ball + v;
            let end_x = ball + Vec2::new(v.x, 0.0);
            let end_y = ball + Vec2::new(0.0, v.y);

            commands.extend([
                DrawCommand::Arrow {
                    tag: VectorTag::Velocity,
                    start: ball,
                    end: end_total,
                    color: resultant_color(),
                    stroke: Stroke::Bold,
                },
                DrawCommand::Label {
                    tag: VectorTag::Velocity,
                    position: end_total + Vec2::new(5.0, -10.0),
                },
                DrawCommand::Arrow {
                    tag: VectorTag::VelocityX,
                    start: ball,
                    end: end_x,
                    color: horizontal_color(),
                    stroke: Stroke::Regular,
                },
                DrawCommand::Label {
                    tag: VectorTag::VelocityX,
                    position: end_x + Vec2::new(5.0, -10.0),
                },
                DrawCommand::Arrow {
                    tag: VectorTag::VelocityY,
                    start: ball,
                    end: end_y,
                    color: vertical_color(),
                    stroke: Stroke::Regular,
                },
                DrawCommand::Label {
                    tag: VectorTag::VelocityY,
                    position: end_y + Vec2::new(5.0, 5.0),
                },
                DrawCommand::Line {
                    from: end_x,
                    to: end_total,
                    color: guide_color(),
                    stroke: Stroke::Hairline,
                },
                DrawCommand::Line {
                    from: end_y,
                    to: end_total,
                    color: guide_color(),
                    stroke: Stroke::Hairline,
                },
            ]);
        }
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{CommandKey, InputEvent};
    use crate::lifecycle::Phase;
    use crate::physics::Ballistics;

    fn setup() -> (Simulation, Controls, VisualizerConfig) {
        let config = VisualizerConfig::default();
        (
            Simulation::default(),
            Controls::from_config(&config),
            config,
        )
    }

    fn tick_boxes(controls: &mut Controls, force: bool, velocity: bool) {
        for cb in controls.checkboxes.iter_mut() {
            cb.enabled = match cb.id {
                CheckboxId::ForceVector => force,
                CheckboxId::VelocityVectors => velocity,
            };
        }
    }

    fn launch(sim: &mut Simulation, controls: &mut Controls, config: &VisualizerConfig, t: f64) {
        controls.handle(InputEvent::KeyDown(CommandKey::Space), sim, 0.0);
        sim.advance(
            t,
            &Ballistics::from_config(config),
            &CoordinateTransform::from_config(config),
        );
    }

    fn arrows(commands: &[DrawCommand]) -> Vec<(Vec2, Vec2)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arrow { start, end, .. } => Some((*start, *end)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn arrow_head_points_back_from_tip_at_thirty_degrees() {
        let a = arrow_shape(Vec2::ZERO, Vec2::new(100.0, 0.0), 8.0, 30.0);
        assert_eq!(a.head[0], Vec2::new(100.0, 0.0));
        let (left, right) = (a.head[1], a.head[2]);
        assert!((left - Vec2::new(100.0 - 8.0 * 0.8660254, 4.0)).length() < 1e-4, "{left:?}");
        assert!((right - Vec2::new(100.0 - 8.0 * 0.8660254, -4.0)).length() < 1e-4, "{right:?}");
    }

    #[test]
    fn arrow_head_is_symmetric_for_any_direction() {
        let start = Vec2::new(10.0, 10.0);
        let end = Vec2::new(-30.0, 45.0);
        let a = arrow_shape(start, end, 8.0, 30.0);
        assert!(((a.head[1] - end).length() - 8.0).abs() < 1e-4);
        assert!(((a.head[2] - end).length() - 8.0).abs() < 1e-4);
        let axis = (start - end).normalize();
        let l = (a.head[1] - end).normalize().dot(axis);
        let r = (a.head[2] - end).normalize().dot(axis);
        assert!((l - r).abs() < 1e-4);
    }

    #[test]
    fn zero_length_arrow_collapses_head() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(arrow_shape(p, p, 8.0, 30.0).head, [p, p, p]);
    }

    #[test]
    fn no_overlay_before_first_launch() {
        let (sim, mut controls, config) = setup();
        tick_boxes(&mut controls, true, true);
        assert!(compose_vector_overlay(&sim, &controls, &config).is_empty());
    }

    #[test]
    fn no_overlay_when_boxes_unticked() {
        let (mut sim, mut controls, config) = setup();
        launch(&mut sim, &mut controls, &config, 0.2);
        assert!(compose_vector_overlay(&sim, &controls, &config).is_empty());
    }

    #[test]
    fn force_arrow_points_down_fixed_length() {
        let (mut sim, mut controls, config) = setup();
        tick_boxes(&mut controls, true, false);
        launch(&mut sim, &mut controls, &config, 0.3);
        let cmds = compose_vector_overlay(&sim, &controls, &config);
        let a = arrows(&cmds);
        assert_eq!(a.len(), 1);
        let (start, end) = a[0];
        assert_eq!(end - start, Vec2::new(0.0, 60.0));
        assert!(cmds.contains(&DrawCommand::Label {
            tag: VectorTag::Force,
            position: start + Vec2::new(10.0, 30.0),
        }));
    }

    #[test]
    fn velocity_arrows_use_kinematic_velocity() {
        let (mut sim, mut controls, config) = setup();
        tick_boxes(&mut controls, false, true);
        launch(&mut sim, &mut controls, &config, 0.5);
        let cmds = compose_vector_overlay(&sim, &controls, &config);
        let a = arrows(&cmds);
        assert_eq!(a.len(), 3);

        let vx = 10.0 * 45f32.to_radians().cos();
        let vy = 10.0 * 45f32.to_radians().sin() - 9.8 * 0.5;
        let expected = Vec2::new(vx * 100.0 * 0.06, -vy * 100.0 * 0.06);
        let (start, end_total) = a[0];
        assert!(((end_total - start) - expected).length() < 1e-2);
        assert!(((a[1].1 - start) - Vec2::new(expected.x, 0.0)).length() < 1e-2);
        assert!(((a[2].1 - start) - Vec2::new(0.0, expected.y)).length() < 1e-2);

        let guides = cmds
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { stroke: Stroke::Hairline, .. }))
            .count();
        assert_eq!(guides, 2);
    }

    #[test]
    fn overlay_persists_after_termination() {
        let (mut sim, mut controls, config) = setup();
        tick_boxes(&mut controls, true, true);
        launch(&mut sim, &mut controls, &config, 20.0);
        assert_eq!(sim.phase(), Phase::Terminated);
        let cmds = compose_vector_overlay(&sim, &controls, &config);
        assert_eq!(arrows(&cmds).len(), 4);
        let tags: Vec<VectorTag> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arrow { tag, .. } => Some(*tag),
                _ => None,
            })
            .collect();
        assert_eq!(tags, VectorTag::ALL.to_vec());
    }

    #[test]
    fn overlay_disappears_after_reset() {
        let (mut sim, mut controls, config) = setup();
        tick_boxes(&mut controls, true, true);
        launch(&mut sim, &mut controls, &config, 0.2);
        sim.reset();
        assert!(compose_vector_overlay(&sim, &controls, &config).is_empty());
    }

    #[test]
    fn idle_ball_sits_at_preview_height() {
        let (sim, mut controls, config) = setup();
        controls.params.initial_height = -4.0;
        let t = CoordinateTransform::from_config(&config);
        assert_eq!(
            ball_screen_position(&sim, &controls, &t),
            Vec2::new(50.0, 900.0)
        );
    }
}
