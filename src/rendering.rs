//! Rendering systems: retained widget entities, UI text, and gizmo overlays.
//!
//! ## Layer Model
//!
//! | Layer              | Technology   | z    | Controlled by                    |
//! |--------------------|--------------|------|----------------------------------|
//! | Background         | `ClearColor` | —    | always white                     |
//! | Trail raster       | `Sprite`     | 0.0  | [`crate::trail_raster`]          |
//! | Slider tracks      | `Sprite`     | 1.0  | static                           |
//! | Checkbox boxes     | `Sprite`     | 1.0  | fill visibility ← `Controls`     |
//! | Slider handles     | `Mesh2d`     | 2.0  | position ← `Controls`            |
//! | Ball               | `Sprite`     | 3.0  | position ← `Simulation`          |
//! | Arrow heads        | `Mesh2d`     | 4.0  | pose ← [`VectorOverlay`]         |
//! | Arrow shafts       | Gizmos       | —    | [`VectorOverlay`] draw commands  |
//! | Captions & labels  | Bevy UI      | —    | text/position ← `Controls`, overlay |
//!
//! ## System Responsibilities
//!
//! | System                          | Schedule | Purpose                                |
//! |---------------------------------|----------|----------------------------------------|
//! | `configure_gizmos`              | Startup  | Set line widths of the gizmo groups    |
//! | `setup_widgets`                 | Startup  | Spawn ball, tracks, handles, checkboxes, text |
//! | `compose_overlay_system`        | Update   | Rebuild [`VectorOverlay`] for the frame |
//! | `sync_ball_system`              | Update   | Move the ball sprite                   |
//! | `sync_slider_visuals_system`    | Update   | Move handles, refresh captions         |
//! | `sync_checkbox_fill_system`     | Update   | Show/hide checkbox fills               |
//! | `sync_vector_labels_system`     | Update   | Place/hide `mg`, `v`, `vx`, `vy`       |
//! | `sync_arrow_heads_system`       | Update   | Place/hide the filled arrow heads      |
//! | `vector_gizmo_system`           | Update   | Draw arrow shafts and guide lines      |

use crate::config::VisualizerConfig;
use crate::controller::Controls;
use crate::graphics::UiFont;
use crate::lifecycle::Simulation;
use crate::scene::{
    arrow_shape, ball_screen_position, compose_vector_overlay, DrawCommand, Stroke, VectorTag,
};
use crate::transform::{Canvas, CoordinateTransform};
use crate::widgets::{CheckboxId, SliderId};
use bevy::gizmos::config::GizmoConfigGroup;
use bevy::prelude::*;

/// Help line shown in the top-left corner.
pub const HELP_TEXT: &str = "Press [Space] to launch | Press [R] to reset";

// ── Gizmo groups ──────────────────────────────────────────────────────────────

/// 2 px component arrows.  The default group draws 3 px lines.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct RegularGizmos;

/// 1 px guide lines.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct HairlineGizmos;

// ── Resources & markers ───────────────────────────────────────────────────────

/// This frame's overlay draw commands.
#[derive(Resource, Debug, Default, Clone)]
pub struct VectorOverlay(pub Vec<DrawCommand>);

/// Marker for the ball sprite.
#[derive(Component)]
pub struct Ball;

/// Marker for a slider handle; paired with its [`SliderId`].
#[derive(Component)]
pub struct SliderHandle;

/// Marker for the caption text next to a slider; paired with its [`SliderId`].
#[derive(Component)]
pub struct SliderCaption;

/// Marker for the green fill of a checkbox; paired with its [`CheckboxId`].
#[derive(Component)]
pub struct CheckboxFill;

/// Marker for a filled arrow head; paired with the [`VectorTag`] of its arrow.
#[derive(Component)]
pub struct ArrowHead;

fn track_color() -> Color {
    Color::srgb_u8(180, 180, 180)
}
fn check_color() -> Color {
    Color::srgb_u8(0, 255, 0)
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers everything that draws.  Requires a window and a renderer; the
/// headless core lives in [`crate::simulation::SimulationPlugin`].
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::WHITE))
            .init_resource::<VectorOverlay>()
            .init_gizmo_group::<RegularGizmos>()
            .init_gizmo_group::<HairlineGizmos>()
            .add_systems(
                Startup,
                (
                    crate::graphics::setup_camera,
                    configure_gizmos,
                    crate::trail_raster::setup_trail_raster
                        .after(crate::config::load_visualizer_config),
                    (crate::graphics::load_ui_font, setup_widgets)
                        .chain()
                        .after(crate::simulation::init_controls),
                ),
            )
            .add_systems(
                Update,
                (
                    compose_overlay_system,
                    crate::trail_raster::sync_trail_raster_system,
                    sync_ball_system,
                    sync_slider_visuals_system,
                    sync_checkbox_fill_system,
                    sync_vector_labels_system,
                    sync_arrow_heads_system,
                    vector_gizmo_system,
                )
                    .chain()
                    .after(crate::simulation::CoreSystems),
            );
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Set line widths for the three gizmo groups.
pub fn configure_gizmos(mut store: ResMut<GizmoConfigStore>) {
    let (config, _) = store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = Stroke::Bold.width();
    let (config, _) = store.config_mut::<RegularGizmos>();
    config.line.width = Stroke::Regular.width();
    let (config, _) = store.config_mut::<HairlineGizmos>();
    config.line.width = Stroke::Hairline.width();
}

/// Spawn a UI text node with its top-left corner at screen `pos`.
fn text_node(text: impl Into<String>, pos: Vec2, font: &UiFont, size: f32, color: Color) -> impl Bundle {
    (
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(pos.x),
            top: Val::Px(pos.y),
            ..default()
        },
        Text::new(text),
        TextFont {
            font: font.0.clone(),
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

/// Spawn the ball, the slider and checkbox visuals, the help line and the
/// (hidden) vector labels.
#[allow(clippy::too_many_arguments)]
pub fn setup_widgets(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    font: Res<UiFont>,
    controls: Res<Controls>,
    sim: Res<Simulation>,
    config: Res<VisualizerConfig>,
) {
    let canvas = Canvas::default();
    let transform = CoordinateTransform::from_config(&config);
    let at = |screen: Vec2, z: f32| Transform::from_translation(canvas.to_world(screen).extend(z));

    // ── Ball ──────────────────────────────────────────────────────────────────
    let ball = ball_screen_position(&sim, &controls, &transform);
    commands.spawn((
        Sprite {
            image: asset_server.load(config.ball_sprite_path.clone()),
            custom_size: Some(Vec2::splat(config.ball_size)),
            ..default()
        },
        at(ball, 3.0),
        Ball,
    ));

    // ── Sliders ───────────────────────────────────────────────────────────────
    let handle_mesh = meshes.add(Circle::new(config.slider_handle_radius));
    for slider in &controls.sliders {
        let value = slider.id.get(&controls.params);
        commands.spawn((
            Sprite::from_color(track_color(), slider.track.size()),
            at(slider.track.center(), 1.0),
        ));
        commands.spawn((
            Mesh2d(handle_mesh.clone()),
            MeshMaterial2d(materials.add(ColorMaterial::from(slider.id.color()))),
            at(slider.handle_center(value), 2.0),
            SliderHandle,
            slider.id,
        ));
        commands.spawn((
            text_node(
                slider.caption(value),
                Vec2::new(slider.track.max.x + 20.0, slider.track.min.y - 5.0),
                &font,
                config.font_size,
                Color::BLACK,
            ),
            SliderCaption,
            slider.id,
        ));
    }

    // ── Checkboxes ────────────────────────────────────────────────────────────
    for checkbox in &controls.checkboxes {
        let region = checkbox.hit_region;
        let inner = region.inflate(-2.0);
        commands.spawn((
            Sprite::from_color(Color::BLACK, region.size()),
            at(region.center(), 1.0),
        ));
        commands.spawn((
            Sprite::from_color(Color::WHITE, inner.size()),
            at(inner.center(), 1.1),
        ));
        commands.spawn((
            Sprite::from_color(check_color(), inner.size()),
            at(inner.center(), 1.2),
            if checkbox.enabled {
                Visibility::Visible
            } else {
                Visibility::Hidden
            },
            CheckboxFill,
            checkbox.id,
        ));
        commands.spawn(text_node(
            checkbox.id.label(),
            checkbox.label_position(),
            &font,
            config.font_size,
            Color::BLACK,
        ));
    }

    // ── Help line ─────────────────────────────────────────────────────────────
    commands.spawn(text_node(
        HELP_TEXT,
        Vec2::new(10.0, 10.0),
        &font,
        config.font_size,
        Color::BLACK,
    ));

    // ── Vector labels and arrow heads (positioned each frame) ─────────────────
    let head_mesh = meshes.add(arrow_head_triangle(&config));
    for tag in VectorTag::ALL {
        commands.spawn((
            text_node(tag.text(), Vec2::ZERO, &font, config.font_size, tag.color()),
            Visibility::Hidden,
            tag,
        ));
        commands.spawn((
            Mesh2d(head_mesh.clone()),
            MeshMaterial2d(materials.add(ColorMaterial::from(tag.color()))),
            Transform::from_xyz(0.0, 0.0, 4.0),
            Visibility::Hidden,
            ArrowHead,
            tag,
        ));
    }
}

/// Head triangle of an arrow pointing along +x with its tip at the origin.
pub fn arrow_head_triangle(config: &VisualizerConfig) -> Triangle2d {
    let shape = arrow_shape(
        Vec2::NEG_X,
        Vec2::ZERO,
        config.arrow_head_size,
        config.arrow_head_angle_deg,
    );
    let [tip, left, right] = shape.head;
    Triangle2d::new(tip, left, right)
}

/// World transform placing [`arrow_head_triangle`] on the tip of the screen
/// arrow `start → end`.  `None` for a zero-length arrow.
pub fn arrow_head_pose(canvas: &Canvas, start: Vec2, end: Vec2, z: f32) -> Option<Transform> {
    let tip = canvas.to_world(end);
    let dir = tip - canvas.to_world(start);
    if dir == Vec2::ZERO {
        return None;
    }
    Some(
        Transform::from_translation(tip.extend(z))
            .with_rotation(Quat::from_rotation_z(dir.y.atan2(dir.x))),
    )
}

// ── Update ────────────────────────────────────────────────────────────────────

/// Rebuild this frame's overlay draw commands.
pub fn compose_overlay_system(
    mut overlay: ResMut<VectorOverlay>,
    sim: Res<Simulation>,
    controls: Res<Controls>,
    config: Res<VisualizerConfig>,
) {
    overlay.0 = compose_vector_overlay(&sim, &controls, &config);
}

/// Place the ball sprite at the current (or preview) position.
pub fn sync_ball_system(
    sim: Res<Simulation>,
    controls: Res<Controls>,
    config: Res<VisualizerConfig>,
    mut query: Query<&mut Transform, With<Ball>>,
) {
    if !sim.is_changed() && !controls.is_changed() {
        return;
    }
    let canvas = Canvas::default();
    let screen = ball_screen_position(&sim, &controls, &CoordinateTransform::from_config(&config));
    for mut transform in query.iter_mut() {
        let z = transform.translation.z;
        transform.translation = canvas.to_world(screen).extend(z);
    }
}

/// Move slider handles and refresh their captions when a value changes.
#[allow(clippy::type_complexity)]
pub fn sync_slider_visuals_system(
    controls: Res<Controls>,
    mut handles: Query<(&SliderId, &mut Transform), With<SliderHandle>>,
    mut captions: Query<(&SliderId, &mut Text), With<SliderCaption>>,
) {
    if !controls.is_changed() {
        return;
    }
    let canvas = Canvas::default();
    for (&id, mut transform) in handles.iter_mut() {
        if let Some(slider) = controls.slider(id) {
            let z = transform.translation.z;
            let center = slider.handle_center(id.get(&controls.params));
            transform.translation = canvas.to_world(center).extend(z);
        }
    }
    for (&id, mut text) in captions.iter_mut() {
        if let Some(slider) = controls.slider(id) {
            *text = Text::new(slider.caption(id.get(&controls.params)));
        }
    }
}

/// Show the green fill of each ticked checkbox.
pub fn sync_checkbox_fill_system(
    controls: Res<Controls>,
    mut query: Query<(&CheckboxId, &mut Visibility), With<CheckboxFill>>,
) {
    if !controls.is_changed() {
        return;
    }
    for (&id, mut vis) in query.iter_mut() {
        *vis = if controls.is_enabled(id) {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

/// Position the vector labels named by this frame's overlay; hide the rest.
pub fn sync_vector_labels_system(
    overlay: Res<VectorOverlay>,
    mut query: Query<(&VectorTag, &mut Node, &mut Visibility)>,
) {
    for (&tag, mut node, mut vis) in query.iter_mut() {
        let placed = overlay.0.iter().find_map(|cmd| match cmd {
            DrawCommand::Label { tag: t, position } if *t == tag => Some(*position),
            _ => None,
        });
        match placed {
            Some(pos) => {
                node.left = Val::Px(pos.x);
                node.top = Val::Px(pos.y);
                *vis = Visibility::Visible;
            }
            None => *vis = Visibility::Hidden,
        }
    }
}

/// Seat each arrow head on its arrow's tip; hide heads without an arrow.
pub fn sync_arrow_heads_system(
    overlay: Res<VectorOverlay>,
    mut query: Query<(&VectorTag, &mut Transform, &mut Visibility), With<ArrowHead>>,
) {
    let canvas = Canvas::default();
    for (&tag, mut transform, mut vis) in query.iter_mut() {
        let z = transform.translation.z;
        let pose = overlay.0.iter().find_map(|cmd| match *cmd {
            DrawCommand::Arrow {
                tag: t, start, end, ..
            } if t == tag => arrow_head_pose(&canvas, start, end, z),
            _ => None,
        });
        match pose {
            Some(pose) => {
                *transform = pose;
                *vis = Visibility::Visible;
            }
            None => *vis = Visibility::Hidden,
        }
    }
}

/// Draw arrow shafts and guide lines with the gizmo group matching each
/// stroke.  Arrow heads are the retained [`ArrowHead`] meshes.
pub fn vector_gizmo_system(
    mut bold: Gizmos,
    mut regular: Gizmos<RegularGizmos>,
    mut hairline: Gizmos<HairlineGizmos>,
    overlay: Res<VectorOverlay>,
) {
    let canvas = Canvas::default();
    for cmd in &overlay.0 {
        let (from, to, color, stroke) = match *cmd {
            DrawCommand::Arrow {
                start,
                end,
                color,
                stroke,
                ..
            } => (start, end, color, stroke),
            DrawCommand::Line {
                from,
                to,
                color,
                stroke,
            } => (from, to, color, stroke),
            DrawCommand::Label { .. } => continue,
        };
        let (a, b) = (canvas.to_world(from), canvas.to_world(to));
        match stroke {
            Stroke::Bold => bold.line_2d(a, b, color),
            Stroke::Regular => regular.line_2d(a, b, color),
            Stroke::Hairline => hairline.line_2d(a, b, color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn placed_head_matches_screen_arrow_geometry() {
        let config = VisualizerConfig::default();
        let canvas = Canvas::default();
        let (start, end) = (Vec2::new(100.0, 100.0), Vec2::new(160.0, 140.0));
        let pose = arrow_head_pose(&canvas, start, end, 4.0).unwrap();
        let local = arrow_head_triangle(&config);
        let placed: Vec<Vec2> = local
            .vertices
            .iter()
            .map(|v| pose.transform_point(v.extend(0.0)).truncate())
            .collect();
        let expected = arrow_shape(start, end, 8.0, 30.0).head.map(|p| canvas.to_world(p));
        assert!(close(placed[0], expected[0]), "tip {:?}", placed[0]);
        for p in &placed[1..] {
            assert!(
                close(*p, expected[1]) || close(*p, expected[2]),
                "{p:?} not in {expected:?}"
            );
        }
        assert_eq!(pose.translation.z, 4.0);
    }

    #[test]
    fn zero_length_arrow_has_no_head() {
        let p = Vec2::new(50.0, 60.0);
        assert!(arrow_head_pose(&Canvas::default(), p, p, 4.0).is_none());
    }
}
