//! Headless integration tests for the simulation core.
//!
//! These tests use [`MinimalPlugins`] plus [`SimulationPlugin`]: no window, no
//! rendering.  Real time is advanced by a fixed step per `app.update()` via
//! [`TimeUpdateStrategy::ManualDuration`], so flights are deterministic.
//!
//! Covered scenarios:
//! 1. Space launches the ball and the trail grows one point per frame.
//! 2. The flight terminates on ground impact and the trail freezes.
//! 3. R resets to Idle and clears the trail.
//! 4. Sliders are locked while Running and editable again once Terminated.
//! 5. Window messages (cursor + left button) drive a slider drag end to end.

use bevy::input::mouse::MouseButtonInput;
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::window::{CursorMoved, WindowEvent};
use parabola::controller::{CommandKey, Controls, InputEvent, InputQueue};
use parabola::lifecycle::{Phase, Simulation};
use parabola::simulation::SimulationPlugin;
use parabola::widgets::SliderId;
use std::time::Duration;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a headless app advancing `step` of real time per frame, with the
/// Startup schedule already run.
fn headless_app(step: Duration) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, SimulationPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));
    app.update();
    app
}

fn push(app: &mut App, event: InputEvent) {
    app.world_mut().resource_mut::<InputQueue>().0.push(event);
}

fn sim(app: &App) -> &Simulation {
    app.world().resource::<Simulation>()
}

fn controls(app: &App) -> &Controls {
    app.world().resource::<Controls>()
}

fn handle_of(app: &App, id: SliderId) -> Vec2 {
    let controls = controls(app);
    let slider = controls.slider(id).expect("slider exists");
    slider.handle_center(id.get(&controls.params))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn starts_idle_with_empty_trail() {
    let app = headless_app(Duration::from_millis(16));
    assert_eq!(sim(&app).phase(), Phase::Idle);
    assert!(sim(&app).trail().is_empty());
    assert_eq!(controls(&app).params.speed, 10.0);
}

#[test]
fn space_launches_and_trail_grows_each_frame() {
    let mut app = headless_app(Duration::from_millis(16));
    push(&mut app, InputEvent::KeyDown(CommandKey::Space));
    app.update();
    assert_eq!(sim(&app).phase(), Phase::Running);
    assert_eq!(sim(&app).trail().len(), 1);

    app.update();
    app.update();
    assert_eq!(sim(&app).trail().len(), 3);
}

#[test]
fn flight_terminates_on_ground_and_trail_freezes() {
    // Defaults (10 m/s, 45°, 2 m) land after roughly 2.04 s.
    let mut app = headless_app(Duration::from_millis(250));
    push(&mut app, InputEvent::KeyDown(CommandKey::Space));
    for _ in 0..20 {
        app.update();
    }
    assert_eq!(sim(&app).phase(), Phase::Terminated);

    let frozen = sim(&app).trail().len();
    let landed_at = sim(&app).ball_position(&controls(&app).params);
    assert!((landed_at.y - -4.0).abs() < 1e-4, "clamped to ground: {landed_at}");
    app.update();
    assert_eq!(sim(&app).trail().len(), frozen);
}

#[test]
fn reset_returns_to_idle_and_clears_trail() {
    let mut app = headless_app(Duration::from_millis(16));
    push(&mut app, InputEvent::KeyDown(CommandKey::Space));
    app.update();
    app.update();
    assert!(!sim(&app).trail().is_empty());

    push(&mut app, InputEvent::KeyDown(CommandKey::R));
    app.update();
    assert_eq!(sim(&app).phase(), Phase::Idle);
    assert!(sim(&app).trail().is_empty());
    assert!(!sim(&app).has_launched());
}

#[test]
fn sliders_locked_while_running_and_unlocked_after_landing() {
    let mut app = headless_app(Duration::from_millis(250));
    push(&mut app, InputEvent::KeyDown(CommandKey::Space));
    app.update();

    let handle = handle_of(&app, SliderId::Speed);
    push(&mut app, InputEvent::PointerDown(handle));
    push(&mut app, InputEvent::PointerMove(Vec2::new(2000.0, handle.y)));
    app.update();
    assert_eq!(controls(&app).dragging, None);
    assert_eq!(controls(&app).params.speed, 10.0);

    for _ in 0..20 {
        app.update();
    }
    assert_eq!(sim(&app).phase(), Phase::Terminated);

    push(&mut app, InputEvent::PointerDown(handle));
    push(&mut app, InputEvent::PointerMove(Vec2::new(2000.0, handle.y)));
    app.update();
    assert_eq!(controls(&app).params.speed, 30.0);
}

#[test]
fn window_messages_drive_slider_drag() {
    let mut app = headless_app(Duration::from_millis(16));
    let handle = handle_of(&app, SliderId::Angle);
    let window = Entity::PLACEHOLDER;

    let world = app.world_mut();
    world.write_message(WindowEvent::CursorMoved(CursorMoved {
        window,
        position: handle,
        delta: None,
    }));
    world.write_message(WindowEvent::MouseButtonInput(MouseButtonInput {
        button: MouseButton::Left,
        state: ButtonState::Pressed,
        window,
    }));
    world.write_message(WindowEvent::CursorMoved(CursorMoved {
        window,
        position: Vec2::new(-100.0, handle.y),
        delta: None,
    }));
    world.write_message(WindowEvent::MouseButtonInput(MouseButtonInput {
        button: MouseButton::Left,
        state: ButtonState::Released,
        window,
    }));
    app.update();

    assert_eq!(controls(&app).params.angle_deg, 0.0);
    assert_eq!(controls(&app).dragging, None);
}
