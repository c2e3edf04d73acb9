//! Interaction controller: raw window input → widget and lifecycle commands.
//!
//! ## Pipeline (runs in order every `Update` frame)
//!
//! 1. [`capture_input_system`]: translates Bevy [`WindowEvent`] messages, in
//!    arrival order, into the closed [`InputEvent`] set and queues them.
//! 2. [`apply_input_system`]: drains the queue through [`Controls::handle`].
//!
//! The queue is the **input abstraction layer**: tests push `InputEvent`s
//! directly and never need a window.
//!
//! ## Pointer state machine
//!
//! | State               | Event                        | Next                 |
//! |---------------------|------------------------------|----------------------|
//! | none dragging       | down on handle, editable     | dragging that slider |
//! | none dragging       | down on handle, Running      | none dragging        |
//! | dragging            | move                         | value follows x (not while Running) |
//! | any                 | up                           | none dragging        |
//!
//! Checkboxes toggle on pointer-down independently of the slider logic and of
//! the simulation phase.

use crate::config::VisualizerConfig;
use crate::lifecycle::Simulation;
use crate::physics::LaunchParameters;
use crate::widgets::{Checkbox, CheckboxId, Slider, SliderId};
use bevy::input::keyboard::KeyboardInput;
use bevy::input::mouse::MouseButtonInput;
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::WindowEvent;

// ── Input events ──────────────────────────────────────────────────────────────

/// Keys with a bound command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKey {
    /// Launch.
    Space,
    /// Reset.
    R,
}

/// Every input the controller reacts to.  Positions are screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp,
    KeyDown(CommandKey),
}

/// Input translated this frame, waiting to be applied in arrival order.
#[derive(Resource, Debug, Default)]
pub struct InputQueue(pub Vec<InputEvent>);

/// Last known cursor position; mouse-button messages carry no position.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct CursorTracker(pub Option<Vec2>);

/// Map one window message to an [`InputEvent`].
///
/// Only the left mouse button, Space and R are bound; key auto-repeat is
/// ignored.  A button press before the first cursor movement is dropped.
pub fn translate_window_event(
    event: &WindowEvent,
    cursor: &mut CursorTracker,
) -> Option<InputEvent> {
    match event {
        WindowEvent::CursorMoved(moved) => {
            cursor.0 = Some(moved.position);
            Some(InputEvent::PointerMove(moved.position))
        }
        WindowEvent::MouseButtonInput(MouseButtonInput { button, state, .. })
            if *button == MouseButton::Left =>
        {
            match state {
                ButtonState::Pressed => cursor.0.map(InputEvent::PointerDown),
                ButtonState::Released => Some(InputEvent::PointerUp),
            }
        }
        WindowEvent::KeyboardInput(KeyboardInput {
            key_code,
            state: ButtonState::Pressed,
            repeat: false,
            ..
        }) => match key_code {
            KeyCode::Space => Some(InputEvent::KeyDown(CommandKey::Space)),
            KeyCode::KeyR => Some(InputEvent::KeyDown(CommandKey::R)),
            _ => None,
        },
        _ => None,
    }
}

// ── Controls ──────────────────────────────────────────────────────────────────

/// Widget state and the editable launch parameters.
#[derive(Resource, Debug, Clone)]
pub struct Controls {
    /// Live parameters bound to the sliders.
    pub params: LaunchParameters,
    /// In hit-testing order.
    pub sliders: Vec<Slider>,
    pub checkboxes: Vec<Checkbox>,
    /// The slider being dragged, if any.  At most one at a time.
    pub dragging: Option<SliderId>,
    pub hit_tolerance: f32,
}

impl Controls {
    pub fn from_config(config: &VisualizerConfig) -> Self {
        Self {
            params: LaunchParameters::from_config(config),
            sliders: SliderId::ALL
                .iter()
                .map(|&id| Slider::from_config(id, config))
                .collect(),
            checkboxes: CheckboxId::ALL
                .iter()
                .map(|&id| Checkbox::from_config(id, config))
                .collect(),
            dragging: None,
            hit_tolerance: config.hit_tolerance,
        }
    }

    pub fn slider(&self, id: SliderId) -> Option<&Slider> {
        self.sliders.iter().find(|s| s.id == id)
    }

    pub fn checkbox(&self, id: CheckboxId) -> Option<&Checkbox> {
        self.checkboxes.iter().find(|c| c.id == id)
    }

    /// Whether the overlay checkbox `id` is ticked.
    pub fn is_enabled(&self, id: CheckboxId) -> bool {
        self.checkbox(id).is_some_and(|c| c.enabled)
    }

    /// Apply one input event at real time `now`.
    pub fn handle(&mut self, event: InputEvent, sim: &mut Simulation, now: f64) {
        match event {
            InputEvent::PointerDown(pos) => {
                self.pointer_down(pos, sim.parameters_editable());
                for checkbox in self.checkboxes.iter_mut() {
                    checkbox.toggle_if_hit(pos);
                }
            }
            InputEvent::PointerMove(pos) => {
                if sim.parameters_editable() {
                    self.drag_to(pos.x);
                }
            }
            InputEvent::PointerUp => {
                self.dragging = None;
            }
            InputEvent::KeyDown(CommandKey::Space) => {
                sim.launch(self.params, now);
            }
            InputEvent::KeyDown(CommandKey::R) => {
                sim.reset();
            }
        }
    }

    /// Start dragging the first slider whose handle is under `pos`.
    fn pointer_down(&mut self, pos: Vec2, editable: bool) {
        if !editable {
            return;
        }
        let hit = self
            .sliders
            .iter()
            .find(|s| s.hits_handle(s.id.get(&self.params), pos, self.hit_tolerance))
            .map(|s| s.id);
        if hit.is_some() {
            self.dragging = hit;
        }
    }

    fn drag_to(&mut self, x: f32) {
        let Some(id) = self.dragging else {
            return;
        };
        if let Some(slider) = self.sliders.iter().find(|s| s.id == id) {
            let value = slider.value_at(x);
            id.set(&mut self.params, value);
        }
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Translate this frame's window messages into the [`InputQueue`].
pub fn capture_input_system(
    mut events: MessageReader<WindowEvent>,
    mut cursor: ResMut<CursorTracker>,
    mut queue: ResMut<InputQueue>,
) {
    for event in events.read() {
        if let Some(input) = translate_window_event(event, &mut cursor) {
            queue.0.push(input);
        }
    }
}

/// Apply every queued input in arrival order.
pub fn apply_input_system(
    mut queue: ResMut<InputQueue>,
    mut controls: ResMut<Controls>,
    mut sim: ResMut<Simulation>,
    time: Res<Time<Real>>,
) {
    if queue.0.is_empty() {
        return;
    }
    let now = time.elapsed_secs_f64();
    for event in queue.0.drain(..) {
        controls.handle(event, &mut sim, now);
    }
}
