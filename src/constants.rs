//! Centralised physics, layout, and rendering constants.
//!
//! All tuneable values live here so they can be found and modified in one
//! place.  [`crate::config::VisualizerConfig::default`] is built from these
//! values, and `assets/visualizer.toml` can override any of them at startup.
//!
//! Screen coordinates are in pixels with the origin at the top-left corner of
//! the canvas and +y pointing down.

// ── Window ────────────────────────────────────────────────────────────────────

/// Fixed canvas width (px).
pub const CANVAS_WIDTH: f32 = 1200.0;

/// Fixed canvas height (px).
pub const CANVAS_HEIGHT: f32 = 900.0;

pub const WINDOW_TITLE: &str = "Projectile Motion Simulator";

/// Target frame rate of the cooperative loop.
pub const TARGET_FPS: f32 = 60.0;

// ── Physics ───────────────────────────────────────────────────────────────────

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f32 = 9.8;

/// Height (m) at which a running trajectory hits the virtual ground.
///
/// The evaluated height is clamped to this value and the run terminates.
pub const GROUND_CLAMP_HEIGHT: f32 = -4.0;

// ── Coordinate transform ──────────────────────────────────────────────────────

/// Meters-to-pixels scale: 1 m = 100 px.
pub const PIXELS_PER_METER: f32 = 100.0;

/// Screen x (px) of the launch point.
pub const ORIGIN_X: f32 = 50.0;

/// Screen y (px) of height zero.
pub const GROUND_Y: f32 = 500.0;

// ── Sliders ───────────────────────────────────────────────────────────────────

/// Left edge (px) shared by all slider tracks.
pub const SLIDER_X: f32 = 350.0;
pub const SLIDER_WIDTH: f32 = 500.0;
pub const SLIDER_HEIGHT: f32 = 6.0;
pub const SLIDER_HANDLE_RADIUS: f32 = 10.0;

/// Vertical distance (px) between consecutive slider tracks.
pub const SLIDER_SPACING: f32 = 40.0;

/// Top edge (px) of the first slider track.
pub const SLIDER_TOP: f32 = 20.0;

/// Pointer-down must land within this many pixels of the handle center
/// (on each axis) to start a drag.
pub const HIT_TOLERANCE: f32 = 15.0;

pub const SPEED_MIN: f32 = 0.0;
pub const SPEED_MAX: f32 = 30.0;
pub const SPEED_INITIAL: f32 = 10.0;

pub const HEIGHT_MIN: f32 = -2.5;
pub const HEIGHT_MAX: f32 = 4.0;
pub const HEIGHT_INITIAL: f32 = 2.0;

pub const TIME_SCALE_MIN: f32 = 0.1;
pub const TIME_SCALE_MAX: f32 = 2.0;
pub const TIME_SCALE_INITIAL: f32 = 1.0;

pub const ANGLE_MIN: f32 = 0.0;
pub const ANGLE_MAX: f32 = 90.0;
pub const ANGLE_INITIAL: f32 = 45.0;

// ── Checkboxes ────────────────────────────────────────────────────────────────

pub const CHECKBOX_SIZE: f32 = 20.0;

/// Top-left corner (px) of the show-force-vector checkbox.
pub const FORCE_CHECKBOX_POS: [f32; 2] = [1000.0, 120.0];

/// Top-left corner (px) of the show-velocity-vectors checkbox.
pub const VELOCITY_CHECKBOX_POS: [f32; 2] = [1000.0, 150.0];

// ── Vector overlays ───────────────────────────────────────────────────────────

/// Fixed on-screen length (px) of the gravity arrow.
pub const FORCE_ARROW_LENGTH: f32 = 60.0;

/// Visual scale applied to velocity arrows after the meters-to-pixels scale.
///
/// At 0.06 a 10 m/s velocity is drawn 60 px long.
pub const VELOCITY_ARROW_SCALE: f32 = 0.06;

/// Distance (px) from the arrow tip to the base points of its head.
pub const ARROW_HEAD_SIZE: f32 = 8.0;

/// Half-angle (degrees) between the shaft and each side of the arrow head.
pub const ARROW_HEAD_ANGLE_DEG: f32 = 30.0;

// ── Trail ─────────────────────────────────────────────────────────────────────

/// Stroke width (px) of trail segments in the persistent raster.
pub const TRAIL_WIDTH: f32 = 2.0;

// ── Assets ────────────────────────────────────────────────────────────────────

/// Ball sprite, relative to the `assets/` directory.
pub const BALL_SPRITE_PATH: &str = "ball.png";

/// Drawn size (px) of the ball sprite.
pub const BALL_SIZE: f32 = 24.0;

/// Preferred UI font, relative to the `assets/` directory.
///
/// Falls back to Bevy's default font when the file is missing or unparsable.
pub const FONT_PATH: &str = "fonts/msyh.ttc";

/// Text size of captions, labels and the help line.
pub const FONT_SIZE: f32 = 24.0;
