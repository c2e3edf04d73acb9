//! Runtime configuration loaded from `assets/visualizer.toml`.
//!
//! [`VisualizerConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_visualizer_config`] reads
//! `assets/visualizer.toml` and overwrites the defaults with any values present
//! in the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the values you care about:
//!
//! ```toml
//! speed_max = 50.0
//! velocity_arrow_scale = 0.04
//! ```
//!
//! A loaded file is validated before it replaces the defaults; an invalid file
//! (including one with an unknown key) is reported and ignored as a whole.
//! The canvas size is not configurable: the window is created before this
//! file is read.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `VisualizerConfig::default()`.

use crate::constants::*;
use crate::error::{validate_positive, validate_range, SimError, SimResult};
use bevy::prelude::*;
use serde::Deserialize;

/// Path of the optional override file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/visualizer.toml";

/// Lowest accepted `target_fps`.
pub const MIN_TARGET_FPS: f32 = 1.0;

/// Runtime-tunable physics, layout and rendering configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisualizerConfig {
    // ── Window ───────────────────────────────────────────────────────────────
    pub target_fps: f32,

    // ── Physics ──────────────────────────────────────────────────────────────
    pub gravity: f32,
    pub ground_clamp_height: f32,

    // ── Coordinate transform ─────────────────────────────────────────────────
    pub pixels_per_meter: f32,
    pub origin_x: f32,
    pub ground_y: f32,

    // ── Slider layout ────────────────────────────────────────────────────────
    pub slider_x: f32,
    pub slider_top: f32,
    pub slider_spacing: f32,
    pub slider_width: f32,
    pub slider_height: f32,
    pub slider_handle_radius: f32,
    pub hit_tolerance: f32,

    // ── Slider ranges ────────────────────────────────────────────────────────
    pub speed_min: f32,
    pub speed_max: f32,
    pub speed_initial: f32,
    pub height_min: f32,
    pub height_max: f32,
    pub height_initial: f32,
    pub time_scale_min: f32,
    pub time_scale_max: f32,
    pub time_scale_initial: f32,
    pub angle_min: f32,
    pub angle_max: f32,
    pub angle_initial: f32,

    // ── Checkboxes ───────────────────────────────────────────────────────────
    pub checkbox_size: f32,
    pub force_checkbox_pos: [f32; 2],
    pub velocity_checkbox_pos: [f32; 2],

    // ── Vector overlays ──────────────────────────────────────────────────────
    pub force_arrow_length: f32,
    pub velocity_arrow_scale: f32,
    pub arrow_head_size: f32,
    pub arrow_head_angle_deg: f32,

    // ── Trail ────────────────────────────────────────────────────────────────
    pub trail_width: f32,

    // ── Assets ───────────────────────────────────────────────────────────────
    pub ball_sprite_path: String,
    pub ball_size: f32,
    pub font_path: String,
    pub font_size: f32,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            // Window
            target_fps: TARGET_FPS,
            // Physics
            gravity: GRAVITY,
            ground_clamp_height: GROUND_CLAMP_HEIGHT,
            // Coordinate transform
            pixels_per_meter: PIXELS_PER_METER,
            origin_x: ORIGIN_X,
            ground_y: GROUND_Y,
            // Slider layout
            slider_x: SLIDER_X,
            slider_top: SLIDER_TOP,
            slider_spacing: SLIDER_SPACING,
            slider_width: SLIDER_WIDTH,
            slider_height: SLIDER_HEIGHT,
            slider_handle_radius: SLIDER_HANDLE_RADIUS,
            hit_tolerance: HIT_TOLERANCE,
            // Slider ranges
            speed_min: SPEED_MIN,
            speed_max: SPEED_MAX,
            speed_initial: SPEED_INITIAL,
            height_min: HEIGHT_MIN,
            height_max: HEIGHT_MAX,
            height_initial: HEIGHT_INITIAL,
            time_scale_min: TIME_SCALE_MIN,
            time_scale_max: TIME_SCALE_MAX,
            time_scale_initial: TIME_SCALE_INITIAL,
            angle_min: ANGLE_MIN,
            angle_max: ANGLE_MAX,
            angle_initial: ANGLE_INITIAL,
            // Checkboxes
            checkbox_size: CHECKBOX_SIZE,
            force_checkbox_pos: FORCE_CHECKBOX_POS,
            velocity_checkbox_pos: VELOCITY_CHECKBOX_POS,
            // Vector overlays
            force_arrow_length: FORCE_ARROW_LENGTH,
            velocity_arrow_scale: VELOCITY_ARROW_SCALE,
            arrow_head_size: ARROW_HEAD_SIZE,
            arrow_head_angle_deg: ARROW_HEAD_ANGLE_DEG,
            // Trail
            trail_width: TRAIL_WIDTH,
            // Assets
            ball_sprite_path: BALL_SPRITE_PATH.to_string(),
            ball_size: BALL_SIZE,
            font_path: FONT_PATH.to_string(),
            font_size: FONT_SIZE,
        }
    }
}

impl VisualizerConfig {
    /// Parse a TOML document and validate the result.
    ///
    /// `path` is only used to label parse errors.
    pub fn from_toml_str(contents: &str, path: &str) -> SimResult<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| SimError::ConfigParse {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant the rest of the crate relies on.
    ///
    /// Time scale must stay strictly positive across its whole range, so its
    /// minimum is checked in addition to the ordering of the range.
    pub fn validate(&self) -> SimResult<()> {
        validate_range("speed", self.speed_min, self.speed_max, self.speed_initial)?;
        if self.speed_min < 0.0 {
            return Err(SimError::ValueOutOfRange {
                name: "speed_min",
                value: self.speed_min,
                min: 0.0,
                max: f32::INFINITY,
            });
        }
        validate_range(
            "height",
            self.height_min,
            self.height_max,
            self.height_initial,
        )?;
        validate_range(
            "time_scale",
            self.time_scale_min,
            self.time_scale_max,
            self.time_scale_initial,
        )?;
        validate_positive("time_scale_min", self.time_scale_min)?;
        validate_range("angle", self.angle_min, self.angle_max, self.angle_initial)?;
        if self.angle_min < 0.0 || self.angle_max > 90.0 {
            return Err(SimError::InvalidRange {
                name: "angle (must lie within [0, 90])",
                min: self.angle_min,
                max: self.angle_max,
            });
        }
        validate_positive("pixels_per_meter", self.pixels_per_meter)?;
        validate_positive("gravity", self.gravity)?;
        if !self.target_fps.is_finite() || self.target_fps < MIN_TARGET_FPS {
            return Err(SimError::ValueOutOfRange {
                name: "target_fps",
                value: self.target_fps,
                min: MIN_TARGET_FPS,
                max: f32::INFINITY,
            });
        }
        for (name, value) in [
            ("slider_width", self.slider_width),
            ("slider_height", self.slider_height),
            ("slider_handle_radius", self.slider_handle_radius),
            ("hit_tolerance", self.hit_tolerance),
            ("checkbox_size", self.checkbox_size),
            ("force_arrow_length", self.force_arrow_length),
            ("velocity_arrow_scale", self.velocity_arrow_scale),
            ("arrow_head_size", self.arrow_head_size),
            ("trail_width", self.trail_width),
            ("ball_size", self.ball_size),
            ("font_size", self.font_size),
        ] {
            validate_positive(name, value)?;
        }
        Ok(())
    }
}

/// Startup system: attempt to load `assets/visualizer.toml` and overwrite the
/// `VisualizerConfig` resource with the values in the file.
///
/// A missing file is not an error (defaults are already in place from
/// `insert_resource`).  Parse and validation errors are logged and the
/// defaults are kept.
pub fn load_visualizer_config(mut config: ResMut<VisualizerConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match VisualizerConfig::from_toml_str(&contents, CONFIG_PATH) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded visualizer config from {CONFIG_PATH}");
            }
            Err(e) => {
                warn!("{e}; using compiled defaults");
            }
        },
        Err(_) => {
            info!("No {CONFIG_PATH} found; using compiled defaults");
        }
    }
}
