//! Visualizer error types.
//!
//! The core itself has no fatal error paths: out-of-track pointer positions
//! are clamped and ground impact is a terminal state.  These types cover the
//! configuration layer, where a bad `assets/visualizer.toml` is reported and
//! the compiled defaults are kept.
//!
//! ## Usage
//!
//! ```rust
//! use parabola::error::{validate_range, SimResult};
//!
//! fn check() -> SimResult<()> {
//!     validate_range("speed", 0.0, 30.0, 10.0)?;
//!     Ok(())
//! }
//! # check().unwrap();
//! ```

use std::fmt;

/// Top-level error enum for the visualizer.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// The configuration file exists but is not valid TOML for
    /// [`crate::config::VisualizerConfig`].
    ConfigParse {
        /// Path of the file that failed to parse.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A slider range is empty or inverted.
    InvalidRange {
        /// Name of the range (for logging).
        name: &'static str,
        min: f32,
        max: f32,
    },

    /// A slider's initial value lies outside its range.
    ValueOutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// A quantity that must be strictly positive is zero, negative, or NaN.
    NonPositive {
        name: &'static str,
        value: f32,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::ConfigParse { path, message } => {
                write!(f, "failed to parse {}: {}", path, message)
            }
            SimError::InvalidRange { name, min, max } => write!(
                f,
                "range '{}' is invalid: min {} must be less than max {}",
                name, min, max
            ),
            SimError::ValueOutOfRange {
                name,
                value,
                min,
                max,
            } => write!(
                f,
                "initial value of '{}' = {} is outside [{}, {}]",
                name, value, min, max
            ),
            SimError::NonPositive { name, value } => {
                write!(f, "'{}' = {} must be strictly positive", name, value)
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `min < max` and `min ≤ value ≤ max`.
pub fn validate_range(name: &'static str, min: f32, max: f32, value: f32) -> SimResult<()> {
    if !(min < max) {
        return Err(SimError::InvalidRange { name, min, max });
    }
    if !(min..=max).contains(&value) {
        return Err(SimError::ValueOutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Returns an error unless `value > 0`.  NaN is rejected.
pub fn validate_positive(name: &'static str, value: f32) -> SimResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(SimError::NonPositive { name, value })
    }
}
