//! Tunable rotation parameters.
//!
//! Durations marked "scaled" advance with [`FrameTime::scaled`] and slow down
//! under pause or slow motion; "unscaled" ones follow [`FrameTime::unscaled`].
//!
//! [`FrameTime::scaled`]: crate::input::FrameTime::scaled
//! [`FrameTime::unscaled`]: crate::input::FrameTime::unscaled

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Rotation controller configuration.
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Seconds (scaled) a discrete step takes to animate.
    pub step_duration: f32,
    /// Seconds (scaled) after a step before another step is accepted.
    pub step_repeat_delay: f32,
    /// Magnitude a step axis must exceed to count as pressed.
    pub step_deadzone: f32,

    /// Euler rounding increment in degrees used when snapping.
    pub snap_increment: f32,
    /// Seconds (scaled) a snap takes to animate.
    pub snap_duration: f32,
    /// Snaps shorter than this many degrees are applied without animating.
    pub snap_epsilon_degrees: f32,

    /// Degrees of free rotation per unit of pointer movement.
    pub pointer_degrees_per_unit: f32,
    /// Multiplier applied on top of `pointer_degrees_per_unit`.
    pub pointer_boost: f32,
    /// Free rotation speed for keyboard input, in degrees per unscaled second.
    pub keyboard_degrees_per_second: f32,
    /// Seconds (unscaled) of no keyboard rotation before the room snaps.
    pub key_snap_delay: f32,
    /// Invert horizontal free rotation.
    pub invert_x: bool,
    /// Invert vertical free rotation.
    pub invert_y: bool,

    /// Seconds (scaled) of stillness before `Finished`/`Snapped` is reported.
    pub idle_to_finish: f32,
    /// Follow the external inside/inspect mode signal.
    pub auto_mode: bool,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            step_duration: 0.10,
            step_repeat_delay: 0.18,
            step_deadzone: 0.5,

            snap_increment: 90.0,
            snap_duration: 0.10,
            snap_epsilon_degrees: 0.1,

            pointer_degrees_per_unit: 0.25,
            pointer_boost: 1.35,
            keyboard_degrees_per_second: 120.0,
            key_snap_delay: 0.08,
            invert_x: false,
            invert_y: false,

            idle_to_finish: 0.12,
            auto_mode: true,
        }
    }
}

impl RotationConfig {
    /// Checks that every value is usable.
    ///
    /// Only 90° snapping lands on a cube orientation, so any other increment
    /// is rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("step_duration", self.step_duration),
            ("step_repeat_delay", self.step_repeat_delay),
            ("snap_duration", self.snap_duration),
            ("key_snap_delay", self.key_snap_delay),
            ("idle_to_finish", self.idle_to_finish),
        ];
        for (field, value) in durations {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be a finite, non-negative number of seconds",
                });
            }
        }

        if self.snap_increment != 90.0 {
            return Err(ConfigError::Invalid {
                field: "snap_increment",
                reason: "must be 90 degrees",
            });
        }
        if !(self.step_deadzone >= 0.0 && self.step_deadzone < 1.0) {
            return Err(ConfigError::Invalid {
                field: "step_deadzone",
                reason: "must be in [0, 1)",
            });
        }
        if !(self.snap_epsilon_degrees >= 0.0 && self.snap_epsilon_degrees < 45.0) {
            return Err(ConfigError::Invalid {
                field: "snap_epsilon_degrees",
                reason: "must be in [0, 45)",
            });
        }
        if !self.pointer_degrees_per_unit.is_finite()
            || !self.pointer_boost.is_finite()
            || !self.keyboard_degrees_per_second.is_finite()
        {
            return Err(ConfigError::Invalid {
                field: "pointer_degrees_per_unit",
                reason: "rotation gains must be finite",
            });
        }

        Ok(())
    }
}
