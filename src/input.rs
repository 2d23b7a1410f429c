//! Per-frame time and input, already resolved from devices.

use cgmath::{InnerSpace, Vector2};

use crate::orientation::{Axis, Sign};

/// Squared magnitude below which a continuous input counts as zero.
pub const MIN_INPUT_SQUARED: f32 = 1e-6;

/// Elapsed time for one frame.
///
/// Step and snap animations, cooldowns and the finish debounce run on
/// `scaled`; free-rotation input runs on `unscaled` so it stays responsive
/// while the game is paused or slowed down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    pub scaled: f32,
    pub unscaled: f32,
}

impl FrameTime {
    pub const fn new(scaled: f32, unscaled: f32) -> Self {
        Self { scaled, unscaled }
    }

    /// Same delta on both time bases.
    pub const fn uniform(delta: f32) -> Self {
        Self::new(delta, delta)
    }
}

/// Everything the controller reads in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputFrame {
    /// Step direction: `x` is horizontal, `y` is vertical.
    pub step: Vector2<f32>,
    /// Step roll axis.
    pub roll: f32,
    /// Pointer movement since the last frame.
    pub pointer_delta: Vector2<f32>,
    /// Whether the rotate button is held.
    pub pointer_held: bool,
    /// Continuous keyboard rotation: `x` yaws, `y` pitches.
    pub keyboard_rotate: Vector2<f32>,
}

impl Default for InputFrame {
    fn default() -> Self {
        Self {
            step: Vector2::new(0.0, 0.0),
            roll: 0.0,
            pointer_delta: Vector2::new(0.0, 0.0),
            pointer_held: false,
            keyboard_rotate: Vector2::new(0.0, 0.0),
        }
    }
}

impl InputFrame {
    /// Whether any free-rotation input moved this frame.
    pub fn has_keyboard_rotation(&self) -> bool {
        self.keyboard_rotate.magnitude2() >= MIN_INPUT_SQUARED
    }
}

/// Tri-state reading of one axis: `None` inside the deadzone.
pub fn step_sign(value: f32, deadzone: f32) -> Option<Sign> {
    if value > deadzone {
        Some(Sign::Positive)
    } else if value < -deadzone {
        Some(Sign::Negative)
    } else {
        None
    }
}

/// Picks at most one step from the step vector and roll axis.
///
/// Horizontal wins over vertical, which wins over roll, so a diagonal press
/// never produces two steps. Horizontal turns about Y, vertical about X, and
/// roll about Z.
pub fn resolve_step(step: Vector2<f32>, roll: f32, deadzone: f32) -> Option<(Axis, Sign)> {
    if let Some(sign) = step_sign(step.x, deadzone) {
        return Some((Axis::Y, sign));
    }
    if let Some(sign) = step_sign(step.y, deadzone) {
        return Some((Axis::X, sign));
    }
    step_sign(roll, deadzone).map(|sign| (Axis::Z, sign))
}
