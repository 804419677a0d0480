//! Float helpers for readings and rates.

use crate::VrError;

/// Reject NaN and infinities before they reach a sensor or a setpoint.
pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, VrError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(VrError::NonFinite { what, value: v })
    }
}

/// Move `current` toward `goal` by at most `max_step`, never overshooting.
pub fn approach(current: f64, goal: f64, max_step: f64) -> f64 {
    let step = max_step.abs();
    if current < goal {
        (current + step).min(goal)
    } else {
        (current - step).max(goal)
    }
}

/// `part / whole` as a float, 0 for an empty whole.
pub fn fraction(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
