//! Pressure cycling model.
//!
//! When pressure cycling is switched on the rig fakes gas flow: with buffer
//! valves open every pressure reading climbs toward a little above the
//! target, faster the more lines are open; with every buffer closed the
//! readings leak down toward zero. Both motions are rate limited and never
//! overshoot their goal.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};
use vr_core::approach;

/// Fill goal as a multiple of the target pressure.
pub const OVERFILL_FACTOR: f64 = 1.1;

/// Rate-limited fill/leak model.
///
/// Rates are fractions of the target pressure per second:
/// - fill: `ramp_rate * target * open_fraction`
/// - leak: `leak_rate * target`
///
/// # Example
///
/// ```
/// use vr_controls::PressureRamp;
///
/// let ramp = PressureRamp::default();
/// let mut p = 0.0;
/// for _ in 0..200 {
///     p = ramp.step(p, 100.0, 1.0, 0.1);
/// }
/// assert!((p - 110.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PressureRamp {
    /// Fill rate at full flow (1/second), must be positive
    pub ramp_rate: f64,
    /// Leak-down rate with every buffer closed (1/second), must be positive
    pub leak_rate: f64,
}

impl Default for PressureRamp {
    fn default() -> Self {
        Self {
            ramp_rate: 0.1,
            leak_rate: 0.02,
        }
    }
}

impl PressureRamp {
    /// # Errors
    ///
    /// Returns error if either rate is not a positive finite number.
    pub fn new(ramp_rate: f64, leak_rate: f64) -> ControlResult<Self> {
        if !(ramp_rate.is_finite() && ramp_rate > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "ramp_rate must be positive",
            });
        }
        if !(leak_rate.is_finite() && leak_rate > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "leak_rate must be positive",
            });
        }
        Ok(Self {
            ramp_rate,
            leak_rate,
        })
    }

    /// Where a reading is heading for the given fraction of open buffers.
    pub fn goal(&self, target: f64, open_fraction: f64) -> f64 {
        if open_fraction > 0.0 {
            OVERFILL_FACTOR * target
        } else {
            0.0
        }
    }

    /// Advance one reading by `dt` seconds.
    pub fn step(&self, value: f64, target: f64, open_fraction: f64, dt: f64) -> f64 {
        let goal = self.goal(target, open_fraction);
        let max_step = if open_fraction > 0.0 {
            self.ramp_rate * target * open_fraction.min(1.0) * dt
        } else {
            self.leak_rate * target * dt
        };
        approach(value, goal, max_step)
    }
}
