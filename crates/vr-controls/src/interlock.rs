//! Pressure safety decision.
//!
//! Thresholds are fractions of the target pressure:
//! - below `REOPEN_FRACTION`: re-enable and re-open every buffer valve
//! - below `REENABLE_FRACTION`: re-enable every buffer valve
//! - above the target itself: trip (close and disable every buffer valve)

/// Below this fraction of target every buffer valve is re-enabled.
pub const REENABLE_FRACTION: f64 = 0.5;
/// Below this fraction of target every buffer valve is also re-opened.
pub const REOPEN_FRACTION: f64 = 0.1;

/// What the tick should do to the buffer valves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterlockAction {
    Hold,
    Enable,
    EnableAndOpen,
    Trip,
}

/// Highest of the given readings, 0 when there are none.
pub fn overall_pressure(readings: impl IntoIterator<Item = f64>) -> f64 {
    readings.into_iter().reduce(f64::max).unwrap_or(0.0)
}

/// Decide the interlock action for one tick.
///
/// With a positive target the low and high bands cannot overlap, so one
/// action covers the whole tick.
pub fn interlock_action(overall: f64, target: f64) -> InterlockAction {
    if overall > target {
        InterlockAction::Trip
    } else if overall < REOPEN_FRACTION * target {
        InterlockAction::EnableAndOpen
    } else if overall < REENABLE_FRACTION * target {
        InterlockAction::Enable
    } else {
        InterlockAction::Hold
    }
}
