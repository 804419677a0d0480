//! Sensing and pressure-control primitives for the rig.
//!
//! This crate holds the parts of the rig that deal in readings rather than
//! valves: monitored sensors with a derived status, the pressure cycling
//! model used when the rig simulates gas flow, and the pure safety
//! decision taken from the overall pressure on every tick.
//!
//! # Architecture
//!
//! - Sensors hold a scalar `f64` value and a status recomputed on every write
//! - The ramp model moves readings toward a goal at a bounded rate
//! - The interlock decision is a pure function of (overall pressure, target);
//!   applying it to valves is the controller's job

pub mod error;
pub mod interlock;
pub mod ramp;
pub mod sensor;

pub use error::{ControlError, ControlResult};
pub use interlock::{
    InterlockAction, REENABLE_FRACTION, REOPEN_FRACTION, interlock_action, overall_pressure,
};
pub use ramp::{OVERFILL_FACTOR, PressureRamp};
pub use sensor::{PressureSensor, Sensor, SensorRef, SensorStatus, TemperatureSensor};
