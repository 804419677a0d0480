//! Simulated volumetric gas-handling rig.
//!
//! Provides:
//! - `RigController`: buffers, special valves, sensors, mixing rules and the halt ratchet
//! - the init → running lifecycle, evaluated once per tick
//! - the over/under-pressure interlock applied on every running tick
//! - a fixed-step tick runner for scripts and tests
//!
//! Everything runs on the caller's thread. A command's effect is always
//! visible to the next tick's safety check.

pub mod controller;
pub mod error;
pub mod lifecycle;
pub mod selector;
pub mod sim;

// Re-exports for public API
pub use controller::RigController;
pub use error::{RigError, RigResult};
pub use lifecycle::{LifecycleInputs, RigState, TRANSITIONS, Transition, next_state};
pub use selector::ValveSelector;
pub use sim::{Tickable, TickOptions, TickReport, run_ticks, run_ticks_observed};
