//! vr-components: the switchable parts of the gas panel.
//!
//! Provides:
//! - `Valve`: open/closed × enabled/disabled with the "an open valve is never disabled" guard
//! - `Buffer`: one gas line pairing a captive buffer gas, a swappable system gas and a valve
//!
//! Requests that the current state does not allow are ignored rather than
//! reported; callers inspect the resulting state when they need to know.
//!
//! # Example
//!
//! ```
//! use vr_components::{Buffer, ValveStatus};
//! use vr_core::BufferNumber;
//! use vr_gases::{Gas, TwoGasMixer};
//!
//! let argon = Gas::new(3, "ARGON");
//! let mut buffer = Buffer::new(BufferNumber::new(1).unwrap(), argon.clone(), argon.clone());
//!
//! let mixer = TwoGasMixer::new();
//! buffer.open_valve(&mixer, [&argon]);
//! assert_eq!(buffer.valve_status(), ValveStatus::OpenEnabled);
//! ```

pub mod buffer;
pub mod valve;

// Re-exports
pub use buffer::Buffer;
pub use valve::{Valve, ValveStatus};
