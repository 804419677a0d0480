//! vr-gases: the gas catalogue and mixing rules of the rig.
//!
//! Provides:
//! - `Gas`: an immutable (index, name) pair
//! - `SystemGases`: the catalogue of every gas the panel knows, looked up by index or name
//! - `TwoGasMixer`: the symmetric "may coexist in the gas path" relation
//!
//! The catalogue and the mixer are built once when the rig starts and are
//! read-only afterward. Everything that refers to a gas holds a clone of
//! the catalogue entry; identity is the index.

pub mod catalog;
pub mod error;
pub mod gas;
pub mod mixer;

pub use catalog::SystemGases;
pub use error::{GasError, GasResult};
pub use gas::Gas;
pub use mixer::TwoGasMixer;
