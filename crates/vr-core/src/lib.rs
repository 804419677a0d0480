//! vr-core: shared foundation for the volumetric rig emulator.
//!
//! Contains:
//! - numeric (finite checks, bounded approach, fractions)
//! - ids (1-based buffer numbers, range classification)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports used by every other vr crate
pub use error::{VrError, VrResult};
pub use ids::*;
pub use numeric::*;
