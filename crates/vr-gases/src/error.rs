//! Gas catalogue errors.

use thiserror::Error;
use vr_core::VrError;

/// Result type for catalogue and mixer construction.
pub type GasResult<T> = Result<T, GasError>;

/// Errors that can occur while building the gas catalogue.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GasError {
    /// Two catalogue entries share an index or a name.
    #[error("Duplicate gas {what}: {value}")]
    Duplicate { what: &'static str, value: String },

    /// A gas name or index that is not in the catalogue.
    #[error("Unknown gas: {name}")]
    UnknownGas { name: String },

    /// The catalogue has no entries.
    #[error("Gas catalogue is empty")]
    Empty,
}

impl From<GasError> for VrError {
    fn from(err: GasError) -> Self {
        match err {
            GasError::Duplicate { .. } => VrError::Invariant {
                what: "duplicate gas in catalogue",
            },
            GasError::UnknownGas { .. } => VrError::InvalidArg {
                what: "unknown gas",
            },
            GasError::Empty => VrError::Invariant {
                what: "empty gas catalogue",
            },
        }
    }
}
