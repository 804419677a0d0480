//! Error types for rig construction and direct (non-protocol) access.

use thiserror::Error;

/// Errors raised while building the rig or driving it directly.
///
/// None of these reach the wire: protocol commands degrade to text replies.
#[derive(Error, Debug)]
pub enum RigError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Configuration error: {0}")]
    Config(#[from] vr_config::ValidationError),

    #[error("Gas catalogue error: {0}")]
    Gas(#[from] vr_gases::GasError),

    #[error("Control error: {0}")]
    Control(#[from] vr_controls::ControlError),

    #[error(transparent)]
    Core(#[from] vr_core::VrError),
}

pub type RigResult<T> = Result<T, RigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_core_errors() {
        let err: RigError = vr_core::VrError::InvalidArg { what: "dt" }.into();
        assert!(err.to_string().contains("dt"));
    }
}
