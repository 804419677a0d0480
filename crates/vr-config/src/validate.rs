//! Rig configuration validation.

use crate::schema::{LATEST_VERSION, RigConfig};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_config(config: &RigConfig) -> Result<(), ValidationError> {
    if config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    if config.gases.is_empty() {
        return Err(invalid("gases", "[]", "at least one gas is required"));
    }

    let mut indices = HashSet::new();
    let mut names = HashSet::new();
    for gas in &config.gases {
        if !indices.insert(gas.index) {
            return Err(ValidationError::DuplicateId {
                id: gas.index.to_string(),
                context: "gas indices".to_string(),
            });
        }
        if gas.name.trim().is_empty() {
            return Err(invalid("gas name", &gas.name, "must not be blank"));
        }
        if !names.insert(gas.name.trim()) {
            return Err(ValidationError::DuplicateId {
                id: gas.name.clone(),
                context: "gas names".to_string(),
            });
        }
    }

    for mix in &config.mixing {
        require_gas(&names, &mix.gas, "mixing gas")?;
        for other in &mix.with {
            require_gas(&names, other, &format!("mixing partners of '{}'", mix.gas))?;
        }
    }

    if config.buffers.is_empty() {
        return Err(invalid("buffers", "[]", "at least one buffer is required"));
    }
    for (i, buffer) in config.buffers.iter().enumerate() {
        let context = format!("buffer {}", i + 1);
        require_gas(&names, &buffer.buffer_gas, &context)?;
        require_gas(&names, &buffer.system_gas, &context)?;
    }

    // The over-pressure trip reads the highest pressure sensor
    if config.pressure_sensors == 0 {
        return Err(invalid("pressure_sensors", "0", "at least one pressure sensor is required"));
    }

    if !(config.target_pressure.is_finite() && config.target_pressure > 0.0) {
        return Err(invalid(
            "target_pressure",
            &config.target_pressure.to_string(),
            "must be a positive number",
        ));
    }

    if let Some(ramp) = &config.ramp {
        for (field, value) in [("ramp.ramp_rate", ramp.ramp_rate), ("ramp.leak_rate", ramp.leak_rate)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, &value.to_string(), "must be a positive number"));
            }
        }
    }

    for (field, value) in [
        ("initial_pressure", config.initial_pressure),
        ("initial_temperature", config.initial_temperature),
    ] {
        if let Some(value) = value {
            if !value.is_finite() {
                return Err(invalid(field, &value.to_string(), "must be finite"));
            }
        }
    }

    Ok(())
}

fn require_gas(names: &HashSet<&str>, name: &str, context: &str) -> Result<(), ValidationError> {
    if names.contains(name.trim()) {
        Ok(())
    } else {
        Err(ValidationError::MissingReference {
            id: name.to_string(),
            context: context.to_string(),
        })
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
