//! Rig configuration schema.

use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RigConfig {
    pub version: u32,
    #[serde(default = "default_identity")]
    pub identity: String,
    pub target_pressure: f64,
    #[serde(default)]
    pub cycle_pressures: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ramp: Option<RampDef>,
    pub gases: Vec<GasDef>,
    #[serde(default)]
    pub mixing: Vec<MixDef>,
    pub buffers: Vec<BufferDef>,
    #[serde(default = "default_pressure_sensors")]
    pub pressure_sensors: usize,
    #[serde(default = "default_temperature_sensors")]
    pub temperature_sensors: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_temperature: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GasDef {
    pub index: u32,
    pub name: String,
}

/// `gas` may mix with every gas listed in `with` (and vice versa).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MixDef {
    pub gas: String,
    #[serde(default)]
    pub with: Vec<String>,
}

/// One buffer line; buffers are numbered from 1 in file order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BufferDef {
    pub buffer_gas: String,
    pub system_gas: String,
}

/// Pressure cycling rates, as fractions of target per second.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RampDef {
    pub ramp_rate: f64,
    pub leak_rate: f64,
}

pub(crate) fn default_identity() -> String {
    "ISIS Volumetric Gas Handing Panel".to_string()
}

fn default_pressure_sensors() -> usize {
    4
}

fn default_temperature_sensors() -> usize {
    9
}
