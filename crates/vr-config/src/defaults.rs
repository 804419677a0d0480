//! Built-in seed data: the panel as it ships.

use crate::schema::{BufferDef, GasDef, LATEST_VERSION, MixDef, RigConfig, default_identity};

const GASES: [(u32, &str); 15] = [
    (0, "UNKNOWN"),
    (1, "EMPTY"),
    (2, "VACUUM EXTRACT"),
    (3, "ARGON"),
    (4, "NITROGEN"),
    (5, "NEON"),
    (6, "CARBON DIOXIDE"),
    (7, "CARBON MONOXIDE"),
    (8, "HELIUM"),
    (9, "HYDROGEN"),
    (10, "OXYGEN"),
    (11, "METHANE"),
    (12, "DEUTERIUM"),
    (13, "KRYPTON"),
    (14, "XENON"),
];

/// Safe with anything the panel knows by name.
const UNIVERSAL: [&str; 9] = [
    "EMPTY",
    "VACUUM EXTRACT",
    "ARGON",
    "NITROGEN",
    "NEON",
    "CARBON DIOXIDE",
    "HELIUM",
    "KRYPTON",
    "XENON",
];

/// Mix with each other and with the universal gases, never with oxygen.
const FLAMMABLE: [&str; 4] = ["CARBON MONOXIDE", "HYDROGEN", "METHANE", "DEUTERIUM"];

const BUFFERS: [(&str, &str); 8] = [
    ("ARGON", "ARGON"),
    ("NITROGEN", "NITROGEN"),
    ("HELIUM", "HELIUM"),
    ("NEON", "NEON"),
    ("CARBON DIOXIDE", "EMPTY"),
    ("HYDROGEN", "HYDROGEN"),
    ("OXYGEN", "EMPTY"),
    ("XENON", "EMPTY"),
];

fn known_gas_names() -> Vec<String> {
    GASES
        .iter()
        .filter(|(index, _)| *index != 0)
        .map(|(_, name)| name.to_string())
        .collect()
}

fn seed_mixing() -> Vec<MixDef> {
    let mut mixing: Vec<MixDef> = UNIVERSAL
        .iter()
        .map(|gas| MixDef {
            gas: gas.to_string(),
            with: known_gas_names(),
        })
        .collect();

    for (i, gas) in FLAMMABLE.iter().enumerate() {
        let with: Vec<String> = FLAMMABLE[i + 1..].iter().map(|g| g.to_string()).collect();
        if !with.is_empty() {
            mixing.push(MixDef {
                gas: gas.to_string(),
                with,
            });
        }
    }
    mixing
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            version: LATEST_VERSION,
            identity: default_identity(),
            target_pressure: 100.0,
            cycle_pressures: false,
            ramp: None,
            gases: GASES
                .iter()
                .map(|(index, name)| GasDef {
                    index: *index,
                    name: name.to_string(),
                })
                .collect(),
            mixing: seed_mixing(),
            buffers: BUFFERS
                .iter()
                .map(|(buffer_gas, system_gas)| BufferDef {
                    buffer_gas: buffer_gas.to_string(),
                    system_gas: system_gas.to_string(),
                })
                .collect(),
            pressure_sensors: 4,
            temperature_sensors: 9,
            initial_pressure: Some(60.0),
            initial_temperature: Some(20.0),
        }
    }
}
