//! One handler per protocol command.
//!
//! Every handler has the [`Handler`](crate::Handler) signature and returns
//! the full reply line without its terminator.

use crate::command::Args;
use crate::format::{
    enabled_flag, gas_field, name_field, number_field, open_flag, real_field,
};
use tracing::debug;
use vr_core::OutOfRange;
use vr_gases::Gas;
use vr_rig::{RigController, ValveSelector};

/// `IDN` and `?`.
pub fn identify(rig: &mut RigController, _args: &Args) -> Option<String> {
    Some(format!("IDN,00,{}", rig.identify()))
}

/// `BCS n`: buffer control/status.
pub fn buffer_status(rig: &mut RigController, args: &Args) -> Option<String> {
    let n = args.int(0);
    let count = rig.buffer_count() as i64;
    if let Err(side) = OutOfRange::check(n, 1, count) {
        return Some(format!("BCS,{},{side}", number_field(n)));
    }
    let buffer = rig.buffer(n)?;
    let buffer_gas = buffer.buffer_gas();
    let system_gas = buffer.system_gas();
    Some(format!(
        "BCS,{},{},{},{},{},{}{}",
        number_field(n),
        gas_field(buffer_gas.index().into()),
        name_field(buffer_gas.name()),
        gas_field(system_gas.index().into()),
        name_field(system_gas.name()),
        enabled_flag(buffer.valve_is_enabled()),
        open_flag(buffer.valve_is_open()),
    ))
}

fn switch_valve(rig: &mut RigController, args: &Args, tag: &str, open: bool) -> Option<String> {
    let n = args.int(0);
    let prefix = format!("{tag},{}", number_field(n));
    let selector = match ValveSelector::from_number(n, rig.buffer_count()) {
        Ok(selector) => selector,
        Err(side) => return Some(format!("{prefix},{side}")),
    };
    if rig.halted() {
        return Some(format!("{prefix},Rejected only allowed when running"));
    }
    let (was_open, enabled) = {
        let valve = rig.valve(selector)?;
        (valve.is_open(), valve.is_enabled())
    };
    if !enabled {
        return Some(format!("{prefix},Rejected not enabled"));
    }
    if open {
        rig.open_valve(selector);
    } else {
        rig.close_valve(selector);
    }
    let now_open = rig.valve(selector)?.is_open();
    debug!(valve = n, was_open, now_open, "{tag}");
    Some(format!(
        "{prefix},{},{}",
        open_flag(was_open),
        open_flag(now_open)
    ))
}

/// `OPV n`.
pub fn open_valve(rig: &mut RigController, args: &Args) -> Option<String> {
    switch_valve(rig, args, "OPV", true)
}

/// `CLV n`.
pub fn close_valve(rig: &mut RigController, args: &Args) -> Option<String> {
    switch_valve(rig, args, "CLV", false)
}

/// `VST`: supply, vacuum, cell, then buffers highest number first.
pub fn valve_states(rig: &mut RigController, _args: &Args) -> Option<String> {
    let codes: String = rig.valve_statuses().into_iter().map(|s| s.code()).collect();
    Some(format!("VST,{codes}"))
}

/// `GMM`: the full mixing matrix in catalogue order.
pub fn mixing_matrix(rig: &mut RigController, _args: &Args) -> Option<String> {
    let gases: Vec<&Gas> = rig.gases().iter().collect();
    let mut reply = format!("GMM,{}", number_field(gases.len() as i64));
    for row in &gases {
        reply.push(',');
        reply.extend(
            gases
                .iter()
                .map(|col| if rig.can_mix(row, col) { 'Y' } else { 'N' }),
        );
    }
    Some(reply)
}

fn lookup_gas(rig: &RigController, index: i64) -> Result<&Gas, OutOfRange> {
    let gases = rig.gases();
    let index = OutOfRange::check(index, gases.min_index().into(), gases.max_index().into())?;
    // A gap in the index range is reported like an index past the end.
    u32::try_from(index)
        .ok()
        .and_then(|i| gases.by_index(i))
        .ok_or(OutOfRange::TooHigh)
}

/// `GMC g1 g2`: may the two gases mix?
pub fn mixing_check(rig: &mut RigController, args: &Args) -> Option<String> {
    let (i1, i2) = (args.int(0), args.int(1));
    let g1 = match lookup_gas(rig, i1) {
        Ok(gas) => gas,
        Err(side) => return Some(format!("GMC,{},{side}", gas_field(i1))),
    };
    let g2 = match lookup_gas(rig, i2) {
        Ok(gas) => gas,
        Err(side) => return Some(format!("GMC,{},{side}", gas_field(i2))),
    };
    let verdict = if rig.can_mix(g1, g2) {
        "ALLOWED"
    } else {
        "FORBIDDEN"
    };
    Some(format!(
        "GMC,{},{},{},{},{verdict}",
        gas_field(i1),
        g1.name().trim(),
        gas_field(i2),
        g2.name().trim(),
    ))
}

/// `GNA`: number of gases in the catalogue.
pub fn gas_count(rig: &mut RigController, _args: &Args) -> Option<String> {
    Some(format!("GNA,{}", number_field(rig.gases().len() as i64)))
}

/// `HLT`: one-way halt.
pub fn halt(rig: &mut RigController, _args: &Args) -> Option<String> {
    if rig.halt() {
        Some("HLT,Halted".to_string())
    } else {
        Some("HLT,Already halted".to_string())
    }
}

/// `STS`: lifecycle state, halt flag, target, overall pressure, open buffers.
pub fn status(rig: &mut RigController, _args: &Args) -> Option<String> {
    let halted = if rig.halted() { "HALTED" } else { "ACTIVE" };
    Some(format!(
        "STS,{},{halted},{},{},{}",
        rig.state(),
        real_field(rig.target_pressure()),
        real_field(rig.overall_pressure()),
        number_field(rig.open_buffer_count() as i64),
    ))
}

/// `PTS`: sensor status codes, pressures then temperatures.
pub fn sensor_states(rig: &mut RigController, _args: &Args) -> Option<String> {
    let pressures: String = rig
        .pressure_sensors()
        .iter()
        .map(|s| s.status().code())
        .collect();
    let temperatures: String = rig
        .temperature_sensors()
        .iter()
        .map(|s| s.status().code())
        .collect();
    Some(format!("PTS,{pressures},{temperatures}"))
}

fn value_list(tag: &str, values: impl Iterator<Item = f64>) -> String {
    let mut reply = tag.to_string();
    for v in values {
        reply.push(',');
        reply.push_str(&real_field(v));
    }
    reply
}

/// `PMV`: pressure readings.
pub fn pressure_values(rig: &mut RigController, _args: &Args) -> Option<String> {
    Some(value_list(
        "PMV",
        rig.pressure_sensors().iter().map(|s| s.value()),
    ))
}

/// `TMV`: temperature readings.
pub fn temperature_values(rig: &mut RigController, _args: &Args) -> Option<String> {
    Some(value_list(
        "TMV",
        rig.temperature_sensors().iter().map(|s| s.value()),
    ))
}
