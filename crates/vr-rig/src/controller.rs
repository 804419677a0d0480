//! The rig aggregate.

use crate::error::{RigError, RigResult};
use crate::lifecycle::{LifecycleInputs, RigState, next_state};
use crate::selector::ValveSelector;
use tracing::{debug, info, warn};
use vr_components::{Buffer, Valve, ValveStatus};
use vr_config::{RigConfig, validate_config};
use vr_controls::{
    InterlockAction, PressureRamp, PressureSensor, Sensor, SensorRef, TemperatureSensor,
    interlock_action, overall_pressure,
};
use vr_core::{BufferNumber, VrError, ensure_finite, fraction};
use vr_gases::{Gas, SystemGases, TwoGasMixer};

/// Simulated volumetric rig.
///
/// Owns the gas catalogue, the mixing relation, every buffer line, the
/// cell/vacuum/supply valves and the sensors. Valve requests that the
/// current state forbids (halted rig, disabled valve, incompatible gas,
/// vacuum interlock) are ignored; callers read the state back to find out
/// what happened.
#[derive(Debug, Clone)]
pub struct RigController {
    identity: String,
    gases: SystemGases,
    mixer: TwoGasMixer,
    buffers: Vec<Buffer>,
    cell_valve: Valve,
    vacuum_valve: Valve,
    supply_valve: Valve,
    pressure_sensors: Vec<PressureSensor>,
    temperature_sensors: Vec<TemperatureSensor>,
    target_pressure: f64,
    halted: bool,
    cycle_pressures: bool,
    serial_command_mode: bool,
    ramp: PressureRamp,
    state: RigState,
}

impl RigController {
    /// Build the rig from a validated configuration.
    pub fn from_config(config: &RigConfig) -> RigResult<Self> {
        validate_config(config)?;

        let gases = SystemGases::new(
            config
                .gases
                .iter()
                .map(|def| Gas::new(def.index, def.name.trim())),
        )?;

        let mut mixer = TwoGasMixer::new();
        for mix in &config.mixing {
            let gas = gases.require(&mix.gas)?;
            for other in &mix.with {
                mixer.add_mixable(gas, gases.require(other)?);
            }
        }

        let mut buffers = Vec::with_capacity(config.buffers.len());
        for (i, def) in config.buffers.iter().enumerate() {
            let number = BufferNumber::from_index(i).ok_or(RigError::InvalidArg {
                what: "too many buffers",
            })?;
            buffers.push(Buffer::new(
                number,
                gases.require(&def.buffer_gas)?.clone(),
                gases.require(&def.system_gas)?.clone(),
            ));
        }

        let ramp = match &config.ramp {
            Some(def) => PressureRamp::new(def.ramp_rate, def.leak_rate)?,
            None => PressureRamp::default(),
        };

        let mut pressure_sensors = vec![PressureSensor::new(); config.pressure_sensors];
        if let Some(p) = config.initial_pressure {
            for sensor in &mut pressure_sensors {
                sensor.set_value(p, config.target_pressure)?;
            }
        }

        let mut temperature_sensors = vec![TemperatureSensor::new(); config.temperature_sensors];
        if let Some(t) = config.initial_temperature {
            for sensor in &mut temperature_sensors {
                sensor.set_value(t)?;
            }
        }

        debug!(
            gases = gases.len(),
            mixable_pairs = mixer.len(),
            buffers = buffers.len(),
            "rig initialised"
        );

        Ok(Self {
            identity: config.identity.clone(),
            gases,
            mixer,
            buffers,
            cell_valve: Valve::new(),
            vacuum_valve: Valve::new(),
            supply_valve: Valve::new(),
            pressure_sensors,
            temperature_sensors,
            target_pressure: config.target_pressure,
            halted: false,
            cycle_pressures: config.cycle_pressures,
            serial_command_mode: true,
            ramp,
            state: RigState::Init,
        })
    }

    /// The rig as it ships (built-in seed data).
    pub fn seeded() -> RigResult<Self> {
        Self::from_config(&RigConfig::default())
    }

    pub fn identify(&self) -> &str {
        &self.identity
    }

    pub fn gases(&self) -> &SystemGases {
        &self.gases
    }

    pub fn mixer(&self) -> &TwoGasMixer {
        &self.mixer
    }

    pub fn can_mix(&self, g1: &Gas, g2: &Gas) -> bool {
        self.mixer.can_mix(g1, g2)
    }

    // ------------------------------------------------------------------
    // Lifecycle and halt
    // ------------------------------------------------------------------

    pub fn state(&self) -> RigState {
        self.state
    }

    pub fn serial_command_mode(&self) -> bool {
        self.serial_command_mode
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    /// Stop all further valve operations. Returns `false` if already halted.
    pub fn halt(&mut self) -> bool {
        if self.halted {
            return false;
        }
        self.halted = true;
        info!("rig halted");
        true
    }

    fn operable(&self, what: &'static str) -> bool {
        if self.halted {
            debug!(operation = what, "ignored: rig halted");
        }
        !self.halted
    }

    // ------------------------------------------------------------------
    // Buffers
    // ------------------------------------------------------------------

    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Look up a buffer by its 1-based panel number.
    pub fn buffer(&self, number: i64) -> Option<&Buffer> {
        BufferNumber::new(number).and_then(|n| self.buffers.get(n.index()))
    }

    fn buffer_position(&self, number: i64) -> Option<usize> {
        BufferNumber::new(number)
            .map(BufferNumber::index)
            .filter(|&i| i < self.buffers.len())
    }

    pub fn buffer_valve_is_open(&self, number: i64) -> bool {
        self.buffer(number).is_some_and(Buffer::valve_is_open)
    }

    pub fn buffer_valve_is_enabled(&self, number: i64) -> bool {
        self.buffer(number).is_some_and(Buffer::valve_is_enabled)
    }

    pub fn any_buffer_valve_open(&self) -> bool {
        self.buffers.iter().any(Buffer::valve_is_open)
    }

    pub fn open_buffer_count(&self) -> usize {
        self.buffers.iter().filter(|b| b.valve_is_open()).count()
    }

    pub fn open_buffer_valve(&mut self, number: i64) {
        if !self.operable("open buffer valve") {
            return;
        }
        let Some(pos) = self.buffer_position(number) else {
            return;
        };
        let buffer_gases: Vec<Gas> = self.buffers.iter().map(|b| b.buffer_gas().clone()).collect();
        self.buffers[pos].open_valve(&self.mixer, buffer_gases.iter());
        debug!(
            buffer = number,
            open = self.buffers[pos].valve_is_open(),
            "open buffer valve"
        );
    }

    pub fn close_buffer_valve(&mut self, number: i64) {
        if !self.operable("close buffer valve") {
            return;
        }
        if let Some(pos) = self.buffer_position(number) {
            self.buffers[pos].close_valve();
        }
    }

    pub fn enable_buffer_valve(&mut self, number: i64) {
        if !self.operable("enable buffer valve") {
            return;
        }
        if let Some(pos) = self.buffer_position(number) {
            self.buffers[pos].enable_valve();
        }
    }

    /// Disable a buffer valve. An open valve stays open and enabled.
    pub fn disable_buffer_valve(&mut self, number: i64) {
        if !self.operable("disable buffer valve") {
            return;
        }
        if let Some(pos) = self.buffer_position(number) {
            self.buffers[pos].disable_valve();
        }
    }

    pub fn buffer_system_gas(&self, number: i64) -> Option<&Gas> {
        self.buffer(number).map(Buffer::system_gas)
    }

    /// Route a different system gas to a buffer; ignored while its valve is
    /// open or if the gas is not in the catalogue.
    pub fn set_buffer_system_gas(&mut self, number: i64, gas: &Gas) {
        let Some(known) = self.gases.by_index(gas.index()) else {
            debug!(gas = gas.index(), "system gas not in catalogue");
            return;
        };
        if let Some(pos) = self.buffer_position(number) {
            self.buffers[pos].set_system_gas(known.clone());
        }
    }

    // ------------------------------------------------------------------
    // Special valves
    // ------------------------------------------------------------------

    pub fn cell_valve(&self) -> &Valve {
        &self.cell_valve
    }

    pub fn vacuum_valve(&self) -> &Valve {
        &self.vacuum_valve
    }

    pub fn supply_valve(&self) -> &Valve {
        &self.supply_valve
    }

    pub fn open_cell_valve(&mut self) {
        if self.operable("open cell valve") {
            self.cell_valve.open();
        }
    }

    pub fn close_cell_valve(&mut self) {
        if self.operable("close cell valve") {
            self.cell_valve.close();
        }
    }

    pub fn enable_cell_valve(&mut self) {
        if self.operable("enable cell valve") {
            self.cell_valve.enable();
        }
    }

    pub fn disable_cell_valve(&mut self) {
        if self.operable("disable cell valve") {
            self.cell_valve.disable();
        }
    }

    /// Open the vacuum valve, unless any buffer valve is open.
    pub fn open_vacuum_valve(&mut self) {
        if !self.operable("open vacuum valve") {
            return;
        }
        if self.any_buffer_valve_open() {
            debug!("vacuum valve kept closed: a buffer valve is open");
            return;
        }
        self.vacuum_valve.open();
    }

    pub fn close_vacuum_valve(&mut self) {
        if self.operable("close vacuum valve") {
            self.vacuum_valve.close();
        }
    }

    pub fn enable_vacuum_valve(&mut self) {
        if self.operable("enable vacuum valve") {
            self.vacuum_valve.enable();
        }
    }

    pub fn disable_vacuum_valve(&mut self) {
        if self.operable("disable vacuum valve") {
            self.vacuum_valve.disable();
        }
    }

    // ------------------------------------------------------------------
    // Numbered valve access
    // ------------------------------------------------------------------

    pub fn valve(&self, selector: ValveSelector) -> Option<&Valve> {
        match selector {
            ValveSelector::Buffer(n) => self.buffers.get(n.index()).map(Buffer::valve),
            ValveSelector::Cell => Some(&self.cell_valve),
            ValveSelector::Vacuum => Some(&self.vacuum_valve),
        }
    }

    pub fn open_valve(&mut self, selector: ValveSelector) {
        match selector {
            ValveSelector::Buffer(n) => self.open_buffer_valve(i64::from(n.get())),
            ValveSelector::Cell => self.open_cell_valve(),
            ValveSelector::Vacuum => self.open_vacuum_valve(),
        }
    }

    pub fn close_valve(&mut self, selector: ValveSelector) {
        match selector {
            ValveSelector::Buffer(n) => self.close_buffer_valve(i64::from(n.get())),
            ValveSelector::Cell => self.close_cell_valve(),
            ValveSelector::Vacuum => self.close_vacuum_valve(),
        }
    }

    /// Supply, vacuum, cell, then buffers from the highest number down.
    pub fn valve_statuses(&self) -> Vec<ValveStatus> {
        let mut statuses = Vec::with_capacity(self.buffers.len() + 3);
        statuses.push(self.supply_valve.status());
        statuses.push(self.vacuum_valve.status());
        statuses.push(self.cell_valve.status());
        statuses.extend(self.buffers.iter().rev().map(Buffer::valve_status));
        statuses
    }

    // ------------------------------------------------------------------
    // Sensors and pressure
    // ------------------------------------------------------------------

    pub fn pressure_sensors(&self) -> &[PressureSensor] {
        &self.pressure_sensors
    }

    pub fn temperature_sensors(&self) -> &[TemperatureSensor] {
        &self.temperature_sensors
    }

    pub fn target_pressure(&self) -> f64 {
        self.target_pressure
    }

    /// Change the target; pressure statuses are reclassified immediately.
    pub fn set_target_pressure(&mut self, target: f64) -> RigResult<()> {
        let target = ensure_finite(target, "target pressure")?;
        if target <= 0.0 {
            return Err(RigError::InvalidArg {
                what: "target pressure must be positive",
            });
        }
        self.target_pressure = target;
        for sensor in &mut self.pressure_sensors {
            sensor.sensor_mut().rebound(Some(target));
        }
        Ok(())
    }

    pub fn cycle_pressures(&self) -> bool {
        self.cycle_pressures
    }

    pub fn set_cycle_pressures(&mut self, cycle: bool) {
        self.cycle_pressures = cycle;
    }

    /// Highest pressure reading on the rig.
    pub fn overall_pressure(&self) -> f64 {
        overall_pressure(self.pressure_sensors.iter().map(PressureSensor::value))
    }

    pub fn set_pressure(&mut self, index: usize, value: f64) -> RigResult<()> {
        let len = self.pressure_sensors.len();
        let target = self.target_pressure;
        let sensor = self
            .pressure_sensors
            .get_mut(index)
            .ok_or(VrError::IndexOob {
                what: "pressure sensor",
                index,
                len,
            })?;
        sensor.set_value(value, target)?;
        Ok(())
    }

    /// Set every pressure sensor to the same reading.
    pub fn set_pressures(&mut self, value: f64) -> RigResult<()> {
        let value = ensure_finite(value, "pressure")?;
        let target = self.target_pressure;
        for sensor in &mut self.pressure_sensors {
            sensor.set_value(value, target)?;
        }
        Ok(())
    }

    pub fn set_temperature(&mut self, index: usize, value: f64) -> RigResult<()> {
        let len = self.temperature_sensors.len();
        let sensor = self
            .temperature_sensors
            .get_mut(index)
            .ok_or(VrError::IndexOob {
                what: "temperature sensor",
                index,
                len,
            })?;
        sensor.set_value(value)?;
        Ok(())
    }

    /// Set every temperature sensor to the same reading.
    pub fn set_temperatures(&mut self, value: f64) -> RigResult<()> {
        let value = ensure_finite(value, "temperature")?;
        for sensor in &mut self.temperature_sensors {
            sensor.set_value(value)?;
        }
        Ok(())
    }

    fn sensor_mut(&mut self, sensor: SensorRef) -> RigResult<&mut Sensor> {
        match sensor {
            SensorRef::Pressure { index } => {
                let len = self.pressure_sensors.len();
                self.pressure_sensors
                    .get_mut(index)
                    .map(PressureSensor::sensor_mut)
                    .ok_or(RigError::Core(VrError::IndexOob {
                        what: "pressure sensor",
                        index,
                        len,
                    }))
            }
            SensorRef::Temperature { index } => {
                let len = self.temperature_sensors.len();
                self.temperature_sensors
                    .get_mut(index)
                    .map(TemperatureSensor::sensor_mut)
                    .ok_or(RigError::Core(VrError::IndexOob {
                        what: "temperature sensor",
                        index,
                        len,
                    }))
            }
        }
    }

    pub fn enable_sensor(&mut self, sensor: SensorRef) -> RigResult<()> {
        self.sensor_mut(sensor)?.enable();
        Ok(())
    }

    pub fn disable_sensor(&mut self, sensor: SensorRef) -> RigResult<()> {
        self.sensor_mut(sensor)?.disable();
        Ok(())
    }

    /// Make a sensor report `NoReply` until its next reading.
    pub fn fail_sensor(&mut self, sensor: SensorRef) -> RigResult<()> {
        self.sensor_mut(sensor)?.mark_no_reply();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Simulation
    // ------------------------------------------------------------------

    fn lifecycle_inputs(&self) -> LifecycleInputs {
        LifecycleInputs {
            serial_command_mode: self.serial_command_mode,
        }
    }

    /// Advance the rig by `dt` seconds.
    ///
    /// Evaluates the lifecycle table once, then updates pressures if running.
    pub fn tick(&mut self, dt: f64) -> RigResult<()> {
        let dt = ensure_finite(dt, "dt")?;
        if dt < 0.0 {
            return Err(RigError::InvalidArg {
                what: "dt must be non-negative",
            });
        }

        if let Some(next) = next_state(self.state, &self.lifecycle_inputs()) {
            info!(from = %self.state, to = %next, "rig state change");
            self.state = next;
        }

        if self.state == RigState::Running {
            self.update_pressures(dt)?;
        }
        Ok(())
    }

    /// Cycle pressures (if enabled) and apply the pressure interlock.
    pub fn update_pressures(&mut self, dt: f64) -> RigResult<()> {
        if self.cycle_pressures {
            let open_fraction = fraction(self.open_buffer_count(), self.buffers.len());
            let target = self.target_pressure;
            for sensor in &mut self.pressure_sensors {
                let next = self.ramp.step(sensor.value(), target, open_fraction, dt);
                sensor.set_value(next, target)?;
            }
        }

        let overall = self.overall_pressure();
        match interlock_action(overall, self.target_pressure) {
            InterlockAction::Hold => {}
            InterlockAction::Enable => self.enable_all_buffer_valves(),
            InterlockAction::EnableAndOpen => {
                self.enable_all_buffer_valves();
                self.open_all_buffer_valves();
            }
            InterlockAction::Trip => {
                if self.buffers.iter().any(Buffer::valve_is_enabled) {
                    warn!(
                        overall,
                        target = self.target_pressure,
                        "over-pressure: disabling every buffer valve"
                    );
                }
                self.trip_all_buffer_valves();
            }
        }
        Ok(())
    }

    // The interlock acts on the buffers directly: halt stops operator
    // commands, not the safety loop.

    fn enable_all_buffer_valves(&mut self) {
        for buffer in &mut self.buffers {
            buffer.enable_valve();
        }
    }

    fn open_all_buffer_valves(&mut self) {
        let buffer_gases: Vec<Gas> = self.buffers.iter().map(|b| b.buffer_gas().clone()).collect();
        for buffer in &mut self.buffers {
            buffer.open_valve(&self.mixer, buffer_gases.iter());
        }
    }

    /// Over-pressure trip: close first so the disable takes effect.
    fn trip_all_buffer_valves(&mut self) {
        for buffer in &mut self.buffers {
            buffer.close_valve();
            buffer.disable_valve();
        }
    }
}
