//! Buffer gas line.

use crate::valve::{Valve, ValveStatus};
use tracing::debug;
use vr_core::BufferNumber;
use vr_gases::{Gas, TwoGasMixer};

/// One gas-storage line of the panel.
///
/// The buffer gas is the captive gas fixed for the life of the buffer. The
/// system gas is whatever the shared supply currently routes through the
/// valve; it can only be changed while the valve is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer {
    index: BufferNumber,
    buffer_gas: Gas,
    system_gas: Gas,
    valve: Valve,
}

impl Buffer {
    pub fn new(index: BufferNumber, buffer_gas: Gas, system_gas: Gas) -> Self {
        Self {
            index,
            buffer_gas,
            system_gas,
            valve: Valve::new(),
        }
    }

    pub fn index(&self) -> BufferNumber {
        self.index
    }

    pub fn buffer_gas(&self) -> &Gas {
        &self.buffer_gas
    }

    pub fn system_gas(&self) -> &Gas {
        &self.system_gas
    }

    pub fn valve(&self) -> &Valve {
        &self.valve
    }

    pub fn valve_is_open(&self) -> bool {
        self.valve.is_open()
    }

    pub fn valve_is_enabled(&self) -> bool {
        self.valve.is_enabled()
    }

    pub fn valve_status(&self) -> ValveStatus {
        self.valve.status()
    }

    /// Whether the current system gas may meet every listed buffer gas.
    ///
    /// `rig_buffer_gases` must cover every buffer of the rig, open or closed,
    /// this one included: a closed line can be reopened later, so its captive
    /// gas has to be protected now.
    pub fn can_open<'a>(
        &self,
        mixer: &TwoGasMixer,
        rig_buffer_gases: impl IntoIterator<Item = &'a Gas>,
    ) -> bool {
        rig_buffer_gases
            .into_iter()
            .all(|gas| mixer.can_mix(&self.system_gas, gas))
    }

    /// Open the valve if the system gas is compatible with every buffer gas.
    pub fn open_valve<'a>(
        &mut self,
        mixer: &TwoGasMixer,
        rig_buffer_gases: impl IntoIterator<Item = &'a Gas>,
    ) {
        if self.can_open(mixer, rig_buffer_gases) {
            self.valve.open();
        } else {
            debug!(
                buffer = self.index.get(),
                system_gas = self.system_gas.name(),
                "valve kept closed: system gas incompatible with a buffer gas"
            );
        }
    }

    pub fn close_valve(&mut self) {
        self.valve.close();
    }

    pub fn enable_valve(&mut self) {
        self.valve.enable();
    }

    pub fn disable_valve(&mut self) {
        self.valve.disable();
    }

    /// Swap the system gas. Ignored while the valve is open.
    pub fn set_system_gas(&mut self, gas: Gas) {
        if !self.valve.is_open() {
            self.system_gas = gas;
        }
    }
}
