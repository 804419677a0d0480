//! Two-bit valve state machine.

use serde::{Deserialize, Serialize};

/// Combined open/enabled state of a valve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValveStatus {
    OpenEnabled,
    ClosedEnabled,
    ClosedDisabled,
    /// Not reachable through the `Valve` API.
    OpenDisabled,
}

impl ValveStatus {
    /// Single character used in valve status reports.
    pub fn code(self) -> char {
        match self {
            ValveStatus::OpenEnabled => 'O',
            ValveStatus::ClosedEnabled => 'E',
            ValveStatus::ClosedDisabled => 'D',
            ValveStatus::OpenDisabled => '!',
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, ValveStatus::OpenEnabled | ValveStatus::OpenDisabled)
    }

    pub fn is_enabled(self) -> bool {
        matches!(self, ValveStatus::OpenEnabled | ValveStatus::ClosedEnabled)
    }
}

/// On/off valve with an enable interlock.
///
/// Invariant: `is_open() ⇒ is_enabled()`. A disabled valve ignores open and
/// close requests; an open valve ignores disable requests (close it first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valve {
    is_open: bool,
    is_enabled: bool,
}

impl Default for Valve {
    fn default() -> Self {
        Self::new()
    }
}

impl Valve {
    /// A closed, enabled valve.
    pub fn new() -> Self {
        Self {
            is_open: false,
            is_enabled: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    pub fn open(&mut self) {
        if self.is_enabled {
            self.is_open = true;
        }
    }

    pub fn close(&mut self) {
        if self.is_enabled {
            self.is_open = false;
        }
    }

    pub fn enable(&mut self) {
        self.is_enabled = true;
    }

    pub fn disable(&mut self) {
        if !self.is_open {
            self.is_enabled = false;
        }
    }

    pub fn status(&self) -> ValveStatus {
        match (self.is_open, self.is_enabled) {
            (true, true) => ValveStatus::OpenEnabled,
            (false, true) => ValveStatus::ClosedEnabled,
            (false, false) => ValveStatus::ClosedDisabled,
            (true, false) => ValveStatus::OpenDisabled,
        }
    }
}
