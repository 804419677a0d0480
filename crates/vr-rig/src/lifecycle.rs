//! Rig lifecycle state machine.
//!
//! Two states and one transition. Each transition carries a pure guard over
//! a snapshot of the controller's inputs; the table is evaluated once per
//! tick and the first transition whose guard holds is taken.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RigState {
    /// Serial command mode not yet confirmed.
    Init,
    /// Operating; pressures are updated and interlocks applied every tick.
    Running,
}

impl RigState {
    pub fn as_str(self) -> &'static str {
        match self {
            RigState::Init => "INIT",
            RigState::Running => "RUNNING",
        }
    }
}

impl fmt::Display for RigState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the guards are allowed to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleInputs {
    pub serial_command_mode: bool,
}

pub type Guard = fn(&LifecycleInputs) -> bool;

#[derive(Clone, Copy)]
pub struct Transition {
    pub from: RigState,
    pub to: RigState,
    pub guard: Guard,
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transition({} -> {})", self.from, self.to)
    }
}

fn serial_command_mode_confirmed(inputs: &LifecycleInputs) -> bool {
    inputs.serial_command_mode
}

pub const TRANSITIONS: &[Transition] = &[Transition {
    from: RigState::Init,
    to: RigState::Running,
    guard: serial_command_mode_confirmed,
}];

/// The state to move to from `current`, if any transition fires.
pub fn next_state(current: RigState, inputs: &LifecycleInputs) -> Option<RigState> {
    TRANSITIONS
        .iter()
        .find(|t| t.from == current && (t.guard)(inputs))
        .map(|t| t.to)
}
