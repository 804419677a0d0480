//! Command table and dispatch.

use std::collections::HashMap;

use crate::command::{Args, Command};
use crate::handlers;
use tracing::{debug, warn};
use vr_rig::RigController;

/// Reply for any command token not in the table.
pub const UNRECOGNISED: &str = "Unrecognised Command";

/// A command implementation. `None` means no reply is written.
pub type Handler = fn(&mut RigController, &Args) -> Option<String>;

/// Maps command tokens to handlers.
#[derive(Debug, Clone)]
pub struct ProtocolAdapter {
    handlers: HashMap<&'static str, Handler>,
}

impl Default for ProtocolAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolAdapter {
    /// The full command set of the rig.
    pub fn new() -> Self {
        let table: [(&'static str, Handler); 14] = [
            ("IDN", handlers::identify),
            ("?", handlers::identify),
            ("BCS", handlers::buffer_status),
            ("OPV", handlers::open_valve),
            ("CLV", handlers::close_valve),
            ("VST", handlers::valve_states),
            ("GMM", handlers::mixing_matrix),
            ("GMC", handlers::mixing_check),
            ("GNA", handlers::gas_count),
            ("HLT", handlers::halt),
            ("STS", handlers::status),
            ("PTS", handlers::sensor_states),
            ("PMV", handlers::pressure_values),
            ("TMV", handlers::temperature_values),
        ];
        Self {
            handlers: table.into_iter().collect(),
        }
    }

    /// Add or replace a command.
    pub fn register(&mut self, token: &'static str, handler: Handler) {
        self.handlers.insert(token, handler);
    }

    /// Every registered command token, sorted.
    pub fn commands(&self) -> Vec<&'static str> {
        let mut tokens: Vec<_> = self.handlers.keys().copied().collect();
        tokens.sort_unstable();
        tokens
    }

    /// Execute one command line; `None` for a blank line or a silent handler.
    pub fn handle_line(&self, rig: &mut RigController, line: &str) -> Option<String> {
        let command = Command::parse(line)?;
        match self.handlers.get(command.name) {
            Some(handler) => {
                debug!(command = command.name, args = command.args.len(), "dispatch");
                handler(rig, &command.args)
            }
            None => {
                warn!(command = command.name, "unrecognised command");
                Some(UNRECOGNISED.to_string())
            }
        }
    }
}
