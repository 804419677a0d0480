//! Fixed-step tick runner.

use crate::controller::RigController;
use crate::error::{RigError, RigResult};

/// Anything that advances in discrete time steps.
pub trait Tickable {
    fn tick(&mut self, dt: f64) -> RigResult<()>;
}

impl Tickable for RigController {
    fn tick(&mut self, dt: f64) -> RigResult<()> {
        RigController::tick(self, dt)
    }
}

/// Options for a tick run.
#[derive(Clone, Debug)]
pub struct TickOptions {
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Simulated duration (seconds)
    pub t_end: f64,
    /// Maximum number of ticks (safety limit)
    pub max_steps: usize,
}

impl Default for TickOptions {
    fn default() -> Self {
        Self {
            dt: 0.1,
            t_end: 1.0,
            max_steps: 100_000,
        }
    }
}

impl TickOptions {
    pub fn validate(&self) -> RigResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(RigError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if !(self.t_end.is_finite() && self.t_end >= 0.0) {
            return Err(RigError::InvalidArg {
                what: "t_end must be non-negative",
            });
        }
        if self.max_steps == 0 {
            return Err(RigError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        Ok(())
    }
}

/// What a run actually did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    pub steps: usize,
    /// Simulated seconds elapsed.
    pub elapsed: f64,
}

/// Tick `model` until `t_end` or `max_steps`, whichever comes first.
pub fn run_ticks<M: Tickable>(model: &mut M, opts: &TickOptions) -> RigResult<TickReport> {
    run_ticks_observed(model, opts, |_, _| {})
}

/// Like [`run_ticks`], calling `observe(t, model)` after every tick.
pub fn run_ticks_observed<M, F>(
    model: &mut M,
    opts: &TickOptions,
    mut observe: F,
) -> RigResult<TickReport>
where
    M: Tickable,
    F: FnMut(f64, &M),
{
    opts.validate()?;

    let mut t = 0.0;
    let mut steps = 0;
    while t < opts.t_end && steps < opts.max_steps {
        model.tick(opts.dt)?;
        t += opts.dt;
        steps += 1;
        observe(t, model);
    }

    Ok(TickReport { steps, elapsed: t })
}
