//! Simulator: owns the control unit and enforces the tick budget.
//!
//! A run ends in one of three ways:
//! 1. **Halted:** `halt` executed; clean termination.
//! 2. **Tick limit:** the budget ran out; logged as a warning, partial output returned.
//! 3. **Fatal error:** a `SimError` aborts the run and no outcome is produced.

use tracing::{info, warn};

use crate::common::SimError;
use crate::common::constants::{PRIMARY_OUTPUT_PORT, SECONDARY_OUTPUT_PORT};
use crate::config::Config;
use crate::core::ControlUnit;
use crate::core::trace::{LogSink, NullSink, TraceSink};
use crate::isa::Program;
use crate::stats::SimStats;

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// `halt` executed.
    Halted,
    /// The tick budget was exhausted first.
    TickLimitExceeded,
}

/// Result of a completed run.
#[derive(Clone, Debug)]
pub struct Outcome {
    /// Concatenated output of port 2.
    pub output: String,
    /// Concatenated output of port 3.
    pub secondary_output: String,
    /// Ticks executed.
    pub ticks: u64,
    /// How the run ended.
    pub termination: Termination,
    /// Run statistics.
    pub stats: SimStats,
}

/// Top-level simulator: control unit plus the run budget.
#[derive(Debug)]
pub struct Simulator {
    /// The control unit (and through it, the datapath).
    pub control: ControlUnit,
    tick_limit: u64,
}

impl Simulator {
    /// Creates a simulator with `program` loaded and `input` queued on port 0.
    ///
    /// # Returns
    ///
    /// `ProgramTooLarge` if the program does not fit the configured memory.
    pub fn new(program: &Program, input: &str, config: &Config) -> Result<Self, SimError> {
        Ok(Self {
            control: ControlUnit::new(program, input, config.memory.size)?,
            tick_limit: config.simulation.tick_limit,
        })
    }

    /// Advances the simulator by one tick.
    pub fn tick(&mut self, sink: &mut dyn TraceSink) -> Result<(), SimError> {
        let _ = self.control.tick(sink)?;
        Ok(())
    }

    /// Runs until `halt` or the tick budget is exhausted.
    pub fn run(&mut self, sink: &mut dyn TraceSink) -> Result<Termination, SimError> {
        while !self.control.halted() {
            if self.control.ticks() >= self.tick_limit {
                warn!(
                    ticks = self.control.ticks(),
                    limit = self.tick_limit,
                    "tick limit exceeded"
                );
                return Ok(Termination::TickLimitExceeded);
            }
            self.tick(sink)?;
        }
        info!(ticks = self.control.ticks(), "halted");
        Ok(Termination::Halted)
    }

    /// Collects the outcome after `run`.
    pub fn outcome(&self, termination: Termination) -> Outcome {
        let ports = self.control.datapath().ports();
        Outcome {
            output: ports.output(PRIMARY_OUTPUT_PORT),
            secondary_output: ports.output(SECONDARY_OUTPUT_PORT),
            ticks: self.control.ticks(),
            termination,
            stats: self.control.stats.clone(),
        }
    }
}

/// Runs `program` with `input`, sending per-tick records to `sink`.
pub fn simulate_with_sink(
    program: &Program,
    input: &str,
    config: &Config,
    sink: &mut dyn TraceSink,
) -> Result<Outcome, SimError> {
    let mut sim = Simulator::new(program, input, config)?;
    let termination = sim.run(sink)?;
    Ok(sim.outcome(termination))
}

/// Runs `program` with `input` until it halts or exhausts the tick budget.
///
/// Per-tick records go to `tracing` at debug level when the active subscriber enables debug
/// events for `stackcpu_core::core::trace`, when `config.simulation.trace` is set, or when the
/// crate is built with the `always-trace` feature.
///
/// # Arguments
///
/// * `program` - The program to execute.
/// * `input` - Characters queued on input port 0.
/// * `config` - Memory size and tick budget.
///
/// # Returns
///
/// The run outcome, or the `SimError` that aborted the run.
///
/// # Examples
///
/// ```
/// use stackcpu_core::{Config, assemble, simulate};
///
/// let program = assemble("lit 72 out 2 halt").unwrap();
/// let outcome = simulate(&program, "", &Config::default()).unwrap();
/// assert_eq!(outcome.output, "H");
/// assert_eq!(outcome.ticks, 4);
/// ```
pub fn simulate(program: &Program, input: &str, config: &Config) -> Result<Outcome, SimError> {
    if cfg!(feature = "always-trace") || config.simulation.trace || LogSink::wanted() {
        simulate_with_sink(program, input, config, &mut LogSink)
    } else {
        simulate_with_sink(program, input, config, &mut NullSink)
    }
}
