//! Simulation driver and artifact handling.
//!
//! Provides the run loop that drives the control unit to termination, and the helpers that
//! read and write program images, listings, and input files.

/// Artifact writers and readers.
pub mod loader;

/// Run loop, tick budget, and outcome collection.
pub mod simulator;

pub use self::simulator::{Outcome, Simulator, Termination, simulate, simulate_with_sink};
