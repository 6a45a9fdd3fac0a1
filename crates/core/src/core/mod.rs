//! Virtual processor.
//!
//! This module contains the datapath holding all machine state, the microcoded control unit
//! that sequences it, the ALU, and the per-tick trace records.

/// Microcoded control unit and the microcode table.
pub mod control;

/// Stacks, registers, memory, and ports.
pub mod datapath;

/// Per-tick trace records and sinks.
pub mod trace;

/// Execution units (ALU).
pub mod units;

pub use self::control::ControlUnit;
pub use self::datapath::Datapath;
