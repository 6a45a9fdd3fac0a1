//! Execution units.
//!
//! The datapath has a single functional unit, the integer ALU.

/// Arithmetic Logic Unit.
pub mod alu;
