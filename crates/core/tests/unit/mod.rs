//! # Unit Components
//!
//! This module serves as the central hub for the component tests. It organizes the tests
//! for the instruction set, the assembler, the processor core, and the simulation driver.

/// Unit tests for the two-pass assembler.
///
/// This module covers label fix-up, variables, entry points, and every assembly error.
pub mod asm;

/// Unit tests for configuration loading and defaults.
pub mod config;

/// Unit tests for the processor core.
///
/// This module covers the ALU carry policy, the datapath primitives, and the microcode
/// sequencing of the control unit.
pub mod core;

/// Unit tests for the ISA definitions and the binary codec.
pub mod isa;
