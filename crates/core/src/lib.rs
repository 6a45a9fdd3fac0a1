//! Stack-machine cross-assembler and tick-accurate simulator library.
//!
//! This crate implements a toolchain for a Forth-like stack processor with the following:
//! 1. **ISA:** Opcode set, binary image encode/decode, and the hex listing.
//! 2. **Assembler:** Two-pass translation of program text with labels, functions, and variables.
//! 3. **Core:** Datapath (stacks, ALU, carry, memory, ports) and the microcoded control unit.
//! 4. **Simulation:** Run loop with tick budget, artifact loading, configuration, and statistics.
//!
//! # Examples
//!
//! ```
//! use stackcpu_core::{Config, Termination, assemble, simulate};
//!
//! let program = assemble("in 0 out 2 halt").unwrap();
//! let outcome = simulate(&program, "A", &Config::default()).unwrap();
//! assert_eq!(outcome.output, "A");
//! assert_eq!(outcome.termination, Termination::Halted);
//! ```

/// Two-pass assembler (tokenizer, symbol tables, code generation).
pub mod asm;
/// Common types and constants (errors, image layout, ports).
pub mod common;
/// Simulator configuration (defaults and JSON loading).
pub mod config;
/// Virtual processor (datapath, control unit, ALU, trace).
pub mod core;
/// Instruction set (opcodes, instructions, encode, decode, disassemble).
pub mod isa;
/// Run loop and artifact handling.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Assembles program text; see [`asm::assemble`].
pub use crate::asm::assemble;
/// Error types.
pub use crate::common::{AsmError, EncodeError, Error, SimError};
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Assembled program container.
pub use crate::isa::Program;
/// Runs a program; see [`sim::simulate`].
pub use crate::sim::{Outcome, Termination, simulate};
