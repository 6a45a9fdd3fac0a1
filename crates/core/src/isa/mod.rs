//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcode set, the instruction and program types, and the binary codec shared
//! by the assembler and the simulator.
//!
//! # Components
//!
//! * `opcode`: The closed opcode set, binary values, mnemonics, and argument rules.
//! * `instruction`: Instruction and source-position types.
//! * `program`: The assembled program (entry point, code, data).
//! * `encode` / `decode`: Byte-image serialization.
//! * `disasm`: The hex listing.

/// Image decoder (bytes to `Program`).
pub mod decode;

/// Hex listing renderer.
pub mod disasm;

/// Image encoder (`Program` to bytes).
pub mod encode;

/// Instruction and source position.
pub mod instruction;

/// Opcode enumeration and per-opcode properties.
pub mod opcode;

/// Assembled program container.
pub mod program;

pub use decode::decode;
pub use disasm::disassemble;
pub use encode::encode;
pub use instruction::{Instruction, SourcePos};
pub use opcode::{Category, Opcode};
pub use program::Program;
