//! Common utilities and types used throughout the assembler and simulator.
//!
//! This module provides fundamental building blocks shared across all components. It includes:
//! 1. **Constants:** Image layout, argument field ranges, port numbers, and carry arithmetic bounds.
//! 2. **Error Handling:** Assembly, codec, and runtime error enums plus the top-level `Error`.

/// Common constants used throughout the toolchain.
pub mod constants;

/// Error types for assembly, encoding, and simulation.
pub mod error;

pub use error::{AsmError, EncodeError, Error, SimError};
