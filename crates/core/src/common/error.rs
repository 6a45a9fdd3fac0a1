//! Error definitions.
//!
//! This module defines every failure the toolchain can report. It provides:
//! 1. **Assembly Errors:** Raised while translating source text, always with a source position.
//! 2. **Codec Errors:** Raised while encoding or decoding a binary image.
//! 3. **Runtime Errors:** Fatal conditions that abort a simulation run.
//! 4. **Top-level Error:** A union of the above plus I/O and JSON failures for artifact handling.
//!
//! Recoverable runtime conditions (empty input buffer, tick limit) are not errors; they are
//! reported through `tracing` and the run outcome.

use thiserror::Error;

use crate::isa::SourcePos;

/// Errors raised while encoding or decoding a binary image.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// An argument does not fit its 24-bit field.
    #[error("argument {value} of `{mnemonic}` does not fit the 24-bit argument field")]
    EncodeOverflow {
        /// Mnemonic of the instruction (or `entry` for the header).
        mnemonic: &'static str,
        /// The offending value.
        value: i64,
    },

    /// An argument-bearing opcode has no argument, or a plain opcode carries one.
    #[error("`{mnemonic}` has a missing or unexpected argument")]
    ArgumentMismatch {
        /// Mnemonic of the instruction.
        mnemonic: &'static str,
    },

    /// A byte in the instruction stream is not an opcode.
    #[error("unknown opcode byte {byte:#04x} at offset {offset}")]
    InvalidOpcode {
        /// The byte found.
        byte: u8,
        /// Offset of the byte within the image.
        offset: usize,
    },

    /// An argument-bearing opcode or data cell is cut short by the end of the image.
    #[error("`{mnemonic}` at offset {offset} is missing argument bytes")]
    TruncatedArgument {
        /// Mnemonic of the truncated cell.
        mnemonic: &'static str,
        /// Offset of the cell within the image.
        offset: usize,
    },

    /// The 8-byte header is missing or its reserved word is not zero.
    #[error("malformed image header: {0}")]
    MalformedHeader(&'static str),
}

/// Errors raised while assembling source text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AsmError {
    /// A symbolic argument names no label, function, or variable.
    #[error("{pos}: undefined label `{name}`")]
    UndefinedLabel {
        /// The unresolved name.
        name: String,
        /// Position of the referencing term.
        pos: SourcePos,
    },

    /// A label, function, or variable name is declared twice.
    #[error("{pos}: duplicate label `{name}`")]
    DuplicateLabel {
        /// The redeclared name.
        name: String,
        /// Position of the second declaration.
        pos: SourcePos,
    },

    /// An argument-bearing mnemonic or directive has no argument.
    #[error("{pos}: `{mnemonic}` requires an argument")]
    MissingArgument {
        /// The mnemonic or directive missing its argument.
        mnemonic: String,
        /// Position of the mnemonic.
        pos: SourcePos,
    },

    /// A numeric argument could not be parsed.
    #[error("{pos}: malformed literal `{text}`")]
    MalformedLiteral {
        /// The offending term text.
        text: String,
        /// Position of the term.
        pos: SourcePos,
    },

    /// A term is neither a mnemonic, a directive, nor a label declaration.
    #[error("{pos}: unknown mnemonic `{text}`")]
    UnknownMnemonic {
        /// The offending term text.
        text: String,
        /// Position of the term.
        pos: SourcePos,
    },

    /// A `variable` declaration is not directly preceded by a literal.
    #[error("{pos}: `variable {name}` must directly follow a literal")]
    VariableWithoutLiteral {
        /// The variable name.
        name: String,
        /// Position of the `variable` directive.
        pos: SourcePos,
    },

    /// A resolved argument falls outside its encodable range.
    #[error("{pos}: {source}")]
    Encode {
        /// The underlying range violation.
        source: EncodeError,
        /// Position of the instruction.
        pos: SourcePos,
    },
}

impl AsmError {
    /// Returns the source position the error refers to.
    pub const fn pos(&self) -> SourcePos {
        match self {
            Self::UndefinedLabel { pos, .. }
            | Self::DuplicateLabel { pos, .. }
            | Self::MissingArgument { pos, .. }
            | Self::MalformedLiteral { pos, .. }
            | Self::UnknownMnemonic { pos, .. }
            | Self::VariableWithoutLiteral { pos, .. }
            | Self::Encode { pos, .. } => *pos,
        }
    }
}

/// Fatal runtime errors. Any of these aborts the simulation run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// A load, store, or instruction fetch addressed a cell outside memory.
    #[error("memory access out of range at address {addr}")]
    MemoryOutOfRange {
        /// The offending address.
        addr: i64,
    },

    /// `/` or `mod` with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// `in` on a non-input port or `out` on a non-output port.
    #[error("unknown port {port} for {direction}")]
    UnknownPort {
        /// The requested port.
        port: i64,
        /// `"read"` or `"write"`.
        direction: &'static str,
    },

    /// A micro-operation popped an empty operand stack.
    #[error("operand stack underflow at pc {pc}")]
    StackUnderflow {
        /// Program counter of the executing instruction.
        pc: usize,
    },

    /// `ret` with an empty return stack.
    #[error("return stack underflow at pc {pc}")]
    ReturnStackUnderflow {
        /// Program counter of the executing instruction.
        pc: usize,
    },

    /// The program counter reached a cell that holds no opcode.
    #[error("invalid opcode {value:#x} at address {addr}")]
    InvalidOpcode {
        /// The cell contents.
        value: i64,
        /// Address of the cell.
        addr: usize,
    },

    /// The program image does not fit the configured memory.
    #[error("program needs {cells} cells but memory holds {capacity}")]
    ProgramTooLarge {
        /// Cells required by code and data.
        cells: usize,
        /// Configured memory size.
        capacity: usize,
    },
}

/// Top-level error for operations that touch files or combine stages.
#[derive(Debug, Error)]
pub enum Error {
    /// Assembly failed.
    #[error(transparent)]
    Asm(#[from] AsmError),

    /// Encoding or decoding failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Simulation aborted.
    #[error(transparent)]
    Sim(#[from] SimError),

    /// Reading or writing an artifact failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing or deserializing JSON failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
