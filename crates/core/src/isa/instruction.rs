//! Instruction and source-position types.
//!
//! An `Instruction` is the unit both the assembler and the decoder produce: an opcode, an
//! optional typed argument, and (for assembled code) the position of the mnemonic in source.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::isa::opcode::Opcode;

/// One-based line and column of a term in program text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourcePos {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl SourcePos {
    /// Creates a position from a line and column.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A single machine instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// The operation.
    pub opcode: Opcode,
    /// Argument for `if`, `lit`, `jump`, `call`, `in`, `out`; `None` otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<i64>,
    /// Source position of the mnemonic; `None` for decoded code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<SourcePos>,
}

impl Instruction {
    /// Creates an instruction without an argument.
    pub const fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            arg: None,
            pos: None,
        }
    }

    /// Creates an argument-bearing instruction.
    pub const fn with_arg(opcode: Opcode, arg: i64) -> Self {
        Self {
            opcode,
            arg: Some(arg),
            pos: None,
        }
    }

    /// Attaches a source position.
    #[must_use]
    pub const fn at(mut self, pos: SourcePos) -> Self {
        self.pos = Some(pos);
        self
    }

    /// Returns the encoded width in bytes.
    pub const fn width(&self) -> usize {
        self.opcode.width()
    }

    /// Returns the `(opcode, argument)` pair, ignoring source position.
    pub const fn key(&self) -> (Opcode, Option<i64>) {
        (self.opcode, self.arg)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arg {
            Some(arg) => write!(f, "{} {arg}", self.opcode),
            None => write!(f, "{}", self.opcode),
        }
    }
}
