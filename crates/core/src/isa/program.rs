//! Assembled program representation.

use serde::{Deserialize, Serialize};

use crate::isa::instruction::Instruction;
use crate::isa::opcode::Opcode;

/// An assembled program: entry point, executable instructions, and trailing data cells.
///
/// Code occupies addresses `[0, code_len())`, one address per encoded byte. Data cell `i`
/// lives at address `code_len() + i`. The last instruction is always `halt` for assembled
/// programs, so sequential execution never reaches data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Address of the first instruction to execute.
    pub entry: usize,
    /// Executable instructions in address order.
    pub instructions: Vec<Instruction>,
    /// Variable values placed after the code.
    #[serde(default)]
    pub data: Vec<i64>,
}

impl Program {
    /// Creates a program starting at address 0 with no data.
    pub const fn new(instructions: Vec<Instruction>) -> Self {
        Self {
            entry: 0,
            instructions,
            data: Vec::new(),
        }
    }

    /// Returns the number of bytes (and memory cells) occupied by the code.
    pub fn code_len(&self) -> usize {
        self.instructions.iter().map(Instruction::width).sum()
    }

    /// Returns the number of memory cells needed to load the program.
    pub fn cell_count(&self) -> usize {
        self.code_len() + self.data.len()
    }

    /// Returns the address of every instruction, in order.
    pub fn addresses(&self) -> Vec<usize> {
        self.instructions
            .iter()
            .scan(0, |addr, instr| {
                let here = *addr;
                *addr += instr.width();
                Some(here)
            })
            .collect()
    }

    /// Returns the `(opcode, argument)` sequence, ignoring source positions.
    pub fn keys(&self) -> Vec<(Opcode, Option<i64>)> {
        self.instructions.iter().map(Instruction::key).collect()
    }
}
