//! Program Disassembler.
//!
//! Renders a `Program` as the hex listing written next to every binary image. Each line
//! describes one instruction or data cell:
//!
//! ```text
//! 000000 - 16000048 - lit (48)
//! 000004 - 17000002 - out (2)
//! 000008 - 15 - halt
//! ```
//!
//! Addresses are 6 upper-case hex digits, the hex word is the cell's encoded bytes, and the
//! argument is upper-case hex with a leading `-` for negative literals.
//!
//! # Usage
//!
//! ```
//! use stackcpu_core::isa::{Instruction, Opcode, Program, disasm::disassemble};
//! let program = Program::new(vec![Instruction::new(Opcode::Halt)]);
//! assert_eq!(disassemble(&program).unwrap(), "000000 - 15 - halt");
//! ```

use std::fmt::Write as _;

use crate::common::EncodeError;
use crate::isa::encode::{data_cell_bytes, instruction_bytes};
use crate::isa::instruction::Instruction;
use crate::isa::program::Program;

/// Mnemonic printed for data cells.
pub const DATA_MNEMONIC: &str = "data";

/// Formats bytes as upper-case hex, two digits per byte.
pub fn hex_word(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        let _ = write!(s, "{b:02X}");
        s
    })
}

/// Formats an argument as upper-case hex with a leading `-` when negative.
pub fn format_argument(value: i64) -> String {
    if value < 0 {
        format!("-{:X}", value.unsigned_abs())
    } else {
        format!("{value:X}")
    }
}

/// Formats one listing line.
fn line(addr: usize, bytes: &[u8], mnemonic: &str, arg: Option<i64>) -> String {
    let mut text = format!("{addr:06X} - {} - {mnemonic}", hex_word(bytes));
    if let Some(arg) = arg {
        let _ = write!(text, " ({})", format_argument(arg));
    }
    text
}

/// Formats the listing line of one instruction placed at `addr`.
pub fn disassemble_instruction(addr: usize, instr: &Instruction) -> Result<String, EncodeError> {
    let bytes = instruction_bytes(instr)?;
    Ok(line(addr, &bytes, instr.opcode.mnemonic(), instr.arg))
}

/// Renders the full listing of a program, one line per instruction and data cell.
///
/// # Arguments
///
/// * `program` - The program to list.
///
/// # Returns
///
/// Newline-separated listing lines without a trailing newline, or `EncodeOverflow` if an
/// argument cannot be encoded.
pub fn disassemble(program: &Program) -> Result<String, EncodeError> {
    let mut lines = Vec::with_capacity(program.instructions.len() + program.data.len());
    for (addr, instr) in program.addresses().into_iter().zip(&program.instructions) {
        lines.push(disassemble_instruction(addr, instr)?);
    }
    let code_len = program.code_len();
    for (i, &value) in program.data.iter().enumerate() {
        lines.push(line(
            code_len + i,
            &data_cell_bytes(value),
            DATA_MNEMONIC,
            Some(value),
        ));
    }
    Ok(lines.join("\n"))
}
