//! Two-pass assembler.
//!
//! Translates Forth-like program text into a `Program`. The translation runs in stages:
//! 1. **Tokenize:** Split text into positioned terms, dropping `\` comments.
//! 2. **Parse:** Group terms into labels, instructions, and variable declarations.
//! 3. **Pass 1 (scan):** Declare every label at a provisional address, one cell per
//!    instruction, and every variable in declaration order.
//! 4. **Pass 2 (fix-up):** Walk again with the true byte counter (1 for plain opcodes, 4 for
//!    argument-bearing ones) and overwrite each label's address.
//! 5. **Codegen:** Append `halt` if missing, place variables after the code, resolve and
//!    range-check every argument.
//!
//! A numeric `lit` too wide for the 24-bit argument field becomes `lit <cell> @`, where the
//! cell is pooled after the variables.
//!
//! # Syntax
//!
//! ```text
//! \ comment to end of line
//! lit 10 variable counter     \ data cell initialised to 10
//! start:                      \ entry point when declared
//!     lit counter @ out 2
//!     call greet
//!     halt
//! : greet lit 72 out 2 ret    \ function label
//! ```

/// Instruction emission and operand resolution.
pub mod codegen;

/// Label and variable tables.
pub mod labels;

/// Tokenizer.
pub mod lexer;

/// Term grouping.
pub mod parser;

use tracing::{debug, trace};

use crate::common::AsmError;
use crate::common::constants::ENTRY_LABEL;
use crate::isa::{Instruction, Opcode, Program};

use self::labels::{LabelTable, VariableTable};
use self::parser::Item;

/// Pass 1: declares every symbol at a provisional address assuming one cell per instruction.
fn scan(
    items: &[Item<'_>],
    labels: &mut LabelTable,
    variables: &mut VariableTable,
) -> Result<(), AsmError> {
    let mut naive = 0;
    for item in items {
        match *item {
            Item::Label { name, pos } => {
                if variables.contains(name) {
                    return Err(AsmError::DuplicateLabel {
                        name: name.to_string(),
                        pos,
                    });
                }
                labels.declare(name, naive, pos)?;
            }
            Item::Instr { .. } if item.wide_literal().is_some() => naive += 2,
            Item::Instr { .. } => naive += 1,
            Item::Variable { name, value, pos } => {
                if labels.contains(name) {
                    return Err(AsmError::DuplicateLabel {
                        name: name.to_string(),
                        pos,
                    });
                }
                let _ = variables.declare(name, value, pos)?;
            }
        }
    }
    Ok(())
}

/// Pass 2: corrects label addresses for argument bytes and returns the code length.
///
/// A label's correction equals three bytes per argument-bearing instruction before it.
fn fix_up(items: &[Item<'_>], labels: &mut LabelTable) -> usize {
    let mut addr = 0;
    for item in items {
        match *item {
            Item::Label { name, .. } => {
                if let Some(naive) = labels.fix_up(name, addr) {
                    trace!(label = name, naive, addr, "label fixed up");
                }
            }
            Item::Instr { .. } if item.wide_literal().is_some() => {
                addr += Opcode::Lit.width() + Opcode::Fetch.width();
            }
            Item::Instr { opcode, .. } => addr += opcode.width(),
            Item::Variable { .. } => {}
        }
    }
    addr
}

/// Returns true if the last instruction item is not `halt`.
fn needs_halt(items: &[Item<'_>]) -> bool {
    let last = items.iter().rev().find_map(|item| match item {
        Item::Instr { opcode, .. } => Some(*opcode),
        _ => None,
    });
    last != Some(Opcode::Halt)
}

/// Assembles program text.
///
/// # Arguments
///
/// * `source` - The complete program text.
///
/// # Returns
///
/// The assembled `Program`, or the first `AsmError` encountered. No partial program is
/// returned on failure.
pub fn assemble(source: &str) -> Result<Program, AsmError> {
    let terms = lexer::tokenize(source);
    let items = parser::parse(&terms)?;

    let mut labels = LabelTable::new();
    let mut variables = VariableTable::new();
    scan(&items, &mut labels, &mut variables)?;

    let mut code_len = fix_up(&items, &mut labels);
    let append_halt = needs_halt(&items);
    if append_halt {
        code_len += Opcode::Halt.width();
    }

    let (mut instructions, constants) = codegen::generate(&items, &labels, &variables, code_len)?;
    if append_halt {
        instructions.push(Instruction::new(Opcode::Halt));
    }

    let entry = labels.get(ENTRY_LABEL).unwrap_or(0);
    let mut data = variables.into_values();
    let pooled = constants.len();
    data.extend(constants);
    debug!(
        terms = terms.len(),
        instructions = instructions.len(),
        labels = labels.len(),
        variables = data.len() - pooled,
        pooled,
        code_len,
        entry,
        "assembled program"
    );

    Ok(Program {
        entry,
        instructions,
        data,
    })
}
