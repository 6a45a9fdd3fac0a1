//! Code generation.
//!
//! Turns placed items into `Instruction`s: every operand term is resolved to a number, label
//! address, or variable address and then range-checked against its argument field. Numeric
//! `lit` operands wider than the field are pooled into data cells after the variables.

use crate::asm::labels::{LabelTable, VariableTable};
use crate::asm::lexer::{Term, looks_numeric, parse_number};
use crate::asm::parser::Item;
use crate::common::AsmError;
use crate::isa::encode::check_argument;
use crate::isa::{Instruction, Opcode};

/// Resolves an operand term for `opcode`.
///
/// `lit` accepts a number, a variable (its address), or a label; `if`, `jump`, and `call`
/// accept a number or a label; `in` and `out` accept only a number.
fn resolve_operand(
    opcode: Opcode,
    term: Term<'_>,
    labels: &LabelTable,
    variables: &VariableTable,
    data_base: usize,
) -> Result<i64, AsmError> {
    if let Some(value) = parse_number(term.text) {
        return Ok(value);
    }
    let malformed = || AsmError::MalformedLiteral {
        text: term.text.to_string(),
        pos: term.pos,
    };
    if looks_numeric(term.text) {
        return Err(malformed());
    }
    let addr = match opcode {
        Opcode::In | Opcode::Out => return Err(malformed()),
        Opcode::Lit => match variables.address(term.text, data_base) {
            Some(addr) => addr,
            None => labels.resolve(term.text, term.pos)?,
        },
        _ => labels.resolve(term.text, term.pos)?,
    };
    Ok(addr as i64)
}

/// Emits the instruction stream for `items`.
///
/// # Arguments
///
/// * `items` - Parsed items; only `Item::Instr` entries produce code.
/// * `labels` - Label table holding final (corrected) addresses.
/// * `variables` - Variable table.
/// * `data_base` - Address of the first data cell (the code length).
///
/// # Returns
///
/// The instructions and the pooled wide literals, in placement order.
pub fn generate(
    items: &[Item<'_>],
    labels: &LabelTable,
    variables: &VariableTable,
    data_base: usize,
) -> Result<(Vec<Instruction>, Vec<i64>), AsmError> {
    let pool_base = data_base + variables.len();
    let mut code = Vec::with_capacity(items.len());
    let mut constants = Vec::new();
    for item in items {
        let Item::Instr {
            opcode,
            operand,
            pos,
        } = *item
        else {
            continue;
        };
        if let Some(value) = item.wide_literal() {
            let cell = (pool_base + constants.len()) as i64;
            let _ = check_argument(Opcode::Lit, cell)
                .map_err(|source| AsmError::Encode { source, pos })?;
            constants.push(value);
            code.push(Instruction::with_arg(Opcode::Lit, cell).at(pos));
            code.push(Instruction::new(Opcode::Fetch).at(pos));
            continue;
        }
        let instr = match operand {
            Some(term) => {
                let value = resolve_operand(opcode, term, labels, variables, data_base)?;
                let _ = check_argument(opcode, value)
                    .map_err(|source| AsmError::Encode { source, pos })?;
                Instruction::with_arg(opcode, value)
            }
            None => Instruction::new(opcode),
        };
        code.push(instr.at(pos));
    }
    Ok((code, constants))
}
