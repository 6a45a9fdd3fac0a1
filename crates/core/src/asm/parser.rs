//! Term grouping.
//!
//! Groups the flat term stream into items: label declarations, instructions with their
//! operand term, and variable declarations. A variable swallows the `lit` item emitted just
//! before it, so the literal never reaches the executable stream.

use crate::asm::lexer::{
    FUNCTION_MARKER, Term, VARIABLE_DIRECTIVE, label_declaration, parse_number,
};
use crate::common::AsmError;
use crate::common::constants::{LIT_MAX, LIT_MIN};
use crate::isa::{Opcode, SourcePos};

/// One assembly item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item<'a> {
    /// `name:` or `: name`.
    Label {
        /// Declared name.
        name: &'a str,
        /// Position of the declaration.
        pos: SourcePos,
    },
    /// A machine instruction.
    Instr {
        /// The operation.
        opcode: Opcode,
        /// Unresolved argument term, present for argument-bearing opcodes.
        operand: Option<Term<'a>>,
        /// Position of the mnemonic.
        pos: SourcePos,
    },
    /// `lit value variable name`.
    Variable {
        /// Variable name.
        name: &'a str,
        /// Initial value.
        value: i64,
        /// Position of the `variable` directive.
        pos: SourcePos,
    },
}

impl Item<'_> {
    /// Returns the value of a numeric `lit` operand that does not fit the argument field.
    ///
    /// Such a literal is emitted as `lit <cell> @` against a pooled data cell.
    pub fn wide_literal(&self) -> Option<i64> {
        match *self {
            Item::Instr {
                opcode: Opcode::Lit,
                operand: Some(term),
                ..
            } => parse_number(term.text).filter(|value| !(LIT_MIN..=LIT_MAX).contains(value)),
            _ => None,
        }
    }
}

/// Returns the term after index `i` if it can serve as an argument.
fn argument<'a>(terms: &[Term<'a>], i: usize, mnemonic: &str) -> Result<Term<'a>, AsmError> {
    let head = terms[i];
    match terms.get(i + 1) {
        Some(next) if next.text != FUNCTION_MARKER && label_declaration(next.text).is_none() => {
            Ok(*next)
        }
        _ => Err(AsmError::MissingArgument {
            mnemonic: mnemonic.to_string(),
            pos: head.pos,
        }),
    }
}

/// Groups terms into items.
///
/// # Arguments
///
/// * `terms` - The tokenized program.
///
/// # Returns
///
/// The items in source order, or the first `MissingArgument`, `UnknownMnemonic`, or
/// `VariableWithoutLiteral` found.
pub fn parse<'a>(terms: &[Term<'a>]) -> Result<Vec<Item<'a>>, AsmError> {
    let mut items = Vec::with_capacity(terms.len());
    let mut i = 0;

    while i < terms.len() {
        let term = terms[i];

        if term.text == FUNCTION_MARKER {
            let name = argument(terms, i, FUNCTION_MARKER)?;
            items.push(Item::Label {
                name: name.text,
                pos: term.pos,
            });
            i += 2;
        } else if let Some(name) = label_declaration(term.text) {
            items.push(Item::Label {
                name,
                pos: term.pos,
            });
            i += 1;
        } else if term.text == VARIABLE_DIRECTIVE {
            let name = argument(terms, i, VARIABLE_DIRECTIVE)?;
            let value = match items.last() {
                Some(Item::Instr {
                    opcode: Opcode::Lit,
                    operand: Some(literal),
                    ..
                }) => parse_number(literal.text),
                _ => None,
            };
            let Some(value) = value else {
                return Err(AsmError::VariableWithoutLiteral {
                    name: name.text.to_string(),
                    pos: term.pos,
                });
            };
            let _ = items.pop();
            items.push(Item::Variable {
                name: name.text,
                value,
                pos: term.pos,
            });
            i += 2;
        } else if let Some(opcode) = Opcode::from_mnemonic(term.text) {
            if opcode.has_argument() {
                let operand = argument(terms, i, opcode.mnemonic())?;
                items.push(Item::Instr {
                    opcode,
                    operand: Some(operand),
                    pos: term.pos,
                });
                i += 2;
            } else {
                items.push(Item::Instr {
                    opcode,
                    operand: None,
                    pos: term.pos,
                });
                i += 1;
            }
        } else {
            return Err(AsmError::UnknownMnemonic {
                text: term.text.to_string(),
                pos: term.pos,
            });
        }
    }

    Ok(items)
}
