//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the ALU driven by the `Alu` micro-operation. It handles the
//! arithmetic operators, which report a carry, and the logic and comparison operators,
//! which leave the carry flag untouched.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Div, Mod, Negate
//! - [`logic`]:      And, Or, Xor, Invert, Equal, Less, Greater

/// Arithmetic operations with 32-bit carry detection.
pub mod arithmetic;

/// Bitwise logical and comparison operations.
pub mod logic;

use serde::Serialize;

use crate::common::SimError;
use crate::isa::Opcode;

/// ALU operation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AluOp {
    /// `a + b`.
    Add,
    /// `a - b`.
    Sub,
    /// `a * b`.
    Mul,
    /// Floored `a / b`.
    Div,
    /// Floored `a mod b`.
    Mod,
    /// `-a`.
    Negate,
    /// `a == b`.
    Equal,
    /// `a < b`.
    Less,
    /// `a > b`.
    Greater,
    /// `a & b`.
    And,
    /// `a | b`.
    Or,
    /// `a ^ b`.
    Xor,
    /// `!a`.
    Invert,
}

impl AluOp {
    /// Returns the ALU operation performed by `opcode`, if any.
    pub const fn from_opcode(opcode: Opcode) -> Option<Self> {
        Some(match opcode {
            Opcode::Add => Self::Add,
            Opcode::Sub => Self::Sub,
            Opcode::Mul => Self::Mul,
            Opcode::Div => Self::Div,
            Opcode::Mod => Self::Mod,
            Opcode::Negate => Self::Negate,
            Opcode::Equal => Self::Equal,
            Opcode::Less => Self::Less,
            Opcode::Greater => Self::Greater,
            Opcode::And => Self::And,
            Opcode::Or => Self::Or,
            Opcode::Xor => Self::Xor,
            Opcode::Invert => Self::Invert,
            _ => return None,
        })
    }

    /// Returns true for operations taking a single operand.
    pub const fn is_unary(self) -> bool {
        matches!(self, Self::Negate | Self::Invert)
    }
}

/// Output of one ALU operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AluResult {
    /// Result narrowed to a cell.
    pub value: i64,
    /// New carry flag, or `None` when the operation leaves carry unchanged.
    pub carry: Option<bool>,
}

/// Arithmetic Logic Unit.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation to perform.
    /// * `a`  - First operand (pushed first); the only operand of unary operations.
    /// * `b`  - Second operand (top of stack); ignored by unary operations.
    ///
    /// # Returns
    ///
    /// The result and carry update, or `DivisionByZero` for `/` and `mod` by zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackcpu_core::core::units::alu::{Alu, AluOp};
    ///
    /// let r = Alu::execute(AluOp::Sub, 10, 3).unwrap();
    /// assert_eq!((r.value, r.carry), (7, Some(false)));
    ///
    /// let r = Alu::execute(AluOp::Add, 2_147_483_647, 1).unwrap();
    /// assert_eq!((r.value, r.carry), (0, Some(true)));
    ///
    /// let r = Alu::execute(AluOp::Less, -5, 10).unwrap();
    /// assert_eq!((r.value, r.carry), (1, None));
    /// ```
    pub fn execute(op: AluOp, a: i64, b: i64) -> Result<AluResult, SimError> {
        match op {
            AluOp::Add | AluOp::Sub | AluOp::Mul | AluOp::Div | AluOp::Negate => {
                arithmetic::execute(op, a, b)
            }
            AluOp::Mod => Ok(AluResult {
                value: arithmetic::floored_mod(a, b)?,
                carry: None,
            }),
            AluOp::Equal
            | AluOp::Less
            | AluOp::Greater
            | AluOp::And
            | AluOp::Or
            | AluOp::Xor
            | AluOp::Invert => Ok(AluResult {
                value: logic::execute(op, a, b),
                carry: None,
            }),
        }
    }
}
