//! ALU logical and comparison operations.
//!
//! Bitwise operations work on the full 64-bit cell. Comparisons are signed and produce
//! 1 for true, 0 for false.

use crate::core::units::alu::AluOp;

/// Executes a logical or comparison operation.
///
/// # Arguments
///
/// * `op` - The operation (must be a logic/comparison variant).
/// * `a`  - First operand; the only operand of `Invert`.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The result. Returns `0` for non-logic operations.
pub fn execute(op: AluOp, a: i64, b: i64) -> i64 {
    match op {
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Invert => !a,
        AluOp::Equal => i64::from(a == b),
        AluOp::Less => i64::from(a < b),
        AluOp::Greater => i64::from(a > b),
        _ => 0,
    }
}
