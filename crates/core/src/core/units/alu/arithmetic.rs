//! ALU arithmetic operations.
//!
//! Results are computed at 128-bit width and then checked against the signed 32-bit window
//! `[-2^31, 2^31 - 1]`. A result inside the window clears carry and is stored exactly. A
//! result outside it sets carry and is stored as `result - 2^31`, truncated to the cell.
//!
//! Division and remainder are floored: the quotient rounds toward negative infinity and the
//! remainder takes the sign of the divisor.

use crate::common::SimError;
use crate::common::constants::{CARRY_BIAS, INT32_MAX, INT32_MIN};
use crate::core::units::alu::{AluOp, AluResult};

/// Applies the carry policy to a wide result.
pub const fn with_carry(wide: i128) -> AluResult {
    if wide < INT32_MIN || wide > INT32_MAX {
        AluResult {
            value: (wide - CARRY_BIAS) as i64,
            carry: Some(true),
        }
    } else {
        AluResult {
            value: wide as i64,
            carry: Some(false),
        }
    }
}

/// Floored quotient of `a / b`.
pub fn floored_div(a: i128, b: i128) -> Result<i128, SimError> {
    if b == 0 {
        return Err(SimError::DivisionByZero);
    }
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

/// Floored remainder of `a mod b`, with the sign of `b`.
pub fn floored_mod(a: i64, b: i64) -> Result<i64, SimError> {
    if b == 0 {
        return Err(SimError::DivisionByZero);
    }
    let (a, b) = (i128::from(a), i128::from(b));
    let r = a % b;
    let r = if r != 0 && ((r < 0) != (b < 0)) { r + b } else { r };
    Ok(r as i64)
}

/// Executes an arithmetic operation.
///
/// # Arguments
///
/// * `op` - One of `Add`, `Sub`, `Mul`, `Div`, `Negate`.
/// * `a`  - First operand.
/// * `b`  - Second operand (ignored by `Negate`).
///
/// # Returns
///
/// The carried result, or `DivisionByZero`.
pub fn execute(op: AluOp, a: i64, b: i64) -> Result<AluResult, SimError> {
    let (a, b) = (i128::from(a), i128::from(b));
    let wide = match op {
        AluOp::Add => a + b,
        AluOp::Sub => a - b,
        AluOp::Mul => a * b,
        AluOp::Div => floored_div(a, b)?,
        AluOp::Negate => -a,
        _ => 0,
    };
    Ok(with_carry(wide))
}
