//! Binary Image Encoder.
//!
//! Serializes a `Program` into the byte image the loader and simulator consume. The image
//! layout is:
//! 1. **Header:** 4 reserved zero bytes, then the entry point as a big-endian 32-bit word.
//! 2. **Code:** One opcode byte per instruction; argument-bearing opcodes append the low
//!    24 bits of the argument, big-endian.
//! 3. **Data:** One tagged cell per variable; tag `0x00` + 4-byte word, or tag `0xFF` +
//!    8-byte cell when the value lies outside the signed 32-bit range.

use crate::common::EncodeError;
use crate::common::constants::{
    ADDRESS_LIMIT, ARG_MASK, DATA_CELL_TAG, DATA_WORD_TAG, LIT_MAX, LIT_MIN, RESERVED_HEADER_SIZE,
};
use crate::isa::instruction::Instruction;
use crate::isa::opcode::Opcode;
use crate::isa::program::Program;

/// Validates an argument against the field range of `opcode` and returns its 24-bit encoding.
///
/// # Arguments
///
/// * `opcode` - The argument-bearing opcode.
/// * `value` - The resolved argument.
///
/// # Returns
///
/// The argument masked to 24 bits, or `EncodeOverflow` when it does not fit.
pub fn check_argument(opcode: Opcode, value: i64) -> Result<u32, EncodeError> {
    let fits = if opcode.has_signed_argument() {
        (LIT_MIN..=LIT_MAX).contains(&value)
    } else {
        (0..ADDRESS_LIMIT).contains(&value)
    };
    if fits {
        Ok((value as u32) & ARG_MASK)
    } else {
        Err(EncodeError::EncodeOverflow {
            mnemonic: opcode.mnemonic(),
            value,
        })
    }
}

/// Appends the encoding of one instruction to `out`.
///
/// The argument must be present exactly when the opcode takes one.
pub fn encode_instruction(instr: &Instruction, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    match (instr.opcode.has_argument(), instr.arg) {
        (true, Some(value)) => {
            let field = check_argument(instr.opcode, value)?;
            out.push(instr.opcode.binary());
            out.extend_from_slice(&field.to_be_bytes()[1..]);
        }
        (false, None) => out.push(instr.opcode.binary()),
        _ => {
            return Err(EncodeError::ArgumentMismatch {
                mnemonic: instr.opcode.mnemonic(),
            });
        }
    }
    Ok(())
}

/// Appends the encoding of one data cell to `out`.
pub fn encode_data_cell(value: i64, out: &mut Vec<u8>) {
    match i32::try_from(value) {
        Ok(word) => {
            out.push(DATA_WORD_TAG);
            out.extend_from_slice(&word.to_be_bytes());
        }
        Err(_) => {
            out.push(DATA_CELL_TAG);
            out.extend_from_slice(&value.to_be_bytes());
        }
    }
}

/// Returns the raw bytes of a single instruction, used by the listing.
pub fn instruction_bytes(instr: &Instruction) -> Result<Vec<u8>, EncodeError> {
    let mut bytes = Vec::with_capacity(instr.width());
    encode_instruction(instr, &mut bytes)?;
    Ok(bytes)
}

/// Returns the raw bytes of a single data cell, used by the listing.
pub fn data_cell_bytes(value: i64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(9);
    encode_data_cell(value, &mut bytes);
    bytes
}

/// Encodes a program into its binary image.
///
/// # Arguments
///
/// * `program` - The program to serialize.
///
/// # Returns
///
/// The image bytes, `EncodeOverflow` when an argument or the entry point does not fit, or
/// `ArgumentMismatch` when an instruction's argument disagrees with its opcode.
pub fn encode(program: &Program) -> Result<Vec<u8>, EncodeError> {
    let entry = u32::try_from(program.entry).map_err(|_| EncodeError::EncodeOverflow {
        mnemonic: "entry",
        value: program.entry as i64,
    })?;

    let mut out = Vec::with_capacity(RESERVED_HEADER_SIZE * 2 + program.cell_count());
    out.extend_from_slice(&[0; RESERVED_HEADER_SIZE]);
    out.extend_from_slice(&entry.to_be_bytes());
    for instr in &program.instructions {
        encode_instruction(instr, &mut out)?;
    }
    for &value in &program.data {
        encode_data_cell(value, &mut out);
    }
    Ok(out)
}

/// Checks that `program` has an image: every argument present where required and in range.
///
/// Programs that did not come from the assembler (JSON dumps) pass through this before they
/// are loaded, since `Memory::load` keeps only the low 24 bits of each argument.
pub fn validate(program: &Program) -> Result<(), EncodeError> {
    let _ = encode(program)?;
    Ok(())
}
