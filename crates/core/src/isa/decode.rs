//! Binary Image Decoder.
//!
//! Parses a byte image back into a `Program`. Decoding rules:
//! 1. **Header:** At least 8 bytes, the first 4 zero; the next 4 are the big-endian entry point.
//! 2. **Code:** Opcode bytes with their 3-byte arguments. `lit` arguments are sign-extended
//!    from 24 bits; every other argument is unsigned.
//! 3. **Data:** Tag bytes `0x00` / `0xFF` are accepted only after a `halt` has been decoded.
//!    Once the first data cell is seen, only data cells may follow.

use crate::common::EncodeError;
use crate::common::constants::{
    ARG_BYTES, DATA_CELL_BYTES, DATA_CELL_TAG, DATA_WORD_BYTES, DATA_WORD_TAG, HEADER_SIZE,
    RESERVED_HEADER_SIZE,
};
use crate::isa::instruction::Instruction;
use crate::isa::opcode::Opcode;
use crate::isa::program::Program;

/// Number of bits in an argument field.
const ARG_BITS: u32 = 24;

/// Sign-extends a 24-bit argument field.
pub const fn sign_extend(field: u32) -> i64 {
    let shift = 32 - ARG_BITS;
    (((field << shift) as i32) >> shift) as i64
}

/// Returns `len` bytes at `offset`, or `TruncatedArgument` naming `mnemonic`.
fn take<'a>(
    bytes: &'a [u8],
    offset: usize,
    len: usize,
    mnemonic: &'static str,
) -> Result<&'a [u8], EncodeError> {
    bytes
        .get(offset..offset + len)
        .ok_or(EncodeError::TruncatedArgument { mnemonic, offset })
}

fn read_header(bytes: &[u8]) -> Result<usize, EncodeError> {
    let header = bytes
        .get(..HEADER_SIZE)
        .ok_or(EncodeError::MalformedHeader("image shorter than 8 bytes"))?;
    if header[..RESERVED_HEADER_SIZE].iter().any(|&b| b != 0) {
        return Err(EncodeError::MalformedHeader("reserved word is not zero"));
    }
    let mut entry = [0; 4];
    entry.copy_from_slice(&header[RESERVED_HEADER_SIZE..]);
    Ok(u32::from_be_bytes(entry) as usize)
}

/// Decodes a binary image into a program.
///
/// # Arguments
///
/// * `bytes` - The complete image, header included.
///
/// # Returns
///
/// The decoded program, or an `EncodeError` describing the first malformed cell. Offsets in
/// errors are relative to the start of the image.
pub fn decode(bytes: &[u8]) -> Result<Program, EncodeError> {
    let entry = read_header(bytes)?;

    let mut instructions = Vec::new();
    let mut data = Vec::new();
    let mut halted = false;
    let mut offset = HEADER_SIZE;

    while offset < bytes.len() {
        let byte = bytes[offset];
        let is_tag = byte == DATA_WORD_TAG || byte == DATA_CELL_TAG;

        if halted && is_tag {
            let payload = offset + 1;
            if byte == DATA_WORD_TAG {
                let raw = take(bytes, payload, DATA_WORD_BYTES, "data")?;
                let mut word = [0; DATA_WORD_BYTES];
                word.copy_from_slice(raw);
                data.push(i64::from(i32::from_be_bytes(word)));
                offset = payload + DATA_WORD_BYTES;
            } else {
                let raw = take(bytes, payload, DATA_CELL_BYTES, "data")?;
                let mut cell = [0; DATA_CELL_BYTES];
                cell.copy_from_slice(raw);
                data.push(i64::from_be_bytes(cell));
                offset = payload + DATA_CELL_BYTES;
            }
            continue;
        }

        if !data.is_empty() {
            return Err(EncodeError::InvalidOpcode { byte, offset });
        }

        let opcode = Opcode::from_byte(byte).ok_or(EncodeError::InvalidOpcode { byte, offset })?;
        let instr = if opcode.has_argument() {
            let raw = take(bytes, offset + 1, ARG_BYTES, opcode.mnemonic())?;
            let field = u32::from_be_bytes([0, raw[0], raw[1], raw[2]]);
            let arg = if opcode.has_signed_argument() {
                sign_extend(field)
            } else {
                i64::from(field)
            };
            Instruction::with_arg(opcode, arg)
        } else {
            Instruction::new(opcode)
        };

        halted |= opcode == Opcode::Halt;
        offset += instr.width();
        instructions.push(instr);
    }

    Ok(Program {
        entry,
        instructions,
        data,
    })
}
