//! Global Machine Constants.
//!
//! This module defines constants shared by the assembler, the codec, and the simulator. It includes:
//! 1. **Image Constants:** Header size, argument field width, and data cell tags.
//! 2. **Argument Ranges:** Bounds for address, port, and literal argument fields.
//! 3. **Port Constants:** Input and output port numbers.
//! 4. **Arithmetic Constants:** The signed 32-bit window used by the carry flag.

/// Size of the image header in bytes (4 reserved zero bytes + 4-byte entry point).
pub const HEADER_SIZE: usize = 8;

/// Size of the reserved, always-zero part of the image header.
pub const RESERVED_HEADER_SIZE: usize = 4;

/// Number of argument bytes following an argument-bearing opcode byte.
pub const ARG_BYTES: usize = 3;

/// Encoded width of an instruction without an argument.
pub const NARROW_WIDTH: usize = 1;

/// Encoded width of an argument-bearing instruction (opcode byte + argument bytes).
pub const WIDE_WIDTH: usize = NARROW_WIDTH + ARG_BYTES;

/// Mask selecting the 24-bit argument field.
pub const ARG_MASK: u32 = 0x00FF_FFFF;

/// Exclusive upper bound for address and port arguments (24-bit unsigned).
pub const ADDRESS_LIMIT: i64 = 1 << 24;

/// Smallest `lit` immediate (24-bit two's complement).
pub const LIT_MIN: i64 = -(1 << 23);

/// Largest `lit` immediate (24-bit two's complement).
pub const LIT_MAX: i64 = (1 << 23) - 1;

/// Tag byte introducing a 4-byte data word. Never assigned to a real operation.
pub const DATA_WORD_TAG: u8 = 0x00;

/// Tag byte introducing an 8-byte data cell (value outside the signed 32-bit range).
pub const DATA_CELL_TAG: u8 = 0xFF;

/// Payload size of a data word.
pub const DATA_WORD_BYTES: usize = 4;

/// Payload size of a wide data cell.
pub const DATA_CELL_BYTES: usize = 8;

/// Number of I/O ports.
pub const PORT_COUNT: usize = 4;

/// Ports readable with `in`.
pub const INPUT_PORTS: [usize; 2] = [0, 1];

/// Ports writable with `out`.
pub const OUTPUT_PORTS: [usize; 2] = [2, 3];

/// Port the simulator's input text is loaded into.
pub const PRIMARY_INPUT_PORT: usize = 0;

/// Port whose output sequence forms the simulation output.
pub const PRIMARY_OUTPUT_PORT: usize = 2;

/// Port collecting secondary output.
pub const SECONDARY_OUTPUT_PORT: usize = 3;

/// Lowest character code `out` records as a literal character.
pub const PRINTABLE_MIN: i64 = 32;

/// Highest character code `out` records as a literal character.
pub const PRINTABLE_MAX: i64 = 125;

/// Lower bound of the carry-free result window.
pub const INT32_MIN: i128 = i32::MIN as i128;

/// Upper bound of the carry-free result window.
pub const INT32_MAX: i128 = i32::MAX as i128;

/// Amount subtracted from an out-of-window result when carry is raised.
pub const CARRY_BIAS: i128 = 1 << 31;

/// Label whose address becomes the program entry point when declared.
pub const ENTRY_LABEL: &str = "start";
