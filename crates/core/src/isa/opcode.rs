//! Opcode Definitions.
//!
//! Defines the closed set of machine operations together with their binary values and source
//! mnemonics. Byte `0x00` and byte `0xFF` are never assigned to an operation; the image format
//! uses them to tag data cells.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::constants::{NARROW_WIDTH, WIDE_WIDTH};

/// Machine operation.
///
/// The assembler-only `variable` and `:` forms have no binary value and are handled as
/// directives by the assembler, so they are not variants here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Opcode {
    /// Remove the top of stack.
    Drop,
    /// Duplicate the top of stack.
    Dup,
    /// Exchange the two topmost cells.
    Swap,
    /// `a b + -> a+b`, sets carry.
    Add,
    /// `a b - -> a-b`, sets carry.
    Sub,
    /// `a b * -> a*b`, sets carry.
    Mul,
    /// `a b / -> floor(a/b)`, sets carry.
    Div,
    /// `a b mod -> a mod b` (floored).
    Mod,
    /// `a negate -> -a`, sets carry.
    Negate,
    /// `a b = -> a==b`.
    Equal,
    /// `a b < -> a<b`.
    Less,
    /// `a b > -> a>b`.
    Greater,
    /// Bitwise and.
    And,
    /// Bitwise or.
    Or,
    /// Bitwise xor.
    Xor,
    /// Bitwise complement.
    Invert,
    /// Pop; branch to the argument when the popped value is zero.
    If,
    /// `addr value ! ->`: store `value` at `addr`.
    Store,
    /// `addr @ -> value`.
    Fetch,
    /// Read one character from an input port.
    In,
    /// Stop the machine.
    Halt,
    /// Push the signed argument.
    Lit,
    /// Write the top of stack to an output port.
    Out,
    /// Unconditional branch.
    Jump,
    /// Push the return address and branch.
    Call,
    /// Pop the return stack into the program counter.
    Ret,
    /// Push the carry flag.
    Carry,
}

/// Coarse operation class used for instruction-mix statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// `drop`, `dup`, `swap`.
    Stack,
    /// `+ - * / mod negate`.
    Arithmetic,
    /// `and or xor invert`.
    Logic,
    /// `= < >`.
    Comparison,
    /// `if jump call ret halt`.
    Control,
    /// `! @`.
    Memory,
    /// `in out`.
    Io,
    /// `lit c`.
    Immediate,
}

/// `(opcode, binary value, mnemonic)` for every operation.
const TABLE: [(Opcode, u8, &str); 27] = [
    (Opcode::Drop, 0x01, "drop"),
    (Opcode::Dup, 0x02, "dup"),
    (Opcode::Swap, 0x03, "swap"),
    (Opcode::Add, 0x04, "+"),
    (Opcode::Sub, 0x05, "-"),
    (Opcode::Mul, 0x06, "*"),
    (Opcode::Div, 0x07, "/"),
    (Opcode::Mod, 0x08, "mod"),
    (Opcode::Negate, 0x09, "negate"),
    (Opcode::Equal, 0x0A, "="),
    (Opcode::Less, 0x0B, "<"),
    (Opcode::Greater, 0x0C, ">"),
    (Opcode::And, 0x0D, "and"),
    (Opcode::Or, 0x0E, "or"),
    (Opcode::Xor, 0x0F, "xor"),
    (Opcode::Invert, 0x10, "invert"),
    (Opcode::If, 0x11, "if"),
    (Opcode::Store, 0x12, "!"),
    (Opcode::Fetch, 0x13, "@"),
    (Opcode::In, 0x14, "in"),
    (Opcode::Halt, 0x15, "halt"),
    (Opcode::Lit, 0x16, "lit"),
    (Opcode::Out, 0x17, "out"),
    (Opcode::Jump, 0x18, "jump"),
    (Opcode::Call, 0x19, "call"),
    (Opcode::Ret, 0x1A, "ret"),
    (Opcode::Carry, 0x20, "c"),
];

impl Opcode {
    /// Every opcode in binary-value order.
    pub const ALL: [Self; 27] = {
        let mut all = [Self::Drop; 27];
        let mut i = 0;
        while i < TABLE.len() {
            all[i] = TABLE[i].0;
            i += 1;
        }
        all
    };

    const fn entry(self) -> (Self, u8, &'static str) {
        TABLE[self as usize]
    }

    /// Returns the binary value of the opcode byte.
    pub const fn binary(self) -> u8 {
        self.entry().1
    }

    /// Returns the source mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        self.entry().2
    }

    /// Looks up the opcode with the given binary value.
    pub fn from_byte(byte: u8) -> Option<Self> {
        TABLE.iter().find(|(_, b, _)| *b == byte).map(|(op, _, _)| *op)
    }

    /// Looks up the opcode spelled by `text` in source.
    pub fn from_mnemonic(text: &str) -> Option<Self> {
        TABLE.iter().find(|(_, _, m)| *m == text).map(|(op, _, _)| *op)
    }

    /// Returns true for opcodes followed by a 3-byte argument.
    pub const fn has_argument(self) -> bool {
        matches!(
            self,
            Self::If | Self::Lit | Self::Jump | Self::Call | Self::In | Self::Out
        )
    }

    /// Returns the encoded width in bytes (and memory cells).
    pub const fn width(self) -> usize {
        if self.has_argument() {
            WIDE_WIDTH
        } else {
            NARROW_WIDTH
        }
    }

    /// Returns true when the argument is a signed immediate rather than an address or port.
    pub const fn has_signed_argument(self) -> bool {
        matches!(self, Self::Lit)
    }

    /// Returns true when the instruction always sets the program counter itself.
    pub const fn writes_pc(self) -> bool {
        matches!(self, Self::Jump | Self::Call | Self::Ret | Self::Halt)
    }

    /// Returns the statistics class of the opcode.
    pub const fn category(self) -> Category {
        match self {
            Self::Drop | Self::Dup | Self::Swap => Category::Stack,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod | Self::Negate => {
                Category::Arithmetic
            }
            Self::And | Self::Or | Self::Xor | Self::Invert => Category::Logic,
            Self::Equal | Self::Less | Self::Greater => Category::Comparison,
            Self::If | Self::Jump | Self::Call | Self::Ret | Self::Halt => Category::Control,
            Self::Store | Self::Fetch => Category::Memory,
            Self::In | Self::Out => Category::Io,
            Self::Lit | Self::Carry => Category::Immediate,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
