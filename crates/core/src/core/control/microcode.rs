//! Microcode table.
//!
//! Maps every opcode to the ordered micro-operations that implement it. Each
//! micro-operation costs exactly one tick; the instruction fetch, decode, and argument latch
//! happen inside the first micro-operation's tick.
//!
//! | Steps | Opcodes |
//! |---|---|
//! | 1 | `drop ! out jump ret c halt` |
//! | 2 | ALU operations, `if @ in lit call` |
//! | 3 | `dup` |
//! | 5 | `swap` |

use std::fmt;

use serde::Serialize;

use crate::core::units::alu::AluOp;
use crate::isa::Opcode;

/// A single datapath control step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MicroOp {
    /// Pop and discard the top of stack.
    Drop,
    /// Pop the top of stack into `A`.
    StackToA,
    /// Push `A`.
    AToStack,
    /// Push `A` onto the return stack.
    AToReturn,
    /// Pop the return stack onto the operand stack.
    ReturnToStack,
    /// Pop operands and run the ALU.
    Alu(AluOp),
    /// Push the ALU latch.
    AluToStack,
    /// Pop the top of stack into the ALU latch.
    StackToAlu,
    /// Copy the argument latch into `A`.
    ArgumentToA,
    /// Set the program counter to the argument when the ALU latch is zero.
    BranchIfZero,
    /// Set the program counter to the argument.
    JumpToArgument,
    /// Push the address of the next instruction onto the return stack.
    PushReturnAddress,
    /// Pop the return stack into the program counter.
    ReturnToPc,
    /// Pop value, then address, and store.
    MemoryWrite,
    /// Pop an address and load the cell into `A`.
    MemoryRead,
    /// Read the latched input port into `A`.
    PortRead,
    /// Pop and write to the latched output port.
    PortWrite,
    /// Push the carry flag.
    CarryToStack,
    /// Stop the machine.
    Halt,
}

impl fmt::Display for MicroOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alu(op) => write!(f, "Alu({op:?})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Two-step ALU sequence: compute, then push.
macro_rules! alu {
    ($op:ident) => {
        &[MicroOp::Alu(AluOp::$op), MicroOp::AluToStack]
    };
}

/// Returns the micro-operation sequence implementing `opcode`.
///
/// Every sequence is non-empty and at most five steps long.
pub const fn sequence(opcode: Opcode) -> &'static [MicroOp] {
    use MicroOp as M;
    match opcode {
        Opcode::Drop => &[M::Drop],
        Opcode::Dup => &[M::StackToA, M::AToStack, M::AToStack],
        Opcode::Swap => &[
            M::StackToA,
            M::AToReturn,
            M::StackToA,
            M::ReturnToStack,
            M::AToStack,
        ],
        Opcode::Add => alu!(Add),
        Opcode::Sub => alu!(Sub),
        Opcode::Mul => alu!(Mul),
        Opcode::Div => alu!(Div),
        Opcode::Mod => alu!(Mod),
        Opcode::Negate => alu!(Negate),
        Opcode::Equal => alu!(Equal),
        Opcode::Less => alu!(Less),
        Opcode::Greater => alu!(Greater),
        Opcode::And => alu!(And),
        Opcode::Or => alu!(Or),
        Opcode::Xor => alu!(Xor),
        Opcode::Invert => alu!(Invert),
        Opcode::If => &[M::StackToAlu, M::BranchIfZero],
        Opcode::Store => &[M::MemoryWrite],
        Opcode::Fetch => &[M::MemoryRead, M::AToStack],
        Opcode::In => &[M::PortRead, M::AToStack],
        Opcode::Out => &[M::PortWrite],
        Opcode::Lit => &[M::ArgumentToA, M::AToStack],
        Opcode::Jump => &[M::JumpToArgument],
        Opcode::Call => &[M::PushReturnAddress, M::JumpToArgument],
        Opcode::Ret => &[M::ReturnToPc],
        Opcode::Carry => &[M::CarryToStack],
        Opcode::Halt => &[M::Halt],
    }
}
