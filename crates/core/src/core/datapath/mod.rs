//! Datapath.
//!
//! The datapath owns every piece of mutable machine state and exposes the primitive
//! signals the control unit sequences. It includes:
//! 1. **Stacks:** The operand stack (top = latest push) and the return stack.
//! 2. **Registers:** Program counter, scratch register `A`, ALU output latch, argument latch,
//!    and the carry flag.
//! 3. **Memory:** The unified code/data cell array.
//! 4. **Ports:** Two input queues and two output sequences.

/// Unified code/data memory.
pub mod memory;

/// I/O port buffers.
pub mod ports;

use crate::common::SimError;
use crate::common::constants::{ARG_BYTES, PRIMARY_INPUT_PORT};
use crate::core::units::alu::{Alu, AluOp};
use crate::isa::decode::sign_extend;
use crate::isa::{Opcode, Program};

pub use self::memory::Memory;
pub use self::ports::{PortBuffer, Ports};

/// Machine state manipulated one micro-operation at a time.
#[derive(Clone, Debug)]
pub struct Datapath {
    stack: Vec<i64>,
    return_stack: Vec<i64>,
    pc: usize,
    a: i64,
    alu: i64,
    argument: i64,
    carry: bool,
    memory: Memory,
    ports: Ports,
}

impl Datapath {
    /// Creates a datapath with `memory_size` zeroed cells and empty ports.
    pub fn new(memory_size: usize) -> Self {
        Self {
            stack: Vec::new(),
            return_stack: Vec::new(),
            pc: 0,
            a: 0,
            alu: 0,
            argument: 0,
            carry: false,
            memory: Memory::new(memory_size),
            ports: Ports::new(),
        }
    }

    /// Loads a program and its input stream, and points the program counter at the entry.
    ///
    /// # Returns
    ///
    /// `ProgramTooLarge` if the program does not fit in memory.
    pub fn load(&mut self, program: &Program, input: &str) -> Result<(), SimError> {
        self.memory.load(program)?;
        self.ports.feed(PRIMARY_INPUT_PORT, input);
        self.pc = program.entry;
        Ok(())
    }

    // ── Stacks ──────────────────────────────────────────────────────────

    /// Pushes a value onto the operand stack.
    pub fn push(&mut self, value: i64) {
        self.stack.push(value);
    }

    /// Pops the operand stack.
    pub fn pop(&mut self) -> Result<i64, SimError> {
        self.stack
            .pop()
            .ok_or(SimError::StackUnderflow { pc: self.pc })
    }

    /// Pushes a value onto the return stack.
    pub fn push_return(&mut self, value: i64) {
        self.return_stack.push(value);
    }

    /// Pops the return stack.
    pub fn pop_return(&mut self) -> Result<i64, SimError> {
        self.return_stack
            .pop()
            .ok_or(SimError::ReturnStackUnderflow { pc: self.pc })
    }

    /// Returns the operand `depth` cells below the top (0 = top of stack).
    pub fn peek(&self, depth: usize) -> Option<i64> {
        self.stack.iter().rev().nth(depth).copied()
    }

    /// Returns the operand stack, bottom first.
    pub fn stack(&self) -> &[i64] {
        &self.stack
    }

    /// Returns the return stack, bottom first.
    pub fn return_stack(&self) -> &[i64] {
        &self.return_stack
    }

    // ── Registers ───────────────────────────────────────────────────────

    /// Returns the program counter.
    pub const fn pc(&self) -> usize {
        self.pc
    }

    /// Sets the program counter.
    pub const fn set_pc(&mut self, pc: usize) {
        self.pc = pc;
    }

    /// Sets the program counter from a cell value (return address or branch target).
    pub fn set_pc_from(&mut self, target: i64) -> Result<(), SimError> {
        self.pc = usize::try_from(target).map_err(|_| SimError::MemoryOutOfRange { addr: target })?;
        Ok(())
    }

    /// Returns the scratch register.
    pub const fn a(&self) -> i64 {
        self.a
    }

    /// Sets the scratch register.
    pub const fn set_a(&mut self, value: i64) {
        self.a = value;
    }

    /// Returns the ALU output latch.
    pub const fn alu(&self) -> i64 {
        self.alu
    }

    /// Sets the ALU latch directly (used by `if` to hold the tested value).
    pub const fn set_alu(&mut self, value: i64) {
        self.alu = value;
    }

    /// Returns the argument latch.
    pub const fn argument(&self) -> i64 {
        self.argument
    }

    /// Returns the carry flag.
    pub const fn carry(&self) -> bool {
        self.carry
    }

    // ── Decode and argument fetch ───────────────────────────────────────

    /// Decodes the opcode at the program counter.
    ///
    /// # Returns
    ///
    /// `MemoryOutOfRange` if the counter is outside memory, `InvalidOpcode` if the cell does
    /// not hold an opcode byte.
    pub fn fetch_opcode(&self) -> Result<Opcode, SimError> {
        let value = self.memory.read(self.pc as i64)?;
        u8::try_from(value)
            .ok()
            .and_then(Opcode::from_byte)
            .ok_or(SimError::InvalidOpcode {
                value,
                addr: self.pc,
            })
    }

    /// Latches the 24-bit argument following the opcode at the program counter.
    ///
    /// `signed` selects sign extension (for `lit`).
    pub fn latch_argument(&mut self, signed: bool) -> Result<(), SimError> {
        let mut field = 0_u32;
        for offset in 1..=ARG_BYTES {
            let byte = self.memory.read((self.pc + offset) as i64)?;
            field = (field << 8) | (byte as u32 & 0xFF);
        }
        self.argument = if signed {
            sign_extend(field)
        } else {
            i64::from(field)
        };
        Ok(())
    }

    // ── ALU ─────────────────────────────────────────────────────────────

    /// Pops the operands of `op`, runs the ALU, and latches the result.
    ///
    /// Binary operations pop the top of stack as `b` and the cell below it as `a`.
    pub fn execute_alu(&mut self, op: AluOp) -> Result<(), SimError> {
        let (a, b) = if op.is_unary() {
            (self.pop()?, 0)
        } else {
            let b = self.pop()?;
            (self.pop()?, b)
        };
        let result = Alu::execute(op, a, b)?;
        self.alu = result.value;
        if let Some(carry) = result.carry {
            self.carry = carry;
        }
        Ok(())
    }

    // ── Memory and ports ────────────────────────────────────────────────

    /// Returns the memory.
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Reads memory at `addr` into the scratch register.
    pub fn memory_read(&mut self, addr: i64) -> Result<(), SimError> {
        self.a = self.memory.read(addr)?;
        Ok(())
    }

    /// Writes `value` to memory at `addr`.
    pub fn memory_write(&mut self, addr: i64, value: i64) -> Result<(), SimError> {
        self.memory.write(addr, value)
    }

    /// Returns the ports.
    pub const fn ports(&self) -> &Ports {
        &self.ports
    }

    /// Reads the latched port into the scratch register.
    pub fn port_read(&mut self) -> Result<(), SimError> {
        self.a = self.ports.read(self.argument)?;
        Ok(())
    }

    /// Writes `value` to the latched port.
    pub fn port_write(&mut self, value: i64) -> Result<(), SimError> {
        self.ports.write(self.argument, value)
    }
}
