//! Microcoded Control Unit.
//!
//! This module sequences the datapath one micro-operation per tick. It coordinates:
//! 1. **Decode:** At an instruction boundary the opcode at the program counter is decoded,
//!    and its argument latched, within the tick of its first micro-operation.
//! 2. **Sequencing:** The opcode's microcode sequence is walked one step per tick.
//! 3. **Completion:** After the last step the program counter advances by the instruction
//!    width, unless the instruction set the counter itself (`jump`, `call`, `ret`, a taken
//!    `if`) or halted the machine.

/// Opcode to micro-operation table.
pub mod microcode;

use crate::common::SimError;
use crate::core::datapath::Datapath;
use crate::core::trace::{TraceRecord, TraceSink};
use crate::isa::{Opcode, Program};
use crate::stats::SimStats;

use self::microcode::MicroOp;

/// Engine driving the datapath.
///
/// Holds only transient execution state; all machine state lives in the `Datapath`.
#[derive(Debug)]
pub struct ControlUnit {
    datapath: Datapath,
    current: Option<Opcode>,
    step: usize,
    pc_written: bool,
    ticks: u64,
    halted: bool,
    /// Retired-instruction statistics.
    pub stats: SimStats,
}

impl ControlUnit {
    /// Creates a control unit over a fresh datapath of `memory_size` cells with `program`
    /// loaded and `input` queued on the primary input port.
    ///
    /// # Returns
    ///
    /// `ProgramTooLarge` if the program does not fit.
    pub fn new(program: &Program, input: &str, memory_size: usize) -> Result<Self, SimError> {
        let mut datapath = Datapath::new(memory_size);
        datapath.load(program, input)?;
        Ok(Self::with_datapath(datapath))
    }

    /// Wraps an already loaded datapath.
    pub fn with_datapath(datapath: Datapath) -> Self {
        Self {
            datapath,
            current: None,
            step: 0,
            pc_written: false,
            ticks: 0,
            halted: false,
            stats: SimStats::default(),
        }
    }

    /// Returns the datapath.
    pub const fn datapath(&self) -> &Datapath {
        &self.datapath
    }

    /// Returns the number of ticks executed.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns true once `halt` has executed.
    pub const fn halted(&self) -> bool {
        self.halted
    }

    /// Returns true between instructions.
    pub const fn at_boundary(&self) -> bool {
        self.current.is_none()
    }

    /// Executes one micro-operation.
    ///
    /// Does nothing once halted.
    ///
    /// # Arguments
    ///
    /// * `sink` - Receives one record describing the state after the micro-operation.
    ///
    /// # Returns
    ///
    /// The opcode retired by this tick, if the tick completed an instruction, or a fatal
    /// `SimError`.
    pub fn tick(&mut self, sink: &mut dyn TraceSink) -> Result<Option<Opcode>, SimError> {
        if self.halted {
            return Ok(None);
        }

        let opcode = match self.current {
            Some(op) => op,
            None => {
                let op = self.datapath.fetch_opcode()?;
                if op.has_argument() {
                    self.datapath.latch_argument(op.has_signed_argument())?;
                }
                self.current = Some(op);
                self.step = 0;
                self.pc_written = false;
                op
            }
        };

        let sequence = microcode::sequence(opcode);
        let micro_op = sequence[self.step];
        self.execute(opcode, micro_op)?;
        self.ticks += 1;
        self.stats.ticks = self.ticks;

        let step = self.step;
        self.step += 1;
        let retired = self.step == sequence.len();
        if retired {
            self.complete(opcode);
        }

        if sink.enabled() {
            sink.record(&TraceRecord::capture(
                self.ticks,
                opcode,
                step,
                micro_op,
                &self.datapath,
            ));
        }

        Ok(retired.then_some(opcode))
    }

    fn complete(&mut self, opcode: Opcode) {
        self.stats.retire(opcode, self.pc_written);
        self.stats.input_underflows = self.datapath.ports().input_underflows();
        if !self.pc_written && !opcode.writes_pc() {
            let next = self.datapath.pc() + opcode.width();
            self.datapath.set_pc(next);
        }
        self.current = None;
    }

    fn execute(&mut self, opcode: Opcode, micro_op: MicroOp) -> Result<(), SimError> {
        let dp = &mut self.datapath;
        match micro_op {
            MicroOp::Drop => {
                let _ = dp.pop()?;
            }
            MicroOp::StackToA => {
                let value = dp.pop()?;
                dp.set_a(value);
            }
            MicroOp::AToStack => dp.push(dp.a()),
            MicroOp::AToReturn => dp.push_return(dp.a()),
            MicroOp::ReturnToStack => {
                let value = dp.pop_return()?;
                dp.push(value);
            }
            MicroOp::Alu(op) => dp.execute_alu(op)?,
            MicroOp::AluToStack => dp.push(dp.alu()),
            MicroOp::StackToAlu => {
                let value = dp.pop()?;
                dp.set_alu(value);
            }
            MicroOp::ArgumentToA => dp.set_a(dp.argument()),
            MicroOp::BranchIfZero => {
                if dp.alu() == 0 {
                    dp.set_pc_from(dp.argument())?;
                    self.pc_written = true;
                }
            }
            MicroOp::JumpToArgument => {
                dp.set_pc_from(dp.argument())?;
                self.pc_written = true;
            }
            MicroOp::PushReturnAddress => {
                let ret = dp.pc() + opcode.width();
                dp.push_return(ret as i64);
            }
            MicroOp::ReturnToPc => {
                let target = dp.pop_return()?;
                dp.set_pc_from(target)?;
                self.pc_written = true;
            }
            MicroOp::MemoryWrite => {
                let value = dp.pop()?;
                let addr = dp.pop()?;
                dp.memory_write(addr, value)?;
            }
            MicroOp::MemoryRead => {
                let addr = dp.pop()?;
                dp.memory_read(addr)?;
            }
            MicroOp::PortRead => dp.port_read()?,
            MicroOp::PortWrite => {
                let value = dp.pop()?;
                dp.port_write(value)?;
            }
            MicroOp::CarryToStack => dp.push(i64::from(dp.carry())),
            MicroOp::Halt => self.halted = true,
        }
        Ok(())
    }
}
