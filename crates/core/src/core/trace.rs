//! Per-tick diagnostic records.
//!
//! The control unit emits one `TraceRecord` per micro-operation to a `TraceSink`. The
//! default `LogSink` forwards records to `tracing` at debug level; `CollectingSink` keeps
//! them in memory for inspection.

use serde::Serialize;
use tracing::{Level, debug};

use crate::common::constants::{PRIMARY_INPUT_PORT, PRIMARY_OUTPUT_PORT};
use crate::core::control::microcode::MicroOp;
use crate::core::datapath::Datapath;
use crate::isa::Opcode;

/// Machine state after one micro-operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TraceRecord {
    /// Tick count after this micro-operation.
    pub tick: u64,
    /// Program counter after this micro-operation.
    pub pc: usize,
    /// Instruction being executed.
    pub opcode: Opcode,
    /// Index of the micro-operation within the instruction's sequence.
    pub step: usize,
    /// The micro-operation executed.
    pub micro_op: MicroOp,
    /// Top of stack.
    pub tos: Option<i64>,
    /// Cell below the top of stack.
    pub second: Option<i64>,
    /// Operand stack depth.
    pub depth: usize,
    /// Return stack depth.
    pub return_depth: usize,
    /// Scratch register.
    pub a: i64,
    /// ALU latch.
    pub alu: i64,
    /// Carry flag.
    pub carry: bool,
    /// Characters left on the primary input port.
    pub input_pending: usize,
    /// Elements written to the primary output port.
    pub output_len: usize,
}

impl TraceRecord {
    /// Captures the datapath state.
    pub fn capture(
        tick: u64,
        opcode: Opcode,
        step: usize,
        micro_op: MicroOp,
        datapath: &Datapath,
    ) -> Self {
        Self {
            tick,
            pc: datapath.pc(),
            opcode,
            step,
            micro_op,
            tos: datapath.peek(0),
            second: datapath.peek(1),
            depth: datapath.stack().len(),
            return_depth: datapath.return_stack().len(),
            a: datapath.a(),
            alu: datapath.alu(),
            carry: datapath.carry(),
            input_pending: datapath.ports().pending_input(PRIMARY_INPUT_PORT),
            output_len: datapath.ports().output_len(PRIMARY_OUTPUT_PORT),
        }
    }
}

/// Receiver of per-tick records.
pub trait TraceSink {
    /// Returns false when records should not be built at all.
    fn enabled(&self) -> bool {
        true
    }

    /// Consumes one record.
    fn record(&mut self, record: &TraceRecord);
}

/// Discards every record.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn enabled(&self) -> bool {
        false
    }

    fn record(&mut self, _record: &TraceRecord) {}
}

/// Emits each record as a `tracing` debug event.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl LogSink {
    /// Returns true if the active subscriber keeps debug records from this module.
    pub fn wanted() -> bool {
        tracing::enabled!(Level::DEBUG)
    }
}

impl TraceSink for LogSink {
    fn record(&mut self, r: &TraceRecord) {
        debug!(
            tick = r.tick,
            pc = r.pc,
            opcode = %r.opcode,
            step = r.step,
            micro_op = %r.micro_op,
            tos = ?r.tos,
            second = ?r.second,
            depth = r.depth,
            return_depth = r.return_depth,
            a = r.a,
            alu = r.alu,
            carry = r.carry,
            input_pending = r.input_pending,
            output_len = r.output_len,
            "tick"
        );
    }
}

/// Stores every record.
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    /// Records in tick order.
    pub records: Vec<TraceRecord>,
}

impl TraceSink for CollectingSink {
    fn record(&mut self, record: &TraceRecord) {
        self.records.push(record.clone());
    }
}
