//! Control Unit Sequencing Tests.
//!
//! Observes the control unit one tick at a time through trace records: micro-operation
//! order, program counter updates at instruction boundaries, and per-opcode tick costs.

use pretty_assertions::assert_eq;
use rstest::rstest;
use stackcpu_core::core::ControlUnit;
use stackcpu_core::core::control::microcode::{MicroOp, sequence};
use stackcpu_core::core::trace::{CollectingSink, NullSink};
use stackcpu_core::core::units::alu::AluOp;
use stackcpu_core::isa::Opcode;

use crate::common::harness::TestContext;

#[test]
fn hello_trace() {
    let ctx = TestContext::new();
    let (outcome, records) = ctx.trace("lit 72 out 2 halt", "");
    assert_eq!(outcome.ticks, 4);

    let ops: Vec<MicroOp> = records.iter().map(|r| r.micro_op).collect();
    assert_eq!(
        ops,
        vec![
            MicroOp::ArgumentToA,
            MicroOp::AToStack,
            MicroOp::PortWrite,
            MicroOp::Halt,
        ]
    );
    let steps: Vec<usize> = records.iter().map(|r| r.step).collect();
    assert_eq!(steps, vec![0, 1, 0, 0]);
    let pcs: Vec<usize> = records.iter().map(|r| r.pc).collect();
    assert_eq!(pcs, vec![0, 4, 8, 8]);
    let ticks: Vec<u64> = records.iter().map(|r| r.tick).collect();
    assert_eq!(ticks, vec![1, 2, 3, 4]);

    assert_eq!(records[0].a, 72);
    assert_eq!(records[1].tos, Some(72));
    assert_eq!(records[2].depth, 0);
    assert_eq!(records[2].output_len, 1);
}

#[test]
fn call_and_return_trace() {
    let ctx = TestContext::new();
    let (outcome, records) = ctx.trace("start: call greet halt : greet lit 72 out 2 ret", "");
    assert_eq!(outcome.output, "H");
    assert_eq!(outcome.ticks, 7);

    let call: Vec<_> = records.iter().filter(|r| r.opcode == Opcode::Call).collect();
    assert_eq!(call.len(), 2);
    assert_eq!(call[0].return_depth, 1);
    assert_eq!(call[1].pc, 5);

    let ret = records.iter().find(|r| r.opcode == Opcode::Ret).unwrap();
    assert_eq!(ret.pc, 4);
    assert_eq!(ret.return_depth, 0);
}

#[test]
fn taken_branch_leaves_counter_at_target() {
    let ctx = TestContext::new();
    let (_, records) = ctx.trace("lit 0 if end lit 1 end: halt", "");
    let branch = records
        .iter()
        .find(|r| r.micro_op == MicroOp::BranchIfZero)
        .unwrap();
    assert_eq!(branch.pc, 12);
}

#[test]
fn untaken_branch_falls_through() {
    let ctx = TestContext::new();
    let (outcome, records) = ctx.trace("lit 5 if end lit 1 out 2 end: halt", "");
    assert_eq!(outcome.output, "1");
    let branch = records
        .iter()
        .find(|r| r.micro_op == MicroOp::BranchIfZero)
        .unwrap();
    assert_eq!(branch.pc, 8);
    assert_eq!(outcome.stats.branches_not_taken, 1);
}

#[test]
fn swap_sequence() {
    let ctx = TestContext::new();
    let (outcome, records) = ctx.trace("lit 1 lit 2 swap - out 2 halt", "");
    assert_eq!(outcome.output, "1");
    assert_eq!(outcome.ticks, 13);

    let swap: Vec<_> = records.iter().filter(|r| r.opcode == Opcode::Swap).collect();
    assert_eq!(swap.len(), 5);
    assert_eq!((swap[0].a, swap[1].return_depth), (2, 1));
    assert_eq!((swap[2].a, swap[2].depth), (1, 0));
    assert_eq!((swap[4].tos, swap[4].second), (Some(1), Some(2)));
}

#[test]
fn alu_latch_and_carry_are_traced() {
    let ctx = TestContext::new();
    let (_, records) = ctx.trace(
        "lit 2147483647 variable big lit big @ lit 1 + c out 2 out 2 halt",
        "",
    );
    let add = records
        .iter()
        .find(|r| r.micro_op == MicroOp::Alu(AluOp::Add))
        .unwrap();
    assert_eq!(add.alu, 0);
    assert!(add.carry);
}

#[rstest]
#[case(Opcode::Drop, 1)]
#[case(Opcode::Dup, 3)]
#[case(Opcode::Swap, 5)]
#[case(Opcode::Add, 2)]
#[case(Opcode::Invert, 2)]
#[case(Opcode::If, 2)]
#[case(Opcode::Store, 1)]
#[case(Opcode::Fetch, 2)]
#[case(Opcode::In, 2)]
#[case(Opcode::Out, 1)]
#[case(Opcode::Lit, 2)]
#[case(Opcode::Jump, 1)]
#[case(Opcode::Call, 2)]
#[case(Opcode::Ret, 1)]
#[case(Opcode::Carry, 1)]
#[case(Opcode::Halt, 1)]
fn tick_cost(#[case] opcode: Opcode, #[case] ticks: usize) {
    assert_eq!(sequence(opcode).len(), ticks);
}

#[test]
fn ticks_equal_micro_operations() {
    let ctx = TestContext::new();
    let source = "lit 3 loop: dup out 2 lit 1 - dup if end jump loop end: halt";
    let (outcome, records) = ctx.trace(source, "");
    assert_eq!(outcome.output, "321");
    assert_eq!(outcome.ticks, 44);
    assert_eq!(records.len(), 44);
}

#[test]
fn stepping_the_control_unit() {
    let ctx = TestContext::new();
    let program = ctx.assemble("lit 65 out 2 halt");
    let mut control = ControlUnit::new(&program, "", 64).unwrap();
    let mut sink = NullSink;

    assert!(control.at_boundary());
    assert_eq!(control.tick(&mut sink), Ok(None));
    assert!(!control.at_boundary());
    assert_eq!(control.tick(&mut sink), Ok(Some(Opcode::Lit)));
    assert_eq!(control.datapath().stack(), &[65]);
    assert_eq!(control.tick(&mut sink), Ok(Some(Opcode::Out)));
    assert_eq!(control.tick(&mut sink), Ok(Some(Opcode::Halt)));
    assert!(control.halted());
    assert_eq!(control.tick(&mut sink), Ok(None));
    assert_eq!(control.ticks(), 4);
    assert_eq!(control.stats.instructions_retired, 3);
}

#[test]
fn collecting_sink_sees_every_tick() {
    let ctx = TestContext::new();
    let program = ctx.assemble("dup");
    let mut control = ControlUnit::new(&program, "", 64).unwrap();
    let mut sink = CollectingSink::default();
    assert!(control.tick(&mut sink).is_err());
    assert!(sink.records.is_empty());
}
