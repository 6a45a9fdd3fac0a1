//! Property-Based Simulation Tests.
//!
//! Checks laws that hold for every input: runs are deterministic, the echo program copies
//! printable input verbatim with a fixed per-character cost, and a halted run's tick count
//! equals the number of traced micro-operations.

use proptest::prelude::*;
use stackcpu_core::{Config, Termination, assemble, simulate};

use crate::common::harness::TestContext;

const ECHO: &str = "loop: in 0 dup if end out 2 jump loop end: halt";

const SUM: &str = "
    lit 0 variable total
    loop:
        in 0 dup if end
        lit total @ + lit total swap !
        jump loop
    end:
        lit total @ out 2
";

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn echo_copies_printable_input(input in "[ -}]{0,40}") {
        let program = assemble(ECHO).unwrap();
        let outcome = simulate(&program, &input, &Config::default()).unwrap();
        prop_assert_eq!(&outcome.output, &input);
        prop_assert_eq!(outcome.ticks, 9 * input.len() as u64 + 8);
    }

    #[test]
    fn runs_are_deterministic(input in "[a-z0-9]{0,20}") {
        let program = assemble(SUM).unwrap();
        let config = Config::default();
        let first = simulate(&program, &input, &config).unwrap();
        let second = simulate(&program, &input, &config).unwrap();
        prop_assert_eq!(&first.output, &second.output);
        prop_assert_eq!(first.ticks, second.ticks);
        prop_assert_eq!(first.termination, Termination::Halted);

        let expected: i64 = input.bytes().map(i64::from).sum();
        prop_assert_eq!(first.output, stackcpu_core::core::datapath::ports::render_output(expected));
    }

    #[test]
    fn ticks_match_trace_length(input in "[A-Z]{0,10}") {
        let (outcome, records) = TestContext::new().trace(ECHO, &input);
        prop_assert_eq!(outcome.ticks, records.len() as u64);
        prop_assert!(records.windows(2).all(|w| w[1].tick == w[0].tick + 1));
    }
}
