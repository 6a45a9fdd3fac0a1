//! Assembly Error Unit Tests.
//!
//! Every assembly failure aborts translation and carries the position of the offending
//! term.

use pretty_assertions::assert_eq;
use rstest::rstest;
use stackcpu_core::isa::SourcePos;
use stackcpu_core::{AsmError, EncodeError, assemble};

fn at(line: usize, column: usize) -> SourcePos {
    SourcePos::new(line, column)
}

#[test]
fn undefined_label() {
    assert_eq!(
        assemble("jump nowhere"),
        Err(AsmError::UndefinedLabel {
            name: "nowhere".into(),
            pos: at(1, 6)
        })
    );
}

#[test]
fn duplicate_label() {
    assert_eq!(
        assemble("a: a: halt"),
        Err(AsmError::DuplicateLabel {
            name: "a".into(),
            pos: at(1, 4)
        })
    );
}

#[test]
fn label_clashing_with_variable() {
    assert_eq!(
        assemble("lit 1 variable x x: halt"),
        Err(AsmError::DuplicateLabel {
            name: "x".into(),
            pos: at(1, 18)
        })
    );
    assert!(matches!(
        assemble("x: lit 1 variable x halt"),
        Err(AsmError::DuplicateLabel { .. })
    ));
    assert!(matches!(
        assemble("lit 1 variable x lit 2 variable x halt"),
        Err(AsmError::DuplicateLabel { .. })
    ));
}

#[rstest]
#[case("lit", "lit", at(1, 1))]
#[case("halt jump", "jump", at(1, 6))]
#[case("jump end: halt", "jump", at(1, 1))]
#[case("call : f ret", "call", at(1, 1))]
#[case("halt :", ":", at(1, 6))]
#[case("lit 1 variable", "variable", at(1, 7))]
fn missing_argument(#[case] source: &str, #[case] mnemonic: &str, #[case] pos: SourcePos) {
    assert_eq!(
        assemble(source),
        Err(AsmError::MissingArgument {
            mnemonic: mnemonic.into(),
            pos
        })
    );
}

#[rstest]
#[case("lit 12ab", "12ab", at(1, 5))]
#[case("in foo", "foo", at(1, 4))]
#[case("lit 1 out port", "port", at(1, 11))]
#[case("jump 0xZZ", "0xZZ", at(1, 6))]
fn malformed_literal(#[case] source: &str, #[case] text: &str, #[case] pos: SourcePos) {
    assert_eq!(
        assemble(source),
        Err(AsmError::MalformedLiteral {
            text: text.into(),
            pos
        })
    );
}

#[test]
fn unknown_mnemonic() {
    assert_eq!(
        assemble("lit 1\nfrobnicate"),
        Err(AsmError::UnknownMnemonic {
            text: "frobnicate".into(),
            pos: at(2, 1)
        })
    );
}

#[test]
fn variable_without_literal() {
    assert_eq!(
        assemble("dup variable x"),
        Err(AsmError::VariableWithoutLiteral {
            name: "x".into(),
            pos: at(1, 5)
        })
    );
    assert!(matches!(
        assemble("lit y variable x"),
        Err(AsmError::VariableWithoutLiteral { .. })
    ));
    assert!(matches!(
        assemble("variable x"),
        Err(AsmError::VariableWithoutLiteral { .. })
    ));
}

#[rstest]
#[case("jump -1", "jump", -1)]
#[case("call 16777216", "call", 16_777_216)]
fn argument_out_of_range(#[case] source: &str, #[case] mnemonic: &'static str, #[case] value: i64) {
    assert_eq!(
        assemble(source),
        Err(AsmError::Encode {
            source: EncodeError::EncodeOverflow { mnemonic, value },
            pos: at(1, 1)
        })
    );
}

#[test]
fn literal_bounds_accepted() {
    assert!(assemble("lit 8388607 lit -8388608 jump 16777215").is_ok());
}

#[test]
fn error_message_leads_with_position() {
    let err = assemble("\n   jump nowhere").unwrap_err();
    assert_eq!(err.pos(), at(2, 9));
    assert_eq!(err.to_string(), "2:9: undefined label `nowhere`");
}
