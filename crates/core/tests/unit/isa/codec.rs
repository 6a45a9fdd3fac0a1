//! Binary Image Codec Unit Tests.
//!
//! Verifies the header, instruction, and data cell encodings, the decoder's error
//! reporting, and the encode/decode round trip.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use stackcpu_core::common::constants::{ADDRESS_LIMIT, LIT_MAX, LIT_MIN};
use stackcpu_core::isa::{Instruction, Opcode, Program, decode, encode};
use stackcpu_core::{EncodeError, assemble};

const HEADER: [u8; 8] = [0; 8];

fn image(body: &[u8]) -> Vec<u8> {
    let mut bytes = HEADER.to_vec();
    bytes.extend_from_slice(body);
    bytes
}

// ══════════════════════════════════════════════════════════
// 1. Encoding
// ══════════════════════════════════════════════════════════

#[test]
fn encode_hello() {
    let program = assemble("lit 72 out 2 halt").unwrap();
    assert_eq!(
        encode(&program).unwrap(),
        image(&[0x16, 0, 0, 0x48, 0x17, 0, 0, 2, 0x15])
    );
}

#[test]
fn encode_entry_point_big_endian() {
    let program = Program {
        entry: 0x01_0203,
        instructions: vec![Instruction::new(Opcode::Halt)],
        data: Vec::new(),
    };
    assert_eq!(
        encode(&program).unwrap(),
        vec![0, 0, 0, 0, 0x00, 0x01, 0x02, 0x03, 0x15]
    );
}

#[test]
fn encode_negative_literal_as_24_bit_twos_complement() {
    let program = assemble("lit -1 halt").unwrap();
    assert_eq!(encode(&program).unwrap(), image(&[0x16, 0xFF, 0xFF, 0xFF, 0x15]));
}

#[test]
fn encode_data_word_and_wide_cell() {
    let program = Program {
        entry: 0,
        instructions: vec![Instruction::new(Opcode::Halt)],
        data: vec![5, -2, 0x1_0000_0000],
    };
    assert_eq!(
        encode(&program).unwrap(),
        image(&[
            0x15, //
            0x00, 0, 0, 0, 5, //
            0x00, 0xFF, 0xFF, 0xFF, 0xFE, //
            0xFF, 0, 0, 0, 1, 0, 0, 0, 0,
        ])
    );
}

#[test]
fn encode_overflow_rejected() {
    let program = Program::new(vec![Instruction::with_arg(Opcode::Lit, LIT_MAX + 1)]);
    assert_eq!(
        encode(&program),
        Err(EncodeError::EncodeOverflow {
            mnemonic: "lit",
            value: LIT_MAX + 1
        })
    );

    let program = Program::new(vec![Instruction::with_arg(Opcode::Jump, -1)]);
    assert_eq!(
        encode(&program),
        Err(EncodeError::EncodeOverflow {
            mnemonic: "jump",
            value: -1
        })
    );
}

#[test]
fn encode_argument_mismatch_rejected() {
    let program = Program::new(vec![Instruction::new(Opcode::Call)]);
    assert_eq!(
        encode(&program),
        Err(EncodeError::ArgumentMismatch { mnemonic: "call" })
    );

    let program = Program::new(vec![Instruction::with_arg(Opcode::Drop, 3)]);
    assert_eq!(
        encode(&program),
        Err(EncodeError::ArgumentMismatch { mnemonic: "drop" })
    );
}

// ══════════════════════════════════════════════════════════
// 2. Decoding
// ══════════════════════════════════════════════════════════

#[test]
fn decode_sign_extends_only_lit() {
    let program = decode(&image(&[0x16, 0xFF, 0xFF, 0xFE, 0x18, 0xFF, 0xFF, 0xFE, 0x15])).unwrap();
    assert_eq!(
        program.keys(),
        vec![
            (Opcode::Lit, Some(-2)),
            (Opcode::Jump, Some(0xFF_FFFE)),
            (Opcode::Halt, None)
        ]
    );
}

#[test]
fn decode_data_after_halt() {
    let program = decode(&image(&[0x15, 0x00, 0, 0, 0, 7, 0xFF, 0x80, 0, 0, 0, 0, 0, 0, 0])).unwrap();
    assert_eq!(program.keys(), vec![(Opcode::Halt, None)]);
    assert_eq!(program.data, vec![7, i64::MIN]);
}

#[test]
fn decode_code_after_halt_is_still_code() {
    let program = decode(&image(&[0x15, 0x1A])).unwrap();
    assert_eq!(program.keys(), vec![(Opcode::Halt, None), (Opcode::Ret, None)]);
    assert!(program.data.is_empty());
}

#[test]
fn decode_short_header() {
    assert!(matches!(
        decode(&[0; 7]),
        Err(EncodeError::MalformedHeader(_))
    ));
}

#[test]
fn decode_nonzero_reserved_word() {
    assert!(matches!(
        decode(&[0, 0, 0, 1, 0, 0, 0, 0]),
        Err(EncodeError::MalformedHeader(_))
    ));
}

#[test]
fn decode_unknown_opcode() {
    assert_eq!(
        decode(&image(&[0x42])),
        Err(EncodeError::InvalidOpcode {
            byte: 0x42,
            offset: 8
        })
    );
}

#[test]
fn decode_data_tag_before_halt_is_invalid() {
    assert_eq!(
        decode(&image(&[0x00, 0, 0, 0, 1])),
        Err(EncodeError::InvalidOpcode { byte: 0, offset: 8 })
    );
}

#[test]
fn decode_code_after_data_is_invalid() {
    assert_eq!(
        decode(&image(&[0x15, 0x00, 0, 0, 0, 1, 0x01])),
        Err(EncodeError::InvalidOpcode {
            byte: 0x01,
            offset: 14
        })
    );
}

#[test]
fn decode_truncated_argument() {
    assert_eq!(
        decode(&image(&[0x16, 0, 0])),
        Err(EncodeError::TruncatedArgument {
            mnemonic: "lit",
            offset: 8
        })
    );
}

#[test]
fn decode_truncated_data_cell() {
    assert_eq!(
        decode(&image(&[0x15, 0x00, 0, 0])),
        Err(EncodeError::TruncatedArgument {
            mnemonic: "data",
            offset: 9
        })
    );
}

#[test]
fn decode_reads_entry_point() {
    let program = decode(&[0, 0, 0, 0, 0, 0, 0, 9, 0x15]).unwrap();
    assert_eq!(program.entry, 9);
}

// ══════════════════════════════════════════════════════════
// 3. Round trip
// ══════════════════════════════════════════════════════════

#[test]
fn assembled_program_round_trips() {
    let source = "
        lit 2147483647 variable big
        lit -3 variable small
        start: lit big @ lit small @ + out 2
        call f halt
        : f lit 1 negate out 3 ret
    ";
    let program = assemble(source).unwrap();
    let decoded = decode(&encode(&program).unwrap()).unwrap();
    assert_eq!(decoded.keys(), program.keys());
    assert_eq!(decoded.data, program.data);
    assert_eq!(decoded.entry, program.entry);
}

fn arb_instruction() -> impl Strategy<Value = Instruction> {
    prop::sample::select(Opcode::ALL.to_vec()).prop_flat_map(|op| {
        let arg: BoxedStrategy<Option<i64>> = if op.has_signed_argument() {
            (LIT_MIN..=LIT_MAX).prop_map(Some).boxed()
        } else if op.has_argument() {
            (0..ADDRESS_LIMIT).prop_map(Some).boxed()
        } else {
            Just(None).boxed()
        };
        arg.prop_map(move |arg| Instruction {
            opcode: op,
            arg,
            pos: None,
        })
    })
}

fn arb_program() -> impl Strategy<Value = Program> {
    (
        prop::collection::vec(arb_instruction(), 0..40),
        prop::collection::vec(any::<i64>(), 0..8),
        0usize..(1 << 24),
    )
        .prop_map(|(mut instructions, data, entry)| {
            instructions.push(Instruction::new(Opcode::Halt));
            Program {
                entry,
                instructions,
                data,
            }
        })
}

proptest! {
    #[test]
    fn decode_inverts_encode(program in arb_program()) {
        let bytes = encode(&program).unwrap();
        let decoded = decode(&bytes).unwrap();
        prop_assert_eq!(decoded.keys(), program.keys());
        prop_assert_eq!(&decoded.data, &program.data);
        prop_assert_eq!(decoded.entry, program.entry);
        prop_assert_eq!(decoded.code_len(), program.code_len());
    }
}
