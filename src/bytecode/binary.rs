/*!
  This module is responsible for the encoding and decoding of binary instructions.

  An encoded instruction is a little-endian unsigned integer of 5 or 6 bytes. Fields are
  packed from bit 0 upward in the order given by `Operation::layout()`.
*/
use std::convert::TryFrom;

use super::{Field, Instruction, Operation};
use crate::bitfield::{extract, insert, Bits};
use crate::error::DecodeError;

/// Bytes of the widest instruction that fit in the accumulator.
const ACCUMULATOR_BYTES: usize = std::mem::size_of::<Bits>();

/// Reads `bytes` as a little-endian unsigned integer. Requires `bytes.len() <= 8`.
fn from_le_bytes(bytes: &[u8]) -> Bits {
  let mut buffer = [0u8; ACCUMULATOR_BYTES];
  buffer[..bytes.len()].copy_from_slice(bytes);
  Bits::from_le_bytes(buffer)
}

/// Determines the operation from the length of an encoded instruction.
pub fn operation_for_length(length: usize) -> Result<Operation, DecodeError> {
  u8::try_from(length)
    .ok()
    .and_then(|code| Operation::try_from(code).ok())
    .ok_or(DecodeError::UnknownFormat(length))
}

/**
  Decodes an instruction. The length of `bytes` alone selects the operation. Field values are
  returned as found; nothing is range checked here.
*/
pub fn decode(bytes: &[u8]) -> Result<Instruction, DecodeError> {
  let operation = operation_for_length(bytes.len())?;
  let value     = from_le_bytes(bytes);

  let fields: Vec<Field> =
    operation.layout()
             .iter()
             .map(|field| extract(value, field.start, field.end) as Field)
             .collect();

  // The layout always has exactly `operation.arity()` entries.
  Instruction::from_fields(operation, &fields).ok_or(DecodeError::UnknownFormat(bytes.len()))
}

/**
  Encodes the instruction into its fixed-length byte form. Fields wider than their slot are
  truncated to the slot width, so encoding never fails.
*/
pub fn encode_instruction(instruction: &Instruction) -> Vec<u8> {
  let operation = instruction.operation();

  let value =
    operation.layout()
             .iter()
             .zip(instruction.fields())
             .fold(0, |acc, (field, value)| insert(acc, value as Bits, field.start, field.end));

  value.to_le_bytes()[..operation.byte_len()].to_vec()
}

pub fn encode_store(a: Field, b: Field, c: Field, d: Field) -> [u8; 5] {
  let mut out = [0u8; 5];
  out.copy_from_slice(&encode_instruction(&Instruction::Store{a, b, c, d}));
  out
}

pub fn encode_shift_left(a: Field, b: Field, c: Field, d: Field, e: Field) -> [u8; 6] {
  let mut out = [0u8; 6];
  out.copy_from_slice(&encode_instruction(&Instruction::ShiftLeft{a, b, c, d, e}));
  out
}


#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  #[test]
  fn store_reference_bytes(){
    assert_eq!(encode_store(126, 97, 112, 165), [0xFE, 0x30, 0xBC, 0x14, 0x00]);
  }

  #[test]
  fn shift_left_reference_bytes(){
    assert_eq!(encode_shift_left(51, 38, 41, 57, 843), [0x33, 0x53, 0x2A, 0xB7, 0x34, 0x00]);
  }

  #[test]
  fn decode_reference_bytes(){
    assert_eq!(
      decode(&[0xFE, 0x30, 0xBC, 0x14, 0x00]),
      Ok(Instruction::Store{a: 126, b: 97, c: 112, d: 165})
    );
    assert_eq!(
      decode(&[0x33, 0x53, 0x2A, 0xB7, 0x34, 0x00]),
      Ok(Instruction::ShiftLeft{a: 51, b: 38, c: 41, d: 57, e: 843})
    );
  }

  #[test]
  fn round_trip_at_field_limits(){
    let store = Instruction::Store{a: 0x7F, b: 0, c: 0x7F, d: 0x3FFF};
    assert_eq!(decode(&encode_instruction(&store)), Ok(store));

    let shift = Instruction::ShiftLeft{a: 0, b: 0x7F, c: 1, d: 0x7F, e: 0x3FFF};
    assert_eq!(decode(&encode_instruction(&shift)), Ok(shift));
  }

  #[test]
  fn wide_fields_are_truncated(){
    let bytes = encode_store(128 + 5, 0x7F + 1, 300, 0x4000 + 9);
    assert_eq!(decode(&bytes), Ok(Instruction::Store{a: 5, b: 0, c: 300 % 128, d: 9}));

    let bytes = encode_shift_left(1, 2, 3, 200, 20000);
    assert_eq!(
      decode(&bytes),
      Ok(Instruction::ShiftLeft{a: 1, b: 2, c: 3, d: 200 % 128, e: 20000 % 16384})
    );
  }

  #[test]
  fn truncated_field_does_not_spill(){
    // An oversized `C` must leave `D` untouched.
    let bytes = encode_store(0, 0, Field::MAX, 0);
    assert_eq!(decode(&bytes), Ok(Instruction::Store{a: 0, b: 0, c: 0x7F, d: 0}));
  }

  #[test]
  fn unknown_lengths_are_rejected(){
    for length in &[0usize, 1, 4, 7, 8, 256, 261] {
      let bytes = vec![0u8; *length];
      assert_eq!(decode(&bytes), Err(DecodeError::UnknownFormat(*length)));
    }
  }

  #[test]
  fn upper_padding_bits_are_ignored(){
    // Bits 35-39 of a store are not part of any field.
    let store = decode(&[0, 0, 0, 0, 0xF8]).unwrap();
    assert_eq!(store, Instruction::Store{a: 0, b: 0, c: 0, d: 0});
  }

  // Fields come back reduced modulo 2^width, whatever was passed in.
  proptest! {
    #[test]
    fn store_round_trips_modulo_width(a in any::<Field>(), b in any::<Field>(), c in any::<Field>(), d in any::<Field>()) {
      let bytes = encode_store(a, b, c, d);
      prop_assert_eq!(
        decode(&bytes),
        Ok(Instruction::Store{a: a % (1 << 7), b: b % (1 << 7), c: c % (1 << 7), d: d % (1 << 14)})
      );
    }

    #[test]
    fn shift_left_round_trips_modulo_width(
      a in any::<Field>(), b in any::<Field>(), c in any::<Field>(), d in any::<Field>(), e in any::<Field>()
    ) {
      let bytes = encode_shift_left(a, b, c, d, e);
      prop_assert_eq!(
        decode(&bytes),
        Ok(Instruction::ShiftLeft{
          a: a % (1 << 7),
          b: b % (1 << 7),
          c: c % (1 << 7),
          d: d % (1 << 7),
          e: e % (1 << 14)
        })
      );
    }

    #[test]
    fn in_range_fields_round_trip_exactly(a in 0..(1 << 7) as Field, b in 0..(1 << 7) as Field, d in 0..(1 << 14) as Field) {
      let store = Instruction::Store{a, b, c: a ^ b, d};
      prop_assert_eq!(decode(&encode_instruction(&store)), Ok(store));
    }

    #[test]
    fn other_lengths_are_rejected(length in 0usize..1024, fill in any::<u8>()) {
      prop_assume!(length != 5 && length != 6);
      prop_assert_eq!(decode(&vec![fill; length]), Err(DecodeError::UnknownFormat(length)));
    }
  }
}
