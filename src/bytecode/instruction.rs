use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumString, IntoStaticStr};
use num_enum::{TryFromPrimitive, IntoPrimitive};

/// Every instruction field is at most 14 bits wide, so a decoded field always fits.
pub type Field = u32;

/// The position of one field within an encoded instruction. Bit ranges are inclusive.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct FieldLayout {
  pub name  : char,
  pub start : u32,
  pub end   : u32
}

impl FieldLayout {
  pub const fn new(name: char, start: u32, end: u32) -> FieldLayout {
    FieldLayout{ name, start, end }
  }

  pub fn width(&self) -> u32 {
    self.end - self.start + 1
  }
}

/// [A:7][B:7][C:7][D:14], bits 0-34.
pub const STORE_LAYOUT: [FieldLayout; 4] = [
  FieldLayout::new('A',  0,  6),
  FieldLayout::new('B',  7, 13),
  FieldLayout::new('C', 14, 20),
  FieldLayout::new('D', 21, 34),
];

/// [A:7][B:7][C:7][D:7][E:14], bits 0-41.
pub const SHIFT_LEFT_LAYOUT: [FieldLayout; 5] = [
  FieldLayout::new('A',  0,  6),
  FieldLayout::new('B',  7, 13),
  FieldLayout::new('C', 14, 20),
  FieldLayout::new('D', 21, 27),
  FieldLayout::new('E', 28, 41),
];

/**
  Opcodes of the virtual machine.

  The encoded form carries no usable opcode: an instruction is identified by its length in
  bytes alone. The discriminant of each variant is therefore that length, which lets the
  decoder turn a byte count straight into an `Operation` with `try_from`.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,          Eq, PartialEq,  Debug,            Hash
)]
#[repr(u8)]
pub enum Operation {
  #[strum(to_string = "store")]
  Store     = 5, // memory[ R[B] + D ] = R[C]
  #[strum(to_string = "shift")]
  ShiftLeft = 6, // memory[ R[C] ] = memory[ R[B] + E ] << R[D]
}

impl Operation {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// Length of the encoded instruction in bytes.
  pub fn byte_len(&self) -> usize {
    self.code() as usize
  }

  pub fn layout(&self) -> &'static [FieldLayout] {
    match self {
      Operation::Store     => &STORE_LAYOUT,
      Operation::ShiftLeft => &SHIFT_LEFT_LAYOUT,
    }
  }

  /// Number of fields, including the unused `A`.
  pub fn arity(&self) -> usize {
    self.layout().len()
  }
}

/**
  A decoded instruction.

  Field `A` travels through encoding and decoding untouched but execution never looks at
  it; dispatch is by encoded length only.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Instruction {
  /// `memory[R[b] + d] = R[c]`
  Store {
    a: Field,
    b: Field,
    c: Field,
    d: Field
  },
  /// `memory[R[c]] = (memory[R[b] + e] << R[d]) mod 2^32`
  ShiftLeft {
    a: Field,
    b: Field,
    c: Field,
    d: Field,
    e: Field
  },
}

impl Instruction {
  pub fn operation(&self) -> Operation {
    match self {
      Instruction::Store{..}     => Operation::Store,
      Instruction::ShiftLeft{..} => Operation::ShiftLeft,
    }
  }

  /// The fields in ascending bit order, matching `self.operation().layout()`.
  pub fn fields(&self) -> Vec<Field> {
    match *self {
      Instruction::Store{a, b, c, d}        => vec![a, b, c, d],
      Instruction::ShiftLeft{a, b, c, d, e} => vec![a, b, c, d, e],
    }
  }

  /// Builds an instruction from fields in layout order. Returns `None` on an arity mismatch.
  pub fn from_fields(operation: Operation, fields: &[Field]) -> Option<Instruction> {
    match (operation, fields) {
      (Operation::Store, &[a, b, c, d])        => Some(Instruction::Store{a, b, c, d}),
      (Operation::ShiftLeft, &[a, b, c, d, e]) => Some(Instruction::ShiftLeft{a, b, c, d, e}),
      _                                        => None
    }
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      Instruction::Store{a, b, c, d} => {
        write!(f, "{} {} {} {} {}", Operation::Store, a, b, c, d)
      }

      Instruction::ShiftLeft{a, b, c, d, e} => {
        write!(f, "{} {} {} {} {} {}", Operation::ShiftLeft, a, b, c, d, e)
      }

    }
  }
}
