//! Error types for decoding, execution, and the console.

use std::num::ParseIntError;

use thiserror::Error;

use crate::bytecode::Operation;

/// A byte sequence that is not an instruction.
#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum DecodeError {
  /// Only 5 byte (store) and 6 byte (shift) instructions exist.
  #[error("unknown instruction format: {0} bytes (expected 5 or 6)")]
  UnknownFormat(usize),
}

/// An instruction or a direct access touched a cell that does not exist. Nothing was written.
#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum ExecError {
  #[error("register index {0} out of range")]
  RegisterOutOfRange(u128),

  /// The address is the exact sum `R[B] + offset`, which may exceed 64 bits.
  #[error("memory address {0} out of range")]
  AddressOutOfRange(u128),
}

#[derive(Error, Debug)]
pub enum ConsoleError {
  #[error("unknown command `{0}`; type `help` for a list")]
  UnknownCommand(String),

  #[error("cannot parse `{0}`")]
  Syntax(String),

  #[error("usage: {0}")]
  Usage(&'static str),

  #[error("{operation} takes {expected} fields but was given {found}")]
  WrongArity {
    operation: Operation,
    expected: usize,
    found: usize
  },

  #[error("bad number `{0}`")]
  BadNumber(String, #[source] ParseIntError),

  #[error("bad hex byte `{0}`")]
  BadHex(String),

  #[error(transparent)]
  Decode(#[from] DecodeError),

  #[error(transparent)]
  Exec(#[from] ExecError),

  #[error(transparent)]
  Io(#[from] std::io::Error),
}

pub type ConsoleResult<T = ()> = Result<T, ConsoleError>;


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn messages(){
    assert_eq!(
      DecodeError::UnknownFormat(4).to_string(),
      "unknown instruction format: 4 bytes (expected 5 or 6)"
    );
    assert_eq!(ExecError::RegisterOutOfRange(300).to_string(), "register index 300 out of range");
    assert_eq!(ExecError::AddressOutOfRange(5000).to_string(), "memory address 5000 out of range");
  }

  #[test]
  fn console_wraps_core_errors(){
    let error: ConsoleError = ExecError::AddressOutOfRange(7000).into();
    assert_eq!(error.to_string(), "memory address 7000 out of range");

    let error = ConsoleError::WrongArity{ operation: Operation::Store, expected: 4, found: 2 };
    assert_eq!(error.to_string(), "store takes 4 fields but was given 2");
  }
}
