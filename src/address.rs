//! An `Either` type that holds the address of either a register or a memory cell, with the
//! bounds checks that turn it into an index.

use std::fmt::{Display, Formatter};

use crate::error::ExecError;
use crate::machine::{Word, MEMORY_SIZE, REGISTER_COUNT};

// Wider than a register value, so a register value plus an offset never overflows.
pub type AddressNumberType = u128;

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum Address {
  /// An index into the register file.
  Register(AddressNumberType),
  /// An index into memory.
  Memory(AddressNumberType)
}

impl Address {
  pub fn register(index: usize) -> Address {
    Address::Register(index as AddressNumberType)
  }

  pub fn memory(address: usize) -> Address {
    Address::Memory(address as AddressNumberType)
  }

  /// `base + offset` in memory, computed without wrapping.
  pub fn offset_memory(base: Word, offset: Word) -> Address {
    Address::Memory(base as AddressNumberType + offset as AddressNumberType)
  }

  /// The memory cell whose address is held in a register.
  pub fn memory_at(value: Word) -> Address {
    Address::Memory(value as AddressNumberType)
  }

  /// Converts the address to an index into the corresponding array, or fails if it is outside it.
  pub fn idx(&self) -> Result<usize, ExecError> {
    match *self {

      Address::Register(i) if i < REGISTER_COUNT as AddressNumberType => Ok(i as usize),
      Address::Register(i) => Err(ExecError::RegisterOutOfRange(i)),

      Address::Memory(a) if a < MEMORY_SIZE as AddressNumberType => Ok(a as usize),
      Address::Memory(a) => Err(ExecError::AddressOutOfRange(a)),

    }
  }

  pub fn is_register(&self) -> bool {
    match self {
      Address::Register(_) => true,
      _ => false
    }
  }
}


impl Display for Address {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Address::Register(i) => {
        write!(f, "R[{}]", i)
      },
      Address::Memory(a) => {
        write!(f, "MEM[{}]", a)
      }
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn register_bounds(){
    assert_eq!(Address::register(0).idx(), Ok(0));
    assert_eq!(Address::register(255).idx(), Ok(255));
    assert_eq!(Address::register(256).idx(), Err(ExecError::RegisterOutOfRange(256)));
  }

  #[test]
  fn memory_bounds(){
    assert_eq!(Address::memory(4999).idx(), Ok(4999));
    assert_eq!(Address::memory(5000).idx(), Err(ExecError::AddressOutOfRange(5000)));
  }

  #[test]
  fn offset_does_not_wrap(){
    let address = Address::offset_memory(Word::MAX - 1, 10);
    let sum     = Word::MAX as AddressNumberType + 9;
    assert_eq!(address, Address::Memory(sum));
    assert_eq!(address.idx(), Err(ExecError::AddressOutOfRange(sum)));
  }

  #[test]
  fn display(){
    assert_eq!(Address::register(97).to_string(), "R[97]");
    assert_eq!(Address::memory(265).to_string(), "MEM[265]");
    assert!(Address::register(1).is_register());
    assert!(!Address::memory(1).is_register());
  }
}
