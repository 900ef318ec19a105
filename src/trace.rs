/*!
  Diagnostic records of executed instructions.

  The engine reports what each instruction did to an `Observer` supplied by the caller. The
  record is informational only: it is emitted after the state change succeeded and has no
  bearing on the result of `execute`.
*/

use std::fmt::{Display, Formatter};
use std::io::Write;

use crate::address::Address;
use crate::bytecode::Operation;
use crate::machine::Word;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TraceRecord {
  /// `value` was read from register `source` and written to memory `address`.
  Store {
    source  : Address,
    value   : Word,
    address : Address
  },
  /// `operand` was read from memory `address`, shifted by `shift` read from register
  /// `shift_register`, and `result` was written to memory `destination`.
  ShiftLeft {
    address        : Address,
    operand        : Word,
    shift_register : Address,
    shift          : Word,
    result         : Word,
    destination    : Address
  },
}

impl TraceRecord {
  pub fn operation(&self) -> Operation {
    match self {
      TraceRecord::Store{..}     => Operation::Store,
      TraceRecord::ShiftLeft{..} => Operation::ShiftLeft,
    }
  }
}

impl Display for TraceRecord {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      TraceRecord::Store{source, value, address} => {
        write!(f, "[STORE] {}={} -> {}", source, value, address)
      }

      TraceRecord::ShiftLeft{address, operand, shift_register, shift, result, destination} => {
        write!(
          f,
          "[SHL] {}={} << {}={} = {} -> {}",
          address, operand, shift_register, shift, result, destination
        )
      }

    }
  }
}

/// Receives one record per successfully executed instruction.
pub trait Observer {
  fn observe(&mut self, record: &TraceRecord);
}

/// Discards every record.
impl Observer for () {
  fn observe(&mut self, _record: &TraceRecord) {}
}

/// Collects every record.
impl Observer for Vec<TraceRecord> {
  fn observe(&mut self, record: &TraceRecord) {
    self.push(*record);
  }
}

/**
  Writes each record as a line, if the `trace_computation` feature is enabled.

  Write errors are ignored. The trace is informational, and an instruction never fails
  because its trace line could not be written.
*/
pub struct Tracer<W: Write> {
  out: W
}

impl<W: Write> Tracer<W> {
  pub fn new(out: W) -> Tracer<W> {
    Tracer{ out }
  }

  pub fn into_inner(self) -> W {
    self.out
  }
}

impl<W: Write> Observer for Tracer<W> {
  #[cfg(feature = "trace_computation")]
  fn observe(&mut self, record: &TraceRecord) {
    let _ = writeln!(self.out, "{}", record);
  }

  #[cfg(not(feature = "trace_computation"))]
  fn observe(&mut self, _record: &TraceRecord) {}
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::bytecode::Instruction;
  use crate::engine::execute;
  use crate::machine::MachineState;

  fn shift_record() -> TraceRecord {
    TraceRecord::ShiftLeft {
      address        : Address::memory(1043),
      operand        : 6,
      shift_register : Address::register(57),
      shift          : 3,
      result         : 48,
      destination    : Address::memory(500)
    }
  }

  #[test]
  fn display_store(){
    let record = TraceRecord::Store {
      source  : Address::register(112),
      value   : 77,
      address : Address::memory(265)
    };
    assert_eq!(record.to_string(), "[STORE] R[112]=77 -> MEM[265]");
    assert_eq!(record.operation(), Operation::Store);
  }

  #[test]
  fn display_shift_left(){
    assert_eq!(shift_record().to_string(), "[SHL] MEM[1043]=6 << R[57]=3 = 48 -> MEM[500]");
  }

  #[test]
  fn vec_collects(){
    let mut records: Vec<TraceRecord> = vec![];
    records.observe(&shift_record());
    assert_eq!(records, vec![shift_record()]);
  }

  #[cfg(feature = "trace_computation")]
  #[test]
  fn tracer_writes_lines(){
    let mut tracer = Tracer::new(Vec::new());
    tracer.observe(&shift_record());
    let text = String::from_utf8(tracer.into_inner()).unwrap();
    assert_eq!(text, "[SHL] MEM[1043]=6 << R[57]=3 = 48 -> MEM[500]\n");
  }

  struct BrokenPipe;

  impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
      Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
      Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }
  }

  #[test]
  fn failed_trace_write_does_not_fail_execution(){
    let mut state = MachineState::new();
    state.write_register(1, 9).unwrap();

    let store = Instruction::Store{a: 0, b: 0, c: 1, d: 4};
    assert_eq!(execute(&store, &mut state, &mut Tracer::new(BrokenPipe)), Ok(()));
    assert_eq!(state.read_memory(4), Ok(9));
  }

  #[cfg(not(feature = "trace_computation"))]
  #[test]
  fn tracer_is_silent(){
    let mut tracer = Tracer::new(Vec::new());
    tracer.observe(&shift_record());
    assert!(tracer.into_inner().is_empty());
  }
}
