//! Applies decoded instructions to a `MachineState`.

use crate::address::{Address, AddressNumberType};
use crate::bitfield::mask;
use crate::bytecode::{Field, Instruction};
use crate::error::ExecError;
use crate::machine::{MachineState, Word};
use crate::trace::{Observer, TraceRecord};

/// Width of a shift result. Results are reduced modulo 2^32 whatever the word size.
pub const SHIFT_RESULT_BITS: u32 = 32;

/**
  Executes one instruction against `state` and reports what it did to `observer`.

  Every read is bounds checked before the single write an instruction performs, so a failed
  instruction leaves `state` untouched and emits no record. Field `A` is not consulted.
*/
pub fn execute<O>(instruction: &Instruction, state: &mut MachineState, observer: &mut O)
  -> Result<(), ExecError>
  where O: Observer + ?Sized
{
  let record =
    match *instruction {
      Instruction::Store{b, c, d, ..}        => store(state, b, c, d)?,
      Instruction::ShiftLeft{b, c, d, e, ..} => shift_left(state, b, c, d, e)?,
    };

  observer.observe(&record);
  Ok(())
}

/// `(value << shift) mod 2^32`. Shifts of 32 or more give zero.
pub fn shift_left_truncated(value: Word, shift: Word) -> Word {
  match shift < SHIFT_RESULT_BITS as Word {
    true  => (value << shift) & mask(SHIFT_RESULT_BITS),
    false => 0
  }
}

fn register(field: Field) -> Address {
  Address::Register(field as AddressNumberType)
}

/// memory[ R[b] + d ] = R[c]
fn store(state: &mut MachineState, b: Field, c: Field, d: Field) -> Result<TraceRecord, ExecError> {
  let source  = register(c);
  let value   = state.value_at(source)?;
  let base    = state.value_at(register(b))?;
  let address = Address::offset_memory(base, d as Word);

  state.set_value_at(address, value)?;

  Ok(TraceRecord::Store{ source, value, address })
}

/// memory[ R[c] ] = memory[ R[b] + e ] << R[d]
fn shift_left(state: &mut MachineState, b: Field, c: Field, d: Field, e: Field)
  -> Result<TraceRecord, ExecError>
{
  let base           = state.value_at(register(b))?;
  let address        = Address::offset_memory(base, e as Word);
  let operand        = state.value_at(address)?;
  let shift_register = register(d);
  let shift          = state.value_at(shift_register)?;
  let destination    = Address::memory_at(state.value_at(register(c))?);
  let result         = shift_left_truncated(operand, shift);

  state.set_value_at(destination, result)?;

  Ok(TraceRecord::ShiftLeft{ address, operand, shift_register, shift, result, destination })
}
