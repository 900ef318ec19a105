/*!
  A small virtual machine with two instructions, `store` and `shift`, over 256 registers and
  5000 cells of memory.

  The pipeline is
  ```text
  fields -> [`encode_store`/`encode_shift_left`] -> bytes -> [`decode`] -> `Instruction` ->⋯

  ⋯-> [`execute`] -> `MachineState` changed, one `TraceRecord` sent to the `Observer`
  ```
  The console drives the same pipeline from text commands.
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod address;
pub mod bitfield;
pub mod bytecode;
pub mod console;
pub mod engine;
pub mod error;
pub mod machine;
pub mod trace;

pub use address::Address;
pub use bytecode::{decode, encode_shift_left, encode_store, Field, Instruction, Operation};
pub use console::Console;
pub use engine::execute;
pub use error::{ConsoleError, DecodeError, ExecError};
pub use machine::{MachineState, Word, MEMORY_SIZE, REGISTER_COUNT};
pub use trace::{Observer, TraceRecord, Tracer};
