//! The register file and memory of the virtual machine, the only mutable state there is.

use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};

use crate::address::Address;
use crate::error::ExecError;

/// Contents of a register or a memory cell.
pub type Word = u64;

pub const REGISTER_COUNT: usize = 256;
pub const MEMORY_SIZE   : usize = 5000;

/**
  Registers and memory, both zero initialized. There is no program counter and no mode; an
  instruction is a function from one `MachineState` to the next.

  A state has exactly one owner. Hosts that share one between callers must serialize access
  themselves.
*/
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MachineState {
  registers : Vec<Word>,
  memory    : Vec<Word>,
}

impl Default for MachineState {
  fn default() -> Self {
    MachineState::new()
  }
}

impl MachineState {

  // region Display methods

  fn make_cell_table<I> (cells: I) -> Table
    where I: Iterator<Item = (Address, Word)>
  {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Address", ubl->"Contents"]);

    for (address, value) in cells {
      table.add_row(row![r->format!("{} =", address), value]);
    }
    table
  }

  fn non_zero<'a>(cells: &'a [Word], to_address: fn(usize) -> Address)
    -> impl Iterator<Item = (Address, Word)> + 'a
  {
    cells.iter()
         .enumerate()
         .filter(|(_, value)| **value != 0)
         .map(move |(i, value)| (to_address(i), *value))
  }

  // endregion

  pub fn new() -> MachineState {
    MachineState {
      registers : vec![0; REGISTER_COUNT],
      memory    : vec![0; MEMORY_SIZE],
    }
  }

  /// Zeroes every register and memory cell.
  pub fn reset(&mut self) {
    for cell in self.registers.iter_mut().chain(self.memory.iter_mut()) {
      *cell = 0;
    }
  }

  /// Reads the cell at `address`, failing if it lies outside the register file or memory.
  pub fn value_at(&self, address: Address) -> Result<Word, ExecError> {
    let idx = address.idx()?;
    Ok(
      match address.is_register() {
        true  => self.registers[idx],
        false => self.memory[idx]
      }
    )
  }

  /// Writes the cell at `address`. Nothing is written if the address is out of range.
  pub fn set_value_at(&mut self, address: Address, value: Word) -> Result<(), ExecError> {
    let idx = address.idx()?;
    match address.is_register() {
      true  => self.registers[idx] = value,
      false => self.memory[idx]    = value
    }
    Ok(())
  }

  pub fn read_register(&self, index: usize) -> Result<Word, ExecError> {
    self.value_at(Address::register(index))
  }

  pub fn write_register(&mut self, index: usize, value: Word) -> Result<(), ExecError> {
    self.set_value_at(Address::register(index), value)
  }

  pub fn read_memory(&self, address: usize) -> Result<Word, ExecError> {
    self.value_at(Address::memory(address))
  }

  pub fn write_memory(&mut self, address: usize, value: Word) -> Result<(), ExecError> {
    self.set_value_at(Address::memory(address), value)
  }

  pub fn registers(&self) -> &[Word] {
    &self.registers
  }

  pub fn memory(&self) -> &[Word] {
    &self.memory
  }
}


lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

// Only non-zero cells are listed; a fresh machine prints two empty columns.
impl Display for MachineState {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let r_table = MachineState::make_cell_table(MachineState::non_zero(&self.registers, Address::register));
    let m_table = MachineState::make_cell_table(MachineState::non_zero(&self.memory, Address::memory));

    let mut combined_table = table!([r_table, m_table]);

    combined_table.set_titles(row![ub->"Registers", ub->"Memory"]);
    combined_table.set_format(*TABLE_DISPLAY_FORMAT);

    write!(f, "{}", combined_table)
  }
}
