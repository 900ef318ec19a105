/*!
  The line-oriented command language of the interactive console.

  The console owns the one `MachineState` of a session. Instruction commands are assembled to
  bytes and decoded again before they run, so every command exercises the wire format.
*/

use std::io::{BufRead, Write};

use nom::{
  bytes::complete::is_not,
  character::complete::{space0, space1},
  combinator::all_consuming,
  multi::separated_list,
  sequence::delimited,
  IResult
};

use crate::bytecode::{
  decode, encode_instruction, encode_shift_left, encode_store,
  parse_instruction, parse_number, Instruction
};
use crate::engine::execute;
use crate::error::{ConsoleError, ConsoleResult};
use crate::machine::{MachineState, Word};
use crate::trace::Tracer;

pub const HELP: &str = "\
Commands:
  store A B C D       execute memory[R[B] + D] = R[C]
  shift A B C D E     execute memory[R[C]] = memory[R[B] + E] << R[D]
  reg i value         write a register
  mem addr value      write a memory cell
  print reg i         show a register
  print mem addr      show a memory cell
  asm <instruction>   show the encoded bytes of an instruction
  decode <hex bytes>  show the instruction encoded by the bytes
  exec <hex bytes>    decode and execute raw bytes
  dump                show every non-zero register and memory cell
  demo                run the reference store and shift examples
  reset               zero all registers and memory
  help                show this list
  exit                leave the console";

/// One parsed console line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
  Execute(Instruction),
  SetRegister(usize, Word),
  SetMemory(usize, Word),
  PrintRegister(usize),
  PrintMemory(usize),
  Assemble(Instruction),
  Decode(Vec<u8>),
  ExecuteBytes(Vec<u8>),
  Dump,
  Demo,
  Reset,
  Help,
  Exit,
}

/// Whether the session goes on after a command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
  Continue,
  Exit
}

// region Parsing

/// Splits a line into blank separated words.
fn words_p(line: &str) -> IResult<&str, Vec<&str>> {
  all_consuming(
    delimited(
      space0,
      separated_list(space1, is_not(" \t\r\n")),
      space0
    )
  )(line)
}

/// Formats bytes as upper case hex pairs separated by blanks: `FE 30 BC 14 00`.
pub fn to_hex(bytes: &[u8]) -> String {
  bytes.iter()
       .map(|byte| format!("{:02X}", byte))
       .collect::<Vec<String>>()
       .join(" ")
}

/**
  Parses hex bytes. Each word may carry one `0x` prefix and may hold several bytes written
  back to back, so `FE 30`, `0xFE 0x30` and `FE30` are all the same two bytes.
*/
pub fn parse_hex(words: &[&str]) -> ConsoleResult<Vec<u8>> {
  let mut bytes = vec![];

  for word in words {
    let digits = word.strip_prefix("0x").or_else(|| word.strip_prefix("0X")).unwrap_or(word);
    if digits.is_empty() || digits.len() % 2 != 0 || !digits.is_ascii() {
      return Err(ConsoleError::BadHex(word.to_string()));
    }
    for i in (0..digits.len()).step_by(2) {
      let byte =
        u8::from_str_radix(&digits[i..i + 2], 16)
          .map_err(|_| ConsoleError::BadHex(word.to_string()))?;
      bytes.push(byte);
    }
  }

  Ok(bytes)
}

fn expect_args<'a>(args: &'a [&'a str], count: usize, usage: &'static str) -> ConsoleResult<&'a [&'a str]> {
  match args.len() == count {
    true  => Ok(args),
    false => Err(ConsoleError::Usage(usage))
  }
}

/// Parses one console line. Blank lines give `None`.
pub fn parse_command(line: &str) -> ConsoleResult<Option<Command>> {
  let (_rest, words) = words_p(line).map_err(|_| ConsoleError::Syntax(line.trim().to_string()))?;

  let (keyword, args) = match words.split_first() {
    Some((keyword, args)) => (keyword.to_ascii_lowercase(), args),
    None                  => return Ok(None)
  };

  let command =
    match keyword.as_str() {

      "store" | "shift" => Command::Execute(parse_instruction(line)?),

      "reg" => {
        let args = expect_args(args, 2, "reg i value")?;
        Command::SetRegister(parse_number(args[0])?, parse_number(args[1])?)
      }

      "mem" => {
        let args = expect_args(args, 2, "mem addr value")?;
        Command::SetMemory(parse_number(args[0])?, parse_number(args[1])?)
      }

      "print" => {
        let args = expect_args(args, 2, "print reg i | print mem addr")?;
        match args[0].to_ascii_lowercase().as_str() {
          "reg" => Command::PrintRegister(parse_number(args[1])?),
          "mem" => Command::PrintMemory(parse_number(args[1])?),
          _     => return Err(ConsoleError::Usage("print reg i | print mem addr"))
        }
      }

      "asm" => {
        match args.is_empty() {
          true  => return Err(ConsoleError::Usage("asm <instruction>")),
          false => Command::Assemble(parse_instruction(&args.join(" "))?)
        }
      }

      "decode" => Command::Decode(parse_hex(args)?),

      "exec" => Command::ExecuteBytes(parse_hex(args)?),

      "dump"  => { expect_args(args, 0, "dump")?;  Command::Dump }
      "demo"  => { expect_args(args, 0, "demo")?;  Command::Demo }
      "reset" => { expect_args(args, 0, "reset")?; Command::Reset }
      "help"  => Command::Help,
      "exit" | "quit" => Command::Exit,

      _ => return Err(ConsoleError::UnknownCommand(words[0].to_string()))
    };

  Ok(Some(command))
}

// endregion

/// A console session writing its results to `out`.
pub struct Console<W: Write> {
  state : MachineState,
  out   : W
}

impl<W: Write> Console<W> {
  pub fn new(out: W) -> Console<W> {
    Console {
      state: MachineState::new(),
      out
    }
  }

  pub fn state(&self) -> &MachineState {
    &self.state
  }

  pub fn into_inner(self) -> W {
    self.out
  }

  /// Runs raw bytes: decode, then execute, tracing into the console output.
  fn execute_bytes(&mut self, bytes: &[u8]) -> ConsoleResult {
    let instruction = decode(bytes)?;
    execute(&instruction, &mut self.state, &mut Tracer::new(&mut self.out))?;
    Ok(())
  }

  /// The two worked examples: a store that moves 77 to MEM[265], and a shift of 6 by 3 to MEM[500].
  fn demo(&mut self) -> ConsoleResult {
    let store = encode_store(126, 97, 112, 165);
    writeln!(self.out, "store 126 97 112 165 => {}", to_hex(&store))?;
    self.state.write_register(97, 100)?;
    self.state.write_register(112, 77)?;
    self.execute_bytes(&store)?;
    writeln!(self.out, "expected 77, MEM[265] = {}", self.state.read_memory(100 + 165)?)?;

    let shift = encode_shift_left(51, 38, 41, 57, 843);
    writeln!(self.out, "shift 51 38 41 57 843 => {}", to_hex(&shift))?;
    self.state.write_register(38, 200)?;
    self.state.write_register(41, 500)?;
    self.state.write_register(57, 3)?;
    self.state.write_memory(200 + 843, 6)?;
    self.execute_bytes(&shift)?;
    writeln!(self.out, "expected 48, MEM[500] = {}", self.state.read_memory(500)?)?;

    Ok(())
  }

  pub fn run_command(&mut self, command: Command) -> ConsoleResult<Flow> {
    match command {

      Command::Execute(instruction) => {
        let bytes = encode_instruction(&instruction);
        self.execute_bytes(&bytes)?;
      }

      Command::SetRegister(index, value) => {
        self.state.write_register(index, value)?;
        writeln!(self.out, "R[{}] = {}", index, value)?;
      }

      Command::SetMemory(address, value) => {
        self.state.write_memory(address, value)?;
        writeln!(self.out, "MEM[{}] = {}", address, value)?;
      }

      Command::PrintRegister(index) => {
        let value = self.state.read_register(index)?;
        writeln!(self.out, "R[{}] = {}", index, value)?;
      }

      Command::PrintMemory(address) => {
        let value = self.state.read_memory(address)?;
        writeln!(self.out, "MEM[{}] = {}", address, value)?;
      }

      Command::Assemble(instruction) => {
        writeln!(self.out, "{}", to_hex(&encode_instruction(&instruction)))?;
      }

      Command::Decode(bytes) => {
        writeln!(self.out, "{}", decode(&bytes)?)?;
      }

      Command::ExecuteBytes(bytes) => self.execute_bytes(&bytes)?,

      Command::Dump => write!(self.out, "{}", self.state)?,

      Command::Demo => self.demo()?,

      Command::Reset => {
        self.state.reset();
        writeln!(self.out, "machine reset")?;
      }

      Command::Help => writeln!(self.out, "{}", HELP)?,

      Command::Exit => return Ok(Flow::Exit),

    }
    Ok(Flow::Continue)
  }

  pub fn handle_line(&mut self, line: &str) -> ConsoleResult<Flow> {
    match parse_command(line)? {
      Some(command) => self.run_command(command),
      None          => Ok(Flow::Continue)
    }
  }

  /**
    Reads commands from `input` until it ends or `exit` is given. Command errors are reported
    as `error: ...` lines and the session continues; only I/O errors end it early. With
    `interactive` set, a prompt is written before each line.
  */
  pub fn run<R: BufRead>(&mut self, input: R, interactive: bool) -> ConsoleResult {
    let mut lines = input.lines();

    loop {
      if interactive {
        write!(self.out, ">>> ")?;
        self.out.flush()?;
      }

      let line = match lines.next() {
        Some(line) => line?,
        None       => break
      };

      match self.handle_line(&line) {
        Ok(Flow::Exit)         => break,
        Ok(Flow::Continue)     => {}
        Err(ConsoleError::Io(e)) => return Err(ConsoleError::Io(e)),
        Err(e)                 => writeln!(self.out, "error: {}", e)?,
      }
    }

    Ok(())
  }
}
