/*!
  The human readable textual form of an instruction is called assembly: the mnemonic followed
  by every field in layout order, in decimal, separated by blanks.

  ```text
  store 126 97 112 165
  shift 51 38 41 57 843
  ```

  Mnemonics come from the `strum` derives on `Operation`.
*/

use std::num::ParseIntError;
use std::str::FromStr;

use nom::{
  character::complete::{alpha1, digit1, space0, space1},
  combinator::all_consuming,
  multi::many0,
  sequence::{delimited, pair, preceded},
  IResult
};

use crate::bytecode::{Field, Instruction, Operation};
use crate::error::{ConsoleError, ConsoleResult};

/// `mnemonic (blank number)*`, with optional blanks around the whole line.
fn instruction_p(text: &str) -> IResult<&str, (&str, Vec<&str>)> {
  all_consuming(
    delimited(
      space0,
      pair(alpha1, many0(preceded(space1, digit1))),
      space0
    )
  )(text)
}

/// Parses a decimal number, keeping the offending text on failure.
pub(crate) fn parse_number<T>(text: &str) -> ConsoleResult<T>
  where T: FromStr<Err = ParseIntError>
{
  text.parse::<T>()
      .map_err(|e| ConsoleError::BadNumber(text.to_string(), e))
}

/// Parses one line of assembly. Fields are not range checked; encoding truncates them.
pub fn parse_instruction(text: &str) -> ConsoleResult<Instruction> {
  let (_rest, (name, args)) =
    instruction_p(text).map_err(|_| ConsoleError::Syntax(text.trim().to_string()))?;

  let operation =
    Operation::from_str(&name.to_ascii_lowercase())
      .map_err(|_| ConsoleError::UnknownCommand(name.to_string()))?;

  let fields =
    args.iter()
        .map(|arg| parse_number::<Field>(arg))
        .collect::<ConsoleResult<Vec<Field>>>()?;

  Instruction::from_fields(operation, &fields).ok_or(
    ConsoleError::WrongArity {
      operation,
      expected: operation.arity(),
      found: fields.len()
    }
  )
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_store(){
    let instruction = parse_instruction("store 126 97 112 165").unwrap();
    assert_eq!(instruction, Instruction::Store{a: 126, b: 97, c: 112, d: 165});
  }

  #[test]
  fn parse_shift_with_blanks_and_case(){
    let instruction = parse_instruction("  SHIFT\t51 38  41 57 843  ").unwrap();
    assert_eq!(instruction, Instruction::ShiftLeft{a: 51, b: 38, c: 41, d: 57, e: 843});
  }

  #[test]
  fn display_parses_back(){
    let instruction = Instruction::ShiftLeft{a: 1, b: 2, c: 3, d: 4, e: 5};
    assert_eq!(parse_instruction(&instruction.to_string()).unwrap(), instruction);
  }

  #[test]
  fn wrong_arity(){
    match parse_instruction("store 1 2 3") {
      Err(ConsoleError::WrongArity{operation, expected, found}) => {
        assert_eq!(operation, Operation::Store);
        assert_eq!(expected, 4);
        assert_eq!(found, 3);
      }
      other => panic!("unexpected result: {:?}", other)
    }
  }

  #[test]
  fn unknown_mnemonic(){
    assert!(matches!(parse_instruction("jump 1 2"), Err(ConsoleError::UnknownCommand(_))));
  }

  #[test]
  fn not_a_number(){
    assert!(matches!(parse_instruction("store 1 2 x 4"), Err(ConsoleError::Syntax(_))));
    assert!(matches!(parse_instruction("store -1 2 3 4"), Err(ConsoleError::Syntax(_))));
  }

  #[test]
  fn number_too_large(){
    assert!(matches!(
      parse_instruction("store 1 2 3 99999999999"),
      Err(ConsoleError::BadNumber(_, _))
    ));
  }
}
