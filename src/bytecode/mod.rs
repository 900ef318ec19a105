/*!

  The machine has two instructions, stored little-endian and told apart only by their length:

    Opcode      Bytes   Fields (bit range, width)
    store       5       A[0-6]7  B[7-13]7  C[14-20]7  D[21-34]14
    shift       6       A[0-6]7  B[7-13]7  C[14-20]7  D[21-27]7  E[28-41]14

  Bits above the last field are padding; they are written as zero and ignored on decode.

  The length-only dispatch would break if a third instruction shared a length with an existing
  one. The wire format is kept as is, but in memory an instruction is a proper tagged union
  (`Instruction`) whose tag is the decoded `Operation`, so the engine never looks at lengths.

  Field `A` is a seven bit value in the position an opcode would usually occupy. It is
  encoded and decoded faithfully and ignored by execution. Whether it was reserved or meant
  to drive dispatch is not known, so it is left alone.

*/

mod assembly;
mod binary;
mod instruction;

pub use assembly::parse_instruction;
pub(crate) use assembly::parse_number;
pub use binary::{decode, encode_instruction, encode_shift_left, encode_store, operation_for_length};
pub use instruction::{
  Field, FieldLayout, Instruction, Operation,
  SHIFT_LEFT_LAYOUT, STORE_LAYOUT
};
