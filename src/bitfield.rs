/*!
  Extraction and insertion of bit ranges within an unsigned accumulator.

  Ranges are inclusive on both ends and counted from the least significant bit, so
  `extract(x, 7, 13)` is the seven bits starting at bit 7. Nothing here is signed.
*/

/// The accumulator wide enough to hold the largest encoded instruction (48 bits).
pub type Bits = u64;

pub const BITS_WIDTH: u32 = Bits::BITS;

/// A mask of the low `width` bits. A width of `BITS_WIDTH` yields all ones.
pub fn mask(width: u32) -> Bits {
  match width >= BITS_WIDTH {
    true  => Bits::MAX,
    false => (1 << width) - 1
  }
}

/// Returns bits `start..=end` of `value`, shifted down to bit 0.
///
/// Requires `start <= end < BITS_WIDTH`.
pub fn extract(value: Bits, start: u32, end: u32) -> Bits {
  debug_assert!(start <= end && end < BITS_WIDTH, "bad bit range {}..={}", start, end);
  (value >> start) & mask(end - start + 1)
}

/**
  Merges `field` into `accumulator` at bits `start..=end`.

  The field is masked to `end - start + 1` bits first, so wider values silently wrap. The
  merge is a plain OR: the caller must make sure the target range of `accumulator` is still
  zero, which holds when fields are written once each in ascending order.
*/
pub fn insert(accumulator: Bits, field: Bits, start: u32, end: u32) -> Bits {
  debug_assert!(start <= end && end < BITS_WIDTH, "bad bit range {}..={}", start, end);
  accumulator | ((field & mask(end - start + 1)) << start)
}
