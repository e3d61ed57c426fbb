//! Pack a scanned bitmap into bytes and apply the positional patch.

use crate::error::Result;

/// Value written over patched bytes.
pub const PATCH_FILL: u8 = 0xf4;

/// The patch rule repeats with this period of byte indices.
pub const PATCH_PERIOD: usize = 0x6e;

/// Within each period, offsets at or below this are left unpatched.
pub const PATCH_KEEP_OFFSET: usize = 12;

/// Indices at or below this are left unpatched regardless of offset.
pub const PATCH_KEEP_PREFIX: usize = 0x10;

/// The one index past the prefix that is exempt from patching.
pub const PATCH_EXEMPT_INDEX: usize = 0x6d;

/// Convert a string of `'0'`/`'1'` characters into bytes, eight bits at a
/// time with the first character as the most significant bit. Trailing
/// characters that don't fill a whole byte are silently discarded.
///
/// ## Example
///
/// ```rust
/// use life2asm::pack::pack_bits;
///
/// let bytes = pack_bits("111101000000000110").unwrap();
/// assert_eq!(bytes, vec![0xf4, 0x01]); // the trailing "10" is dropped
/// ```
pub fn pack_bits(bits: &str) -> Result<Vec<u8>> {
  bits
    .as_bytes()
    .chunks_exact(8)
    .map(|chunk| {
      let chunk = std::str::from_utf8(chunk)?;
      Ok(u8::from_str_radix(chunk, 2)?)
    })
    .collect()
}

/// Whether the byte at `index` gets overwritten with [`PATCH_FILL`].
///
/// Pure function of the index; the packed value never matters. The
/// constants are artifacts of the grid this tool was built to dump and are
/// kept exactly as found.
pub fn is_patched(index: usize) -> bool {
  index % PATCH_PERIOD > PATCH_KEEP_OFFSET
    && index > PATCH_KEEP_PREFIX
    && index != PATCH_EXEMPT_INDEX
}

/// Overwrite every patched position in `bytes` with [`PATCH_FILL`].
pub fn patch_bytes(bytes: &mut [u8]) {
  for (index, byte) in bytes.iter_mut().enumerate() {
    if is_patched(index) {
      *byte = PATCH_FILL;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn unpack(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:08b}", b)).collect()
  }

  #[test]
  fn packing_round_trips_whole_bytes() {
    let bits = "0110100001101001011100100110111101101110";
    let bytes = pack_bits(bits).unwrap();
    assert_eq!(bytes.len(), bits.len() / 8);
    assert_eq!(unpack(&bytes), bits);
  }

  #[test]
  fn trailing_bits_are_dropped() {
    let bytes = pack_bits("111111110000000011111").unwrap();
    assert_eq!(bytes, vec![0xff, 0x00]);
    assert_eq!(pack_bits("1111111").unwrap(), Vec::<u8>::new());
  }

  #[test]
  fn non_binary_input_is_an_error() {
    assert!(pack_bits("01210101").is_err());
  }

  #[test]
  fn patch_is_a_pure_function_of_the_index() {
    // The rule ignores content entirely: patching zeros and ones picks the
    // same positions.
    let mut zeros = vec![0x00u8; 770];
    let mut ones = vec![0xffu8; 770];
    patch_bytes(&mut zeros);
    patch_bytes(&mut ones);

    for i in 0..770 {
      assert_eq!(zeros[i] == PATCH_FILL, is_patched(i), "index {}", i);
      if is_patched(i) {
        assert_eq!(ones[i], PATCH_FILL);
      } else {
        assert_eq!((zeros[i], ones[i]), (0x00, 0xff), "index {}", i);
      }
    }
  }

  #[test]
  fn patch_rule_edges() {
    // Nothing in the leading prefix is touched.
    for i in 0..=PATCH_KEEP_PREFIX {
      assert!(!is_patched(i));
    }
    assert!(is_patched(PATCH_KEEP_PREFIX + 1));
    // The single exempt index, and its neighbors for contrast.
    assert!(!is_patched(PATCH_EXEMPT_INDEX));
    assert!(is_patched(PATCH_EXEMPT_INDEX - 1));
    // 0x6e % 0x6e == 0, below the keep offset.
    assert!(!is_patched(PATCH_PERIOD));
    // Offsets within a later period obey the same cutoff.
    assert!(!is_patched(PATCH_PERIOD + PATCH_KEEP_OFFSET));
    assert!(is_patched(PATCH_PERIOD + PATCH_KEEP_OFFSET + 1));
  }
}
