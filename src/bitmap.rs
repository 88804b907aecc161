//! Occupancy bitmap over the arena.
//!
//! One bit per arena byte, packed eight to a group. Bit `i` lives in group
//! `i / 8` under mask `0x80 >> (i % 8)`, so the first arena byte is the most
//! significant bit of group 0:
//!
//! ```text
//!   group 0                         group 1
//!   ┌───┬───┬───┬───┬───┬───┬───┬───┬───┬───┬───┬─ ─
//!   │ 0 │ 1 │ 2 │ 3 │ 4 │ 5 │ 6 │ 7 │ 8 │ 9 │10 │
//!   └───┴───┴───┴───┴───┴───┴───┴───┴───┴───┴───┴─ ─
//!    0x80                      0x01 0x80
//! ```
//!
//! Bits past `len` in the last group are padding. They are kept set so that a
//! raw view of the groups never shows them as free.

use crate::group_count;
use crate::groups::BYTESIZE;

const BYTEMASK: u8 = 0x80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AllocationBitmap {
  groups: Box<[u8]>,
  len: usize,
}

#[inline]
fn locate(index: usize) -> (usize, u8) {
  (index / BYTESIZE, BYTEMASK >> (index % BYTESIZE))
}

impl AllocationBitmap {
  /// Creates a bitmap of `len` free bits.
  pub fn with_len(len: usize) -> Self {
    let mut bitmap = Self {
      groups: vec![0u8; group_count!(len)].into_boxed_slice(),
      len,
    };
    bitmap.mark_padding();
    bitmap
  }

  /// Raw packed groups, padding included.
  pub fn groups(&self) -> &[u8] {
    &self.groups
  }

  /// Frees every tracked bit.
  pub fn clear_all(&mut self) {
    self.groups.fill(0);
    self.mark_padding();
  }

  fn mark_padding(&mut self) {
    let tail = self.len % BYTESIZE;
    if tail != 0 {
      // low (8 - tail) bits of the last group are past the end
      if let Some(last) = self.groups.last_mut() {
        *last |= 0xFF >> tail;
      }
    }
  }

  #[inline]
  pub fn is_set(
    &self,
    index: usize,
  ) -> bool {
    assert!(index < self.len, "bit {index} out of range for {} bits", self.len);
    let (group, mask) = locate(index);
    self.groups[group] & mask != 0
  }

  #[inline]
  pub fn set(
    &mut self,
    index: usize,
  ) {
    assert!(index < self.len, "bit {index} out of range for {} bits", self.len);
    let (group, mask) = locate(index);
    self.groups[group] |= mask;
  }

  #[inline]
  pub fn clear(
    &mut self,
    index: usize,
  ) {
    assert!(index < self.len, "bit {index} out of range for {} bits", self.len);
    let (group, mask) = locate(index);
    self.groups[group] &= !mask;
  }

  /// Sets bits `[from, to)`.
  pub fn set_range(
    &mut self,
    from: usize,
    to: usize,
  ) {
    for index in from..to {
      self.set(index);
    }
  }

  /// Clears bits `[from, to)`.
  pub fn clear_range(
    &mut self,
    from: usize,
    to: usize,
  ) {
    for index in from..to {
      self.clear(index);
    }
  }

  /// Returns true when every bit in `[from, to)` is set and the range is in bounds.
  pub fn is_range_set(
    &self,
    from: usize,
    to: usize,
  ) -> bool {
    to <= self.len && (from..to).all(|index| self.is_set(index))
  }

  /// Number of set bits, padding excluded.
  pub fn count_set(&self) -> usize {
    let total: usize = self.groups.iter().map(|g| g.count_ones() as usize).sum();
    total - (self.groups.len() * BYTESIZE - self.len)
  }

  /// First-fit search for `run_len` consecutive clear bits.
  ///
  /// Single forward pass: returns the start of the lowest run that is long
  /// enough, or `None` once the end of the bitmap is reached.
  pub fn find_free_run(
    &self,
    run_len: usize,
  ) -> Option<usize> {
    if run_len == 0 || run_len > self.len {
      return None;
    }

    let mut run = 0;
    for index in 0..self.len {
      if self.is_set(index) {
        run = 0;
        continue;
      }

      run += 1;
      if run == run_len {
        return Some(index + 1 - run_len);
      }
    }

    None
  }

  /// Length of the longest run of clear bits.
  pub fn largest_free_run(&self) -> usize {
    let mut largest = 0;
    let mut run = 0;
    for index in 0..self.len {
      if self.is_set(index) {
        run = 0;
      } else {
        run += 1;
        largest = largest.max(run);
      }
    }
    largest
  }
}
