use std::fmt;

/// Bytes reserved in front of every payload to hold its size.
pub const TAG_SIZE: usize = 1;

/// Largest payload a single tag byte can describe.
pub const MAX_BLOCK_SIZE: usize = u8::MAX as usize;

/// Smallest arena that can hold one block: a tag plus one payload byte.
pub const MIN_CAPACITY: usize = TAG_SIZE + 1;

/// Offset of a payload inside the arena, as returned by `allocate`.
///
/// The tag byte of the block sits at `offset() - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(usize);

impl Address {
  pub fn offset(self) -> usize {
    self.0
  }

  /// Index of the tag byte (and of the first bitmap bit) for this block.
  ///
  /// `None` for offset 0, which no block can start at.
  pub(crate) fn tag_index(self) -> Option<usize> {
    self.0.checked_sub(TAG_SIZE)
  }
}

impl From<usize> for Address {
  fn from(offset: usize) -> Self {
    Self(offset)
  }
}

impl fmt::Display for Address {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "{:#06x}", self.0)
  }
}

/// A live block: payload address and payload size in bytes.
///
/// Only handed out by the allocator, so the address always sits past a tag:
///
/// ```compile_fail
/// use bitarena::{Address, Block};
///
/// let block = Block::new(Address::from(0), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
  address: Address,
  size: usize,
}

impl Block {
  pub(crate) fn new(
    address: Address,
    size: usize,
  ) -> Self {
    debug_assert!(address.tag_index().is_some());
    Self { address, size }
  }

  pub fn address(&self) -> Address {
    self.address
  }

  pub fn size(&self) -> usize {
    self.size
  }

  /// Index of the tag byte that opens this block's run.
  pub fn start(&self) -> usize {
    self.address.offset() - TAG_SIZE
  }

  /// Length of the whole run, tag included.
  pub fn run_len(&self) -> usize {
    self.size + TAG_SIZE
  }

  /// One past the last payload byte.
  pub fn end(&self) -> usize {
    self.start() + self.run_len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn block_span_includes_tag() {
    let block = Block::new(Address::from(4), 5);

    assert_eq!(block.start(), 3);
    assert_eq!(block.run_len(), 6);
    assert_eq!(block.end(), 9);
  }

  #[test]
  fn accessors_report_address_and_size() {
    let block = Block::new(Address::from(1), 3);

    assert_eq!(block.address(), Address::from(1));
    assert_eq!(block.size(), 3);
    assert_eq!(block.start(), 0);
  }

  #[test]
  fn address_zero_has_no_tag() {
    assert_eq!(Address::from(0).tag_index(), None);
    assert_eq!(Address::from(1).tag_index(), Some(0));
  }
}
