use std::fmt;

use crate::{
  arena::{Arena, Backing},
  bitmap::AllocationBitmap,
  block::{Address, Block, MAX_BLOCK_SIZE, MIN_CAPACITY, TAG_SIZE},
  config::ArenaConfig,
  errors::{AllocError, InitError, ReleaseError},
};

/// Prints the allocator's occupancy bitmap to stdout, one hex group per line.
pub fn print_state(allocator: &BlockAllocator) {
  print!("{}", allocator.dump_state());
}

/// Read-only snapshot of the occupancy bitmap.
///
/// Each entry is `(group index, group byte)`; bit `0x80` of group `g` covers
/// arena byte `8 * g`. Meant for humans and tests, not as a stable format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDump {
  capacity: usize,
  groups: Vec<(usize, u8)>,
}

impl StateDump {
  pub fn capacity(&self) -> usize {
    self.capacity
  }

  pub fn groups(&self) -> &[(usize, u8)] {
    &self.groups
  }

  pub fn iter(&self) -> std::slice::Iter<'_, (usize, u8)> {
    self.groups.iter()
  }
}

impl<'a> IntoIterator for &'a StateDump {
  type Item = &'a (usize, u8);
  type IntoIter = std::slice::Iter<'a, (usize, u8)>;

  fn into_iter(self) -> Self::IntoIter {
    self.groups.iter()
  }
}

impl fmt::Display for StateDump {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    writeln!(f, "--- {} bytes", self.capacity)?;
    for (index, group) in &self.groups {
      writeln!(f, "{index}: {group:02X}")?;
    }
    writeln!(f, "---")
  }
}

/// First-fit allocator over a fixed arena, tracked by a one-bit-per-byte bitmap.
///
/// Every block is stored as a tag byte holding the payload size followed by
/// the payload itself:
///
/// ```text
///   bitmap  1   1   1   1   1   1   0   0   0 ...
///   arena ┌───┬───┬───┬───┬───┬───┬───┬───┬───┐
///         │ 2 │ a │ b │ 2 │ c │ d │   │   │   │
///         └───┴───┴───┴───┴───┴───┴───┴───┴───┘
///               ▲           ▲
///               │           └── second allocate(2)
///               └── first allocate(2)
/// ```
pub struct BlockAllocator {
  arena: Arena,
  bitmap: AllocationBitmap,
  zero_on_allocate: bool,
}

impl BlockAllocator {
  /// Creates an allocator over a heap arena of `capacity` bytes, all free.
  pub fn new(capacity: usize) -> Result<Self, InitError> {
    Self::with_config(ArenaConfig::with_capacity(capacity))
  }

  pub fn with_config(config: ArenaConfig) -> Result<Self, InitError> {
    if config.capacity < MIN_CAPACITY {
      return Err(InitError::InvalidCapacity {
        capacity: config.capacity,
      });
    }

    let arena = Arena::new(config.capacity, config.backing)?;
    let bitmap = AllocationBitmap::with_len(config.capacity);

    Ok(Self {
      arena,
      bitmap,
      zero_on_allocate: config.zero_on_allocate,
    })
  }

  pub fn capacity(&self) -> usize {
    self.arena.capacity()
  }

  pub fn backing(&self) -> Backing {
    self.arena.backing()
  }

  /// Arena bytes currently occupied, tags included.
  pub fn used(&self) -> usize {
    self.bitmap.count_set()
  }

  pub fn available(&self) -> usize {
    self.capacity() - self.used()
  }

  /// Longest contiguous free span. A block of `n` bytes needs `n + 1`.
  pub fn largest_free_run(&self) -> usize {
    self.bitmap.largest_free_run()
  }

  /// Reserves `size` payload bytes plus one tag byte in the lowest free run
  /// that fits, and returns the payload address.
  ///
  /// On failure nothing is modified.
  pub fn allocate(
    &mut self,
    size: usize,
  ) -> Result<Address, AllocError> {
    if size == 0 {
      return Err(AllocError::InvalidSize);
    }
    if size > MAX_BLOCK_SIZE {
      return Err(AllocError::SizeTooLarge {
        size,
        max: MAX_BLOCK_SIZE,
      });
    }

    let run_len = size + TAG_SIZE;
    let start = match self.bitmap.find_free_run(run_len) {
      Some(start) => start,
      None => {
        return Err(AllocError::OutOfMemory {
          requested: run_len,
          largest_free: self.bitmap.largest_free_run(),
        });
      }
    };

    self.bitmap.set_range(start, start + run_len);

    let bytes = self.arena.bytes_mut();
    bytes[start] = size as u8;
    if self.zero_on_allocate {
      bytes[start + TAG_SIZE..start + run_len].fill(0);
    }

    Ok(Address::from(start + TAG_SIZE))
  }

  /// Frees the block whose payload starts at `address`.
  ///
  /// Fails with `InvalidAddress` for anything that is not the start of a live
  /// block, which covers double release and interior addresses. The tag byte
  /// is left as is.
  pub fn release(
    &mut self,
    address: Address,
  ) -> Result<(), ReleaseError> {
    let block = self.block(address).ok_or(ReleaseError::InvalidAddress {
      address: address.offset(),
    })?;

    self.bitmap.clear_range(block.start(), block.end());

    Ok(())
  }

  /// Looks up the live block starting at `address`.
  ///
  /// Walks the blocks from the start of the arena, so an address that lands
  /// inside a block's payload is never mistaken for a tag.
  pub fn block(
    &self,
    address: Address,
  ) -> Option<Block> {
    let tag = address.tag_index()?;
    if tag >= self.capacity() || !self.bitmap.is_set(tag) {
      return None;
    }

    self
      .blocks()
      .take_while(|block| block.start() <= tag)
      .find(|block| block.start() == tag)
  }

  pub fn payload(
    &self,
    address: Address,
  ) -> Option<&[u8]> {
    let block = self.block(address)?;
    Some(&self.arena.bytes()[block.address().offset()..block.end()])
  }

  pub fn payload_mut(
    &mut self,
    address: Address,
  ) -> Option<&mut [u8]> {
    let block = self.block(address)?;
    Some(&mut self.arena.bytes_mut()[block.address().offset()..block.end()])
  }

  /// Live blocks in address order.
  pub fn blocks(&self) -> Blocks<'_> {
    Blocks {
      allocator: self,
      index: 0,
    }
  }

  /// Releases every block at once.
  pub fn reset(&mut self) {
    self.bitmap.clear_all();
  }

  /// Snapshot of the bitmap groups. Never mutates.
  pub fn dump_state(&self) -> StateDump {
    StateDump {
      capacity: self.capacity(),
      groups: self.bitmap.groups().iter().copied().enumerate().collect(),
    }
  }
}

impl fmt::Debug for BlockAllocator {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    f.debug_struct("BlockAllocator")
      .field("capacity", &self.capacity())
      .field("used", &self.used())
      .field("backing", &self.backing())
      .finish()
  }
}

/// Iterator over live blocks, see [`BlockAllocator::blocks`].
pub struct Blocks<'a> {
  allocator: &'a BlockAllocator,
  index: usize,
}

impl Iterator for Blocks<'_> {
  type Item = Block;

  fn next(&mut self) -> Option<Block> {
    let capacity = self.allocator.capacity();

    while self.index < capacity {
      if !self.allocator.bitmap.is_set(self.index) {
        self.index += 1;
        continue;
      }

      // occupied runs are back-to-back blocks, each opened by its tag
      let size = self.allocator.arena.bytes()[self.index] as usize;
      let block = Block::new(Address::from(self.index + TAG_SIZE), size);
      self.index = block.end();
      return Some(block);
    }

    None
  }
}
