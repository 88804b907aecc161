use std::io;

use thiserror::Error;

/// Errors that may be returned while building an allocator.
#[derive(Debug, Error)]
pub enum InitError {
  #[error("invalid capacity {capacity}: need room for one tag byte and one payload byte")]
  InvalidCapacity { capacity: usize },

  #[error("failed to map arena storage")]
  MapFailed(#[source] io::Error),
}

impl PartialEq for InitError {
  fn eq(
    &self,
    other: &Self,
  ) -> bool {
    match (self, other) {
      (Self::InvalidCapacity { capacity: a }, Self::InvalidCapacity { capacity: b }) => a == b,
      (Self::MapFailed(a), Self::MapFailed(b)) => a.kind() == b.kind(),
      _ => false,
    }
  }
}

/// Errors that may be returned from an attempt to allocate a block.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocError {
  #[error("cannot allocate a zero-sized block")]
  InvalidSize,

  #[error("block size {size} does not fit in the size tag (max {max})")]
  SizeTooLarge { size: usize, max: usize },

  #[error("no free run of {requested} bytes (largest free run is {largest_free})")]
  OutOfMemory { requested: usize, largest_free: usize },
}

/// Errors that may be returned from an attempt to release a block.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReleaseError {
  #[error("address {address} does not start a live block")]
  InvalidAddress { address: usize },
}
