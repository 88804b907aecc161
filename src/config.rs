use crate::arena::Backing;

/// Construction parameters for a [`BlockAllocator`](crate::BlockAllocator).
///
/// ```
/// use bitarena::{ArenaConfig, Backing};
///
/// let config = ArenaConfig::builder()
///   .capacity(256)
///   .backing(Backing::Heap)
///   .zero_on_allocate(true)
///   .build();
///
/// assert_eq!(config.capacity, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaConfig {
  /// Arena size in bytes. Every block costs its size plus one tag byte.
  pub capacity: usize,
  /// Storage the arena bytes live in.
  pub backing: Backing,
  /// Zero the payload of each block as it is handed out.
  pub zero_on_allocate: bool,
}

impl Default for ArenaConfig {
  fn default() -> Self {
    Self {
      capacity: 64,
      backing: Backing::Heap,
      zero_on_allocate: false,
    }
  }
}

impl ArenaConfig {
  pub fn builder() -> ArenaConfigBuilder {
    ArenaConfigBuilder(Self::default())
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      capacity,
      ..Self::default()
    }
  }
}

/// Fluent builder for [`ArenaConfig`].
pub struct ArenaConfigBuilder(ArenaConfig);

impl ArenaConfigBuilder {
  pub fn capacity(
    mut self,
    bytes: usize,
  ) -> Self {
    self.0.capacity = bytes;
    self
  }

  pub fn backing(
    mut self,
    backing: Backing,
  ) -> Self {
    self.0.backing = backing;
    self
  }

  pub fn zero_on_allocate(
    mut self,
    zero: bool,
  ) -> Self {
    self.0.zero_on_allocate = zero;
    self
  }

  pub fn build(self) -> ArenaConfig {
    self.0
  }
}
