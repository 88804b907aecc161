#[cfg(unix)]
use std::{io, ptr, slice};

use crate::errors::InitError;

/// Where the arena's bytes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backing {
  /// A boxed slice on the global heap.
  #[default]
  Heap,
  /// An anonymous private mapping obtained with `mmap(2)`.
  #[cfg(unix)]
  Mapped,
}

/// Anonymous read/write mapping, unmapped on drop.
#[cfg(unix)]
struct MappedRegion {
  base: *mut u8,
  len: usize,
}

#[cfg(unix)]
impl MappedRegion {
  fn new(len: usize) -> io::Result<Self> {
    let address = unsafe {
      libc::mmap(
        ptr::null_mut(),
        len,
        libc::PROT_READ | libc::PROT_WRITE,
        libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
        -1,
        0,
      )
    };

    if address == libc::MAP_FAILED {
      return Err(io::Error::last_os_error());
    }

    // anonymous mappings are zero-filled by the kernel
    Ok(Self {
      base: address.cast::<u8>(),
      len,
    })
  }

  fn as_slice(&self) -> &[u8] {
    unsafe { slice::from_raw_parts(self.base, self.len) }
  }

  fn as_mut_slice(&mut self) -> &mut [u8] {
    unsafe { slice::from_raw_parts_mut(self.base, self.len) }
  }
}

// The mapping is owned by exactly one region and only reached through it.
#[cfg(unix)]
unsafe impl Send for MappedRegion {}

#[cfg(unix)]
impl Drop for MappedRegion {
  fn drop(&mut self) {
    unsafe {
      libc::munmap(self.base.cast::<libc::c_void>(), self.len);
    }
  }
}

enum Storage {
  Heap(Box<[u8]>),
  #[cfg(unix)]
  Mapped(MappedRegion),
}

/// Fixed-length byte buffer owned by one allocator.
///
/// The length never changes after construction.
pub struct Arena {
  storage: Storage,
}

impl Arena {
  pub fn new(
    capacity: usize,
    backing: Backing,
  ) -> Result<Self, InitError> {
    let storage = match backing {
      Backing::Heap => Storage::Heap(vec![0u8; capacity].into_boxed_slice()),
      #[cfg(unix)]
      Backing::Mapped => {
        Storage::Mapped(MappedRegion::new(capacity).map_err(InitError::MapFailed)?)
      }
    };

    Ok(Self { storage })
  }

  pub fn capacity(&self) -> usize {
    self.bytes().len()
  }

  pub fn backing(&self) -> Backing {
    match self.storage {
      Storage::Heap(_) => Backing::Heap,
      #[cfg(unix)]
      Storage::Mapped(_) => Backing::Mapped,
    }
  }

  pub fn bytes(&self) -> &[u8] {
    match &self.storage {
      Storage::Heap(buf) => buf,
      #[cfg(unix)]
      Storage::Mapped(region) => region.as_slice(),
    }
  }

  pub fn bytes_mut(&mut self) -> &mut [u8] {
    match &mut self.storage {
      Storage::Heap(buf) => buf,
      #[cfg(unix)]
      Storage::Mapped(region) => region.as_mut_slice(),
    }
  }
}
