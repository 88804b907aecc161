//! # bitarena - A Fixed-Capacity Bitmap Arena Allocator
//!
//! This crate provides a **first-fit block allocator** over a single fixed-size
//! byte arena. Occupancy is tracked one bit per arena byte, and every block
//! carries its own size in a tag byte so it can be released by address alone.
//!
//! ## Overview
//!
//! ```text
//!   Arena and bitmap side by side:
//!
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                              ARENA                                   │
//!   │                                                                      │
//!   │   ┌───┬─────────┬───┬─────┬───────────┬───┬───┬─────────────────┐    │
//!   │   │ 3 │ payload │ 2 │ pay │   free    │ 1 │ p │      free       │    │
//!   │   └───┴─────────┴───┴─────┴───────────┴───┴───┴─────────────────┘    │
//!   │     ▲                                                                │
//!   │     └── tag byte: payload size                                       │
//!   │                                                                      │
//!   │   bitmap: 1 1 1 1 1 1 1   0 0 0 0 0   1 1   0 0 0 0 0 0 0 0 0        │
//!   │                                                                      │
//!   └──────────────────────────────────────────────────────────────────────┘
//!
//!   allocate(n) claims the lowest run of n + 1 free bits.
//!   release(addr) reads the tag at addr - 1 and frees that run.
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   bitarena
//!   ├── groups     - Bit group sizing (group_count!)
//!   ├── block      - Address, Block and tag constants
//!   ├── bitmap     - AllocationBitmap: packed occupancy bits, run search
//!   ├── arena      - Arena storage (heap or mmap)
//!   ├── config     - ArenaConfig builder
//!   ├── errors     - InitError, AllocError, ReleaseError
//!   └── allocator  - BlockAllocator implementation
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use bitarena::BlockAllocator;
//!
//! let mut allocator = BlockAllocator::new(64).unwrap();
//!
//! let address = allocator.allocate(5).unwrap();
//! allocator.payload_mut(address).unwrap().copy_from_slice(b"hello");
//! assert_eq!(allocator.payload(address).unwrap(), b"hello");
//!
//! // tag + payload
//! assert_eq!(allocator.used(), 6);
//!
//! allocator.release(address).unwrap();
//! assert!(allocator.release(address).is_err());
//! ```
//!
//! ## Block Layout
//!
//! ```text
//!   Single Allocation:
//!   ┌───────────┬────────────────────────────────┐
//!   │  Tag      │         User Data              │
//!   │ ┌───────┐ │  ┌──────────────────────────┐  │
//!   │ │ size  │ │  │     size bytes usable    │  │
//!   │ └───────┘ │  └──────────────────────────┘  │
//!   │  1 byte   │                                │
//!   └───────────┴────────────────────────────────┘
//!               ▲
//!               └── Address returned to user
//! ```
//!
//! A tag is a single byte, so one block holds at most 255 bytes.
//!
//! ## Limitations
//!
//! - **Single-threaded only**: wrap the whole allocator in one lock if shared
//! - **Fixed size**: the arena never grows or shrinks
//! - **Byte granularity**: no alignment beyond one byte
//! - **Linear search**: allocate and release are O(capacity)

pub mod groups;

mod allocator;
mod arena;
mod bitmap;
mod block;
mod config;
mod errors;

pub use allocator::{BlockAllocator, Blocks, StateDump, print_state};
pub use arena::{Arena, Backing};
pub use block::{Address, Block, MAX_BLOCK_SIZE, MIN_CAPACITY, TAG_SIZE};
pub use config::{ArenaConfig, ArenaConfigBuilder};
pub use errors::{AllocError, InitError, ReleaseError};
