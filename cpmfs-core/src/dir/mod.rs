//! Directory region of the disk.
//!
//! Block 0 holds `EXTENTS_PER_DIR` fixed-size extents. This module provides:
//! - `DirRecord`: codec for one extent
//! - 8.3 name validation and normalization
//! - lookup by name and directory listing

mod extent;
mod listing;
mod lookup;
mod name;

pub use extent::DirRecord;
pub use listing::{list, DirEntry};
pub use lookup::find_extent_with_name;
pub use name::{is_legal_name, normalize};

use crate::disk::BLOCK_SIZE;

/// Size of one directory extent in bytes.
pub const EXTENT_SIZE: usize = 32;

/// Block-number slots in one extent.
pub const BLOCKS_PER_EXTENT: usize = 16;

/// Extents packed into the directory block.
pub const EXTENTS_PER_DIR: usize = BLOCK_SIZE / EXTENT_SIZE;

/// Status byte of a free or deleted slot.
pub const FREE_MARKER: u8 = 0xE5;

/// Record size in CP/M (always 128 bytes).
pub const RECORD_SIZE: usize = 128;

/// Width of the name field.
pub const NAME_LEN: usize = 8;

/// Width of the extension field.
pub const EXT_LEN: usize = 3;
