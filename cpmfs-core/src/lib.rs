//! CP/M Flat Filesystem Directory Core
//!
//! This crate implements the directory side of a simulated CP/M disk:
//! - Directory extent codec and 8.3 name handling
//! - Free-block tracking rebuilt from the directory
//! - Listing, lookup, delete and rename
//!
//! # Architecture
//!
//! The core only talks to storage through two primitives:
//! - `BlockDevice`: read or write one fixed-size block by number
//! - `MemoryDisk`: in-memory device with disk image load/save
//! - `CpmFs`: owns a device plus its `FreeList` and runs the operations

pub mod cpmfs;
pub mod dir;
pub mod disk;
pub mod error;
pub mod free_list;

pub use cpmfs::{delete_file, list_directory, read_directory, rename_file, CpmFs};
pub use dir::{find_extent_with_name, is_legal_name, normalize, DirEntry, DirRecord};
pub use disk::{Block, BlockDevice, MemoryDisk, BLOCK_SIZE, NUM_BLOCKS};
pub use error::{FsError, FsResult};
pub use free_list::{FreeList, FreeListSnapshot};
