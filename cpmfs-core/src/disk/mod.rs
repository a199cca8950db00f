//! Block storage for the simulated disk.
//!
//! - `BlockDevice`: the two primitives the directory core consumes
//! - `MemoryDisk`: in-memory medium with image load/save

mod block_device;
mod memory_disk;

pub use block_device::BlockDevice;
pub use memory_disk::MemoryDisk;

/// Size of one block in bytes.
pub const BLOCK_SIZE: usize = 1024;

/// Number of blocks on the medium. Block numbers in an extent are one byte.
pub const NUM_BLOCKS: usize = 256;

/// Total size of a disk image in bytes.
pub const IMAGE_SIZE: usize = BLOCK_SIZE * NUM_BLOCKS;

/// Block holding the directory.
pub const DIR_BLOCK: usize = 0;

/// One block of data.
pub type Block = [u8; BLOCK_SIZE];
