//! BlockDevice trait - fixed-size block storage consumed by the directory core.

use crate::error::FsResult;

/// Block-addressed storage medium of `NUM_BLOCKS` blocks.
pub trait BlockDevice {
    /// Fill `buf` with the contents of block `block_id`.
    /// `buf.len()` must be equal to `BLOCK_SIZE`.
    fn read_block(&self, block_id: usize, buf: &mut [u8]) -> FsResult<()>;

    /// Persist `buf` as block `block_id`.
    /// `buf.len()` must be equal to `BLOCK_SIZE`.
    fn write_block(&mut self, block_id: usize, buf: &[u8]) -> FsResult<()>;
}
