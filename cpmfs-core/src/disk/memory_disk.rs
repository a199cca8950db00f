//! In-memory disk implementation.

use std::fs;
use std::path::Path;

use super::block_device::BlockDevice;
use super::{BLOCK_SIZE, DIR_BLOCK, IMAGE_SIZE, NUM_BLOCKS};
use crate::dir::FREE_MARKER;
use crate::error::{FsError, FsResult};

/// Whole disk held in memory.
#[derive(Clone)]
pub struct MemoryDisk {
    data: Vec<u8>,
}

impl Default for MemoryDisk {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDisk {
    /// Zero-filled disk.
    pub fn new() -> Self {
        Self {
            data: vec![0; IMAGE_SIZE],
        }
    }

    /// Freshly formatted disk: every directory slot free.
    pub fn formatted() -> Self {
        let mut disk = Self::new();
        let start = DIR_BLOCK * BLOCK_SIZE;
        disk.data[start..start + BLOCK_SIZE].fill(FREE_MARKER);
        disk
    }

    /// Create from raw image bytes.
    pub fn from_image(image: Vec<u8>) -> FsResult<Self> {
        if image.len() != IMAGE_SIZE {
            return Err(FsError::ImageSize {
                expected: IMAGE_SIZE,
                actual: image.len(),
            });
        }
        Ok(Self { data: image })
    }

    /// Load an image file from disk.
    pub fn load_image(path: impl AsRef<Path>) -> FsResult<Self> {
        Self::from_image(fs::read(path)?)
    }

    /// Raw image bytes.
    pub fn image(&self) -> &[u8] {
        &self.data
    }

    /// Write the image to a file.
    pub fn save_image(&self, path: impl AsRef<Path>) -> FsResult<()> {
        fs::write(path, &self.data)?;
        Ok(())
    }

    fn range(block_id: usize, len: usize) -> FsResult<std::ops::Range<usize>> {
        if block_id >= NUM_BLOCKS {
            return Err(FsError::InvalidBlock(block_id));
        }
        if len != BLOCK_SIZE {
            return Err(FsError::BadBufferSize);
        }
        let start = block_id * BLOCK_SIZE;
        Ok(start..start + BLOCK_SIZE)
    }
}

impl BlockDevice for MemoryDisk {
    fn read_block(&self, block_id: usize, buf: &mut [u8]) -> FsResult<()> {
        let range = Self::range(block_id, buf.len())?;
        buf.copy_from_slice(&self.data[range]);
        Ok(())
    }

    fn write_block(&mut self, block_id: usize, buf: &[u8]) -> FsResult<()> {
        let range = Self::range(block_id, buf.len())?;
        self.data[range].copy_from_slice(buf);
        Ok(())
    }
}
