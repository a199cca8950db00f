//! Free-block tracker.
//!
//! A derived cache of which blocks are in use, rebuilt from the directory
//! block. It is never persisted and must be rebuilt whenever the directory
//! changes through a path other than `CpmFs`.

use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::dir::{DirRecord, EXTENTS_PER_DIR};
use crate::disk::{Block, DIR_BLOCK, NUM_BLOCKS};

/// Glyphs per row of the rendered grid.
const GRID_WIDTH: usize = 16;

/// Block usage map: `true` means free.
#[derive(Clone, PartialEq, Eq)]
pub struct FreeList {
    free: [bool; NUM_BLOCKS],
}

impl Default for FreeList {
    fn default() -> Self {
        Self::new()
    }
}

impl FreeList {
    /// Every block free except the directory block.
    pub fn new() -> Self {
        let mut free = [true; NUM_BLOCKS];
        free[DIR_BLOCK] = false;
        Self { free }
    }

    /// Build a tracker consistent with the given directory block.
    ///
    /// ```compile_fail
    /// cpmfs_core::FreeList::from_directory(&[]);
    /// ```
    pub fn from_directory(dir: &Block) -> Self {
        let mut list = Self::new();
        list.rebuild(dir);
        list
    }

    /// Recompute usage from every live extent in `dir`.
    pub fn rebuild(&mut self, dir: &Block) {
        self.free = [true; NUM_BLOCKS];
        self.free[DIR_BLOCK] = false;

        for i in 0..EXTENTS_PER_DIR {
            let rec = DirRecord::decode(i, dir);
            if rec.is_free() {
                continue;
            }
            for block in rec.used_blocks() {
                let block = block as usize;
                if block == DIR_BLOCK {
                    warn!("extent {} references the directory block", i);
                    continue;
                }
                if !self.free[block] {
                    warn!("block {} is claimed by more than one extent", block);
                }
                self.free[block] = false;
            }
        }

        debug!("free list rebuilt: {} of {} blocks free", self.free_count(), NUM_BLOCKS);
    }

    /// Whether `block` is free. Out-of-range blocks are never free.
    pub fn is_free(&self, block: usize) -> bool {
        self.free.get(block).copied().unwrap_or(false)
    }

    /// Release `block`. The directory block stays reserved.
    pub fn mark_free(&mut self, block: usize) {
        if block == DIR_BLOCK {
            warn!("refusing to free the directory block");
            return;
        }
        if let Some(slot) = self.free.get_mut(block) {
            *slot = true;
        }
    }

    /// Claim `block`.
    pub fn mark_used(&mut self, block: usize) {
        if let Some(slot) = self.free.get_mut(block) {
            *slot = false;
        }
    }

    /// Number of free blocks.
    pub fn free_count(&self) -> usize {
        self.free.iter().filter(|&&f| f).count()
    }

    /// Block numbers currently in use, ascending.
    pub fn used_blocks(&self) -> Vec<usize> {
        (0..NUM_BLOCKS).filter(|&b| !self.free[b]).collect()
    }

    /// Serializable summary of the tracker.
    pub fn snapshot(&self) -> FreeListSnapshot {
        let used = self.used_blocks();
        FreeListSnapshot {
            total: NUM_BLOCKS,
            free: NUM_BLOCKS - used.len(),
            used,
        }
    }
}

/// Renders the 16x16 grid: `*` in use, `.` free.
impl fmt::Display for FreeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FREE BLOCK LIST: (* means in-use)")?;
        for (row, chunk) in self.free.chunks(GRID_WIDTH).enumerate() {
            write!(f, "{:02x}: ", row * GRID_WIDTH)?;
            for &free in chunk {
                write!(f, "{} ", if free { '.' } else { '*' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FreeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreeList")
            .field("free", &self.free_count())
            .field("used", &self.used_blocks())
            .finish()
    }
}

/// Block usage summary for machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeListSnapshot {
    pub total: usize,
    pub free: usize,
    pub used: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dir::FREE_MARKER;
    use crate::disk::BLOCK_SIZE;

    fn live(blocks: &[u8]) -> DirRecord {
        let mut rec = DirRecord {
            status: 0,
            ..Default::default()
        };
        rec.blocks[..blocks.len()].copy_from_slice(blocks);
        rec
    }

    #[test]
    fn test_new_reserves_directory() {
        let list = FreeList::new();
        assert!(!list.is_free(0));
        assert!(list.is_free(1));
        assert_eq!(list.free_count(), NUM_BLOCKS - 1);
    }

    #[test]
    fn test_rebuild() {
        let mut dir = [FREE_MARKER; BLOCK_SIZE];
        live(&[1, 2, 3]).encode(0, &mut dir);
        live(&[200, 255]).encode(31, &mut dir);

        let mut deleted = live(&[9, 10]);
        deleted.status = FREE_MARKER;
        deleted.encode(5, &mut dir);

        let list = FreeList::from_directory(&dir);
        assert_eq!(list.used_blocks(), vec![0, 1, 2, 3, 200, 255]);
        assert!(list.is_free(9));
        assert!(list.is_free(10));
    }

    #[test]
    fn test_rebuild_discards_stale_state() {
        let mut dir = [FREE_MARKER; BLOCK_SIZE];
        live(&[4]).encode(0, &mut dir);

        let mut list = FreeList::new();
        list.mark_used(50);
        list.rebuild(&dir);
        assert!(list.is_free(50));
        assert!(!list.is_free(4));
    }

    #[test]
    fn test_mark_free_keeps_directory() {
        let mut list = FreeList::new();
        list.mark_free(0);
        assert!(!list.is_free(0));

        list.mark_used(7);
        assert!(!list.is_free(7));
        list.mark_free(7);
        assert!(list.is_free(7));
    }

    #[test]
    fn test_out_of_range() {
        let mut list = FreeList::new();
        list.mark_free(NUM_BLOCKS + 5);
        list.mark_used(NUM_BLOCKS + 5);
        assert!(!list.is_free(NUM_BLOCKS + 5));
    }

    #[test]
    fn test_render() {
        let mut list = FreeList::new();
        list.mark_used(17);
        let text = list.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 17);
        assert_eq!(lines[0], "FREE BLOCK LIST: (* means in-use)");
        assert_eq!(lines[1], "00: * . . . . . . . . . . . . . . . ");
        assert_eq!(lines[2], "10: . * . . . . . . . . . . . . . . ");
        assert!(lines[16].starts_with("f0: "));
    }

    #[test]
    fn test_snapshot() {
        let mut list = FreeList::new();
        list.mark_used(3);
        let snap = list.snapshot();
        assert_eq!(snap.total, 256);
        assert_eq!(snap.free, 254);
        assert_eq!(snap.used, vec![0, 3]);
    }
}
