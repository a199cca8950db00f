//! Directory operations over a block device.
//!
//! Each operation reads the directory block once, works on that copy, and
//! (when mutating) writes it back in a single `write_block` call. A rejected
//! operation performs no writes.
//!
//! Nothing here makes the read-modify-write of the directory block atomic
//! with respect to other processes sharing the same image.

use log::info;

use crate::dir::{
    self, find_extent_with_name, is_legal_name, normalize, DirEntry, DirRecord, EXTENTS_PER_DIR,
    FREE_MARKER,
};
use crate::disk::{Block, BlockDevice, BLOCK_SIZE, DIR_BLOCK};
use crate::error::{FsError, FsResult};
use crate::free_list::FreeList;

/// Read the directory block.
pub fn read_directory<D: BlockDevice + ?Sized>(disk: &D) -> FsResult<Block> {
    let mut dir = [0u8; BLOCK_SIZE];
    disk.read_block(DIR_BLOCK, &mut dir)?;
    Ok(dir)
}

/// List all live files on the disk.
pub fn list_directory<D: BlockDevice + ?Sized>(disk: &D) -> FsResult<Vec<DirEntry>> {
    Ok(dir::list(&read_directory(disk)?))
}

/// Delete `name`, releasing its blocks in `free_list`.
///
/// Only the status byte changes on disk; the allocation map of the freed
/// extent is left as it was.
pub fn delete_file<D: BlockDevice + ?Sized>(
    disk: &mut D,
    free_list: &mut FreeList,
    name: &str,
) -> FsResult<()> {
    let mut dir = read_directory(disk)?;
    let index =
        find_extent_with_name(name, &dir).ok_or_else(|| FsError::NotFound(name.to_string()))?;

    let mut rec = DirRecord::decode(index, &dir);
    rec.status = FREE_MARKER;
    for block in rec.used_blocks() {
        free_list.mark_free(block as usize);
    }

    rec.encode(index, &mut dir);
    disk.write_block(DIR_BLOCK, &dir)?;

    info!("deleted {} (extent {})", name, index);
    Ok(())
}

/// Rename `old_name` to `new_name`. Only the name fields of the extent change.
pub fn rename_file<D: BlockDevice + ?Sized>(
    disk: &mut D,
    old_name: &str,
    new_name: &str,
) -> FsResult<()> {
    for name in [old_name, new_name] {
        if !is_legal_name(name) {
            return Err(FsError::InvalidName(name.to_string()));
        }
    }

    let mut dir = read_directory(disk)?;
    let index = find_extent_with_name(old_name, &dir)
        .ok_or_else(|| FsError::NotFound(old_name.to_string()))?;
    if find_extent_with_name(new_name, &dir).is_some() {
        return Err(FsError::NameCollision(new_name.to_string()));
    }

    let mut rec = DirRecord::decode(index, &dir);
    let (name, extension) = normalize(new_name);
    rec.set_name(name, extension);

    rec.encode(index, &mut dir);
    disk.write_block(DIR_BLOCK, &dir)?;

    info!("renamed {} -> {} (extent {})", old_name, new_name, index);
    Ok(())
}

/// Filesystem handle owning a device and the free-block tracker for it.
pub struct CpmFs<D: BlockDevice> {
    disk: D,
    free_list: FreeList,
}

impl<D: BlockDevice> CpmFs<D> {
    /// Open a device, building the free list from its directory.
    pub fn new(disk: D) -> FsResult<Self> {
        let free_list = FreeList::from_directory(&read_directory(&disk)?);
        Ok(Self { disk, free_list })
    }

    /// Rebuild the free list after the directory changed behind our back.
    pub fn rebuild_free_list(&mut self) -> FsResult<()> {
        let dir = read_directory(&self.disk)?;
        self.free_list.rebuild(&dir);
        Ok(())
    }

    /// Current free-block tracker.
    pub fn free_list(&self) -> &FreeList {
        &self.free_list
    }

    /// List all live files.
    pub fn dir(&self) -> FsResult<Vec<DirEntry>> {
        list_directory(&self.disk)
    }

    /// Extent index of `name`, if it exists.
    pub fn find(&self, name: &str) -> FsResult<Option<usize>> {
        Ok(find_extent_with_name(name, &read_directory(&self.disk)?))
    }

    /// Decoded extent at `index`.
    pub fn record(&self, index: usize) -> FsResult<DirRecord> {
        if index >= EXTENTS_PER_DIR {
            return Err(FsError::InvalidExtent(index));
        }
        Ok(DirRecord::decode(index, &read_directory(&self.disk)?))
    }

    /// Delete a file.
    pub fn delete(&mut self, name: &str) -> FsResult<()> {
        delete_file(&mut self.disk, &mut self.free_list, name)
    }

    /// Rename a file.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> FsResult<()> {
        rename_file(&mut self.disk, old_name, new_name)
    }

    /// Get the underlying device.
    pub fn device(&self) -> &D {
        &self.disk
    }

    /// Mutable access to the device. Directory changes made through it are
    /// not seen by the free list until `rebuild_free_list`.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.disk
    }

    /// Give back the underlying device.
    pub fn into_device(self) -> D {
        self.disk
    }
}
