//! Helpers for building directory images in tests.

#![allow(dead_code)]

use cpmfs_core::{normalize, read_directory, BlockDevice, DirRecord, MemoryDisk};

/// A live file to place in the directory.
pub struct FileSpec<'a> {
    pub index: usize,
    pub name: &'a str,
    pub blocks: &'a [u8],
    pub rc: u8,
    pub bc: u8,
}

impl<'a> FileSpec<'a> {
    pub fn new(index: usize, name: &'a str, blocks: &'a [u8]) -> Self {
        Self {
            index,
            name,
            blocks,
            rc: 0,
            bc: 0,
        }
    }

    pub fn tail(mut self, rc: u8, bc: u8) -> Self {
        self.rc = rc;
        self.bc = bc;
        self
    }
}

/// Formatted disk with the given files in its directory.
pub fn disk_with(files: &[FileSpec<'_>]) -> MemoryDisk {
    let mut disk = MemoryDisk::formatted();
    let mut dir = read_directory(&disk).unwrap();
    for file in files {
        let (name, extension) = normalize(file.name);
        let mut rec = DirRecord {
            status: 0,
            rc: file.rc,
            bc: file.bc,
            ..Default::default()
        };
        rec.set_name(name, extension);
        rec.blocks[..file.blocks.len()].copy_from_slice(file.blocks);
        rec.encode(file.index, &mut dir);
    }
    disk.write_block(0, &dir).unwrap();
    disk
}
