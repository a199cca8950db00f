//! Directory extent codec.
//!
//! Layout (32 bytes):
//! - Byte 0: Status (0xE5 = free slot, anything else = live entry)
//! - Bytes 1-8: Filename (space-padded)
//! - Bytes 9-11: Extension (space-padded)
//! - Byte 12: Extent number, low bits (XL)
//! - Byte 13: Byte count in the last sector of the final block (BC)
//! - Byte 14: Extent number, high bits (XH)
//! - Byte 15: Record count in the final block (RC)
//! - Bytes 16-31: Allocation map, one block number per byte (0 = unused)

use super::{
    BLOCKS_PER_EXTENT, EXTENTS_PER_DIR, EXTENT_SIZE, EXT_LEN, FREE_MARKER, NAME_LEN, RECORD_SIZE,
};
use crate::disk::{Block, BLOCK_SIZE};

const STATUS: usize = 0x00;
const NAME: usize = 0x01;
const EXT: usize = 0x09;
const XL: usize = 0x0C;
const BC: usize = 0x0D;
const XH: usize = 0x0E;
const RC: usize = 0x0F;
const BLOCKS: usize = 0x10;

/// Decoded copy of one directory extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirRecord {
    pub status: u8,
    pub name: [u8; NAME_LEN],
    pub extension: [u8; EXT_LEN],
    pub xl: u8,
    pub bc: u8,
    pub xh: u8,
    pub rc: u8,
    pub blocks: [u8; BLOCKS_PER_EXTENT],
}

impl Default for DirRecord {
    /// A free slot, as a freshly formatted directory holds.
    fn default() -> Self {
        Self {
            status: FREE_MARKER,
            name: [b' '; NAME_LEN],
            extension: [b' '; EXT_LEN],
            xl: 0,
            bc: 0,
            xh: 0,
            rc: 0,
            blocks: [0; BLOCKS_PER_EXTENT],
        }
    }
}

impl DirRecord {
    /// Read extent `index` out of the directory block. No validation is done.
    ///
    /// # Panics
    /// If `index >= EXTENTS_PER_DIR`.
    pub fn decode(index: usize, dir: &Block) -> Self {
        debug_assert!(index < EXTENTS_PER_DIR);
        let e = &dir[index * EXTENT_SIZE..(index + 1) * EXTENT_SIZE];

        let mut name = [0u8; NAME_LEN];
        name.copy_from_slice(&e[NAME..NAME + NAME_LEN]);
        let mut extension = [0u8; EXT_LEN];
        extension.copy_from_slice(&e[EXT..EXT + EXT_LEN]);
        let mut blocks = [0u8; BLOCKS_PER_EXTENT];
        blocks.copy_from_slice(&e[BLOCKS..BLOCKS + BLOCKS_PER_EXTENT]);

        Self {
            status: e[STATUS],
            name,
            extension,
            xl: e[XL],
            bc: e[BC],
            xh: e[XH],
            rc: e[RC],
            blocks,
        }
    }

    /// Overwrite extent `index` of the directory block with this record.
    ///
    /// # Panics
    /// If `index >= EXTENTS_PER_DIR`.
    pub fn encode(&self, index: usize, dir: &mut Block) {
        debug_assert!(index < EXTENTS_PER_DIR);
        let e = &mut dir[index * EXTENT_SIZE..(index + 1) * EXTENT_SIZE];

        e[STATUS] = self.status;
        e[NAME..NAME + NAME_LEN].copy_from_slice(&self.name);
        e[EXT..EXT + EXT_LEN].copy_from_slice(&self.extension);
        e[XL] = self.xl;
        e[BC] = self.bc;
        e[XH] = self.xh;
        e[RC] = self.rc;
        e[BLOCKS..BLOCKS + BLOCKS_PER_EXTENT].copy_from_slice(&self.blocks);
    }

    /// True if the slot is free or deleted.
    pub fn is_free(&self) -> bool {
        self.status == FREE_MARKER
    }

    /// Non-zero block numbers in the allocation map.
    pub fn used_blocks(&self) -> impl Iterator<Item = u8> + '_ {
        self.blocks.iter().copied().filter(|&b| b != 0)
    }

    /// File size in bytes.
    ///
    /// Every allocated block but the last is full; RC and BC describe only
    /// the last one.
    pub fn size(&self) -> usize {
        let used = self.used_blocks().count();
        let tail = self.rc as usize * RECORD_SIZE + self.bc as usize;
        if used > 1 {
            (used - 1) * BLOCK_SIZE + tail
        } else {
            tail
        }
    }

    /// Name and extension with padding removed, as `NAME.EXT`.
    pub fn display_name(&self) -> String {
        format!("{}.{}", trim_field(&self.name), trim_field(&self.extension))
    }

    /// Compare the fixed-width name fields byte for byte.
    pub fn matches(&self, name: &[u8; NAME_LEN], extension: &[u8; EXT_LEN]) -> bool {
        self.name == *name && self.extension == *extension
    }

    /// Replace the name fields, leaving everything else alone.
    pub fn set_name(&mut self, name: [u8; NAME_LEN], extension: [u8; EXT_LEN]) {
        self.name = name;
        self.extension = extension;
    }
}

/// Field text up to the first NUL, with trailing spaces removed.
fn trim_field(field: &[u8]) -> String {
    field
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| b as char)
        .collect::<String>()
        .trim_end_matches(' ')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DirRecord {
        DirRecord {
            status: 0,
            name: *b"FILE    ",
            extension: *b"TXT",
            xl: 1,
            bc: 10,
            xh: 2,
            rc: 3,
            blocks: [5, 6, 7, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        }
    }

    #[test]
    fn test_encode_layout() {
        let mut dir = [FREE_MARKER; BLOCK_SIZE];
        sample().encode(1, &mut dir);

        let e = &dir[32..64];
        assert_eq!(e[0], 0);
        assert_eq!(&e[1..9], b"FILE    ");
        assert_eq!(&e[9..12], b"TXT");
        assert_eq!(&e[12..16], &[1, 10, 2, 3]);
        assert_eq!(&e[16..19], &[5, 6, 7]);
        assert!(e[19..32].iter().all(|&b| b == 0));

        // Neighbours untouched
        assert!(dir[..32].iter().all(|&b| b == FREE_MARKER));
        assert!(dir[64..].iter().all(|&b| b == FREE_MARKER));
    }

    #[test]
    fn test_round_trip_every_slot() {
        let mut dir = [FREE_MARKER; BLOCK_SIZE];
        for i in 0..EXTENTS_PER_DIR {
            let mut rec = sample();
            rec.xl = i as u8;
            rec.blocks[15] = (i + 1) as u8;
            rec.encode(i, &mut dir);
            assert_eq!(DirRecord::decode(i, &dir), rec);
        }
        // Later writes did not clobber earlier slots
        for i in 0..EXTENTS_PER_DIR {
            let rec = DirRecord::decode(i, &dir);
            assert_eq!(rec.xl, i as u8);
            assert_eq!(rec.blocks[15], (i + 1) as u8);
        }
    }

    #[test]
    fn test_decode_does_not_validate() {
        let mut dir = [0u8; BLOCK_SIZE];
        dir[..EXTENT_SIZE].copy_from_slice(&[0x7Fu8; EXTENT_SIZE]);
        let rec = DirRecord::decode(0, &dir);
        assert_eq!(rec.status, 0x7F);
        assert_eq!(rec.name, [0x7F; NAME_LEN]);
        assert_eq!(rec.blocks, [0x7F; BLOCKS_PER_EXTENT]);
    }

    #[test]
    fn test_size() {
        // 2 full blocks + 3 records + 10 bytes
        assert_eq!(sample().size(), 2442);

        let mut single = sample();
        single.blocks = [9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(single.size(), 3 * 128 + 10);

        let mut empty = sample();
        empty.blocks = [0; BLOCKS_PER_EXTENT];
        assert_eq!(empty.size(), 394);
    }

    #[test]
    fn test_size_ignores_gaps() {
        let mut rec = sample();
        rec.blocks = [5, 0, 6, 0, 7, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 8];
        rec.rc = 0;
        rec.bc = 0;
        assert_eq!(rec.size(), 3 * BLOCK_SIZE);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(sample().display_name(), "FILE.TXT");

        let mut rec = sample();
        rec.name = *b"ABCDEFGH";
        rec.extension = *b"A  ";
        assert_eq!(rec.display_name(), "ABCDEFGH.A");

        rec.extension = *b"   ";
        assert_eq!(rec.display_name(), "ABCDEFGH.");
    }

    #[test]
    fn test_default_is_free() {
        let rec = DirRecord::default();
        assert!(rec.is_free());
        assert_eq!(rec.used_blocks().count(), 0);
    }
}
