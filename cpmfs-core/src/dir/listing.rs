//! Directory listing.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DirRecord, EXTENTS_PER_DIR};
use crate::disk::Block;

/// One live file in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    /// Directory slot the entry lives in.
    pub index: usize,
    /// `NAME.EXT` with padding removed.
    pub name: String,
    /// Size in bytes.
    pub size: usize,
}

impl fmt::Display for DirEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.size)
    }
}

/// List every live extent in slot order.
///
/// Takes a whole directory block; a shorter buffer does not type-check:
///
/// ```compile_fail
/// let short = [0u8; 40];
/// cpmfs_core::dir::list(&short);
/// ```
pub fn list(dir: &Block) -> Vec<DirEntry> {
    (0..EXTENTS_PER_DIR)
        .map(|i| (i, DirRecord::decode(i, dir)))
        .filter(|(_, rec)| !rec.is_free())
        .map(|(index, rec)| DirEntry {
            index,
            name: rec.display_name(),
            size: rec.size(),
        })
        .collect()
}
