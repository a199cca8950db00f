//! Name lookup over the directory block.

use log::debug;

use super::{is_legal_name, normalize, DirRecord, EXTENTS_PER_DIR};
use crate::disk::Block;

/// Find the extent holding `name`.
///
/// Returns `None` for an illegal name or when no live extent matches. With
/// duplicate entries the lowest slot wins.
///
/// ```compile_fail
/// cpmfs_core::find_extent_with_name("A", &[0u8; 40]);
/// ```
pub fn find_extent_with_name(name: &str, dir: &Block) -> Option<usize> {
    if !is_legal_name(name) {
        debug!("lookup rejected illegal name {:?}", name);
        return None;
    }

    let (fixed_name, fixed_ext) = normalize(name);
    let found = (0..EXTENTS_PER_DIR).find(|&i| {
        let rec = DirRecord::decode(i, dir);
        !rec.is_free() && rec.matches(&fixed_name, &fixed_ext)
    });

    debug!("lookup {} -> {:?}", name, found);
    found
}
