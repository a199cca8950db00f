//! 8.3 file name rules.

use super::{EXT_LEN, NAME_LEN};

/// Check that `name` is a legal `BASE[.EXT]` file name.
///
/// The base is 1-8 ASCII letters or digits, the extension 0-3. A name with
/// no dot has an empty extension.
pub fn is_legal_name(name: &str) -> bool {
    if name.is_empty() || name.len() > NAME_LEN + 1 + EXT_LEN {
        return false;
    }

    let (base, ext) = match name.find('.') {
        Some(pos) => (&name[..pos], &name[pos + 1..]),
        None => (name, ""),
    };

    if base.is_empty() || base.len() > NAME_LEN || ext.len() > EXT_LEN {
        return false;
    }

    base.bytes().chain(ext.bytes()).all(|b| b.is_ascii_alphanumeric())
}

/// Split a file name into the fixed-width, space-padded fields stored on disk.
///
/// The name is split at the first dot. Call `is_legal_name` first; overlong
/// components are truncated.
///
/// # Examples
/// ```
/// use cpmfs_core::normalize;
/// assert_eq!(normalize("FILE.TXT"), (*b"FILE    ", *b"TXT"));
/// assert_eq!(normalize("README"), (*b"README  ", *b"   "));
/// ```
pub fn normalize(name: &str) -> ([u8; NAME_LEN], [u8; EXT_LEN]) {
    let (base, ext) = match name.find('.') {
        Some(pos) => (&name[..pos], &name[pos + 1..]),
        None => (name, ""),
    };

    let mut fixed_name = [b' '; NAME_LEN];
    for (dst, src) in fixed_name.iter_mut().zip(base.bytes()) {
        *dst = src;
    }
    let mut fixed_ext = [b' '; EXT_LEN];
    for (dst, src) in fixed_ext.iter_mut().zip(ext.bytes()) {
        *dst = src;
    }

    (fixed_name, fixed_ext)
}
