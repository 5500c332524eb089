//! Entry name conventions for zip archives.
//!
//! Zip archives store a flat namespace of entry names. Directories are a
//! convention layered on top: a directory marker is an entry whose name
//! ends with [`DELIMITER`]. Every directory-producing operation in this
//! crate passes names through [`normalize_directory_name`] first so that
//! `"foo"` and `"foo/"` refer to the same directory.

use std::collections::HashSet;

/// Entry name separator. Zip uses `/` regardless of platform.
pub const DELIMITER: char = '/';

/// Returns `path` with a trailing [`DELIMITER`] appended, unless it is
/// empty or already ends with one.
///
/// The empty string names the archive root and is returned unchanged.
///
/// # Examples
///
/// ```
/// use zipedit::archive_path::normalize_directory_name;
///
/// assert_eq!(normalize_directory_name(""), "");
/// assert_eq!(normalize_directory_name("abc"), "abc/");
/// assert_eq!(normalize_directory_name("abc/"), "abc/");
/// assert_eq!(normalize_directory_name("/"), "/");
/// ```
pub fn normalize_directory_name(path: &str) -> String {
    if path.is_empty() || path.ends_with(DELIMITER) {
        path.to_string()
    } else {
        let mut normalized = String::with_capacity(path.len() + 1);
        normalized.push_str(path);
        normalized.push(DELIMITER);
        normalized
    }
}

/// Returns `true` if `name` is a directory marker name.
#[inline]
pub fn is_directory_name(name: &str) -> bool {
    name.ends_with(DELIMITER)
}

/// Returns the normalized parent directory of an entry name.
///
/// Entries at the root have the empty parent.
///
/// ```
/// use zipedit::archive_path::parent_directory;
///
/// assert_eq!(parent_directory("a/b/c.txt"), "a/b/");
/// assert_eq!(parent_directory("a/b/"), "a/");
/// assert_eq!(parent_directory("top.txt"), "");
/// ```
pub fn parent_directory(name: &str) -> &str {
    let trimmed = name.strip_suffix(DELIMITER).unwrap_or(name);
    match trimmed.rfind(DELIMITER) {
        Some(idx) => &name[..=idx],
        None => "",
    }
}

/// Picks a name for a new entry that does not collide with `taken`.
///
/// Returns `wanted` if it is free. Otherwise a counter is inserted before
/// the extension of the final path segment (`dir/report.1.txt`,
/// `dir/report.2.txt`, ...) and the first free candidate is returned.
/// A leading dot is part of the base name, so `.profile` becomes
/// `.profile.1`.
pub fn unique_name(taken: &HashSet<String>, wanted: &str) -> String {
    if !taken.contains(wanted) {
        return wanted.to_string();
    }

    let dir = parent_directory(wanted);
    let file = &wanted[dir.len()..];
    let (base, ext) = match file.rfind('.') {
        Some(idx) if idx > 0 => (&file[..idx], &file[idx..]),
        _ => (file, ""),
    };

    let mut counter = 1u64;
    loop {
        let candidate = format!("{dir}{base}.{counter}{ext}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
