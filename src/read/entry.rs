//! Archive entry type.

use crate::archive_path::is_directory_name;
use crate::timestamp::Timestamp;

/// An entry in a zip archive.
///
/// Entries are snapshots of committed archive state. Directory entries may
/// also be *synthesized* by directory-style queries when an archive holds
/// `a/b.txt` without an explicit `a/` marker; those carry no archive index.
///
/// This struct is marked `#[non_exhaustive]` to allow adding new fields
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Entry {
    /// The entry name within the archive, using `/` as separator.
    pub name: String,
    /// Whether this entry is a directory (its name ends with `/`).
    pub is_directory: bool,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Compressed size in bytes.
    pub compressed_size: u64,
    /// CRC-32 of the uncompressed content.
    pub crc32: u32,
    /// Last modification time, if recorded.
    pub modified: Option<Timestamp>,
    /// Whether this entry was fabricated by a directory query.
    pub is_synthesized: bool,
    /// Position in the archive's central directory.
    pub(crate) index: Option<usize>,
}

impl Entry {
    /// Creates an entry for archive position `index`.
    pub(crate) fn from_archive(
        index: usize,
        name: String,
        size: u64,
        compressed_size: u64,
        crc32: u32,
        modified: Option<Timestamp>,
    ) -> Self {
        Self {
            is_directory: is_directory_name(&name),
            name,
            size,
            compressed_size,
            crc32,
            modified,
            is_synthesized: false,
            index: Some(index),
        }
    }

    /// Creates a synthesized directory entry named `name` (already
    /// normalized), stamped with `modified`.
    pub(crate) fn synthesized_directory(name: String, modified: Option<Timestamp>) -> Self {
        Self {
            name,
            is_directory: true,
            size: 0,
            compressed_size: 0,
            crc32: 0,
            modified,
            is_synthesized: true,
            index: None,
        }
    }

    /// Returns the entry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the position of this entry in the archive, or `None` for
    /// synthesized entries.
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}
