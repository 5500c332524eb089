//! The edit log: pending edits plus pending removals.

use std::collections::{BTreeMap, HashSet};
use std::io::Read;

use super::operation::{ContentSource, Edit};
use super::prefix::PrefixMatcher;
use crate::archive_path::normalize_directory_name;

/// Original entries to leave out of the next commit.
#[derive(Debug, Clone, Default)]
pub(crate) struct Removals {
    exact: HashSet<String>,
    prefixes: PrefixMatcher,
}

impl Removals {
    /// Returns `true` if the original entry `name` must not be copied.
    pub(crate) fn covers(&self, name: &str) -> bool {
        self.exact.contains(name) || self.prefixes.matches(name)
    }
}

/// A batch of uncommitted edits.
///
/// Builder methods only record intent; nothing touches the archive until
/// the log is committed. Edits are kept in ascending target-name order,
/// which is the order they are merged into the output. A later edit
/// targeting the same name replaces the earlier one.
///
/// # Example
///
/// ```rust
/// use zipedit::edit::EditLog;
///
/// let mut log = EditLog::new();
/// log.add_bytes("docs/readme.txt", "hello")
///     .mkdir("empty")
///     .rename("old.txt", "new.txt")
///     .rmdir("tmp");
///
/// let targets: Vec<_> = log.edits().map(|e| e.target_path()).collect();
/// assert_eq!(targets, ["docs/readme.txt", "empty/", "new.txt"]);
/// assert!(log.is_removed("old.txt"));
/// assert!(log.is_removed("tmp/cache.bin"));
/// ```
#[derive(Debug, Default)]
pub struct EditLog {
    edits: BTreeMap<String, Edit>,
    removals: Removals,
}

impl EditLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a file entry at `path` with content from `source`,
    /// overwriting any existing entry of that name.
    pub fn add(&mut self, path: &str, source: impl Read + 'static) -> &mut Self {
        self.put(path, ContentSource::from_reader(source))
    }

    /// Queues a file entry at `path` with in-memory content.
    pub fn add_bytes(&mut self, path: &str, data: impl Into<Vec<u8>>) -> &mut Self {
        self.put(path, ContentSource::from_bytes(data))
    }

    fn put(&mut self, path: &str, source: ContentSource) -> &mut Self {
        self.removals.exact.insert(path.to_string());
        self.edits.insert(
            path.to_string(),
            Edit::Put {
                path: path.to_string(),
                source,
            },
        );
        self
    }

    /// Queues a directory marker at `path` (normalized to directory form).
    ///
    /// An existing marker of the same name is replaced. The empty path
    /// names the archive root, which always exists, so it queues nothing.
    pub fn mkdir(&mut self, path: &str) -> &mut Self {
        let path = normalize_directory_name(path);
        if path.is_empty() {
            return self;
        }
        self.removals.exact.insert(path.clone());
        self.edits.insert(path.clone(), Edit::Mkdir { path });
        self
    }

    /// Queues removal of the entry named exactly `path`.
    pub fn delete(&mut self, path: &str) -> &mut Self {
        self.removals.exact.insert(path.to_string());
        self
    }

    /// Queues removal of directory `path` and everything under it.
    ///
    /// Only original entries are removed; entries written by edits in the
    /// same batch are kept even when they fall under `path`.
    pub fn rmdir(&mut self, path: &str) -> &mut Self {
        self.removals.prefixes.add(path);
        self
    }

    /// Queues a rename of entry `from` to `to`.
    ///
    /// The entry is copied without recompression, keeping its timestamp.
    /// If `from` does not exist when the log is committed, the rename has
    /// no effect.
    pub fn rename(&mut self, from: &str, to: &str) -> &mut Self {
        self.removals.exact.insert(from.to_string());
        self.edits.insert(
            to.to_string(),
            Edit::Rename {
                from: from.to_string(),
                to: to.to_string(),
            },
        );
        self
    }

    /// Returns the queued edits in commit order.
    pub fn edits(&self) -> impl Iterator<Item = &Edit> {
        self.edits.values()
    }

    /// Returns `true` if an original entry named `name` would be left out
    /// of the next commit.
    pub fn is_removed(&self, name: &str) -> bool {
        self.removals.covers(name)
    }

    /// Returns the number of pending edits and removals.
    pub fn pending_edits(&self) -> usize {
        self.edits.len() + self.removals.exact.len() + self.removals.prefixes.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.pending_edits() == 0
    }

    /// Discards everything queued.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Moves the queued state out, leaving this log empty.
    pub(crate) fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    pub(crate) fn into_parts(self) -> (BTreeMap<String, Edit>, Removals) {
        (self.edits, self.removals)
    }
}
