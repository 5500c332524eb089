//! Directory-style views over a flat zip namespace.
//!
//! Zip archives have no real directories: `a/b/c.txt` can exist without
//! any `a/` or `a/b/` entry. [`DirectoryView`] answers filesystem-style
//! questions anyway, fabricating ("synthesizing") directory entries for
//! directories that are only implied by deeper names.
//!
//! # Example
//!
//! ```rust,no_run
//! use zipedit::fs::DirectoryView;
//! use zipedit::read::ArchiveReader;
//!
//! let reader = ArchiveReader::open("archive.zip");
//! let view = DirectoryView::new(reader.entries());
//!
//! // Immediate children of the root
//! for entry in view.list("") {
//!     println!("{}{}", entry.name, if entry.is_synthesized { " (implied)" } else { "" });
//! }
//!
//! // Attributes of a file or directory
//! if let Some(entry) = view.lookup("docs") {
//!     println!("docs is a directory: {}", entry.is_directory);
//! }
//! ```

use std::collections::HashSet;

use crate::archive_path::{DELIMITER, normalize_directory_name};
use crate::read::Entry;

/// Read-only directory queries over a list of archive entries.
///
/// Entries are expected in archive order, which for archives written by
/// this crate is ascending name order. Results follow that order.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryView<'a> {
    entries: &'a [Entry],
}

impl<'a> DirectoryView<'a> {
    /// Creates a view over `entries`.
    pub fn new(entries: &'a [Entry]) -> Self {
        Self { entries }
    }

    /// Lists the immediate children of directory `prefix`.
    ///
    /// `prefix` is normalized first; the empty prefix lists the root.
    /// Direct children (files and explicit directory markers) are returned
    /// as stored. A deeper descendant implies a child directory; if the
    /// archive has no explicit marker for it, a synthesized directory entry
    /// is emitted once, at the position of the first descendant, carrying
    /// that descendant's timestamp.
    pub fn list(&self, prefix: &str) -> Vec<Entry> {
        let prefix = normalize_directory_name(prefix);
        let mut directories: HashSet<String> = self
            .entries
            .iter()
            .filter(|e| e.is_directory)
            .map(|e| e.name.clone())
            .collect();

        let mut children = Vec::new();
        for entry in self.entries {
            let Some((segment, remainder)) = split_child(&entry.name, &prefix) else {
                continue;
            };
            if remainder.is_empty() {
                children.push(entry.clone());
            } else {
                let subdir = format!("{prefix}{segment}{DELIMITER}");
                if directories.insert(subdir.clone()) {
                    children.push(Entry::synthesized_directory(subdir, entry.modified));
                }
            }
        }
        children
    }

    /// Finds the entry for `path`, treating it as a file or a directory.
    ///
    /// An exact match on `path` or on its directory form (`path/`) returns
    /// the stored entry. Otherwise, if any entry lives under `path/`, a
    /// directory entry is synthesized with the timestamp of the first such
    /// entry. Returns `None` when nothing matches.
    ///
    /// The empty path names the archive itself and is not answered here.
    pub fn lookup(&self, path: &str) -> Option<Entry> {
        if path.is_empty() {
            return None;
        }

        let dir = normalize_directory_name(path);
        let mut candidate: Option<&Entry> = None;
        for entry in self.entries {
            if entry.name == path || entry.name == dir {
                return Some(entry.clone());
            }
            if candidate.is_none() && entry.name.starts_with(&dir) {
                candidate = Some(entry);
            }
        }
        candidate.map(|c| Entry::synthesized_directory(dir, c.modified))
    }
}

/// Splits `name` below `prefix` into its first segment and the rest.
///
/// Returns `None` if `name` is not below `prefix` or the first segment is
/// empty. The remainder excludes the separator after the segment and is
/// empty for direct children.
fn split_child<'n>(name: &'n str, prefix: &str) -> Option<(&'n str, &'n str)> {
    let rest = name.strip_prefix(prefix)?;
    let (segment, remainder) = match rest.find(DELIMITER) {
        Some(idx) => (&rest[..idx], &rest[idx + 1..]),
        None => (rest, ""),
    };
    if segment.is_empty() {
        None
    } else {
        Some((segment, remainder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Timestamp;

    fn entries(names: &[&str]) -> Vec<Entry> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Entry::from_archive(
                    i,
                    name.to_string(),
                    0,
                    0,
                    0,
                    Some(Timestamp::from_unix_secs(1_000_000_000 + i as i64 * 60)),
                )
            })
            .collect()
    }

    fn names(list: &[Entry]) -> Vec<&str> {
        list.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_split_child() {
        assert_eq!(split_child("a/b/c", "a/"), Some(("b", "c")));
        assert_eq!(split_child("a/b/", "a/"), Some(("b", "")));
        assert_eq!(split_child("a/b", "a/"), Some(("b", "")));
        assert_eq!(split_child("a/", "a/"), None);
        assert_eq!(split_child("b/c", "a/"), None);
        assert_eq!(split_child("top", ""), Some(("top", "")));
    }

    #[test]
    fn test_list_synthesizes_implied_directories() {
        let list = entries(&["a/b/c.txt"]);
        let view = DirectoryView::new(&list);

        let root = view.list("");
        assert_eq!(names(&root), ["a/"]);
        assert!(root[0].is_synthesized);
        assert_eq!(root[0].modified, list[0].modified);

        let a = view.list("a");
        assert_eq!(names(&a), ["a/b/"]);
        assert!(a[0].is_synthesized);

        let b = view.list("a/b/");
        assert_eq!(names(&b), ["a/b/c.txt"]);
        assert!(!b[0].is_synthesized);
    }

    #[test]
    fn test_list_prefers_explicit_markers() {
        let list = entries(&[
            "bar/",
            "bat/one/test1.txt",
            "bat/two/test1.txt",
            "foo/",
            "foo/test2.txt",
            "test1.txt",
        ]);
        let view = DirectoryView::new(&list);

        let root = view.list("");
        assert_eq!(names(&root), ["bar/", "bat/", "foo/", "test1.txt"]);
        assert!(!root[0].is_synthesized);
        assert!(root[1].is_synthesized);
        assert_eq!(root[1].modified, list[1].modified);

        assert_eq!(names(&view.list("bat")), ["bat/one/", "bat/two/"]);
        assert_eq!(names(&view.list("foo")), ["foo/test2.txt"]);
        assert!(view.list("missing").is_empty());
    }

    #[test]
    fn test_list_prefix_is_literal() {
        let list = entries(&["a.b/x", "axb/y"]);
        let view = DirectoryView::new(&list);
        assert_eq!(names(&view.list("a.b")), ["a.b/x"]);
    }

    #[test]
    fn test_lookup_exact_and_directory_forms() {
        let list = entries(&["foo/", "foo/test2.txt", "test1.txt"]);
        let view = DirectoryView::new(&list);

        let file = view.lookup("test1.txt").unwrap();
        assert_eq!(file.name, "test1.txt");
        assert!(!file.is_synthesized);

        let dir = view.lookup("foo").unwrap();
        assert_eq!(dir.name, "foo/");
        assert!(!dir.is_synthesized);
        assert_eq!(dir.index(), Some(0));
    }

    #[test]
    fn test_lookup_synthesizes_from_first_descendant() {
        let list = entries(&["a/b/c.txt", "a/d.txt"]);
        let view = DirectoryView::new(&list);

        let dir = view.lookup("a").unwrap();
        assert_eq!(dir.name, "a/");
        assert!(dir.is_directory);
        assert!(dir.is_synthesized);
        assert_eq!(dir.modified, list[0].modified);

        let nested = view.lookup("a/b/").unwrap();
        assert_eq!(nested.name, "a/b/");
        assert!(nested.is_synthesized);
    }

    #[test]
    fn test_lookup_not_found() {
        let list = entries(&["ab.txt"]);
        let view = DirectoryView::new(&list);
        assert!(view.lookup("a").is_none());
        assert!(view.lookup("").is_none());
    }
}
