//! Directory prefixes for recursive deletion.

use crate::archive_path::normalize_directory_name;

/// A growing set of directory prefixes.
///
/// Every prefix is stored in directory form, so `rmdir("foo")` removes
/// `foo/` and `foo/a.txt` but leaves `foobar.txt` alone. Matching is a
/// literal string prefix test; there is no glob or regex interpretation.
///
/// The empty prefix names the archive root and matches every entry.
#[derive(Debug, Clone, Default)]
pub struct PrefixMatcher {
    prefixes: Vec<String>,
}

impl PrefixMatcher {
    /// Creates an empty matcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `prefix`, normalized to directory form.
    pub fn add(&mut self, prefix: &str) {
        let prefix = normalize_directory_name(prefix);
        if !self.prefixes.contains(&prefix) {
            self.prefixes.push(prefix);
        }
    }

    /// Returns `true` if `path` starts with any registered prefix.
    pub fn matches(&self, path: &str) -> bool {
        self.prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }

    /// Returns the number of registered prefixes.
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Returns `true` if no prefix is registered.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}
