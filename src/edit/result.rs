//! Commit outcome counters.

use std::fmt;

/// Counts of what a commit did to the archive.
///
/// `added + deleted` is the number of changes; a commit with zero
/// changes leaves the archive file untouched.
#[must_use = "commit result should be checked to verify the edits took effect"]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitResult {
    /// Original entries copied through unchanged.
    pub kept: usize,
    /// Entries written by edits (puts, directory markers and renames).
    pub added: usize,
    /// Original entries left out of the output.
    pub deleted: usize,
}

impl CommitResult {
    /// Returns the number of changes (`added + deleted`).
    pub fn changes(&self) -> usize {
        self.added + self.deleted
    }

    /// Returns `true` if the commit changed nothing.
    pub fn is_noop(&self) -> bool {
        self.changes() == 0
    }

    /// Returns the number of entries in the resulting archive.
    pub fn total_entries(&self) -> usize {
        self.kept + self.added
    }
}

impl fmt::Display for CommitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kept {}, added {}, deleted {}",
            self.kept, self.added, self.deleted
        )
    }
}
