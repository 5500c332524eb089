//! Name-ordered cursor over archive entries.
//!
//! The commit merge walks original entries and pending edits in step, so it
//! needs to look at the current entry without consuming it. [`EntryCursor`]
//! provides that over entries sorted by name.

use std::iter::Peekable;
use std::vec;

use super::Entry;

/// A peekable, name-ordered walk over archive entries.
#[derive(Debug)]
pub struct EntryCursor {
    entries: Peekable<vec::IntoIter<Entry>>,
}

impl EntryCursor {
    /// Creates a cursor over `entries` in ascending name order.
    ///
    /// Archives written by this crate are already sorted. Archives from
    /// other tools may not be; those are reordered (stably) so the merge
    /// can rely on ascending names.
    pub fn sorted(mut entries: Vec<Entry>) -> Self {
        if !entries.is_sorted_by(|a, b| a.name <= b.name) {
            log::warn!(
                "Archive entries are not in name order; reordering {} entries for commit",
                entries.len()
            );
            entries.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Self {
            entries: entries.into_iter().peekable(),
        }
    }

    /// Creates a cursor with nothing to visit.
    pub fn empty() -> Self {
        Self::sorted(Vec::new())
    }

    /// Returns the current entry without advancing.
    pub fn current(&mut self) -> Option<&Entry> {
        self.entries.peek()
    }

    /// Returns `true` once every entry has been visited.
    pub fn is_done(&mut self) -> bool {
        self.entries.peek().is_none()
    }

    /// Consumes and returns the current entry if its name sorts strictly
    /// before `name`.
    pub fn next_before(&mut self, name: &str) -> Option<Entry> {
        self.entries.next_if(|entry| entry.name.as_str() < name)
    }

    /// Consumes and returns the current entry if it is named exactly `name`.
    pub fn next_named(&mut self, name: &str) -> Option<Entry> {
        self.entries.next_if(|entry| entry.name == name)
    }
}

impl Iterator for EntryCursor {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        self.entries.next()
    }
}
