//! Pending archive edits.

use std::fmt;
use std::io::{Cursor, Read};

/// A readable-once byte stream supplying the content of a new entry.
///
/// The stream is drained during the commit that writes the entry and
/// dropped right after, whether or not the commit succeeds.
pub struct ContentSource {
    reader: Box<dyn Read>,
}

impl ContentSource {
    /// Wraps any reader.
    pub fn from_reader(reader: impl Read + 'static) -> Self {
        Self {
            reader: Box::new(reader),
        }
    }

    /// Wraps an in-memory buffer.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::from_reader(Cursor::new(data.into()))
    }

    pub(crate) fn reader(&mut self) -> &mut dyn Read {
        &mut *self.reader
    }
}

impl fmt::Debug for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentSource").finish_non_exhaustive()
    }
}

/// A pending edit that writes an entry into the output archive.
///
/// Edits are keyed by [`target_path`](Self::target_path) in the edit log.
/// Plain deletions are not edits: they only filter original entries.
#[derive(Debug)]
pub enum Edit {
    /// Write a new file entry (overwriting any existing one).
    Put {
        /// Entry name.
        path: String,
        /// Entry content.
        source: ContentSource,
    },
    /// Write a zero-length directory marker.
    Mkdir {
        /// Normalized directory name (ends with `/`).
        path: String,
    },
    /// Copy an existing entry under a new name.
    Rename {
        /// Name of the entry in the original archive.
        from: String,
        /// New name.
        to: String,
    },
}

impl Edit {
    /// Returns the name of the entry this edit writes.
    pub fn target_path(&self) -> &str {
        match self {
            Edit::Put { path, .. } => path,
            Edit::Mkdir { path } => path,
            Edit::Rename { to, .. } => to,
        }
    }

    /// Returns the original entry this edit reads from, if any.
    pub fn source_path(&self) -> Option<&str> {
        match self {
            Edit::Rename { from, .. } => Some(from),
            Edit::Put { .. } | Edit::Mkdir { .. } => None,
        }
    }

    /// Returns the operation type as a string.
    pub fn operation_type(&self) -> &'static str {
        match self {
            Edit::Put { .. } => "put",
            Edit::Mkdir { .. } => "mkdir",
            Edit::Rename { .. } => "rename",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_paths() {
        let put = Edit::Put {
            path: "a.txt".into(),
            source: ContentSource::from_bytes("data"),
        };
        assert_eq!(put.target_path(), "a.txt");
        assert!(put.source_path().is_none());
        assert_eq!(put.operation_type(), "put");

        let rename = Edit::Rename {
            from: "old.txt".into(),
            to: "new.txt".into(),
        };
        assert_eq!(rename.target_path(), "new.txt");
        assert_eq!(rename.source_path(), Some("old.txt"));
        assert_eq!(rename.operation_type(), "rename");

        let mkdir = Edit::Mkdir { path: "d/".into() };
        assert_eq!(mkdir.target_path(), "d/");
        assert_eq!(mkdir.operation_type(), "mkdir");
    }

    #[test]
    fn test_content_source_reads_once() {
        let mut source = ContentSource::from_bytes(b"hello".to_vec());
        let mut content = String::new();
        source.reader().read_to_string(&mut content).unwrap();
        assert_eq!(content, "hello");

        content.clear();
        source.reader().read_to_string(&mut content).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_debug_hides_stream() {
        let put = Edit::Put {
            path: "a".into(),
            source: ContentSource::from_reader(std::io::empty()),
        };
        let debug = format!("{put:?}");
        assert!(debug.contains("ContentSource"));
        assert!(debug.contains("\"a\""));
    }
}
