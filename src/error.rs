//! Error types for zip archive editing.
//!
//! This module provides the [`Error`] enum which represents every failure
//! that is surfaced to callers, along with a convenient [`Result<T>`] alias.
//!
//! # What is *not* an error
//!
//! Several conditions are tolerated by design and never produce an `Error`:
//!
//! - A missing, empty or corrupt archive is read as an empty archive.
//! - An entry whose body cannot be read during a commit is dropped from the
//!   output and not counted as kept.
//! - A rename whose source no longer exists at commit time has no effect.
//!
//! Callers observe those outcomes through [`CommitResult`] counters.
//!
//! # Example
//!
//! ```rust,no_run
//! use zipedit::{Error, ZipEditor};
//!
//! fn delete_entry(archive: &str, name: &str) -> zipedit::Result<()> {
//!     let mut editor = ZipEditor::new(archive);
//!     editor.delete(name);
//!     match editor.commit() {
//!         Ok(result) if result.deleted == 0 => Err(Error::EntryNotFound {
//!             path: name.to_string(),
//!         }),
//!         Ok(_) => Ok(()),
//!         Err(e) => Err(e),
//!     }
//! }
//! ```
//!
//! [`CommitResult`]: crate::edit::CommitResult

use std::io;
use std::path::PathBuf;

/// Result type alias for archive editing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when reading or editing zip archives.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred while reading input or writing output.
    ///
    /// During a commit this is fatal. If it happens before the final
    /// replace step, the original archive is left unmodified.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The zip container layer reported an error.
    ///
    /// This is returned for failures while writing the output archive or
    /// while reading an archive that was successfully opened.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// An entry was not found in the archive.
    ///
    /// Returned by direct entry reads such as
    /// [`ArchiveReader::open_entry`](crate::read::ArchiveReader::open_entry).
    #[error("Entry not found: {path}")]
    EntryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A compression level could not be parsed.
    ///
    /// Levels are `0`-`9`, or `default` / `-1` for the codec default.
    /// This is raised when configuration is read, before any commit.
    ///
    /// ```rust
    /// use zipedit::{Error, write::CompressionLevel};
    ///
    /// let result: Result<CompressionLevel, _> = "fast".parse();
    /// assert!(matches!(result, Err(Error::InvalidCompressionLevel { .. })));
    /// ```
    #[error("invalid compression level '{value}': must be 0-9 or 'default'")]
    InvalidCompressionLevel {
        /// The rejected value, as given.
        value: String,
    },

    /// Editor configuration is incomplete or malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Replacing the original archive with the rewritten copy failed.
    ///
    /// The rewritten copy is left at `from` when this happens so no data
    /// is lost; the original at `to` is unchanged.
    #[error("failed to replace '{}' with '{}': {source}", to.display(), from.display())]
    Install {
        /// The fully written replacement archive.
        from: PathBuf,
        /// The archive that was to be replaced.
        to: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Returns `true` if this error means an entry or archive does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::EntryNotFound { .. } => true,
            Error::Io(e) => e.kind() == io::ErrorKind::NotFound,
            Error::Zip(zip::result::ZipError::FileNotFound) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error comes from configuration parsing.
    ///
    /// Configuration errors are raised before any archive is touched.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidCompressionLevel { .. } | Error::InvalidConfig(_)
        )
    }
}
