//! # zipedit
//!
//! Transactional editing of zip archives.
//!
//! This crate lets you queue a batch of structural edits against a zip file
//! (add or overwrite entries, create directory markers, delete entries or
//! whole directory subtrees, rename entries) and apply them in one streaming
//! pass. Untouched entries are copied byte-for-byte without recompression,
//! entry names stay in ascending order, and the original file is replaced
//! atomically once the new archive is complete.
//!
//! ## Quick Start
//!
//! ### Editing an Archive
//!
//! ```rust,no_run
//! use zipedit::{Result, ZipEditor};
//!
//! fn main() -> Result<()> {
//!     let mut editor = ZipEditor::new("archive.zip");
//!
//!     // Queue edits; nothing is written yet
//!     editor
//!         .add_bytes("hello.txt", "Hello, World!")
//!         .mkdir("docs")
//!         .rename("notes.txt", "docs/notes.txt")
//!         .rmdir("tmp");
//!
//!     // Apply them in one pass
//!     let result = editor.commit()?;
//!     println!("Kept {} entries, added {}, deleted {}",
//!         result.kept, result.added, result.deleted);
//!     Ok(())
//! }
//! ```
//!
//! ### Browsing an Archive
//!
//! ```rust,no_run
//! use zipedit::ZipEditor;
//!
//! let editor = ZipEditor::new("archive.zip");
//!
//! // Immediate children of a directory, with implied directories filled in
//! for entry in editor.list("docs") {
//!     println!("{:>10}  {}", entry.size, entry.name);
//! }
//!
//! // Attributes of a single file or directory
//! if let Some(entry) = editor.lookup("docs/notes.txt") {
//!     println!("modified {:?}", entry.modified);
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli` | No | Command-line interface tool (`zipedit`) |
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. A missing or corrupt archive is not an
//! error: it reads as an empty archive and is created by the first commit
//! that changes something.
//!
//! ```rust,no_run
//! use zipedit::{Error, ZipEditor};
//!
//! fn move_entry(from: &str, to: &str) -> zipedit::Result<()> {
//!     let mut editor = ZipEditor::new("archive.zip");
//!     editor.rename(from, to);
//!     match editor.commit() {
//!         Ok(result) if result.added == 0 => Err(Error::EntryNotFound {
//!             path: from.to_string(),
//!         }),
//!         Ok(_) => Ok(()),
//!         Err(Error::Install { from, to, source }) => {
//!             eprintln!("New archive left at {}: {}", from.display(), source);
//!             Err(Error::Install { from, to, source })
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade. Skipped
//! entries, missing rename sources and non-crash-safe rewrites are reported
//! at `warn` level; commit progress at `debug` level.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod archive_path;
pub mod config;
pub mod edit;
pub mod error;
pub mod fs;
pub mod read;
pub mod timestamp;
pub mod write;

pub use archive_path::{DELIMITER, normalize_directory_name};
pub use config::EditorConfig;
pub use edit::{CommitResult, ContentSource, Edit, EditLog, PrefixMatcher, ZipEditor};
pub use error::{Error, Result};
pub use fs::DirectoryView;
pub use read::{ArchiveReader, Entry};
pub use timestamp::Timestamp;
pub use write::{CompressionLevel, WriteOptions};
