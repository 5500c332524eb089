//! Archive reading API.
//!
//! This module provides read access to an existing zip archive: listing
//! entries in archive order and streaming entry content.
//!
//! # Example
//!
//! ```rust,no_run
//! use zipedit::read::ArchiveReader;
//!
//! let reader = ArchiveReader::open("archive.zip");
//! for entry in reader.entries() {
//!     println!("{}: {} bytes", entry.name, entry.size);
//! }
//! ```

mod archive;
mod cursor;
mod entry;

pub use archive::ArchiveReader;
pub use cursor::EntryCursor;
pub use entry::Entry;

pub(crate) use archive::Source;
