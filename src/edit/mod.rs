//! Transactional archive editing.
//!
//! Edits are queued in an [`EditLog`] (usually through [`ZipEditor`]) and
//! applied together by a commit:
//! - Adding or overwriting file entries
//! - Creating directory markers
//! - Deleting single entries or whole directory subtrees
//! - Renaming entries
//!
//! # Example
//!
//! ```rust,no_run
//! use zipedit::ZipEditor;
//! use std::fs::File;
//!
//! let mut editor = ZipEditor::new("backup.zip");
//! editor
//!     .add("report.pdf", File::open("report.pdf")?)
//!     .delete("report-old.pdf")
//!     .rmdir("cache");
//!
//! let result = editor.commit()?;
//! if result.is_noop() {
//!     println!("Nothing to do");
//! }
//! # Ok::<(), zipedit::Error>(())
//! ```
//!
//! # Implementation Notes
//!
//! A commit is a single streaming pass:
//! 1. Original entries are walked in ascending name order
//! 2. Pending edits are walked in ascending target order alongside them
//! 3. Originals sorting before the next edit are copied raw, or skipped if removed
//! 4. Each edit writes its entry at its sorted position
//! 5. The output replaces the archive only if something changed
//!
//! Because both sides are sorted, the output of a commit over a sorted
//! archive is sorted too.

mod editor;
mod log;
mod operation;
mod prefix;
mod result;
mod staging;

pub use editor::ZipEditor;
pub use log::EditLog;
pub use operation::{ContentSource, Edit};
pub use prefix::PrefixMatcher;
pub use result::CommitResult;
