//! Transactional editor for a zip archive on disk.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::{Read, Seek, Write};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use super::log::{EditLog, Removals};
use super::operation::Edit;
use super::result::CommitResult;
use super::staging::OutputTarget;
use crate::config::EditorConfig;
use crate::fs::DirectoryView;
use crate::read::{ArchiveReader, Entry, EntryCursor, Source};
use crate::write::{ArchiveWriter, CompressionLevel, WriteOptions};
use crate::{Result, Timestamp};

/// An editor for the zip archive at a fixed path.
///
/// Edits are queued with the builder methods and applied together by
/// [`commit`](Self::commit), which rewrites the archive in one streaming
/// pass. Queries always reflect the committed archive, never pending edits.
///
/// # Example
///
/// ```rust,no_run
/// use zipedit::ZipEditor;
///
/// let mut editor = ZipEditor::new("site.zip");
/// editor
///     .add_bytes("index.html", "<h1>Hello</h1>")
///     .mkdir("assets")
///     .rename("old.css", "assets/site.css")
///     .rmdir("drafts");
///
/// let result = editor.commit()?;
/// println!("Kept {} entries, added {}, deleted {}",
///          result.kept, result.added, result.deleted);
///
/// for entry in editor.list("") {
///     println!("{}", entry.name);
/// }
/// # Ok::<(), zipedit::Error>(())
/// ```
#[derive(Debug)]
pub struct ZipEditor {
    path: PathBuf,
    options: WriteOptions,
    log: EditLog,
}

impl ZipEditor {
    /// Creates an editor for the archive at `path`.
    ///
    /// The archive does not need to exist; the first non-empty commit
    /// creates it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: WriteOptions::default(),
            log: EditLog::new(),
        }
    }

    /// Creates an editor from a parsed configuration.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.archive.clone()).compression_level(config.compression_level)
    }

    /// Sets the write options for new entries.
    pub fn with_options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the compression level for new entries.
    pub fn compression_level(mut self, level: CompressionLevel) -> Self {
        self.options.level = level;
        self
    }

    /// Returns the archive path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the pending edits.
    pub fn pending(&self) -> &EditLog {
        &self.log
    }

    /// Returns `true` if any edit is queued.
    pub fn has_pending_edits(&self) -> bool {
        !self.log.is_empty()
    }

    /// Discards all queued edits.
    pub fn clear_edits(&mut self) {
        self.log.clear();
    }

    /// Queues a file entry at `path` with content from `source`.
    ///
    /// See [`EditLog::add`].
    pub fn add(&mut self, path: &str, source: impl Read + 'static) -> &mut Self {
        self.log.add(path, source);
        self
    }

    /// Queues a file entry at `path` with in-memory content.
    pub fn add_bytes(&mut self, path: &str, data: impl Into<Vec<u8>>) -> &mut Self {
        self.log.add_bytes(path, data);
        self
    }

    /// Queues a directory marker. See [`EditLog::mkdir`].
    pub fn mkdir(&mut self, path: &str) -> &mut Self {
        self.log.mkdir(path);
        self
    }

    /// Queues removal of exactly `path`. See [`EditLog::delete`].
    pub fn delete(&mut self, path: &str) -> &mut Self {
        self.log.delete(path);
        self
    }

    /// Queues recursive removal of `path`. See [`EditLog::rmdir`].
    pub fn rmdir(&mut self, path: &str) -> &mut Self {
        self.log.rmdir(path);
        self
    }

    /// Queues a rename. See [`EditLog::rename`].
    pub fn rename(&mut self, from: &str, to: &str) -> &mut Self {
        self.log.rename(from, to);
        self
    }

    /// Returns all committed entries in archive order.
    ///
    /// A missing or corrupt archive has no entries.
    pub fn entries(&self) -> Vec<Entry> {
        let (_, entries) = ArchiveReader::open(&self.path).into_parts();
        entries
    }

    /// Returns the names of all committed entries.
    pub fn entry_set(&self) -> HashSet<String> {
        ArchiveReader::open(&self.path).entry_set()
    }

    /// Lists the immediate children of directory `prefix`.
    ///
    /// See [`DirectoryView::list`].
    pub fn list(&self, prefix: &str) -> Vec<Entry> {
        DirectoryView::new(&self.entries()).list(prefix)
    }

    /// Looks up a file or directory. See [`DirectoryView::lookup`].
    pub fn lookup(&self, path: &str) -> Option<Entry> {
        DirectoryView::new(&self.entries()).lookup(path)
    }

    /// Copies the content of entry `name` into `sink`, returning the number
    /// of bytes copied.
    pub fn copy_entry<W: Write + ?Sized>(&self, name: &str, sink: &mut W) -> Result<u64> {
        ArchiveReader::open(&self.path).copy_entry(name, sink)
    }

    /// Applies all queued edits in one pass and clears the queue.
    ///
    /// Original entries and edits are merged in ascending name order.
    /// Untouched entries are copied without recompression; removed ones are
    /// skipped. When the archive is valid, the output goes to a temporary
    /// sibling file that replaces the archive only after it is complete.
    /// When the archive is missing or not a zip file, the output is written
    /// directly to the archive path; that case is not crash-safe.
    ///
    /// A commit that changes nothing leaves the archive file as it was.
    ///
    /// Entries that cannot be read during the copy, and renames whose source
    /// does not exist, are skipped and show up only in the counters.
    ///
    /// # Errors
    ///
    /// Fails if the output cannot be created or written, if a content source
    /// fails, or if the final replace fails. The original archive is left
    /// unmodified in all of these cases, except on the direct-write branch.
    /// The queue is cleared regardless of outcome.
    pub fn commit(&mut self) -> Result<CommitResult> {
        let pending = self.log.take();
        log::debug!(
            "Committing {} pending edit(s) to '{}'",
            pending.pending_edits(),
            self.path.display()
        );

        let (target, archive, entries) = match ArchiveReader::open_source(&self.path)? {
            Source::Existing(reader) => {
                let (archive, entries) = reader.into_parts();
                (OutputTarget::staged(&self.path), archive, entries)
            }
            Source::Absent => (OutputTarget::direct(&self.path), None, Vec::new()),
            Source::Corrupt => {
                log::warn!(
                    "'{}' is not a valid zip archive; rewriting it in place without a crash-safe replace",
                    self.path.display()
                );
                (OutputTarget::direct(&self.path), None, Vec::new())
            }
        };
        log::debug!("Writing commit output to '{}'", target.path().display());

        let file = target.create()?;
        let mut writer = ArchiveWriter::new(file, self.options.clone());
        let mut archive = archive;
        let outcome = merge(&mut writer, archive.as_mut(), entries, pending)
            .and_then(|result| writer.finish().map(|_| result));
        drop(archive);

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                target.discard();
                return Err(e);
            }
        };

        if result.is_noop() {
            log::debug!("No changes; discarding '{}'", target.path().display());
            target.discard();
        } else {
            target.install()?;
        }
        log::debug!("Committed '{}': {}", self.path.display(), result);
        Ok(result)
    }
}

/// Merges the sorted original entries with the pending edits into `writer`.
fn merge<R, W>(
    writer: &mut ArchiveWriter<W>,
    mut archive: Option<&mut ZipArchive<R>>,
    entries: Vec<Entry>,
    pending: EditLog,
) -> Result<CommitResult>
where
    R: Read + Seek,
    W: Write + Seek,
{
    let (edits, removals) = pending.into_parts();
    let sources = source_indices(&entries, &edits);
    let mut cursor = EntryCursor::sorted(entries);
    let mut result = CommitResult::default();

    for (name, edit) in edits {
        while let Some(entry) = cursor.next_before(&name) {
            copy_through(writer, archive.as_deref_mut(), &entry, &removals, &mut result);
        }

        if apply(writer, archive.as_deref_mut(), &sources, edit)? {
            result.added += 1;
            // The new entry takes this name; originals must not duplicate it.
            while cursor.next_named(&name).is_some() {
                result.deleted += 1;
            }
        }
    }

    for entry in cursor {
        copy_through(writer, archive.as_deref_mut(), &entry, &removals, &mut result);
    }
    Ok(result)
}

/// Copies one original entry unless it was removed.
fn copy_through<R, W>(
    writer: &mut ArchiveWriter<W>,
    archive: Option<&mut ZipArchive<R>>,
    entry: &Entry,
    removals: &Removals,
    result: &mut CommitResult,
) where
    R: Read + Seek,
    W: Write + Seek,
{
    if removals.covers(&entry.name) {
        result.deleted += 1;
        return;
    }
    if writer.last_name() == Some(entry.name.as_str()) {
        log::warn!("Dropping duplicate entry '{}'", entry.name);
        result.deleted += 1;
        return;
    }
    let copied = match (archive, entry.index()) {
        (Some(archive), Some(index)) => writer.copy_raw(archive, index, None),
        _ => false,
    };
    if copied {
        result.kept += 1;
    }
}

/// Writes the entry for one edit. Returns whether an entry was written.
fn apply<R, W>(
    writer: &mut ArchiveWriter<W>,
    archive: Option<&mut ZipArchive<R>>,
    sources: &HashMap<String, usize>,
    edit: Edit,
) -> Result<bool>
where
    R: Read + Seek,
    W: Write + Seek,
{
    match edit {
        Edit::Put { path, mut source } => {
            writer.add_stream(&path, source.reader(), Timestamp::now())?;
            Ok(true)
        }
        Edit::Mkdir { path } => {
            writer.add_directory(&path, Timestamp::now())?;
            Ok(true)
        }
        Edit::Rename { from, to } => match (archive, sources.get(&from)) {
            (Some(archive), Some(&index)) => Ok(writer.copy_raw(archive, index, Some(&to))),
            _ => {
                log::warn!("Rename source '{}' not found; '{}' not written", from, to);
                Ok(false)
            }
        },
    }
}

/// Maps each rename source to its archive index. The first entry of a
/// duplicated name wins.
fn source_indices(entries: &[Entry], edits: &BTreeMap<String, Edit>) -> HashMap<String, usize> {
    let wanted: HashSet<&str> = edits.values().filter_map(Edit::source_path).collect();
    let mut sources = HashMap::new();
    for entry in entries {
        if !wanted.contains(entry.name.as_str()) {
            continue;
        }
        if let Some(index) = entry.index() {
            sources.entry(entry.name.clone()).or_insert(index);
        }
    }
    sources
}
