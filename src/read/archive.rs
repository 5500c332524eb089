//! Read access to an existing zip archive.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, Write};
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use super::Entry;
use crate::{Error, Result, Timestamp};

/// Enumerates the entries of an archive and opens entry streams.
///
/// Opening never fails: an archive that is absent, unreadable, or not a
/// valid zip file reads as an archive with no entries. The entry index is
/// built once, at open time; entry bodies are streamed on demand.
///
/// # Example
///
/// ```rust,no_run
/// use zipedit::read::ArchiveReader;
///
/// let mut reader = ArchiveReader::open("data.zip");
/// for entry in reader.entries() {
///     println!("{} ({} bytes)", entry.name, entry.size);
/// }
/// let mut stdout = std::io::stdout();
/// reader.copy_entry("readme.txt", &mut stdout)?;
/// # Ok::<(), zipedit::Error>(())
/// ```
pub struct ArchiveReader<R = BufReader<File>> {
    archive: Option<ZipArchive<R>>,
    entries: Vec<Entry>,
}

/// How the archive at a path looked when a commit started.
pub(crate) enum Source {
    /// A valid archive that was opened for reading.
    Existing(ArchiveReader<BufReader<File>>),
    /// No file exists at the path.
    Absent,
    /// A file exists but is not a readable zip archive.
    Corrupt,
}

impl ArchiveReader<BufReader<File>> {
    /// Opens the archive at `path`, treating any failure as an empty archive.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => Self::from_reader(BufReader::new(file)),
            Err(e) => {
                log::debug!("Reading '{}' as empty: {}", path.display(), e);
                Self::empty()
            }
        }
    }

    /// Opens the archive at `path` for rewriting.
    ///
    /// Unlike [`open`](Self::open), this distinguishes a missing file and
    /// a file that is not a zip archive from other I/O failures, which are
    /// returned as errors so that a readable archive is never mistaken for
    /// an empty one.
    pub(crate) fn open_source(path: &Path) -> Result<Source> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Source::Absent),
            Err(e) => return Err(e.into()),
        };

        match ZipArchive::new(BufReader::new(file)) {
            Ok(archive) => Ok(Source::Existing(Self::from_archive(archive))),
            Err(ZipError::InvalidArchive(_) | ZipError::UnsupportedArchive(_)) => {
                Ok(Source::Corrupt)
            }
            Err(ZipError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Ok(Source::Corrupt)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<R: Read + Seek> ArchiveReader<R> {
    /// Reads an archive from `reader`, treating a format error as an empty
    /// archive.
    pub fn from_reader(reader: R) -> Self {
        match ZipArchive::new(reader) {
            Ok(archive) => Self::from_archive(archive),
            Err(e) => {
                log::debug!("Reading archive as empty: {}", e);
                Self::empty()
            }
        }
    }

    fn from_archive(mut archive: ZipArchive<R>) -> Self {
        let entries = index_entries(&mut archive);
        Self {
            archive: Some(archive),
            entries,
        }
    }

    fn empty() -> Self {
        Self {
            archive: None,
            entries: Vec::new(),
        }
    }

    /// Returns `true` if a valid archive was opened.
    pub fn is_present(&self) -> bool {
        self.archive.is_some()
    }

    /// Returns all entries in archive order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the set of entry names.
    pub fn entry_set(&self) -> HashSet<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Returns the entry named exactly `name`.
    pub fn find(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Opens a decompressing stream over the content of entry `name`.
    ///
    /// The stream borrows the reader; drop it before opening another.
    pub fn open_entry(&mut self, name: &str) -> Result<impl Read + '_> {
        let not_found = || Error::EntryNotFound {
            path: name.to_string(),
        };
        let archive = self.archive.as_mut().ok_or_else(not_found)?;
        match archive.by_name(name) {
            Ok(file) => Ok(file),
            Err(ZipError::FileNotFound) => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }

    /// Copies the content of entry `name` into `sink`.
    ///
    /// Returns the number of bytes copied.
    pub fn copy_entry<W: Write + ?Sized>(&mut self, name: &str, sink: &mut W) -> Result<u64> {
        let mut stream = self.open_entry(name)?;
        Ok(io::copy(&mut stream, sink)?)
    }

    pub(crate) fn into_parts(self) -> (Option<ZipArchive<R>>, Vec<Entry>) {
        (self.archive, self.entries)
    }
}

/// Builds the entry index from the archive's central directory.
///
/// Entries whose headers cannot be read are left out.
fn index_entries<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Vec<Entry> {
    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        match archive.by_index_raw(index) {
            Ok(file) => entries.push(Entry::from_archive(
                index,
                file.name().to_string(),
                file.size(),
                file.compressed_size(),
                file.crc32(),
                file.last_modified().map(Timestamp::from_zip),
            )),
            Err(e) => log::warn!("Skipping unreadable entry #{}: {}", index, e),
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write::{ArchiveWriter, WriteOptions};
    use std::io::Cursor;

    fn build(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ArchiveWriter::new(Cursor::new(Vec::new()), WriteOptions::default());
        let ts = Timestamp::from_unix_secs(1_000_000_000);
        for (name, data) in entries {
            if name.ends_with('/') {
                writer.add_directory(name, ts).unwrap();
            } else {
                writer.add_stream(name, &mut &data[..], ts).unwrap();
            }
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_entries_in_archive_order() {
        let bytes = build(&[("b/", b""), ("b/x.txt", b"xx"), ("a.txt", b"a")]);
        let reader = ArchiveReader::from_reader(Cursor::new(bytes));
        assert!(reader.is_present());
        let names: Vec<_> = reader.entries().iter().map(|e| e.name()).collect();
        assert_eq!(names, ["b/", "b/x.txt", "a.txt"]);
        assert!(reader.entries()[0].is_directory);
        assert_eq!(reader.entries()[1].size, 2);
        assert_eq!(
            reader.entries()[1].modified,
            Some(Timestamp::from_unix_secs(1_000_000_000))
        );
    }

    #[test]
    fn test_garbage_reads_as_empty() {
        let reader = ArchiveReader::from_reader(Cursor::new(b"not a zip".to_vec()));
        assert!(!reader.is_present());
        assert!(reader.entries().is_empty());
        assert!(reader.entry_set().is_empty());
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let reader = ArchiveReader::open(dir.path().join("missing.zip"));
        assert!(!reader.is_present());
        assert!(reader.entries().is_empty());
    }

    #[test]
    fn test_copy_entry() {
        let bytes = build(&[("hello.txt", b"hello, world!\n")]);
        let mut reader = ArchiveReader::from_reader(Cursor::new(bytes));
        let mut sink = Vec::new();
        let copied = reader.copy_entry("hello.txt", &mut sink).unwrap();
        assert_eq!(copied, 14);
        assert_eq!(sink, b"hello, world!\n");
    }

    #[test]
    fn test_open_missing_entry() {
        let bytes = build(&[("a.txt", b"a")]);
        let mut reader = ArchiveReader::from_reader(Cursor::new(bytes));
        let err = reader.open_entry("b.txt").err().unwrap();
        assert!(matches!(err, Error::EntryNotFound { ref path } if path == "b.txt"));

        let mut empty = ArchiveReader::from_reader(Cursor::new(Vec::new()));
        assert!(empty.open_entry("a.txt").err().unwrap().is_not_found());
    }

    #[test]
    fn test_open_source_classification() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.zip");
        assert!(matches!(
            ArchiveReader::open_source(&missing).unwrap(),
            Source::Absent
        ));

        let empty_file = dir.path().join("empty.zip");
        std::fs::write(&empty_file, b"").unwrap();
        assert!(matches!(
            ArchiveReader::open_source(&empty_file).unwrap(),
            Source::Corrupt
        ));

        let valid = dir.path().join("valid.zip");
        std::fs::write(&valid, build(&[("a.txt", b"a")])).unwrap();
        match ArchiveReader::open_source(&valid).unwrap() {
            Source::Existing(reader) => assert_eq!(reader.entries().len(), 1),
            _ => panic!("expected an existing archive"),
        }
    }
}
