//! Archive writing.
//!
//! [`ArchiveWriter`] wraps a zip writer and exposes the three ways an
//! entry reaches the output of a commit: streamed new content, an empty
//! directory marker, or a raw copy of an entry from the archive being
//! rewritten. Entries are written sequentially; each write closes the
//! previous entry without closing the underlying output.

mod options;

pub use options::{CompressionLevel, WriteOptions};

use std::io::{self, Read, Seek, Write};

use zip::{ZipArchive, ZipWriter};

use crate::{Result, Timestamp};

/// Sequential writer for the output archive of a commit.
pub struct ArchiveWriter<W: Write + Seek> {
    inner: ZipWriter<W>,
    options: WriteOptions,
    last_name: Option<String>,
}

impl<W: Write + Seek> ArchiveWriter<W> {
    /// Creates a writer over `output`.
    pub fn new(output: W, options: WriteOptions) -> Self {
        Self {
            inner: ZipWriter::new(output),
            options,
            last_name: None,
        }
    }

    /// Writes a new file entry named `name`, draining `source` into it.
    ///
    /// Returns the number of uncompressed bytes written.
    pub fn add_stream(
        &mut self,
        name: &str,
        source: &mut dyn Read,
        modified: Timestamp,
    ) -> Result<u64> {
        self.inner
            .start_file(name, self.options.file_options(modified))?;
        self.last_name = Some(name.to_string());
        let written = io::copy(source, &mut self.inner)?;
        Ok(written)
    }

    /// Writes a zero-length directory marker named `name`.
    ///
    /// `name` is expected to be normalized (ending in `/`).
    pub fn add_directory(&mut self, name: &str, modified: Timestamp) -> Result<()> {
        self.inner
            .add_directory(name, self.options.file_options(modified))?;
        self.last_name = Some(name.to_string());
        Ok(())
    }

    /// Copies entry `index` of `source` into the output without
    /// recompressing it, optionally under a new name.
    ///
    /// The compressed bytes, CRC and timestamp are preserved. A failure to
    /// read the source entry is tolerated: the partial entry is discarded
    /// and `false` is returned. Errors finalizing the output surface from
    /// later writes or from [`finish`](Self::finish).
    pub(crate) fn copy_raw<R: Read + Seek>(
        &mut self,
        source: &mut ZipArchive<R>,
        index: usize,
        rename: Option<&str>,
    ) -> bool {
        let file = match source.by_index_raw(index) {
            Ok(file) => file,
            Err(e) => {
                log::warn!("Skipping unreadable entry #{}: {}", index, e);
                return false;
            }
        };

        let name = rename.unwrap_or(file.name()).to_string();
        let copied = match rename {
            Some(name) => self.inner.raw_copy_file_rename(file, name),
            None => self.inner.raw_copy_file(file),
        };

        match copied {
            Ok(()) => {
                self.last_name = Some(name);
                true
            }
            Err(e) => {
                log::warn!("Dropping entry #{} after failed copy: {}", index, e);
                if let Err(abort) = self.inner.abort_file() {
                    log::warn!("Could not discard partial entry #{}: {}", index, abort);
                }
                false
            }
        }
    }

    /// Returns the name of the most recently written entry.
    pub(crate) fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Writes the central directory and returns the underlying output.
    pub fn finish(self) -> Result<W> {
        Ok(self.inner.finish()?)
    }
}
