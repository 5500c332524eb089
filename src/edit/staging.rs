//! Output targets for a commit.
//!
//! A commit over a valid archive writes to a fresh sibling file and renames
//! it over the original only once the output is complete, so readers never
//! see a partial archive and a crash leaves the original intact. When there
//! is no valid original (the file is missing or is not a zip archive) the
//! output is written straight to the archive path instead. That branch has
//! no rollback: a failure part-way leaves no usable archive behind.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::timestamp::compact_millis;
use crate::{Error, Result};

/// Where a commit writes its output archive.
#[derive(Debug)]
pub(crate) enum OutputTarget {
    /// Write to `temp`, then atomically replace `original`.
    Staged { temp: PathBuf, original: PathBuf },
    /// Write directly to the archive path. Not crash-safe.
    Direct { path: PathBuf },
}

impl OutputTarget {
    pub(crate) fn staged(original: &Path) -> Self {
        OutputTarget::Staged {
            temp: unique_sibling_path(original),
            original: original.to_path_buf(),
        }
    }

    pub(crate) fn direct(path: &Path) -> Self {
        OutputTarget::Direct {
            path: path.to_path_buf(),
        }
    }

    /// Returns the file the output archive is written to.
    pub(crate) fn path(&self) -> &Path {
        match self {
            OutputTarget::Staged { temp, .. } => temp,
            OutputTarget::Direct { path } => path,
        }
    }

    /// Opens the output file for writing.
    ///
    /// A staged file must not exist yet; a direct target is truncated.
    pub(crate) fn create(&self) -> Result<File> {
        let file = match self {
            OutputTarget::Staged { temp, .. } => OpenOptions::new()
                .read(true)
                .write(true)
                .create_new(true)
                .open(temp)?,
            OutputTarget::Direct { path } => File::create(path)?,
        };
        Ok(file)
    }

    /// Makes the written output the archive.
    ///
    /// For a staged target this renames the temp file over the original,
    /// replacing it. If that fails the original is left as it was and the
    /// complete output stays at the temp path.
    pub(crate) fn install(self) -> Result<()> {
        match self {
            OutputTarget::Staged { temp, original } => {
                if let Err(source) = fs::rename(&temp, &original) {
                    return Err(Error::Install {
                        from: temp,
                        to: original,
                        source,
                    });
                }
                log::debug!("Replaced '{}' with '{}'", original.display(), temp.display());
                Ok(())
            }
            OutputTarget::Direct { .. } => Ok(()),
        }
    }

    /// Removes the output file.
    pub(crate) fn discard(self) {
        remove_quietly(self.path());
    }
}

fn remove_quietly(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("Could not remove '{}': {}", path.display(), e),
    }
}

/// Returns a path next to `original` that does not exist yet.
///
/// The name is the original file name followed by `-yyyyMMddHHmmss.SSS`
/// (UTC), plus `-N` when that is taken.
pub(crate) fn unique_sibling_path(original: &Path) -> PathBuf {
    let mut base: OsString = original.as_os_str().to_os_string();
    base.push("-");
    base.push(compact_millis(SystemTime::now()));

    let mut candidate = PathBuf::from(&base);
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        let mut name = base.clone();
        name.push(format!("-{counter}"));
        candidate = PathBuf::from(name);
    }
    candidate
}
