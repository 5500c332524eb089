//! Editor configuration.
//!
//! An editor needs two values: the archive path and the compression level
//! for new entries. Hosts usually hold both as strings (properties,
//! environment variables, command-line flags), so [`EditorConfig`] parses
//! them up front. An invalid level is rejected here, before any commit.
//!
//! # Example
//!
//! ```rust
//! use zipedit::config::EditorConfig;
//! use zipedit::write::CompressionLevel;
//!
//! let config = EditorConfig::from_values("site.zip", "6")?;
//! assert_eq!(config.compression_level, CompressionLevel::Level(6));
//!
//! assert!(EditorConfig::from_values("site.zip", "fast").is_err());
//! # Ok::<(), zipedit::Error>(())
//! ```

use std::env;
use std::path::PathBuf;

use crate::write::CompressionLevel;
use crate::{Error, Result};

/// Environment variable holding the archive path.
pub const ARCHIVE_ENV: &str = "ZIPEDIT_ARCHIVE";

/// Environment variable holding the compression level.
pub const COMPRESSION_LEVEL_ENV: &str = "ZIPEDIT_COMPRESSION_LEVEL";

/// Parsed settings for a [`ZipEditor`](crate::ZipEditor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Path of the archive to edit.
    pub archive: PathBuf,
    /// Compression level for new entries.
    pub compression_level: CompressionLevel,
}

impl EditorConfig {
    /// Creates a configuration with the default compression level.
    pub fn new(archive: impl Into<PathBuf>) -> Self {
        Self {
            archive: archive.into(),
            compression_level: CompressionLevel::Default,
        }
    }

    /// Parses a configuration from string values.
    ///
    /// `level` accepts `0`-`9`, `-1`, `default` or the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `archive` is empty and
    /// [`Error::InvalidCompressionLevel`] if `level` does not parse.
    pub fn from_values(archive: &str, level: &str) -> Result<Self> {
        if archive.trim().is_empty() {
            return Err(Error::InvalidConfig("archive path is empty".into()));
        }
        Ok(Self {
            archive: PathBuf::from(archive),
            compression_level: level.parse()?,
        })
    }

    /// Reads the configuration from [`ARCHIVE_ENV`] and
    /// [`COMPRESSION_LEVEL_ENV`]. An unset level means the default.
    pub fn from_env() -> Result<Self> {
        let archive = env::var(ARCHIVE_ENV)
            .map_err(|_| Error::InvalidConfig(format!("{ARCHIVE_ENV} is not set")))?;
        let level = env::var(COMPRESSION_LEVEL_ENV).unwrap_or_default();
        Self::from_values(&archive, &level)
    }

    /// Sets the compression level.
    pub fn compression_level(mut self, level: CompressionLevel) -> Self {
        self.compression_level = level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values() {
        let config = EditorConfig::from_values("a.zip", "").unwrap();
        assert_eq!(config.archive, PathBuf::from("a.zip"));
        assert_eq!(config.compression_level, CompressionLevel::Default);

        let config = EditorConfig::from_values("a.zip", "0").unwrap();
        assert_eq!(config.compression_level, CompressionLevel::Level(0));

        let config = EditorConfig::from_values("a.zip", "-1").unwrap();
        assert_eq!(config.compression_level, CompressionLevel::Default);
    }

    #[test]
    fn test_invalid_level_is_config_error() {
        let err = EditorConfig::from_values("a.zip", "ten").unwrap_err();
        assert!(matches!(err, Error::InvalidCompressionLevel { ref value } if value == "ten"));
        assert!(err.is_config_error());
        assert!(EditorConfig::from_values("a.zip", "10").is_err());
    }

    #[test]
    fn test_empty_archive_rejected() {
        let err = EditorConfig::from_values("  ", "5").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_builder() {
        let config = EditorConfig::new("b.zip").compression_level(CompressionLevel::Level(9));
        assert_eq!(config.compression_level, CompressionLevel::Level(9));
    }
}
