//! Write options for entries added to an archive.

use std::fmt;
use std::str::FromStr;

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::Timestamp;

/// Compression level applied to newly written entries.
///
/// Entries copied through unchanged keep their original compressed bytes;
/// the level only affects entries written by `add` and `mkdir`.
///
/// # Parsing
///
/// ```rust
/// use zipedit::write::CompressionLevel;
///
/// assert_eq!("default".parse::<CompressionLevel>()?, CompressionLevel::Default);
/// assert_eq!("-1".parse::<CompressionLevel>()?, CompressionLevel::Default);
/// assert_eq!("7".parse::<CompressionLevel>()?, CompressionLevel::Level(7));
/// assert!("10".parse::<CompressionLevel>().is_err());
/// # Ok::<(), zipedit::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// Let the deflate codec pick its default level.
    #[default]
    Default,
    /// Explicit level 0-9. Level 0 stores entries uncompressed.
    Level(u8),
}

impl CompressionLevel {
    /// Creates an explicit level, validating the 0-9 range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCompressionLevel`](crate::Error::InvalidCompressionLevel)
    /// if `level` is greater than 9.
    pub fn new(level: u8) -> crate::Result<Self> {
        if level > 9 {
            return Err(crate::Error::InvalidCompressionLevel {
                value: level.to_string(),
            });
        }
        Ok(CompressionLevel::Level(level))
    }

    /// Returns the compression method used for this level.
    pub fn method(&self) -> CompressionMethod {
        match self {
            CompressionLevel::Level(0) => CompressionMethod::Stored,
            _ => CompressionMethod::Deflated,
        }
    }

    /// Returns the level passed to the codec, if any.
    fn codec_level(&self) -> Option<i64> {
        match self {
            CompressionLevel::Default | CompressionLevel::Level(0) => None,
            CompressionLevel::Level(n) => Some(*n as i64),
        }
    }
}

impl FromStr for CompressionLevel {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let value = s.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("default") || value == "-1" {
            return Ok(CompressionLevel::Default);
        }
        match value.parse::<u8>() {
            Ok(level) if level <= 9 => Ok(CompressionLevel::Level(level)),
            _ => Err(crate::Error::InvalidCompressionLevel {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressionLevel::Default => f.write_str("default"),
            CompressionLevel::Level(n) => write!(f, "{n}"),
        }
    }
}

/// Options for entries written into the output archive.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Compression level for new entries.
    pub level: CompressionLevel,
}

impl WriteOptions {
    /// Creates new write options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level.
    pub fn level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }

    /// Builds the zip per-entry options for an entry stamped `modified`.
    ///
    /// Timestamps outside the DOS range fall back to the zip default
    /// (1980-01-01).
    pub(crate) fn file_options(&self, modified: Timestamp) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(self.level.method())
            .compression_level(self.level.codec_level())
            .last_modified_time(modified.to_zip().unwrap_or_default())
    }
}
