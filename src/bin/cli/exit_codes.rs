//! Exit codes for the CLI tool.

use zipedit::Error;

/// Exit code constants
pub const SUCCESS: i32 = 0;
/// Operation completed with warnings
pub const WARNING: i32 = 1;
/// Fatal error occurred
pub const FATAL_ERROR: i32 = 2;
/// Archive format error
pub const BAD_ARCHIVE: i32 = 3;
/// Entry or archive not found
pub const NOT_FOUND: i32 = 4;
/// I/O error
pub const IO_ERROR: i32 = 5;
/// Invalid command line arguments
pub const BAD_ARGS: i32 = 255;

/// Exit code enum for structured handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    Warning,
    FatalError,
    BadArchive,
    NotFound,
    IoError,
    BadArgs,
}

impl ExitCode {
    /// Returns the numeric exit code
    pub fn code(self) -> i32 {
        match self {
            Self::Success => SUCCESS,
            Self::Warning => WARNING,
            Self::FatalError => FATAL_ERROR,
            Self::BadArchive => BAD_ARCHIVE,
            Self::NotFound => NOT_FOUND,
            Self::IoError => IO_ERROR,
            Self::BadArgs => BAD_ARGS,
        }
    }
}

/// Converts a zipedit error to an exit code
pub fn error_to_exit_code(error: &Error) -> ExitCode {
    match error {
        e if e.is_not_found() => ExitCode::NotFound,
        e if e.is_config_error() => ExitCode::BadArgs,
        Error::Io(_) | Error::Install { .. } => ExitCode::IoError,
        Error::Zip(_) => ExitCode::BadArchive,
        // Future error variants - required by #[non_exhaustive]
        _ => ExitCode::FatalError,
    }
}
