//! Error types for dirglob operations.

use std::ffi::c_int;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Scan completed.
pub const GLOB_OK: c_int = 0;
/// The pattern could not be turned into a matcher.
pub const GLOB_INVALID_PATTERN: c_int = 1;
/// The base directory, or an entry under it, could not be read.
pub const GLOB_DIRECTORY_ACCESS: c_int = 2;
/// A NULL pointer or undecodable string crossed the C boundary.
pub const GLOB_INVALID_ARGUMENT: c_int = 3;

#[derive(Debug, Error)]
pub enum GlobError {
    /// The translated expression was rejected by the regex engine.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The base path is missing, not a directory, or became unreadable mid-walk.
    #[error("cannot read directory {}: {source}", path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl GlobError {
    /// Status code reported across the C boundary for this error.
    pub fn code(&self) -> c_int {
        match self {
            GlobError::InvalidPattern { .. } => GLOB_INVALID_PATTERN,
            GlobError::DirectoryAccess { .. } => GLOB_DIRECTORY_ACCESS,
            GlobError::InvalidArgument(_) => GLOB_INVALID_ARGUMENT,
        }
    }

    pub(crate) fn from_walk(base: &std::path::Path, err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| base.to_path_buf());
        GlobError::DirectoryAccess {
            path,
            source: io::Error::from(err),
        }
    }
}
