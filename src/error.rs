//! Error types for FAT attribute operations.
//!
//! Only the write side of this crate reports errors. Reads absorb every
//! failure and fall back to an approximation (or to `0`), so an archive run
//! never aborts because one file could not be probed.

use std::path::{Path, PathBuf};

/// Error raised when attributes could not be applied to a confirmed FAT target.
///
/// Every variant carries the path that failed and the underlying I/O cause.
/// Uses `#[non_exhaustive]` for forward compatibility.
///
/// # Examples
///
/// ```rust
/// use fat_attrs::AttrError;
/// use std::io;
/// use std::path::PathBuf;
///
/// let err = AttrError::Io {
///     operation: "set permissions",
///     path: PathBuf::from("/mnt/usb/readme.txt"),
///     source: io::Error::from(io::ErrorKind::PermissionDenied),
/// };
/// assert!(err.to_string().starts_with("set permissions failed for /mnt/usb/readme.txt"));
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum AttrError {
    /// The current attributes could not be read before a write.
    ///
    /// Raised by the Windows backend, which must merge the requested FAT bits
    /// into the existing native attributes.
    #[error("query attributes failed for {path}: {source}")]
    Query {
        /// The path whose attributes could not be queried.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A native attribute write or a fallback permission change failed.
    #[error("{operation} failed for {path}: {source}")]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The path involved in the operation.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl AttrError {
    /// The path the failed operation targeted.
    pub fn path(&self) -> &Path {
        match self {
            AttrError::Query { path, .. } | AttrError::Io { path, .. } => path,
        }
    }

    pub(crate) fn io(operation: &'static str, path: &Path, source: std::io::Error) -> Self {
        AttrError::Io {
            operation,
            path: path.to_path_buf(),
            source,
        }
    }
}
