//! Filesystem type detection.

use std::path::Path;
use std::sync::Arc;

use crate::FilesystemKind;

/// Determines which filesystem family a path lives on.
///
/// # Failure Policy
///
/// Probing never fails. An inaccessible path or an unsupported platform
/// call classifies as [`FilesystemKind::Other`], which makes every attribute
/// operation on that path a no-op.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsProbe`.
///
/// # Example
///
/// ```rust
/// use fat_attrs::{FilesystemKind, FsProbe};
/// use std::path::Path;
///
/// /// Treats everything under `/mnt/usb` as FAT.
/// struct MountTable;
///
/// impl FsProbe for MountTable {
///     fn filesystem_kind(&self, path: &Path) -> FilesystemKind {
///         if path.starts_with("/mnt/usb") {
///             FilesystemKind::Fat
///         } else {
///             FilesystemKind::Other
///         }
///     }
/// }
///
/// assert!(MountTable.is_fat_filesystem(Path::new("/mnt/usb/a.txt")));
/// assert!(!MountTable.is_fat_filesystem(Path::new("/home/a.txt")));
/// ```
pub trait FsProbe: Send + Sync {
    /// Classify the filesystem holding `path`.
    fn filesystem_kind(&self, path: &Path) -> FilesystemKind;

    /// Returns `true` if `path` is on a FAT-family filesystem.
    fn is_fat_filesystem(&self, path: &Path) -> bool {
        self.filesystem_kind(path).is_fat()
    }
}

impl<T: FsProbe + ?Sized> FsProbe for Arc<T> {
    fn filesystem_kind(&self, path: &Path) -> FilesystemKind {
        (**self).filesystem_kind(path)
    }

    fn is_fat_filesystem(&self, path: &Path) -> bool {
        (**self).is_fat_filesystem(path)
    }
}

impl<T: FsProbe + ?Sized> FsProbe for Box<T> {
    fn filesystem_kind(&self, path: &Path) -> FilesystemKind {
        (**self).filesystem_kind(path)
    }

    fn is_fat_filesystem(&self, path: &Path) -> bool {
        (**self).is_fat_filesystem(path)
    }
}
