//! # Attribute Selector
//!
//! Composes one [`FsProbe`] with one [`AttributeBackend`]: every operation
//! first asks the probe whether FAT semantics apply to the path, and only
//! then dispatches to the backend.
//!
//! ```text
//! get_attributes(path) ──▶ probe: FAT? ──no──▶ 0
//!                                   └─yes─▶ backend.get_attributes(path)
//!
//! set_attributes(path) ──▶ probe: FAT? ──no──▶ Ok(())
//!                                   └─yes─▶ backend.set_attributes(path, bits)?
//! ```
//!
//! The probe runs on every call. Filesystem membership is never cached,
//! because volumes can be mounted and unmounted between calls.

use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use tracing::trace;

use crate::backend::{backend_for, probe_for};
use crate::{AttrError, AttributeBackend, BackendKind, FilesystemKind, FsProbe, Platform};

static HOST: Lazy<AttributeSelector> = Lazy::new(|| AttributeSelector::for_platform(Platform::host()));

/// Detects FAT membership and dispatches attribute reads and writes.
///
/// # Example
///
/// ```rust
/// use fat_attrs::AttributeSelector;
/// use std::path::Path;
///
/// let selector = AttributeSelector::host();
/// let path = Path::new(".");
/// if !selector.is_fat_filesystem(path) {
///     // Nothing is read or written off FAT volumes.
///     assert_eq!(selector.get_attributes(path), 0);
///     selector.set_attributes(path, 0x02).unwrap();
/// }
/// ```
pub struct AttributeSelector {
    probe: Box<dyn FsProbe>,
    backend: Box<dyn AttributeBackend>,
}

impl AttributeSelector {
    /// Compose an explicit probe and backend.
    pub fn new(probe: impl FsProbe + 'static, backend: impl AttributeBackend + 'static) -> Self {
        Self {
            probe: Box::new(probe),
            backend: Box::new(backend),
        }
    }

    /// Select the probe and backend for `platform`.
    pub fn for_platform(platform: &Platform) -> Self {
        Self {
            probe: probe_for(platform),
            backend: backend_for(platform),
        }
    }

    /// The process-wide selector for the host platform, built on first use.
    pub fn host() -> &'static AttributeSelector {
        &HOST
    }

    /// Which backend writes and reads are dispatched to.
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Classify the filesystem holding `path`. Never fails.
    pub fn filesystem_kind(&self, path: &Path) -> FilesystemKind {
        self.probe.filesystem_kind(path)
    }

    /// Returns `true` if `path` is on a FAT-family filesystem.
    ///
    /// Any probe failure reads as `false`.
    pub fn is_fat_filesystem(&self, path: &Path) -> bool {
        self.probe.is_fat_filesystem(path)
    }

    /// Read the FAT attribute bitmask for `path`.
    ///
    /// Returns `0` without touching the backend when `path` is not on a FAT
    /// filesystem. Never fails: backends absorb read errors.
    pub fn get_attributes(&self, path: &Path) -> u32 {
        if !self.is_fat_filesystem(path) {
            trace!(path = %path.display(), "not FAT, skipping attribute read");
            return 0;
        }
        self.backend.get_attributes(path)
    }

    /// Read the bitmask for archival: `None` when `path` is not on FAT.
    ///
    /// Filesystem membership is checked exactly once, so a volume that
    /// disappears mid-call cannot turn "not FAT" into a captured zero.
    pub(crate) fn capture_bits(&self, path: &Path) -> Option<u32> {
        if !self.is_fat_filesystem(path) {
            trace!(path = %path.display(), "not FAT, nothing to capture");
            return None;
        }
        Some(self.backend.get_attributes(path))
    }

    /// Apply a FAT attribute bitmask to `path`.
    ///
    /// A no-op when `path` is not on a FAT filesystem.
    ///
    /// # Errors
    ///
    /// Any error the backend reports once FAT membership is confirmed; see
    /// [`AttributeBackend::set_attributes`].
    pub fn set_attributes(&self, path: &Path, bits: u32) -> Result<(), AttrError> {
        if !self.is_fat_filesystem(path) {
            trace!(path = %path.display(), "not FAT, skipping attribute write");
            return Ok(());
        }
        self.backend.set_attributes(path, bits)
    }
}

impl fmt::Debug for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeSelector")
            .field("backend", &self.backend.kind())
            .finish_non_exhaustive()
    }
}
