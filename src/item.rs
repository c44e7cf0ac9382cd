//! Archive item boundary.
//!
//! The archive layer stores at most one attribute field per item. It must
//! tell "not captured" (the source was not on FAT) apart from "captured,
//! no flags set", so the field is an `Option` rather than a bare integer.

use std::path::Path;

use tracing::trace;

use crate::{AttrError, AttributeSelector, FatAttributes};

/// Optional attribute field attached to an archive item.
///
/// Serializes as an optional integer (`null` or `0..=4294967295`) with the
/// `serde` feature, so an archive can omit it entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemAttributes(Option<u32>);

impl ItemAttributes {
    /// No attributes were captured.
    pub const ABSENT: Self = Self(None);

    /// Attributes captured as `bits`.
    pub const fn captured(bits: u32) -> Self {
        Self(Some(bits))
    }

    /// Returns `true` if attributes were captured (possibly zero).
    pub const fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// The captured bitmask, if any.
    pub const fn bits(&self) -> Option<u32> {
        self.0
    }

    /// The captured value as a [`FatAttributes`], if any.
    pub fn attributes(&self) -> Option<FatAttributes> {
        self.0.map(FatAttributes::from_bits)
    }
}

impl From<Option<u32>> for ItemAttributes {
    fn from(bits: Option<u32>) -> Self {
        Self(bits)
    }
}

impl From<FatAttributes> for ItemAttributes {
    fn from(attrs: FatAttributes) -> Self {
        Self(Some(attrs.bits()))
    }
}

/// Capture attributes for an item about to be archived.
///
/// Returns [`ItemAttributes::ABSENT`] when `path` is not on a FAT filesystem.
pub fn capture(path: impl AsRef<Path>) -> ItemAttributes {
    capture_with(AttributeSelector::host(), path)
}

/// [`capture`] through an explicit selector.
pub fn capture_with(selector: &AttributeSelector, path: impl AsRef<Path>) -> ItemAttributes {
    let path = path.as_ref();
    let Some(bits) = selector.capture_bits(path) else {
        return ItemAttributes::ABSENT;
    };
    trace!(path = %path.display(), bits, "captured attributes");
    ItemAttributes::captured(bits)
}

/// Restore captured attributes onto an extracted item.
///
/// Returns `Ok(false)` when nothing was captured, `Ok(true)` once the bits
/// were handed to the selector.
///
/// # Errors
///
/// Write failures on a confirmed FAT target. Callers usually report these as
/// per-item warnings and continue the restore.
pub fn restore(path: impl AsRef<Path>, item: ItemAttributes) -> Result<bool, AttrError> {
    restore_with(AttributeSelector::host(), path, item)
}

/// [`restore`] through an explicit selector.
///
/// # Errors
///
/// See [`restore`].
pub fn restore_with(
    selector: &AttributeSelector,
    path: impl AsRef<Path>,
    item: ItemAttributes,
) -> Result<bool, AttrError> {
    let Some(attrs) = item.attributes() else {
        return Ok(false);
    };
    attrs.apply_with(selector, path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AttributeBackend, BackendKind, FilesystemKind, FsProbe};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn absent_is_not_zero() {
        assert_ne!(ItemAttributes::ABSENT, ItemAttributes::captured(0));
        assert!(!ItemAttributes::ABSENT.is_present());
        assert!(ItemAttributes::captured(0).is_present());
        assert_eq!(ItemAttributes::default(), ItemAttributes::ABSENT);
    }

    #[test]
    fn attributes_view() {
        let item = ItemAttributes::captured(0x21);
        let attrs = item.attributes().unwrap();
        assert!(attrs.is_read_only());
        assert!(attrs.is_archive());
        assert_eq!(ItemAttributes::ABSENT.attributes(), None);
    }

    #[test]
    fn conversions() {
        assert_eq!(ItemAttributes::from(Some(5)).bits(), Some(5));
        assert_eq!(ItemAttributes::from(None).bits(), None);
        assert_eq!(
            ItemAttributes::from(FatAttributes::from_bits(0x02)),
            ItemAttributes::captured(0x02)
        );
    }

    /// Reports FAT on the first query only, like a volume unmounted mid-capture.
    #[derive(Default)]
    struct Unmounting {
        calls: AtomicUsize,
    }

    impl FsProbe for Unmounting {
        fn filesystem_kind(&self, _path: &Path) -> FilesystemKind {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                FilesystemKind::Fat
            } else {
                FilesystemKind::Other
            }
        }
    }

    struct Archive;

    impl AttributeBackend for Archive {
        fn kind(&self) -> BackendKind {
            BackendKind::Fallback
        }

        fn get_attributes(&self, _path: &Path) -> u32 {
            FatAttributes::ARCHIVE
        }

        fn set_attributes(&self, _path: &Path, _bits: u32) -> Result<(), AttrError> {
            Ok(())
        }
    }

    #[test]
    fn capture_checks_filesystem_once() {
        let mounts = Arc::new(Unmounting::default());
        let selector = AttributeSelector::new(mounts.clone(), Archive);

        let item = capture_with(&selector, "/mnt/usb/a.txt");
        assert_eq!(item, ItemAttributes::captured(FatAttributes::ARCHIVE));
        assert_eq!(mounts.calls.load(Ordering::SeqCst), 1);

        // The volume is gone now.
        assert_eq!(capture_with(&selector, "/mnt/usb/a.txt"), ItemAttributes::ABSENT);
        assert_eq!(mounts.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn restoring_absent_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!restore(dir.path().join("missing"), ItemAttributes::ABSENT).unwrap());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_optional_integer() {
        assert_eq!(serde_json::to_string(&ItemAttributes::ABSENT).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&ItemAttributes::captured(0)).unwrap(),
            "0"
        );
        let back: ItemAttributes = serde_json::from_str("4294967295").unwrap();
        assert_eq!(back.bits(), Some(u32::MAX));
    }
}
