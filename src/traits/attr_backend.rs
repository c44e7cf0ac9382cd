//! Attribute backend capability.

use std::path::Path;
use std::sync::Arc;

use crate::{AttrError, BackendKind};

/// Reads and writes FAT attribute bitmasks for paths already known to be on
/// a FAT-family filesystem.
///
/// The selector only calls a backend after its probe confirmed FAT
/// membership, so backends do not re-check.
///
/// # Failure Policy
///
/// - [`get_attributes`](Self::get_attributes) never fails. Backends absorb
///   native errors and return an approximation or `0`.
/// - [`set_attributes`](Self::set_attributes) reports failures once the
///   backend has no further way to apply the bits.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn AttributeBackend`.
pub trait AttributeBackend: Send + Sync {
    /// Which backend family this is.
    fn kind(&self) -> BackendKind;

    /// Read the FAT attribute bitmask for `path`.
    ///
    /// Bits above the six named flags are returned verbatim.
    fn get_attributes(&self, path: &Path) -> u32;

    /// Apply a FAT attribute bitmask to `path`.
    ///
    /// # Errors
    ///
    /// - [`AttrError::Query`] if current attributes could not be read for merging
    /// - [`AttrError::Io`] if the native write or permission change failed
    fn set_attributes(&self, path: &Path, bits: u32) -> Result<(), AttrError>;
}

impl<T: AttributeBackend + ?Sized> AttributeBackend for Arc<T> {
    fn kind(&self) -> BackendKind {
        (**self).kind()
    }

    fn get_attributes(&self, path: &Path) -> u32 {
        (**self).get_attributes(path)
    }

    fn set_attributes(&self, path: &Path, bits: u32) -> Result<(), AttrError> {
        (**self).set_attributes(path, bits)
    }
}

impl<T: AttributeBackend + ?Sized> AttributeBackend for Box<T> {
    fn kind(&self) -> BackendKind {
        (**self).kind()
    }

    fn get_attributes(&self, path: &Path) -> u32 {
        (**self).get_attributes(path)
    }

    fn set_attributes(&self, path: &Path, bits: u32) -> Result<(), AttrError> {
        (**self).set_attributes(path, bits)
    }
}
