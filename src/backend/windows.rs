//! Windows backend policy and `FILE_ATTRIBUTE_*` translation.
//!
//! The translation and merge rules are plain bit arithmetic and are compiled
//! on every host; only the `Win32Attributes` channel is Windows-only.

use std::path::Path;

use tracing::debug;

use crate::{AttrError, AttributeBackend, BackendKind, FatAttributes, NativeAttributes};

/// `FILE_ATTRIBUTE_READONLY`
pub const WIN_FILE_ATTRIBUTE_READONLY: u32 = 0x1;
/// `FILE_ATTRIBUTE_HIDDEN`
pub const WIN_FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
/// `FILE_ATTRIBUTE_SYSTEM`
pub const WIN_FILE_ATTRIBUTE_SYSTEM: u32 = 0x4;
/// `FILE_ATTRIBUTE_DIRECTORY`
pub const WIN_FILE_ATTRIBUTE_DIRECTORY: u32 = 0x10;
/// `FILE_ATTRIBUTE_ARCHIVE`
pub const WIN_FILE_ATTRIBUTE_ARCHIVE: u32 = 0x20;

/// Native-to-FAT flag pairs. The mapping is 1:1 and covers every native bit
/// this backend manages.
pub const WIN_TO_FAT: [(u32, u32); 5] = [
    (WIN_FILE_ATTRIBUTE_READONLY, FatAttributes::READ_ONLY),
    (WIN_FILE_ATTRIBUTE_HIDDEN, FatAttributes::HIDDEN),
    (WIN_FILE_ATTRIBUTE_SYSTEM, FatAttributes::SYSTEM),
    (WIN_FILE_ATTRIBUTE_DIRECTORY, FatAttributes::DIRECTORY),
    (WIN_FILE_ATTRIBUTE_ARCHIVE, FatAttributes::ARCHIVE),
];

/// Translate native attributes into FAT bits. Unmanaged native bits are dropped.
pub fn win_to_fat(native: u32) -> u32 {
    WIN_TO_FAT
        .iter()
        .filter(|(win, _)| native & win != 0)
        .fold(0, |acc, (_, fat)| acc | fat)
}

/// Rebuild a native attribute word from `current` and requested FAT bits.
///
/// Managed native bits are cleared and re-derived from `fat`; every other
/// native bit in `current` is kept.
pub fn merge_fat_into_win(current: u32, fat: u32) -> u32 {
    WIN_TO_FAT.iter().fold(current, |acc, (win, fat_flag)| {
        if fat & fat_flag != 0 {
            acc | win
        } else {
            acc & !win
        }
    })
}

/// Attribute backend for Windows hosts.
///
/// Reads never fail: a query that errors or returns the invalid-result
/// sentinel yields `0`. Writes read the current attributes first and report
/// both query and write failures, with no fallback.
#[derive(Debug, Clone, Default)]
pub struct WindowsBackend<N> {
    native: N,
}

impl<N: NativeAttributes> WindowsBackend<N> {
    /// Wrap a `FILE_ATTRIBUTE_*` native channel.
    pub fn new(native: N) -> Self {
        Self { native }
    }
}

impl<N: NativeAttributes> AttributeBackend for WindowsBackend<N> {
    fn kind(&self) -> BackendKind {
        BackendKind::Windows
    }

    fn get_attributes(&self, path: &Path) -> u32 {
        match self.native.read(path) {
            Ok(native) => win_to_fat(native),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "GetFileAttributesW failed, no attributes");
                0
            }
        }
    }

    fn set_attributes(&self, path: &Path, bits: u32) -> Result<(), AttrError> {
        let current = self.native.read(path).map_err(|source| AttrError::Query {
            path: path.to_path_buf(),
            source,
        })?;
        let updated = merge_fat_into_win(current, bits);
        self.native
            .write(path, updated)
            .map_err(|e| AttrError::io("set attributes", path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;

    const FILE_ATTRIBUTE_NORMAL: u32 = 0x80;
    const FILE_ATTRIBUTE_COMPRESSED: u32 = 0x800;

    struct FakeWin32 {
        attrs: Mutex<io::Result<u32>>,
        write_fails: bool,
        writes: Mutex<Vec<u32>>,
    }

    impl FakeWin32 {
        fn with(attrs: io::Result<u32>) -> Self {
            Self {
                attrs: Mutex::new(attrs),
                write_fails: false,
                writes: Mutex::new(Vec::new()),
            }
        }
    }

    impl NativeAttributes for FakeWin32 {
        fn read(&self, _path: &Path) -> io::Result<u32> {
            match &*self.attrs.lock().unwrap() {
                Ok(v) => Ok(*v),
                Err(e) => Err(io::Error::new(e.kind(), e.to_string())),
            }
        }

        fn write(&self, _path: &Path, bits: u32) -> io::Result<()> {
            if self.write_fails {
                return Err(io::Error::from(io::ErrorKind::PermissionDenied));
            }
            self.writes.lock().unwrap().push(bits);
            *self.attrs.lock().unwrap() = Ok(bits);
            Ok(())
        }
    }

    #[test]
    fn translation_is_one_to_one_on_managed_bits() {
        assert_eq!(
            win_to_fat(WIN_FILE_ATTRIBUTE_READONLY | WIN_FILE_ATTRIBUTE_ARCHIVE),
            FatAttributes::READ_ONLY | FatAttributes::ARCHIVE
        );
        assert_eq!(win_to_fat(FILE_ATTRIBUTE_NORMAL), 0);
        assert_eq!(win_to_fat(0x37), 0x37);
    }

    #[test]
    fn merge_preserves_unmanaged_native_bits() {
        let current = WIN_FILE_ATTRIBUTE_ARCHIVE | FILE_ATTRIBUTE_COMPRESSED;
        let merged = merge_fat_into_win(current, FatAttributes::HIDDEN | FatAttributes::READ_ONLY);
        assert_eq!(
            merged,
            FILE_ATTRIBUTE_COMPRESSED | WIN_FILE_ATTRIBUTE_HIDDEN | WIN_FILE_ATTRIBUTE_READONLY
        );
    }

    #[test]
    fn merge_ignores_volume_id() {
        assert_eq!(merge_fat_into_win(0, FatAttributes::VOLUME_ID), 0);
    }

    #[test]
    fn get_translates_native_attributes() {
        let backend = WindowsBackend::new(FakeWin32::with(Ok(
            WIN_FILE_ATTRIBUTE_READONLY | WIN_FILE_ATTRIBUTE_ARCHIVE,
        )));
        assert_eq!(backend.get_attributes(Path::new("C:\\fake\\file.txt")), 0x21);
    }

    #[test]
    fn failed_query_reads_as_zero() {
        let backend = WindowsBackend::new(FakeWin32::with(Err(io::Error::from(
            io::ErrorKind::NotFound,
        ))));
        assert_eq!(backend.get_attributes(Path::new("C:\\fake\\missing.txt")), 0);
    }

    #[test]
    fn set_writes_merged_word() {
        let backend = WindowsBackend::new(FakeWin32::with(Ok(WIN_FILE_ATTRIBUTE_ARCHIVE)));
        let path = Path::new("C:\\fake\\file.txt");
        backend.set_attributes(path, 0x03).unwrap();
        assert_eq!(
            *backend.native.writes.lock().unwrap(),
            vec![WIN_FILE_ATTRIBUTE_HIDDEN | WIN_FILE_ATTRIBUTE_READONLY]
        );
        assert_eq!(backend.get_attributes(path), 0x03);
    }

    #[test]
    fn set_reports_failed_query() {
        let backend = WindowsBackend::new(FakeWin32::with(Err(io::Error::from(
            io::ErrorKind::NotFound,
        ))));
        let err = backend
            .set_attributes(Path::new("C:\\fake\\missing.txt"), 0x01)
            .unwrap_err();
        assert!(matches!(err, AttrError::Query { .. }));
        assert!(backend.native.writes.lock().unwrap().is_empty());
    }

    #[test]
    fn set_reports_failed_write() {
        let mut native = FakeWin32::with(Ok(WIN_FILE_ATTRIBUTE_ARCHIVE));
        native.write_fails = true;
        let backend = WindowsBackend::new(native);
        let err = backend
            .set_attributes(Path::new("C:\\fake\\readonly.txt"), 0x01)
            .unwrap_err();
        assert!(matches!(
            err,
            AttrError::Io {
                operation: "set attributes",
                ..
            }
        ));
    }
}
