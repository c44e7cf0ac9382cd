//! Filesystem detection through `statfs(2)`.

use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use tracing::debug;

use crate::{FilesystemKind, FsProbe};

/// Probe comparing `statfs.f_type` against [`FAT_MAGIC_NUMBERS`](crate::FAT_MAGIC_NUMBERS).
#[derive(Debug, Clone, Copy, Default)]
pub struct StatfsProbe;

impl StatfsProbe {
    /// Raw filesystem type magic for `path`.
    pub fn magic(path: &Path) -> io::Result<u64> {
        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        // SAFETY: all-zero is a valid bit pattern for the plain C struct.
        let mut buf: libc::statfs = unsafe { std::mem::zeroed() };
        // SAFETY: `c_path` is NUL-terminated and `buf` is a writable statfs.
        let rc = unsafe { libc::statfs(c_path.as_ptr(), &mut buf) };
        if rc != 0 {
            return Err(io::Error::last_os_error());
        }
        // f_type is signed on glibc, unsigned on the BSDs.
        Ok(buf.f_type as u64)
    }
}

impl FsProbe for StatfsProbe {
    fn filesystem_kind(&self, path: &Path) -> FilesystemKind {
        match Self::magic(path) {
            Ok(magic) => FilesystemKind::from_magic(magic),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "statfs failed, treating as non-FAT");
                FilesystemKind::Other
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_is_not_fat() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert_eq!(StatfsProbe.filesystem_kind(&missing), FilesystemKind::Other);
        assert!(StatfsProbe::magic(&missing).is_err());
    }

    #[test]
    fn interior_nul_is_not_fat() {
        assert!(!StatfsProbe.is_fat_filesystem(Path::new("bad\0path")));
    }

    #[test]
    fn existing_path_reports_a_magic() {
        let dir = tempfile::tempdir().unwrap();
        let magic = StatfsProbe::magic(dir.path()).unwrap();
        assert_eq!(
            StatfsProbe.filesystem_kind(dir.path()),
            FilesystemKind::from_magic(magic)
        );
    }
}
