//! Filesystem detection through `GetVolumeInformationW`.

use std::ffi::OsString;
use std::io;
use std::os::windows::ffi::OsStrExt;
use std::path::{Component, Path};

use tracing::debug;
use windows_sys::Win32::Storage::FileSystem::GetVolumeInformationW;

use crate::{FilesystemKind, FsProbe};

/// Probe comparing the volume's filesystem name against
/// [`FAT_VOLUME_NAMES`](crate::FAT_VOLUME_NAMES).
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeProbe;

/// Drive root (`C:\`, `\\server\share\`) of the absolute form of `path`.
///
/// Returns `None` when the path has no drive or UNC prefix.
pub fn drive_root(path: &Path) -> Option<OsString> {
    let absolute = std::path::absolute(path).ok()?;
    match absolute.components().next()? {
        Component::Prefix(prefix) => {
            let mut root = prefix.as_os_str().to_os_string();
            root.push("\\");
            Some(root)
        }
        _ => None,
    }
}

impl VolumeProbe {
    /// Filesystem name reported for the volume holding `path`, e.g. `"NTFS"`.
    pub fn filesystem_name(path: &Path) -> io::Result<String> {
        let root = drive_root(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no drive"))?;
        let wide: Vec<u16> = root.encode_wide().chain(std::iter::once(0)).collect();

        let mut volume_name = [0u16; 1024];
        let mut fs_name = [0u16; 1024];
        let mut serial_number = 0u32;
        let mut max_component_length = 0u32;
        let mut fs_flags = 0u32;

        // SAFETY: every buffer is valid for the length passed alongside it
        // and outlives the call; `wide` is NUL-terminated.
        let ok = unsafe {
            GetVolumeInformationW(
                wide.as_ptr(),
                volume_name.as_mut_ptr(),
                volume_name.len() as u32,
                &mut serial_number,
                &mut max_component_length,
                &mut fs_flags,
                fs_name.as_mut_ptr(),
                fs_name.len() as u32,
            )
        };
        if ok == 0 {
            return Err(io::Error::last_os_error());
        }

        let len = fs_name.iter().position(|&c| c == 0).unwrap_or(fs_name.len());
        Ok(String::from_utf16_lossy(&fs_name[..len]))
    }
}

impl FsProbe for VolumeProbe {
    fn filesystem_kind(&self, path: &Path) -> FilesystemKind {
        match Self::filesystem_name(path) {
            Ok(name) => FilesystemKind::from_volume_name(&name),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "volume query failed, treating as non-FAT");
                FilesystemKind::Other
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_root_of_disk_path() {
        assert_eq!(
            drive_root(Path::new("C:\\some\\path")),
            Some(OsString::from("C:\\"))
        );
    }

    #[test]
    fn drive_root_of_unc_path() {
        assert_eq!(
            drive_root(Path::new("\\\\server\\share\\dir\\file")),
            Some(OsString::from("\\\\server\\share\\"))
        );
    }

    #[test]
    fn relative_path_resolves_to_current_drive() {
        assert!(drive_root(Path::new("relative\\file.txt")).is_some());
    }

    #[test]
    fn temp_volume_reports_a_name() {
        let dir = tempfile::tempdir().unwrap();
        let name = VolumeProbe::filesystem_name(dir.path()).unwrap();
        assert!(!name.is_empty());
        assert_eq!(
            VolumeProbe.filesystem_kind(dir.path()),
            FilesystemKind::from_volume_name(&name)
        );
    }
}
