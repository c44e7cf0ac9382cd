//! POSIX permission heuristics.
//!
//! Used when no native attribute mechanism exists or it failed. This is a
//! lossy approximation: HIDDEN, SYSTEM and VOLUME_ID have no POSIX
//! counterpart and always read as unset; on write only READ_ONLY is
//! represented (as owner write permission) and every other bit is dropped.

use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use crate::{AttrError, AttributeBackend, BackendKind, FatAttributes};

/// Attribute backend that approximates FAT flags from file type and permissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackBackend;

impl FallbackBackend {
    /// Create the fallback backend.
    pub fn new() -> Self {
        Self
    }
}

/// Synthesize FAT bits from portable signals.
///
/// DIRECTORY iff `is_dir`, READ_ONLY iff not `writable`, ARCHIVE iff not `is_dir`.
pub fn heuristic_attributes(is_dir: bool, writable: bool) -> u32 {
    let mut bits = 0;
    if is_dir {
        bits |= FatAttributes::DIRECTORY;
    } else {
        bits |= FatAttributes::ARCHIVE;
    }
    if !writable {
        bits |= FatAttributes::READ_ONLY;
    }
    bits
}

/// Permission mode after applying a READ_ONLY request.
///
/// Read-only clears every write bit; writable only restores owner write.
pub fn mode_for(current: u32, read_only: bool) -> u32 {
    if read_only {
        current & !0o222
    } else {
        current | 0o200
    }
}

impl AttributeBackend for FallbackBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Fallback
    }

    fn get_attributes(&self, path: &Path) -> u32 {
        let meta = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "stat failed, no attributes");
                return 0;
            }
        };
        let bits = heuristic_attributes(meta.is_dir(), is_writable(path, &meta));
        trace!(path = %path.display(), bits, "fallback attributes");
        bits
    }

    fn set_attributes(&self, path: &Path, bits: u32) -> Result<(), AttrError> {
        let read_only = bits & FatAttributes::READ_ONLY != 0;
        let meta = fs::metadata(path).map_err(|e| AttrError::io("stat", path, e))?;
        let perms = permissions_for(meta.permissions(), read_only);
        fs::set_permissions(path, perms).map_err(|e| AttrError::io("set permissions", path, e))?;
        trace!(path = %path.display(), read_only, "fallback permissions applied");
        Ok(())
    }
}

#[cfg(unix)]
fn is_writable(path: &Path, _meta: &fs::Metadata) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    effective_write_access(&c_path)
}

/// Checks write access against the effective uid/gid, not the real ones.
#[cfg(all(unix, not(target_os = "android")))]
fn effective_write_access(c_path: &std::ffi::CStr) -> bool {
    // SAFETY: `c_path` is a valid NUL-terminated string for the duration of the call.
    unsafe { libc::faccessat(libc::AT_FDCWD, c_path.as_ptr(), libc::W_OK, libc::AT_EACCESS) == 0 }
}

// Bionic rejects AT_EACCESS; app processes never run setuid.
#[cfg(target_os = "android")]
fn effective_write_access(c_path: &std::ffi::CStr) -> bool {
    // SAFETY: `c_path` is a valid NUL-terminated string for the duration of the call.
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
}

#[cfg(not(unix))]
fn is_writable(_path: &Path, meta: &fs::Metadata) -> bool {
    !meta.permissions().readonly()
}

#[cfg(unix)]
fn permissions_for(perms: fs::Permissions, read_only: bool) -> fs::Permissions {
    use std::os::unix::fs::PermissionsExt;

    fs::Permissions::from_mode(mode_for(perms.mode(), read_only))
}

#[cfg(not(unix))]
fn permissions_for(mut perms: fs::Permissions, read_only: bool) -> fs::Permissions {
    perms.set_readonly(read_only);
    perms
}
