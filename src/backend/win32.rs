//! `GetFileAttributesW` / `SetFileAttributesW` channel.

use std::io;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;

use tracing::trace;
use windows_sys::Win32::Storage::FileSystem::{GetFileAttributesW, SetFileAttributesW};

use crate::NativeAttributes;

/// Sentinel returned by `GetFileAttributesW` on failure.
pub const INVALID_FILE_ATTRIBUTES: u32 = 0xFFFF_FFFF;

/// Native channel over the Win32 file attribute calls.
///
/// No handle is opened; both calls take the path directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Attributes;

/// Absolute, NUL-terminated UTF-16 form of `path`.
pub(crate) fn wide_absolute(path: &Path) -> io::Result<Vec<u16>> {
    let absolute = std::path::absolute(path)?;
    Ok(absolute
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect())
}

impl NativeAttributes for Win32Attributes {
    fn read(&self, path: &Path) -> io::Result<u32> {
        let wide = wide_absolute(path)?;
        // SAFETY: `wide` is NUL-terminated and outlives the call.
        let attrs = unsafe { GetFileAttributesW(wide.as_ptr()) };
        if attrs == INVALID_FILE_ATTRIBUTES {
            return Err(io::Error::last_os_error());
        }
        trace!(path = %path.display(), attrs, "GetFileAttributesW");
        Ok(attrs)
    }

    fn write(&self, path: &Path, bits: u32) -> io::Result<()> {
        let wide = wide_absolute(path)?;
        // SAFETY: `wide` is NUL-terminated and outlives the call.
        let ok = unsafe { SetFileAttributesW(wide.as_ptr(), bits) };
        if ok == 0 {
            return Err(io::Error::last_os_error());
        }
        trace!(path = %path.display(), bits, "SetFileAttributesW");
        Ok(())
    }
}
