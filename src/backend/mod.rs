//! # Backends
//!
//! Concrete probes and attribute backends, and the rules for picking them
//! from the host [`Platform`] flags.
//!
//! | Host | Probe | Backend |
//! |------|-------|---------|
//! | Linux, Android | [`StatfsProbe`] | [`LinuxBackend`] over `FatIoctl` |
//! | macOS, iOS, FreeBSD | [`StatfsProbe`] | [`FallbackBackend`] |
//! | Windows | `VolumeProbe` | [`WindowsBackend`] over `Win32Attributes` |
//! | anything else | [`NoProbe`] | [`FallbackBackend`] |
//!
//! All `unsafe` code in the crate lives in the platform-gated submodules
//! (`ioctl`, `statfs`, `win32`, `volume`) and the `access(2)` check in
//! [`fallback`].

use std::path::Path;

use tracing::debug;

use crate::{AttributeBackend, FilesystemKind, FsProbe, Platform};

pub mod fallback;
pub mod linux;
pub mod windows;

#[cfg(any(target_os = "linux", target_os = "android"))]
mod ioctl;
#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd"
))]
mod statfs;
#[cfg(windows)]
mod volume;
#[cfg(windows)]
mod win32;

pub use fallback::FallbackBackend;
pub use linux::LinuxBackend;
pub use windows::WindowsBackend;

#[cfg(any(target_os = "linux", target_os = "android"))]
pub use ioctl::{FAT_IOCTL_GET_ATTRIBUTES, FAT_IOCTL_SET_ATTRIBUTES, FatIoctl};
#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd"
))]
pub use statfs::StatfsProbe;
#[cfg(windows)]
pub use volume::{VolumeProbe, drive_root};
#[cfg(windows)]
pub use win32::{INVALID_FILE_ATTRIBUTES, Win32Attributes};

/// Probe for platforms with no detection mechanism: nothing is FAT.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProbe;

impl FsProbe for NoProbe {
    fn filesystem_kind(&self, _path: &Path) -> FilesystemKind {
        FilesystemKind::Other
    }
}

/// Pick the detection mechanism for `platform`.
///
/// Flags describing a platform this binary was not compiled for fall
/// through to [`NoProbe`], since the native call is not linked in.
pub fn probe_for(platform: &Platform) -> Box<dyn FsProbe> {
    if platform.has_statfs() {
        #[cfg(any(
            target_os = "linux",
            target_os = "android",
            target_os = "macos",
            target_os = "ios",
            target_os = "freebsd"
        ))]
        return Box::new(StatfsProbe);
    }
    if platform.win32 {
        #[cfg(windows)]
        return Box::new(VolumeProbe);
    }
    Box::new(NoProbe)
}

/// Pick the attribute backend for `platform`.
pub fn backend_for(platform: &Platform) -> Box<dyn AttributeBackend> {
    let backend: Box<dyn AttributeBackend> = select_backend(platform);
    debug!(backend = %backend.kind(), "selected attribute backend");
    backend
}

fn select_backend(platform: &Platform) -> Box<dyn AttributeBackend> {
    if platform.linux {
        #[cfg(any(target_os = "linux", target_os = "android"))]
        return Box::new(LinuxBackend::new(FatIoctl));
    }
    if platform.win32 {
        #[cfg(windows)]
        return Box::new(WindowsBackend::new(Win32Attributes));
    }
    Box::new(FallbackBackend)
}
