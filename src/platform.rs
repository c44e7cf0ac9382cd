//! Host platform flags.
//!
//! Flags are derived from the runtime OS identifier once and never change
//! for the lifetime of the process. Backend and codec selection read them
//! instead of matching on OS strings at every call site.

use once_cell::sync::Lazy;

static HOST: Lazy<Platform> = Lazy::new(|| Platform::from_os(std::env::consts::OS));

/// Boolean indicators for the host platform family.
///
/// At most one flag is set for any identifier; unknown identifiers set none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Platform {
    /// Native Windows.
    pub win32: bool,
    /// Cygwin on Windows. Uses POSIX paths, so the Windows backends do not apply.
    pub cygwin: bool,
    /// Linux and Android.
    pub linux: bool,
    /// macOS and iOS.
    pub darwin: bool,
    /// FreeBSD.
    pub freebsd: bool,
}

impl Platform {
    /// Classify an OS identifier as reported by [`std::env::consts::OS`].
    ///
    /// ```rust
    /// use fat_attrs::Platform;
    ///
    /// assert!(Platform::from_os("windows").win32);
    /// assert!(Platform::from_os("android").linux);
    /// assert_eq!(Platform::from_os("haiku"), Platform::default());
    /// ```
    pub fn from_os(id: &str) -> Self {
        let id = id.to_ascii_lowercase();
        Self {
            win32: id == "windows" || id.starts_with("win32"),
            cygwin: id.starts_with("cygwin"),
            linux: id.starts_with("linux") || id == "android",
            darwin: id == "macos" || id == "ios" || id.starts_with("darwin"),
            freebsd: id.starts_with("freebsd"),
        }
    }

    /// Flags for the running process, computed on first use.
    pub fn host() -> &'static Platform {
        &HOST
    }

    /// Whether the host reports filesystem type magic through `statfs`.
    pub fn has_statfs(&self) -> bool {
        self.linux || self.darwin || self.freebsd
    }
}
