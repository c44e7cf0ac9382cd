//! Core types shared by probes, backends, and the selector.

/// Filesystem type magic numbers (as reported in `statfs.f_type`) treated as FAT-family.
///
/// NTFS is included because it carries a FAT-compatible attribute set.
pub const FAT_MAGIC_NUMBERS: [u64; 5] = [
    0x4d44,      // MSDOS_SUPER_MAGIC
    0x4006,      // FAT_SUPER_MAGIC
    0x564c,      // VFAT_SUPER_MAGIC
    0x5346_544e, // NTFS_SB_MAGIC
    0x5846_5342, // EXFAT_SUPER_MAGIC
];

/// Windows volume filesystem names treated as FAT-family (compared case-insensitively).
pub const FAT_VOLUME_NAMES: [&str; 3] = ["FAT", "FAT32", "EXFAT"];

/// Classification of the filesystem a path lives on.
///
/// Always derived on demand and never cached, since volumes can be mounted
/// and unmounted between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilesystemKind {
    /// MS-DOS FAT12/16, VFAT, FAT32, exFAT, or NTFS.
    Fat,
    /// Anything else, including paths that could not be probed.
    Other,
}

impl FilesystemKind {
    /// Classify a `statfs` filesystem type magic number.
    pub fn from_magic(magic: u64) -> Self {
        if FAT_MAGIC_NUMBERS.contains(&magic) {
            FilesystemKind::Fat
        } else {
            FilesystemKind::Other
        }
    }

    /// Classify a Windows volume filesystem name such as `"FAT32"` or `"NTFS"`.
    pub fn from_volume_name(name: &str) -> Self {
        let name = name.trim_end_matches('\0');
        if FAT_VOLUME_NAMES
            .iter()
            .any(|fat| fat.eq_ignore_ascii_case(name))
        {
            FilesystemKind::Fat
        } else {
            FilesystemKind::Other
        }
    }

    /// Returns `true` for [`FilesystemKind::Fat`].
    #[inline]
    pub fn is_fat(self) -> bool {
        self == FilesystemKind::Fat
    }
}

/// Which attribute backend a selector dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BackendKind {
    /// `FAT_IOCTL_*` control requests on an open descriptor.
    Linux,
    /// `GetFileAttributesW` / `SetFileAttributesW`.
    Windows,
    /// POSIX permission heuristics.
    Fallback,
}

impl BackendKind {
    /// Short lowercase name, used in log events.
    pub fn name(self) -> &'static str {
        match self {
            BackendKind::Linux => "linux",
            BackendKind::Windows => "windows",
            BackendKind::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
