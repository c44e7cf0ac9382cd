//! # fat-attrs
//!
//! Preserve and restore **FAT-family file attributes** (read-only, hidden,
//! system, volume-id, directory, archive) across Linux, Windows, and other
//! POSIX hosts, and round-trip **Windows-illegal path characters** through a
//! reversible private-use-area mapping.
//!
//! ---
//!
//! ## Quick Start
//!
//! A backup tool captures attributes before storing an item and restores
//! them after extracting it:
//!
//! ```rust
//! use fat_attrs::{capture, restore};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), fat_attrs::AttrError> {
//! let source = Path::new(".");
//! let stored = capture(source); // absent unless `source` is on FAT
//!
//! // ... archive, later extract ...
//!
//! if let Err(e) = restore(source, stored) {
//!     eprintln!("warning: {e}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Working with the bits directly:
//!
//! ```rust
//! use fat_attrs::FatAttributes;
//!
//! let mut attrs = FatAttributes::from_bits(FatAttributes::ARCHIVE);
//! attrs.set_hidden(true);
//! assert!(attrs.is_hidden() && attrs.is_archive());
//! assert_eq!(format!("{attrs:?}"), "FatAttributes(HIDDEN | ARCHIVE)");
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`FatAttributes`] | Attribute bitmask with named predicates, mutators, `apply` |
//! | [`AttributeSelector`] | Probe the filesystem, then dispatch to a backend |
//! | [`ItemAttributes`] | Optional archive field: absent vs. captured |
//! | [`CharMap`] | Reversible path character table |
//! | [`AttrError`] | Write-side error with path and cause |
//! | [`Platform`] | Host platform flags |
//!
//! ---
//!
//! ## Backends
//!
//! | Host | Detection | Attributes |
//! |------|-----------|------------|
//! | Linux | `statfs` magic | `FAT_IOCTL_*`, then permission heuristics |
//! | Windows | volume filesystem name | `Get/SetFileAttributesW` |
//! | macOS, FreeBSD | `statfs` magic | permission heuristics |
//! | other | none (never FAT) | n/a |
//!
//! Off FAT volumes every read returns `0` and every write is a no-op.
//!
//! ---
//!
//! ## Error Handling
//!
//! Reads never fail. A failed native read falls back to permission
//! heuristics (Linux) or reads as `0` (Windows). Writes on a confirmed FAT
//! target return [`AttrError`] when they cannot be applied, so a restore
//! can report the item instead of silently losing its attributes.
//!
//! ---
//!
//! ## Thread Safety
//!
//! The host selector, platform flags and character table are built once
//! and read-only afterwards. Native handles never outlive a single call.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialization for [`FatAttributes`], [`ItemAttributes`], [`FilesystemKind`], [`BackendKind`] |

mod attributes;
pub mod backend;
mod error;
mod item;
pub mod path;
mod platform;
mod selector;
mod traits;
mod types;

pub use attributes::FatAttributes;
pub use error::AttrError;
pub use item::{ItemAttributes, capture, capture_with, restore, restore_with};
pub use path::{CharMap, original_path, safe_path};
pub use platform::Platform;
pub use selector::AttributeSelector;
pub use traits::{AttributeBackend, FsProbe, NativeAttributes};
pub use types::{BackendKind, FAT_MAGIC_NUMBERS, FAT_VOLUME_NAMES, FilesystemKind};

use std::path::Path;

/// Whether `path` is on a FAT-family filesystem. Never fails.
pub fn is_fat_filesystem(path: impl AsRef<Path>) -> bool {
    AttributeSelector::host().is_fat_filesystem(path.as_ref())
}

/// FAT attribute bitmask of `path`, or `0` off FAT volumes. Never fails.
pub fn get_attributes(path: impl AsRef<Path>) -> u32 {
    AttributeSelector::host().get_attributes(path.as_ref())
}

/// Apply a FAT attribute bitmask to `path`. No-op off FAT volumes.
///
/// # Errors
///
/// See [`AttributeSelector::set_attributes`].
pub fn set_attributes(path: impl AsRef<Path>, bits: u32) -> Result<(), AttrError> {
    AttributeSelector::host().set_attributes(path.as_ref(), bits)
}
