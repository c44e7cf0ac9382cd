//! # Capability Traits
//!
//! The seams between detection, policy, and foreign calls.
//!
//! ```text
//! FsProbe            is this path on a FAT-family filesystem?
//! AttributeBackend   read/write FAT bits on a confirmed FAT path (policy)
//! NativeAttributes   raw platform call, no policy (Linux ioctl, Win32 API)
//! ```
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync`. Methods take `&self`, so a single
//! selector can be shared across threads.
//!
//! ## Object Safety
//!
//! All traits are object-safe. [`AttributeSelector`](crate::AttributeSelector)
//! holds its probe and backend as `Box<dyn ...>`.

mod attr_backend;
mod fs_probe;
mod native;

pub use attr_backend::AttributeBackend;
pub use fs_probe::FsProbe;
pub use native::NativeAttributes;
