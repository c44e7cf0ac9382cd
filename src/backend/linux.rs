//! Linux backend policy: native control request first, heuristics second.

use std::path::Path;

use tracing::debug;

use super::FallbackBackend;
use crate::{AttrError, AttributeBackend, BackendKind, NativeAttributes};

/// Attribute backend for Linux-like hosts.
///
/// Reads and writes go through the `FAT_IOCTL_*` channel and return the
/// kernel's bitmask verbatim. Any native failure, on either side, falls
/// through to [`FallbackBackend`]; only a failing fallback write is reported.
#[derive(Debug, Clone, Default)]
pub struct LinuxBackend<N> {
    native: N,
    fallback: FallbackBackend,
}

impl<N: NativeAttributes> LinuxBackend<N> {
    /// Wrap a FAT-bit native channel.
    pub fn new(native: N) -> Self {
        Self {
            native,
            fallback: FallbackBackend,
        }
    }
}

impl<N: NativeAttributes> AttributeBackend for LinuxBackend<N> {
    fn kind(&self) -> BackendKind {
        BackendKind::Linux
    }

    fn get_attributes(&self, path: &Path) -> u32 {
        match self.native.read(path) {
            Ok(bits) => bits,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "FAT ioctl read failed, using heuristics");
                self.fallback.get_attributes(path)
            }
        }
    }

    fn set_attributes(&self, path: &Path, bits: u32) -> Result<(), AttrError> {
        match self.native.write(path, bits) {
            Ok(()) => Ok(()),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "FAT ioctl write failed, using permissions");
                self.fallback.set_attributes(path, bits)
            }
        }
    }
}
