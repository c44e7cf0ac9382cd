//! `FAT_IOCTL_GET_ATTRIBUTES` / `FAT_IOCTL_SET_ATTRIBUTES` (linux/msdos_fs.h).

use std::fs::File;
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use tracing::trace;

use crate::NativeAttributes;

/// `_IOR('r', 0x10, __u32)`
pub const FAT_IOCTL_GET_ATTRIBUTES: u32 = 0x8004_7210;
/// `_IOW('r', 0x11, __u32)`
pub const FAT_IOCTL_SET_ATTRIBUTES: u32 = 0x4004_7211;

/// Native channel issuing the msdos/vfat attribute control requests.
///
/// The path is opened read-only for the duration of a single request; the
/// descriptor is closed when the `File` drops, on every exit path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FatIoctl;

impl NativeAttributes for FatIoctl {
    fn read(&self, path: &Path) -> io::Result<u32> {
        let file = File::open(path)?;
        let mut buf = [0u8; 4];
        // SAFETY: the request writes exactly four bytes into `buf`, which
        // outlives the call; the descriptor is owned by `file`.
        let rc = unsafe {
            libc::ioctl(
                file.as_raw_fd(),
                FAT_IOCTL_GET_ATTRIBUTES as _,
                buf.as_mut_ptr(),
            )
        };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        let bits = decode(&buf);
        trace!(path = %path.display(), bits, "FAT_IOCTL_GET_ATTRIBUTES");
        Ok(bits)
    }

    fn write(&self, path: &Path, bits: u32) -> io::Result<()> {
        let file = File::open(path)?;
        let buf = encode(bits);
        // SAFETY: the request reads exactly four bytes from `buf`, which
        // outlives the call; the descriptor is owned by `file`.
        let rc = unsafe {
            libc::ioctl(
                file.as_raw_fd(),
                FAT_IOCTL_SET_ATTRIBUTES as _,
                buf.as_ptr(),
            )
        };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        trace!(path = %path.display(), bits, "FAT_IOCTL_SET_ATTRIBUTES");
        Ok(())
    }
}

/// Packs an attribute word into the request's 4-byte little-endian buffer.
fn encode(bits: u32) -> [u8; 4] {
    let mut buf = [0u8; 4];
    LittleEndian::write_u32(&mut buf, bits);
    buf
}

fn decode(buf: &[u8; 4]) -> u32 {
    LittleEndian::read_u32(buf)
}
