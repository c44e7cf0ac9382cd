//! Raw native attribute channel.

use std::io;
use std::path::Path;
use std::sync::Arc;

/// A platform's native attribute get/set call, with no policy attached.
///
/// The Linux and Windows backends are written against this trait so that
/// their fallback and error-reporting rules stay portable and testable. The
/// real implementations (`FatIoctl`, `Win32Attributes`) hold the only
/// foreign calls in the crate.
///
/// Bit layout is channel-specific: the Linux channel speaks FAT bits, the
/// Windows channel speaks `FILE_ATTRIBUTE_*` bits.
///
/// Implementations must release any handle they open before returning.
pub trait NativeAttributes: Send + Sync {
    /// Read the raw attribute word for `path`.
    fn read(&self, path: &Path) -> io::Result<u32>;

    /// Write the raw attribute word for `path`.
    fn write(&self, path: &Path, bits: u32) -> io::Result<()>;
}

impl<T: NativeAttributes + ?Sized> NativeAttributes for Arc<T> {
    fn read(&self, path: &Path) -> io::Result<u32> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, bits: u32) -> io::Result<()> {
        (**self).write(path, bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_attributes_is_object_safe() {
        fn _check(_: &dyn NativeAttributes) {}
    }

    struct Zeroed;

    impl NativeAttributes for Zeroed {
        fn read(&self, _path: &Path) -> io::Result<u32> {
            Ok(0)
        }

        fn write(&self, _path: &Path, _bits: u32) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn shared_channel_crosses_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Zeroed>();
        assert_send_sync::<Arc<dyn NativeAttributes>>();

        let channel: Arc<dyn NativeAttributes> = Arc::new(Zeroed);
        let worker = Arc::clone(&channel);
        let bits = std::thread::spawn(move || worker.read(Path::new("/mnt/usb/a")).unwrap())
            .join()
            .unwrap();
        assert_eq!(bits, 0);
        channel.write(Path::new("/mnt/usb/a"), 0x21).unwrap();
    }
}
