//! Print FAT attributes and the Windows-safe name of each path argument.
//!
//! Run with: `RUST_LOG=fat_attrs=trace cargo run --example inspect -- /mnt/usb/*`

use fat_attrs::{AttributeSelector, CharMap, FatAttributes, capture};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let selector = AttributeSelector::host();
    println!("backend: {}", selector.backend_kind());

    let windows = CharMap::windows();
    for arg in std::env::args().skip(1) {
        let path = Path::new(&arg);
        let kind = selector.filesystem_kind(path);
        let attrs = FatAttributes::from_path_with(selector, path);
        let item = capture(path);
        println!(
            "{arg}: {kind:?} {attrs} (raw {:#010x}, stored {:?}, windows-safe {:?})",
            attrs.bits(),
            item.bits(),
            windows.map(&arg),
        );
    }
}
