//! The FAT attribute value object.

use std::fmt;
use std::path::Path;

use crate::{AttrError, AttributeSelector};

/// A FAT attribute bitmask with named predicates and mutators.
///
/// This is the value the archive layer holds in memory. It owns no OS
/// resource: constructing from a path performs one read, [`apply`](Self::apply)
/// performs one write, and everything else is pure.
///
/// Only the low six bits are named. Higher bits read from a native call are
/// kept in [`bits`](Self::bits) and written back unchanged; they just have
/// no predicate and are not shown by `Display`.
///
/// # Example
///
/// ```rust
/// use fat_attrs::FatAttributes;
///
/// let mut attrs = FatAttributes::new();
/// attrs.set_hidden(true).set_read_only(true);
/// assert_eq!(attrs.bits(), 0x03);
/// assert_eq!(attrs.to_string(), "READ_ONLY | HIDDEN");
/// assert_eq!(FatAttributes::new().to_string(), "NONE");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FatAttributes(u32);

impl FatAttributes {
    /// The file cannot be written.
    pub const READ_ONLY: u32 = 0x01;
    /// Hidden from normal directory listings.
    pub const HIDDEN: u32 = 0x02;
    /// Belongs to the operating system.
    pub const SYSTEM: u32 = 0x04;
    /// The entry is a volume label.
    pub const VOLUME_ID: u32 = 0x08;
    /// The entry is a directory.
    pub const DIRECTORY: u32 = 0x10;
    /// Modified since last archived.
    pub const ARCHIVE: u32 = 0x20;

    /// The named flags in bit order.
    pub const FLAGS: [(u32, &'static str); 6] = [
        (Self::READ_ONLY, "READ_ONLY"),
        (Self::HIDDEN, "HIDDEN"),
        (Self::SYSTEM, "SYSTEM"),
        (Self::VOLUME_ID, "VOLUME_ID"),
        (Self::DIRECTORY, "DIRECTORY"),
        (Self::ARCHIVE, "ARCHIVE"),
    ];

    /// Empty attribute set.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Wrap a raw bitmask. No I/O.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Read the attributes of `path` through the host selector.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::from_path_with(AttributeSelector::host(), path)
    }

    /// Read the attributes of `path` through `selector`.
    pub fn from_path_with(selector: &AttributeSelector, path: impl AsRef<Path>) -> Self {
        Self(selector.get_attributes(path.as_ref()))
    }

    /// Same as [`from_path`](Self::from_path).
    pub fn get(path: impl AsRef<Path>) -> Self {
        Self::from_path(path)
    }

    /// Write `bits` to `path` without keeping a value around.
    ///
    /// # Errors
    ///
    /// See [`AttributeSelector::set_attributes`].
    pub fn set(path: impl AsRef<Path>, bits: u32) -> Result<(), AttrError> {
        AttributeSelector::host().set_attributes(path.as_ref(), bits)
    }

    /// Whether `path` is on a FAT-family filesystem.
    pub fn is_fat_filesystem(path: impl AsRef<Path>) -> bool {
        AttributeSelector::host().is_fat_filesystem(path.as_ref())
    }

    /// The raw bitmask, including any unnamed bits.
    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Replace the raw bitmask.
    pub fn set_bits(&mut self, bits: u32) -> &mut Self {
        self.0 = bits;
        self
    }

    /// Write these attributes to `path` through the host selector.
    ///
    /// # Errors
    ///
    /// See [`AttributeSelector::set_attributes`].
    pub fn apply(&self, path: impl AsRef<Path>) -> Result<&Self, AttrError> {
        self.apply_with(AttributeSelector::host(), path)
    }

    /// Write these attributes to `path` through `selector`.
    ///
    /// # Errors
    ///
    /// See [`AttributeSelector::set_attributes`].
    pub fn apply_with(
        &self,
        selector: &AttributeSelector,
        path: impl AsRef<Path>,
    ) -> Result<&Self, AttrError> {
        selector.set_attributes(path.as_ref(), self.0)?;
        Ok(self)
    }

    #[inline]
    fn has(self, flag: u32) -> bool {
        self.0 & flag == flag
    }

    fn toggle(&mut self, flag: u32, value: bool) -> &mut Self {
        if value {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
        self
    }

    /// Is the READ_ONLY flag set?
    pub fn is_read_only(&self) -> bool {
        self.has(Self::READ_ONLY)
    }

    /// Is the HIDDEN flag set?
    pub fn is_hidden(&self) -> bool {
        self.has(Self::HIDDEN)
    }

    /// Is the SYSTEM flag set?
    pub fn is_system(&self) -> bool {
        self.has(Self::SYSTEM)
    }

    /// Is the VOLUME_ID flag set?
    ///
    /// There is no matching setter; volume labels are never toggled from
    /// user code.
    pub fn is_volume_id(&self) -> bool {
        self.has(Self::VOLUME_ID)
    }

    /// Is the DIRECTORY flag set?
    pub fn is_directory(&self) -> bool {
        self.has(Self::DIRECTORY)
    }

    /// Is the ARCHIVE flag set?
    pub fn is_archive(&self) -> bool {
        self.has(Self::ARCHIVE)
    }

    /// Set or clear READ_ONLY.
    pub fn set_read_only(&mut self, value: bool) -> &mut Self {
        self.toggle(Self::READ_ONLY, value)
    }

    /// Set or clear HIDDEN.
    pub fn set_hidden(&mut self, value: bool) -> &mut Self {
        self.toggle(Self::HIDDEN, value)
    }

    /// Set or clear SYSTEM.
    pub fn set_system(&mut self, value: bool) -> &mut Self {
        self.toggle(Self::SYSTEM, value)
    }

    /// Set or clear DIRECTORY.
    pub fn set_directory(&mut self, value: bool) -> &mut Self {
        self.toggle(Self::DIRECTORY, value)
    }

    /// Set or clear ARCHIVE.
    pub fn set_archive(&mut self, value: bool) -> &mut Self {
        self.toggle(Self::ARCHIVE, value)
    }
}

impl From<u32> for FatAttributes {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<FatAttributes> for u32 {
    fn from(attrs: FatAttributes) -> Self {
        attrs.0
    }
}

impl fmt::Display for FatAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Self::FLAGS
            .iter()
            .filter(|(flag, _)| self.has(*flag))
            .map(|(_, name)| *name);
        match names.next() {
            None => f.write_str("NONE"),
            Some(first) => {
                f.write_str(first)?;
                for name in names {
                    write!(f, " | {name}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for FatAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FatAttributes({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Predicate = fn(&FatAttributes) -> bool;

    const PREDICATES: [(u32, Predicate); 6] = [
        (FatAttributes::READ_ONLY, FatAttributes::is_read_only),
        (FatAttributes::HIDDEN, FatAttributes::is_hidden),
        (FatAttributes::SYSTEM, FatAttributes::is_system),
        (FatAttributes::VOLUME_ID, FatAttributes::is_volume_id),
        (FatAttributes::DIRECTORY, FatAttributes::is_directory),
        (FatAttributes::ARCHIVE, FatAttributes::is_archive),
    ];

    #[test]
    fn empty_has_no_flags() {
        let attrs = FatAttributes::new();
        assert_eq!(attrs.bits(), 0);
        assert_eq!(attrs, FatAttributes::default());
        for (_, pred) in PREDICATES {
            assert!(!pred(&attrs));
        }
    }

    #[test]
    fn predicates_reflect_exactly_the_bits() {
        for v in 0..=0x3F_u32 {
            let attrs = FatAttributes::from_bits(v);
            for (flag, pred) in PREDICATES {
                assert_eq!(pred(&attrs), v & flag != 0, "bits {v:#04x} flag {flag:#04x}");
            }
        }
    }

    #[test]
    fn mutator_order_does_not_matter() {
        let mut a = FatAttributes::new();
        a.set_archive(true).set_hidden(true).set_read_only(true);
        let mut b = FatAttributes::new();
        b.set_read_only(true).set_hidden(true).set_archive(true);
        assert_eq!(a, b);
        assert_eq!(a.bits(), 0x23);
    }

    #[test]
    fn clearing_a_flag_leaves_others() {
        let mut attrs = FatAttributes::new();
        attrs
            .set_read_only(true)
            .set_hidden(true)
            .set_system(true)
            .set_archive(true);
        attrs.set_read_only(false);
        assert!(!attrs.is_read_only());
        assert!(attrs.is_hidden());
        assert!(attrs.is_system());
        assert!(attrs.is_archive());
    }

    #[test]
    fn unnamed_bits_survive_mutation() {
        let mut attrs = FatAttributes::from_bits(0x8000_0001);
        attrs.set_read_only(false).set_hidden(true);
        assert_eq!(attrs.bits(), 0x8000_0002);
    }

    #[test]
    fn set_bits_replaces_everything() {
        let mut attrs = FatAttributes::from_bits(0x3F);
        attrs.set_bits(FatAttributes::READ_ONLY | FatAttributes::ARCHIVE);
        assert!(attrs.is_read_only());
        assert!(attrs.is_archive());
        assert!(!attrs.is_hidden());
    }

    #[test]
    fn display_lists_flags_in_bit_order() {
        let attrs = FatAttributes::from_bits(FatAttributes::ARCHIVE | FatAttributes::HIDDEN);
        assert_eq!(attrs.to_string(), "HIDDEN | ARCHIVE");
        assert_eq!(
            FatAttributes::from_bits(0x3F).to_string(),
            "READ_ONLY | HIDDEN | SYSTEM | VOLUME_ID | DIRECTORY | ARCHIVE"
        );
    }

    #[test]
    fn display_hides_unnamed_bits() {
        assert_eq!(FatAttributes::from_bits(0x40).to_string(), "NONE");
        assert_eq!(FatAttributes::from_bits(0x41).to_string(), "READ_ONLY");
        assert_eq!(FatAttributes::from_bits(0x40).bits(), 0x40);
    }

    #[test]
    fn debug_wraps_display() {
        assert_eq!(
            format!("{:?}", FatAttributes::from_bits(0x01)),
            "FatAttributes(READ_ONLY)"
        );
        assert_eq!(format!("{:?}", FatAttributes::new()), "FatAttributes(NONE)");
    }

    #[test]
    fn conversions() {
        let attrs: FatAttributes = 0x21.into();
        assert_eq!(u32::from(attrs), 0x21);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_plain_integer() {
        let attrs = FatAttributes::from_bits(0x21);
        assert_eq!(serde_json::to_string(&attrs).unwrap(), "33");
        let back: FatAttributes = serde_json::from_str("33").unwrap();
        assert_eq!(back, attrs);
    }
}
