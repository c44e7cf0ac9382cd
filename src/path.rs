//! # Path Character Codec
//!
//! Windows forbids `* ? < > | :` in file names. To store a file whose name
//! came from another system, each of those characters is moved into the
//! private use area at `0xF000 + ch` (the CIFS remap convention) and moved
//! back on the way out. Backslash is left alone.
//!
//! On every other host the table is empty and both directions are the
//! identity.
//!
//! ```rust
//! use fat_attrs::CharMap;
//!
//! let map = CharMap::windows();
//! let safe = map.map("notes:2024?.txt");
//! assert_eq!(safe, "notes\u{f03a}2024\u{f03f}.txt");
//! assert_eq!(map.unmap(&safe), "notes:2024?.txt");
//! ```

use std::borrow::Cow;

use once_cell::sync::Lazy;

use crate::Platform;

/// Start of the private use remap range.
pub const REMAP_OFFSET: u32 = 0xF000;

/// Characters Windows rejects in file names that get remapped.
pub const RESERVED_CHARS: [char; 6] = ['*', '?', '<', '>', '|', ':'];

static HOST: Lazy<CharMap> = Lazy::new(|| CharMap::for_platform(Platform::host()));

/// Map `path` into a form Windows can store. Identity on non-Windows hosts.
pub fn safe_path(path: &str) -> Cow<'_, str> {
    CharMap::host().map(path)
}

/// Reverse [`safe_path`]. Identity on non-Windows hosts.
pub fn original_path(path: &str) -> Cow<'_, str> {
    CharMap::host().unmap(path)
}

/// A fixed, injective character table and its inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharMap {
    pairs: Vec<(char, char)>,
}

impl CharMap {
    /// The six-entry Windows table, independent of the host.
    pub fn windows() -> Self {
        let pairs = RESERVED_CHARS
            .iter()
            .filter_map(|&ch| char::from_u32(REMAP_OFFSET + ch as u32).map(|mapped| (ch, mapped)))
            .collect();
        Self { pairs }
    }

    /// The empty table.
    pub fn identity() -> Self {
        Self { pairs: Vec::new() }
    }

    /// The Windows table on Windows, the empty table elsewhere.
    pub fn for_platform(platform: &Platform) -> Self {
        if platform.win32 {
            Self::windows()
        } else {
            Self::identity()
        }
    }

    /// The table for this process, built on first use.
    pub fn host() -> &'static CharMap {
        &HOST
    }

    /// Returns `true` if this table maps nothing.
    pub fn is_identity(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Replace every reserved character with its remapped code point.
    pub fn map<'a>(&self, path: &'a str) -> Cow<'a, str> {
        self.translate(path, |ch| self.forward(ch))
    }

    /// Replace every remapped code point with its original character.
    pub fn unmap<'a>(&self, path: &'a str) -> Cow<'a, str> {
        self.translate(path, |ch| self.inverse(ch))
    }

    fn forward(&self, ch: char) -> Option<char> {
        self.pairs.iter().find(|(from, _)| *from == ch).map(|(_, to)| *to)
    }

    fn inverse(&self, ch: char) -> Option<char> {
        self.pairs.iter().find(|(_, to)| *to == ch).map(|(from, _)| *from)
    }

    fn translate<'a>(&self, path: &'a str, lookup: impl Fn(char) -> Option<char>) -> Cow<'a, str> {
        if self.is_identity() || !path.chars().any(|ch| lookup(ch).is_some()) {
            return Cow::Borrowed(path);
        }
        Cow::Owned(path.chars().map(|ch| lookup(ch).unwrap_or(ch)).collect())
    }
}
