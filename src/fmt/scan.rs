//! Placeholder scanning.
//!
//! The three syntax characters are ASCII, so the scan works on bytes and every recorded
//! offset is a valid `str` slice boundary even in non-ASCII templates.

use crate::args;
use crate::internal;
use crate::level::Level;

pub(crate) const ESCAPE_CHAR: u8 = b'\\';
pub(crate) const DELIM_START: u8 = b'{';
pub(crate) const DELIM_STOP: u8 = b'}';

/// Number of placeholder offsets a [`Placeholders`] cache records.
///
/// Templates with more placeholders than this are still counted exactly, but their
/// messages render through the escape-aware generic path instead of the indexed one.
pub const MAX_INDEXED_PLACEHOLDERS: usize = 32;

/// Result of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scan {
    /// Unescaped `{}` pairs in the template.
    pub count: usize,
    /// Every offset was recorded and the template has no escape characters, so the
    /// indexed substitution path may be used.
    pub indexed: bool,
}

/// Scans `template` once, writing the byte offset of each unescaped `{` into `indices`.
///
/// Offsets beyond `indices.len()` are not recorded; the count stays exact and the result is
/// marked as not indexed. Passing an empty slice gives a count-only scan.
#[must_use]
pub fn scan(template: &str, indices: &mut [usize]) -> Scan {
    let bytes = template.as_bytes();
    let mut count = 0;
    let mut escaped = false;
    let mut has_escapes = false;
    let mut overflow = false;
    let mut i = 0;

    while i + 1 < bytes.len() {
        match bytes[i] {
            ESCAPE_CHAR => {
                escaped = !escaped;
                has_escapes = true;
            }
            DELIM_START => {
                if !escaped && bytes[i + 1] == DELIM_STOP {
                    if let Some(slot) = indices.get_mut(count) {
                        *slot = i;
                    } else {
                        overflow = true;
                    }
                    count += 1;
                    i += 1;
                }
                escaped = false;
            }
            _ => escaped = false,
        }
        i += 1;
    }

    Scan {
        count,
        indexed: !has_escapes && !overflow,
    }
}

/// Number of unescaped placeholders in `template`.
#[must_use]
pub fn count_placeholders(template: &str) -> usize {
    scan(template, &mut []).count
}

/// Fixed-capacity index cache owned by a message; rescanned whenever the template changes.
#[derive(Debug, Clone, Copy)]
pub struct Placeholders {
    offsets: [usize; MAX_INDEXED_PLACEHOLDERS],
    last: Scan,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self::new()
    }
}

impl Placeholders {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offsets: [0; MAX_INDEXED_PLACEHOLDERS],
            last: Scan {
                count: 0,
                indexed: true,
            },
        }
    }

    /// Replaces the cached offsets with those of `template`.
    pub fn rescan(&mut self, template: &str) -> Scan {
        self.last = scan(template, &mut self.offsets);
        if self.last.count > MAX_INDEXED_PLACEHOLDERS {
            internal::log_args(
                Level::Trace,
                "SCAN",
                "{} placeholders exceed the {}-slot index, using generic path",
                &args![self.last.count, MAX_INDEXED_PLACEHOLDERS],
            );
        }
        self.last
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.last.count
    }

    #[must_use]
    pub const fn last_scan(&self) -> Scan {
        self.last
    }

    /// Offsets usable by the indexed path, or `None` when the generic path is required.
    #[must_use]
    pub fn indices(&self) -> Option<&[usize]> {
        self.last
            .indexed
            .then(|| &self.offsets[..self.last.count])
    }

    pub const fn clear(&mut self) {
        self.last = Scan {
            count: 0,
            indexed: true,
        };
    }
}
