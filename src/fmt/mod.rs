//! The formatting core: placeholder scanning, argument stringification and substitution.
//!
//! Everything here writes into caller-owned `String` buffers and never fails; argument
//! failures become inline markers instead of errors.

pub mod layout;
pub mod scan;
pub mod stringify;
pub mod substitute;

pub use layout::{Field, LayoutSegment, LayoutValues, StatusLayout};
pub use scan::{MAX_INDEXED_PLACEHOLDERS, Placeholders, Scan, count_placeholders, scan};
pub use stringify::{
    CycleGuard, DATE_PATTERN, ERROR_MSG_SEPARATOR, ERROR_PREFIX, ERROR_SEPARATOR, ERROR_SUFFIX,
    RECURSION_PREFIX, RECURSION_SUFFIX, deep_to_string, identity_to_string, stringify,
};
pub use substitute::{format, format_to, render_to};
