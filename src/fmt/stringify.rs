//! Recursive argument stringification.
//!
//! Containers are tracked by address in a [`CycleGuard`] that lives on the call stack: each
//! container level links a new node to its parent, so a branch only sees its ancestors and
//! siblings never mark each other as visited.

use crate::arg::{Arg, DescribeError, SharedMap, SharedSeq};
use crate::internal;
use crate::level::Level;
use std::fmt::{Display, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Opens the marker written when a container is reached again through its own contents.
pub const RECURSION_PREFIX: &str = "[...";
pub const RECURSION_SUFFIX: &str = "...]";

/// Opens the marker written in place of a value whose text conversion failed.
pub const ERROR_PREFIX: &str = "[!!!";
pub const ERROR_SEPARATOR: &str = "=>";
pub const ERROR_MSG_SEPARATOR: &str = ":";
pub const ERROR_SUFFIX: &str = "!!!]";

/// strftime pattern for date arguments: ISO-8601 with milliseconds and numeric offset.
pub const DATE_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

const NULL_TEXT: &str = "null";

/// Ancestor chain of the containers currently being rendered.
#[derive(Debug, Clone, Copy)]
pub struct CycleGuard<'a> {
    identity: usize,
    parent: Option<&'a CycleGuard<'a>>,
}

impl<'a> CycleGuard<'a> {
    #[must_use]
    pub const fn root(identity: usize) -> Self {
        Self {
            identity,
            parent: None,
        }
    }

    /// Extends this branch with a child container.
    #[must_use]
    pub const fn child(&'a self, identity: usize) -> Self {
        Self {
            identity,
            parent: Some(self),
        }
    }

    #[must_use]
    pub fn contains(&self, identity: usize) -> bool {
        let mut node = Some(self);
        while let Some(guard) = node {
            if guard.identity == identity {
                return true;
            }
            node = guard.parent;
        }
        false
    }
}

/// Appends the text form of `value` to `buf`. Never fails.
pub fn stringify(value: &Arg, buf: &mut String) {
    stringify_guarded(value, buf, None);
}

/// Owned text form of `value`.
#[must_use]
pub fn deep_to_string(value: &Arg) -> String {
    match value {
        Arg::Str(s) => s.to_string(),
        _ => {
            let mut buf = String::new();
            stringify(value, &mut buf);
            buf
        }
    }
}

/// `Type@hexaddr` for values with a stable identity (containers and trait objects).
#[must_use]
pub fn identity_to_string(value: &Arg) -> Option<String> {
    let (name, addr) = identity_of(value)?;
    let mut buf = String::new();
    write_identity(&mut buf, name, addr);
    Some(buf)
}

/// Guarded entry point used by the recursion; `guard` holds the ancestors of `value`.
pub fn stringify_guarded(value: &Arg, buf: &mut String, guard: Option<&CycleGuard<'_>>) {
    match value {
        Arg::Null => buf.push_str(NULL_TEXT),
        Arg::Bool(v) => buf.push_str(if *v { "true" } else { "false" }),
        Arg::Char(v) => buf.push(*v),
        Arg::Int(v) => push_display(buf, v),
        Arg::UInt(v) => push_display(buf, v),
        Arg::F32(v) => push_display(buf, v),
        Arg::F64(v) => push_display(buf, v),
        Arg::Str(v) => buf.push_str(v),
        Arg::DateTime(v) => push_display(buf, v.format(DATE_PATTERN)),
        Arg::Primitives(v) => v.write_to(buf),
        Arg::Seq(seq) => append_seq(seq, buf, guard),
        Arg::Map(map) => append_map(map, buf, guard),
        Arg::Formattable(v) => append_checked(buf, "Formattable", address(v), |buf| {
            v.format_to(buf);
            Ok(())
        }),
        Arg::Object(v) => append_checked(buf, v.type_name(), address(v), |buf| v.describe(buf)),
        Arg::Error(e) => append_checked(buf, "Error", address(e), |buf| {
            write!(buf, "{e}")?;
            Ok(())
        }),
    }
}

fn push_display(buf: &mut String, value: impl Display) {
    // Only the chrono formatter can fail here, and only on an invalid pattern.
    let _ = write!(buf, "{value}");
}

fn append_seq(seq: &Arc<SharedSeq>, buf: &mut String, guard: Option<&CycleGuard<'_>>) {
    let identity = seq.identity();
    let name = seq.kind().type_name();
    if guard.is_some_and(|g| g.contains(identity)) {
        write_recursion_marker(buf, name, identity);
        return;
    }
    let items = match seq.read() {
        Ok(items) => items,
        Err(err) => {
            write_error_marker(buf, name, identity, &err);
            return;
        }
    };
    let branch = guard.map_or_else(|| CycleGuard::root(identity), |g| g.child(identity));

    buf.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            buf.push_str(", ");
        }
        stringify_guarded(item, buf, Some(&branch));
    }
    buf.push(']');
}

fn append_map(map: &Arc<SharedMap>, buf: &mut String, guard: Option<&CycleGuard<'_>>) {
    let identity = map.identity();
    if guard.is_some_and(|g| g.contains(identity)) {
        write_recursion_marker(buf, "Map", identity);
        return;
    }
    let entries = match map.read() {
        Ok(entries) => entries,
        Err(err) => {
            write_error_marker(buf, "Map", identity, &err);
            return;
        }
    };
    let branch = guard.map_or_else(|| CycleGuard::root(identity), |g| g.child(identity));

    buf.push('{');
    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 {
            buf.push_str(", ");
        }
        stringify_guarded(key, buf, Some(&branch));
        buf.push('=');
        stringify_guarded(value, buf, Some(&branch));
    }
    buf.push('}');
}

/// Runs a user-supplied conversion. An `Err` or a panic discards its partial output and
/// leaves an error marker in its place, so the rest of the message still renders.
fn append_checked(
    buf: &mut String,
    name: &str,
    addr: usize,
    write: impl FnOnce(&mut String) -> Result<(), DescribeError>,
) {
    let mark = buf.len();
    let result = panic::catch_unwind(AssertUnwindSafe(|| write(&mut *buf)))
        .unwrap_or_else(|payload| Err(DescribeError::from_panic(payload.as_ref())));
    if let Err(err) = result {
        buf.truncate(mark);
        internal::log_args(
            Level::Debug,
            "FORMAT",
            "argument of type {} failed to describe itself: {}",
            &crate::args![name.to_owned(), err.to_string()],
        );
        write_error_marker(buf, name, addr, &err);
    }
}

fn write_recursion_marker(buf: &mut String, name: &str, addr: usize) {
    buf.push_str(RECURSION_PREFIX);
    write_identity(buf, name, addr);
    buf.push_str(RECURSION_SUFFIX);
}

fn write_error_marker(buf: &mut String, name: &str, addr: usize, err: &DescribeError) {
    buf.push_str(ERROR_PREFIX);
    write_identity(buf, name, addr);
    buf.push_str(ERROR_SEPARATOR);
    buf.push_str(err.kind());
    if let Some(message) = err.message().filter(|m| *m != err.kind()) {
        buf.push_str(ERROR_MSG_SEPARATOR);
        buf.push_str(message);
    }
    buf.push_str(ERROR_SUFFIX);
}

fn write_identity(buf: &mut String, name: &str, addr: usize) {
    let _ = write!(buf, "{name}@{addr:x}");
}

fn address<T: ?Sized>(value: &Arc<T>) -> usize {
    Arc::as_ptr(value).cast::<()>().addr()
}

fn identity_of(value: &Arg) -> Option<(&'static str, usize)> {
    match value {
        Arg::Seq(seq) => Some((seq.kind().type_name(), seq.identity())),
        Arg::Map(map) => Some(("Map", map.identity())),
        Arg::Primitives(v) => Some(("PrimitiveArray", address(v))),
        Arg::Formattable(v) => Some(("Formattable", address(v))),
        Arg::Object(v) => Some((v.type_name(), address(v))),
        Arg::Error(e) => Some(("Error", address(e))),
        _ => None,
    }
}
