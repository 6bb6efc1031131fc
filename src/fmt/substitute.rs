//! Template substitution.
//!
//! Two paths produce identical output for templates without escape characters:
//! the indexed path copies literal spans between precomputed offsets, the generic path
//! rescans the template and resolves escape runs as it goes.

use super::scan::{DELIM_START, DELIM_STOP, ESCAPE_CHAR, Placeholders};
use super::stringify::stringify;
use crate::arg::Arg;

const PLACEHOLDER: &str = "{}";

/// Formats `template` with `args` into a new `String`.
///
/// Every unescaped placeholder consumes the next argument; extra arguments are ignored and
/// missing ones leave the placeholder as `{}`.
///
/// ```
/// use parafmt::{args, fmt};
///
/// assert_eq!(fmt::format("{} of {}", &args![3, 5]), "3 of 5");
/// assert_eq!(fmt::format("\\{} {}", &args![1]), "{} 1");
/// ```
#[must_use]
pub fn format(template: &str, args: &[Arg]) -> String {
    let mut buf = String::with_capacity(template.len() + args.len() * 8);
    format_to(&mut buf, template, args);
    buf
}

/// Appends the formatted text to `buf`, scanning the template first.
pub fn format_to(buf: &mut String, template: &str, args: &[Arg]) {
    let mut placeholders = Placeholders::new();
    let scan = placeholders.rescan(template);
    render_to(
        buf,
        template,
        args,
        scan.count.min(args.len()),
        placeholders.indices(),
    );
}

/// Appends the formatted text to `buf` using a previous scan.
///
/// `indices` holds the offsets of the unescaped placeholders when the template contains no
/// escape characters; `None` selects the generic path. `used_count` caps how many arguments
/// are substituted and is clamped to `args.len()`.
pub fn render_to(
    buf: &mut String,
    template: &str,
    args: &[Arg],
    used_count: usize,
    indices: Option<&[usize]>,
) {
    let args = &args[..used_count.min(args.len())];
    match indices {
        Some(indices) => render_indexed(buf, template, args, indices),
        None => render_generic(buf, template, args),
    }
}

fn render_indexed(buf: &mut String, template: &str, args: &[Arg], indices: &[usize]) {
    buf.reserve(template.len());
    let mut previous = 0;
    for (i, &at) in indices.iter().enumerate() {
        buf.push_str(&template[previous..at]);
        match args.get(i) {
            Some(arg) => stringify(arg, buf),
            None => buf.push_str(PLACEHOLDER),
        }
        previous = at + PLACEHOLDER.len();
    }
    buf.push_str(&template[previous..]);
}

fn render_generic(buf: &mut String, template: &str, args: &[Arg]) {
    buf.reserve(template.len());
    let bytes = template.as_bytes();
    let mut next_arg = args.iter();
    // Start of the literal text not yet copied into `buf`.
    let mut run_start = 0;
    // Length of the backslash run ending just before `i`.
    let mut escapes = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            ESCAPE_CHAR => escapes += 1,
            DELIM_START if bytes.get(i + 1) == Some(&DELIM_STOP) => {
                buf.push_str(&template[run_start..i - escapes]);
                for _ in 0..escapes / 2 {
                    buf.push(char::from(ESCAPE_CHAR));
                }
                if escapes % 2 == 1 {
                    buf.push_str(PLACEHOLDER);
                } else {
                    match next_arg.next() {
                        Some(arg) => stringify(arg, buf),
                        None => buf.push_str(PLACEHOLDER),
                    }
                }
                i += PLACEHOLDER.len();
                run_start = i;
                escapes = 0;
                continue;
            }
            _ => escapes = 0,
        }
        i += 1;
    }
    buf.push_str(&template[run_start..]);
}
