//! Message values: a template bound to its arguments, with the text rendered at most once.
//!
//! [`ParameterizedMessage`] is the immutable, thread-safe form. [`ReusableMessage`] is the
//! mutable holder recycled by the per-thread pool. The remaining kinds cover templates
//! without arguments, single values, and eagerly rendered text.

mod factory;
mod parameterized;
mod reusable;

pub use factory::{
    MessageFactory, NoReferenceMessageFactory, ParameterizedMessageFactory,
    ReusableMessageFactory,
};
pub use parameterized::ParameterizedMessage;
pub use reusable::{MAX_PARAMS, ReusableMessage};

use crate::arg::{Arg, ErrorArg};
use crate::fmt::{self, Placeholders};
use std::borrow::Cow;
use std::sync::OnceLock;

/// Read access shared by every message kind.
pub trait Message {
    /// Rendered text; computed on first call for lazy kinds.
    fn formatted_message(&self) -> &str;

    fn template(&self) -> &str;

    /// Arguments as supplied, including an extracted trailing error.
    fn parameters(&self) -> &[Arg];

    /// Trailing error argument that no placeholder consumed, or an explicitly attached one.
    fn error(&self) -> Option<&ErrorArg>;

    /// Appends the rendered text to `buf`.
    fn format_to(&self, buf: &mut String) {
        buf.push_str(self.formatted_message());
    }
}

/// Scans `template` into `placeholders` and works out how many arguments are substituted and
/// whether the last one is an unused error.
pub(crate) fn bind(
    placeholders: &mut Placeholders,
    template: &str,
    args: &[Arg],
) -> (usize, Option<ErrorArg>) {
    let count = placeholders.rescan(template).count;
    let error = if count < args.len() {
        args.last().and_then(Arg::as_error).cloned()
    } else {
        None
    };
    (count.min(args.len()), error)
}

/// Template-only message; the text is used as is, with no placeholder processing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleMessage {
    text: Cow<'static, str>,
}

impl SimpleMessage {
    #[must_use]
    pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
        Self { text: text.into() }
    }
}

impl Message for SimpleMessage {
    fn formatted_message(&self) -> &str {
        &self.text
    }

    fn template(&self) -> &str {
        &self.text
    }

    fn parameters(&self) -> &[Arg] {
        &[]
    }

    fn error(&self) -> Option<&ErrorArg> {
        None
    }
}

/// A single value logged on its own. When the value is an error it is also the message's
/// error.
#[derive(Debug, Clone)]
pub struct ObjectMessage {
    value: [Arg; 1],
    formatted: OnceLock<String>,
}

impl ObjectMessage {
    #[must_use]
    pub fn new(value: impl Into<Arg>) -> Self {
        Self {
            value: [value.into()],
            formatted: OnceLock::new(),
        }
    }

    #[must_use]
    pub const fn value(&self) -> &Arg {
        &self.value[0]
    }
}

impl Message for ObjectMessage {
    fn formatted_message(&self) -> &str {
        self.formatted
            .get_or_init(|| fmt::deep_to_string(&self.value[0]))
    }

    fn template(&self) -> &str {
        self.formatted_message()
    }

    fn parameters(&self) -> &[Arg] {
        &self.value
    }

    fn error(&self) -> Option<&ErrorArg> {
        self.value[0].as_error()
    }
}

/// Formatted eagerly; keeps only the text and the extracted error, so no argument stays
/// referenced after construction.
#[derive(Debug, Clone)]
pub struct RenderedMessage {
    text: String,
    error: Option<ErrorArg>,
}

impl RenderedMessage {
    #[must_use]
    pub fn new(template: &str, args: &[Arg]) -> Self {
        let mut placeholders = Placeholders::new();
        let (used, error) = bind(&mut placeholders, template, args);
        let mut text = String::with_capacity(template.len());
        fmt::render_to(&mut text, template, args, used, placeholders.indices());
        Self { text, error }
    }

    /// Snapshot of another message's text and error.
    #[must_use]
    pub fn from_message(message: &impl Message) -> Self {
        Self {
            text: message.formatted_message().to_owned(),
            error: message.error().cloned(),
        }
    }

    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

impl Message for RenderedMessage {
    fn formatted_message(&self) -> &str {
        &self.text
    }

    fn template(&self) -> &str {
        &self.text
    }

    fn parameters(&self) -> &[Arg] {
        &[]
    }

    fn error(&self) -> Option<&ErrorArg> {
        self.error.as_ref()
    }
}

impl std::fmt::Display for RenderedMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
