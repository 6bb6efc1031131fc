//! The immutable message and the memento form of a reusable holder.

use super::{Message, bind};
use crate::arg::{Arg, ErrorArg};
use crate::fmt::{self, Placeholders};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

/// Template plus an owned argument snapshot. `Send + Sync`, so it can be retained or handed to
/// another thread. The text is rendered on first use and cached.
#[derive(Clone)]
pub struct ParameterizedMessage {
    template: Cow<'static, str>,
    params: Vec<Arg>,
    placeholders: Placeholders,
    used_count: usize,
    error: Option<ErrorArg>,
    formatted: OnceLock<String>,
}

impl ParameterizedMessage {
    /// Binds `args` to `template`; an unused trailing error argument becomes the message error.
    ///
    /// ```
    /// use parafmt::{Arg, ParameterizedMessage, Message, args};
    ///
    /// let io = std::io::Error::other("timeout");
    /// let msg = ParameterizedMessage::new("Retry {} of {}", args![3, 5, Arg::error(io)]);
    /// assert_eq!(msg.formatted_message(), "Retry 3 of 5");
    /// assert!(msg.error().is_some());
    /// ```
    pub fn new(template: impl Into<Cow<'static, str>>, args: impl Into<Vec<Arg>>) -> Self {
        let template = template.into();
        let params = args.into();
        let mut placeholders = Placeholders::new();
        let (used_count, error) = bind(&mut placeholders, &template, &params);
        Self {
            template,
            params,
            placeholders,
            used_count,
            error,
            formatted: OnceLock::new(),
        }
    }

    /// Attaches `error` explicitly; trailing extraction is skipped and every argument stays
    /// available for substitution.
    pub fn with_error(
        template: impl Into<Cow<'static, str>>,
        args: impl Into<Vec<Arg>>,
        error: ErrorArg,
    ) -> Self {
        let template = template.into();
        let params = args.into();
        let mut placeholders = Placeholders::new();
        let count = placeholders.rescan(&template).count;
        Self {
            used_count: count.min(params.len()),
            template,
            params,
            placeholders,
            error: Some(error),
            formatted: OnceLock::new(),
        }
    }

    pub(crate) fn from_parts(
        template: Cow<'static, str>,
        params: Vec<Arg>,
        placeholders: Placeholders,
        used_count: usize,
        error: Option<ErrorArg>,
        formatted: Option<String>,
    ) -> Self {
        Self {
            template,
            params,
            placeholders,
            used_count,
            error,
            formatted: formatted.map_or_else(OnceLock::new, OnceLock::from),
        }
    }

    /// One-shot formatting without keeping a message around.
    #[must_use]
    pub fn format(template: &str, args: &[Arg]) -> String {
        fmt::format(template, args)
    }

    /// Number of arguments substituted into the template.
    #[must_use]
    pub const fn used_count(&self) -> usize {
        self.used_count
    }

    #[must_use]
    pub const fn placeholder_count(&self) -> usize {
        self.placeholders.count()
    }

    /// Gives the argument buffer back, e.g. to a holder via `swap_parameters`.
    #[must_use]
    pub fn into_parameters(self) -> Vec<Arg> {
        self.params
    }

    fn render(&self) -> String {
        let mut buf = String::with_capacity(self.template.len() + self.used_count * 8);
        fmt::render_to(
            &mut buf,
            &self.template,
            &self.params,
            self.used_count,
            self.placeholders.indices(),
        );
        buf
    }
}

impl Message for ParameterizedMessage {
    fn formatted_message(&self) -> &str {
        self.formatted.get_or_init(|| self.render())
    }

    fn template(&self) -> &str {
        &self.template
    }

    fn parameters(&self) -> &[Arg] {
        &self.params
    }

    fn error(&self) -> Option<&ErrorArg> {
        self.error.as_ref()
    }

    fn format_to(&self, buf: &mut String) {
        match self.formatted.get() {
            Some(text) => buf.push_str(text),
            None => fmt::render_to(
                buf,
                &self.template,
                &self.params,
                self.used_count,
                self.placeholders.indices(),
            ),
        }
    }
}

impl PartialEq for ParameterizedMessage {
    fn eq(&self, other: &Self) -> bool {
        self.template == other.template
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(a, b)| fmt::deep_to_string(a) == fmt::deep_to_string(b))
    }
}

impl Eq for ParameterizedMessage {}

impl Hash for ParameterizedMessage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.template.hash(state);
        self.params.len().hash(state);
        for param in &self.params {
            fmt::deep_to_string(param).hash(state);
        }
    }
}

impl std::fmt::Display for ParameterizedMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.formatted_message())
    }
}

impl std::fmt::Debug for ParameterizedMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterizedMessage")
            .field("template", &self.template)
            .field("parameters", &stringified(&self.params))
            .field("used_count", &self.used_count)
            .field("error", &self.error.as_ref().map(ToString::to_string))
            .finish()
    }
}

/// Arguments are not serializable themselves; their text forms are written instead.
#[derive(Serialize)]
struct SerializedMessage<'a> {
    template: &'a str,
    parameters: Vec<String>,
    formatted: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Serialize for ParameterizedMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SerializedMessage {
            template: &self.template,
            parameters: stringified(&self.params),
            formatted: self.formatted_message(),
            error: self.error.as_ref().map(ToString::to_string),
        }
        .serialize(serializer)
    }
}

pub(crate) fn stringified(params: &[Arg]) -> Vec<String> {
    params.iter().map(fmt::deep_to_string).collect()
}
