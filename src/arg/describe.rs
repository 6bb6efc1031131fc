//! Capability traits for values the closed `Arg` categories don't cover.

use std::any::Any;
use std::borrow::Cow;
use std::fmt::{self, Write};

const PANIC_KIND: &str = "panic";

/// Values that can write themselves into an output buffer without failing.
///
/// Preferred over [`Describe`] for hot-path types: there is no error path to handle and no
/// intermediate `String`.
pub trait Formattable: Send + Sync {
    fn format_to(&self, buf: &mut String);
}

/// Values with a fallible text conversion.
///
/// Anything the implementation appended before returning `Err` (or panicking) is discarded
/// and replaced by an inline marker of the form `[!!!Type@addr=>kind:message!!!]`. A panic
/// is reported with kind `panic` and the panic message.
pub trait Describe: Send + Sync {
    /// # Errors
    /// Returns the failure that the stringifier reports inline.
    fn describe(&self, buf: &mut String) -> Result<(), DescribeError>;

    /// Type name shown in identity strings and error markers.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Why a [`Describe`] implementation could not produce its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeError {
    kind: Cow<'static, str>,
    message: Option<String>,
}

impl DescribeError {
    #[must_use]
    pub fn new(kind: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: Some(message.into()),
        }
    }

    /// Failure with only a kind, rendered without the `:message` suffix.
    #[must_use]
    pub fn kind_only(kind: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind: kind.into(),
            message: None,
        }
    }

    /// Captures an error's concrete type name and its `Display` text.
    #[must_use]
    pub fn from_error<E: std::error::Error>(error: &E) -> Self {
        Self::new(std::any::type_name::<E>(), error.to_string())
    }

    /// Conversion that panicked; the payload text becomes the message when it is a string.
    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .map_or_else(|| Self::kind_only(PANIC_KIND), |msg| Self::new(PANIC_KIND, msg))
    }

    pub(crate) fn poisoned() -> Self {
        Self::new("PoisonError", "container lock poisoned by a panicked writer")
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for DescribeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {message}", self.kind),
            None => f.write_str(&self.kind),
        }
    }
}

impl std::error::Error for DescribeError {}

impl From<fmt::Error> for DescribeError {
    fn from(error: fmt::Error) -> Self {
        Self::from_error(&error)
    }
}

/// Adapter from `Display` to [`Describe`]; built by [`Arg::display`](crate::Arg::display).
pub struct DisplayValue<T> {
    value: T,
}

impl<T> DisplayValue<T> {
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    pub const fn get(&self) -> &T {
        &self.value
    }
}

impl<T> Describe for DisplayValue<T>
where
    T: fmt::Display + Send + Sync,
{
    fn describe(&self, buf: &mut String) -> Result<(), DescribeError> {
        write!(buf, "{}", self.value)?;
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}
