//! Arguments are accepted as a closed set of categories so the stringifier can dispatch with
//! a single `match` instead of probing each value for capabilities at render time.

mod container;
mod describe;
mod primitive;

pub use container::{SeqKind, SharedMap, SharedSeq};
pub use describe::{Describe, DescribeError, DisplayValue, Formattable};
pub use primitive::PrimitiveArray;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

/// Shared error value. Travels alongside a message when it is the unused trailing argument.
pub type ErrorArg = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// One message argument.
///
/// Cloning is cheap: every variant is either `Copy` data, a borrowed `'static` string, or
/// reference counted. Cloning never copies container contents.
///
/// Strings are held as `Cow<'static, str>` so arguments can outlive the call site in a
/// memento or a detached message. Literals are borrowed for free; a borrowed `&str` with a
/// shorter lifetime must be converted to a `String` first, which costs one allocation per
/// argument even on the pooled path.
///
/// ```
/// use parafmt::{Arg, fmt};
///
/// let request = String::from("GET /health");
/// let line: &str = &request;
/// let args = [Arg::from("static"), Arg::from(line.to_owned())];
/// assert_eq!(fmt::format("{} {}", &args), "static GET /health");
/// ```
#[derive(Clone, Default)]
pub enum Arg {
    /// Renders as `null`.
    #[default]
    Null,
    Bool(bool),
    Char(char),
    Int(i64),
    UInt(u64),
    F32(f32),
    F64(f64),
    Str(Cow<'static, str>),
    /// Rendered as `yyyy-MM-ddTHH:mm:ss.SSS+hhmm`.
    DateTime(DateTime<FixedOffset>),
    /// Array of primitives; cannot contain itself, so no cycle check is needed.
    Primitives(Arc<PrimitiveArray>),
    /// Array, list or set of arbitrary arguments.
    Seq(Arc<SharedSeq>),
    /// Key/value entries rendered as `{k=v, ...}`.
    Map(Arc<SharedMap>),
    /// Writes itself straight into the output buffer.
    Formattable(Arc<dyn Formattable>),
    /// Opaque value with a fallible text conversion.
    Object(Arc<dyn Describe>),
    /// Error value. Substituted like any other argument when a placeholder consumes it.
    Error(ErrorArg),
}

impl Arg {
    /// Wraps any `Display` value; a failing `fmt` impl produces an inline error marker.
    pub fn display<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        Self::Object(Arc::new(DisplayValue::new(value)))
    }

    pub fn describe(value: impl Describe + 'static) -> Self {
        Self::Object(Arc::new(value))
    }

    pub fn formattable(value: impl Formattable + 'static) -> Self {
        Self::Formattable(Arc::new(value))
    }

    pub fn error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Error(Arc::new(error))
    }

    /// Ordered collection rendered as `[a, b]`.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::Seq(SharedSeq::from_items(SeqKind::List, collect(items)))
    }

    /// Fixed-size array of arbitrary arguments.
    pub fn array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::Seq(SharedSeq::from_items(SeqKind::Array, collect(items)))
    }

    /// Unordered collection; rendered in the order the items were supplied.
    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::Seq(SharedSeq::from_items(SeqKind::Set, collect(items)))
    }

    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Self>,
        V: Into<Self>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::Map(SharedMap::from_entries(entries))
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The trailing-error rule only looks at this variant.
    #[must_use]
    pub const fn as_error(&self) -> Option<&ErrorArg> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

fn collect<I, T>(items: I) -> Vec<Arg>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    items.into_iter().map(Into::into).collect()
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Char(v) => f.debug_tuple("Char").field(v).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Self::F32(v) => f.debug_tuple("F32").field(v).finish(),
            Self::F64(v) => f.debug_tuple("F64").field(v).finish(),
            Self::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Self::DateTime(v) => f.debug_tuple("DateTime").field(v).finish(),
            Self::Primitives(v) => f.debug_tuple("Primitives").field(v).finish(),
            // Containers may be cyclic, so only their identity is shown.
            Self::Seq(v) => write!(f, "Seq({}@{:x})", v.kind().type_name(), v.identity()),
            Self::Map(v) => write!(f, "Map(Map@{:x})", v.identity()),
            Self::Formattable(v) => {
                write!(f, "Formattable({:x})", Arc::as_ptr(v).cast::<()>().addr())
            }
            Self::Object(v) => write!(f, "Object({})", v.type_name()),
            Self::Error(v) => f.debug_tuple("Error").field(&v.to_string()).finish(),
        }
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Arg {
            fn from(value: $t) -> Self {
                Self::Int(i64::from(value))
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Arg {
            fn from(value: $t) -> Self {
                Self::UInt(u64::from(value))
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64);
from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Arg {
    fn from(value: isize) -> Self {
        // isize is at most 64 bits on every supported target
        i64::try_from(value).map_or_else(|_| Self::display(value), Self::Int)
    }
}

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or_else(|_| Self::display(value), Self::UInt)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for Arg {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Self::F32(value)
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<&'static str> for Arg {
    fn from(value: &'static str) -> Self {
        Self::Str(Cow::Borrowed(value))
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Str(Cow::Owned(value))
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Self::Str(Cow::Owned(value.clone()))
    }
}

impl From<Cow<'static, str>> for Arg {
    fn from(value: Cow<'static, str>) -> Self {
        Self::Str(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Arg {
    fn from(value: DateTime<Tz>) -> Self {
        Self::DateTime(value.fixed_offset())
    }
}

impl From<SystemTime> for Arg {
    fn from(value: SystemTime) -> Self {
        Self::from(DateTime::<Utc>::from(value))
    }
}

impl From<PrimitiveArray> for Arg {
    fn from(value: PrimitiveArray) -> Self {
        Self::Primitives(Arc::new(value))
    }
}

impl From<Arc<SharedSeq>> for Arg {
    fn from(value: Arc<SharedSeq>) -> Self {
        Self::Seq(value)
    }
}

impl From<&Arc<SharedSeq>> for Arg {
    fn from(value: &Arc<SharedSeq>) -> Self {
        Self::Seq(Arc::clone(value))
    }
}

impl From<Arc<SharedMap>> for Arg {
    fn from(value: Arc<SharedMap>) -> Self {
        Self::Map(value)
    }
}

impl From<&Arc<SharedMap>> for Arg {
    fn from(value: &Arc<SharedMap>) -> Self {
        Self::Map(Arc::clone(value))
    }
}

impl From<ErrorArg> for Arg {
    fn from(value: ErrorArg) -> Self {
        Self::Error(value)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync + 'static>> for Arg {
    fn from(value: Box<dyn std::error::Error + Send + Sync + 'static>) -> Self {
        Self::Error(Arc::from(value))
    }
}

impl<T: Into<Self>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Builds a fixed-size argument array, converting each value with `Arg::from`.
///
/// ```
/// use parafmt::{Arg, args};
///
/// let values: [Arg; 2] = args!["alice", 42];
/// assert_eq!(values[0].as_str(), Some("alice"));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        [] as [$crate::Arg; 0]
    };
    ($($value:expr),+ $(,)?) => {
        [$($crate::Arg::from($value)),+]
    };
}
