use std::fmt::{Display, Write};

/// Homogeneous array of primitive values, rendered as `[1, 2, 3]`.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveArray {
    Bool(Box<[bool]>),
    Char(Box<[char]>),
    Int(Box<[i64]>),
    UInt(Box<[u64]>),
    F32(Box<[f32]>),
    F64(Box<[f64]>),
}

impl PrimitiveArray {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Bool(v) => v.len(),
            Self::Char(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::UInt(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn write_to(&self, buf: &mut String) {
        match self {
            Self::Bool(v) => write_list(buf, v),
            Self::Char(v) => write_list(buf, v),
            Self::Int(v) => write_list(buf, v),
            Self::UInt(v) => write_list(buf, v),
            Self::F32(v) => write_list(buf, v),
            Self::F64(v) => write_list(buf, v),
        }
    }
}

fn write_list<T: Display>(buf: &mut String, values: &[T]) {
    buf.push('[');
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            buf.push_str(", ");
        }
        // Writing primitives into a String cannot fail.
        let _ = write!(buf, "{value}");
    }
    buf.push(']');
}

macro_rules! from_slice {
    ($variant:ident, $target:ty, $($t:ty),*) => {$(
        impl From<&[$t]> for PrimitiveArray {
            fn from(values: &[$t]) -> Self {
                Self::$variant(values.iter().map(|&v| <$target>::from(v)).collect())
            }
        }

        impl From<Vec<$t>> for PrimitiveArray {
            fn from(values: Vec<$t>) -> Self {
                Self::from(values.as_slice())
            }
        }
    )*};
}

from_slice!(Int, i64, i8, i16, i32, i64);
from_slice!(UInt, u64, u8, u16, u32, u64);
from_slice!(F32, f32, f32);
from_slice!(F64, f64, f64);
from_slice!(Bool, bool, bool);
from_slice!(Char, char, char);
