use crate::{Options, Temporal, Timestamp};
use std::{
    borrow::Cow,
    fmt::{self, Display},
    sync::Arc,
};

/// A decoded column value of dynamic type.
///
/// Drivers produce these while scanning a row. [`Value::Null`] only ever appears in the scan
/// buffer, rows drop NULL columns instead of storing them.
#[derive(Default, Debug, Clone)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Varchar(String),
    Blob(Box<[u8]>),
    Timestamp(Timestamp),
    /// Driver specific temporal type, normalized through [`Temporal`].
    Temporal(Arc<dyn Temporal>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Int8(l), Self::Int8(r)) => l == r,
            (Self::Int16(l), Self::Int16(r)) => l == r,
            (Self::Int32(l), Self::Int32(r)) => l == r,
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::UInt8(l), Self::UInt8(r)) => l == r,
            (Self::UInt16(l), Self::UInt16(r)) => l == r,
            (Self::UInt32(l), Self::UInt32(r)) => l == r,
            (Self::UInt64(l), Self::UInt64(r)) => l == r,
            (Self::Float32(l), Self::Float32(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => l == r,
            (Self::Varchar(l), Self::Varchar(r)) => l == r,
            (Self::Blob(l), Self::Blob(r)) => l == r,
            (
                Self::Timestamp(..) | Self::Temporal(..),
                Self::Timestamp(..) | Self::Temporal(..),
            ) => self.native_timestamp() == other.native_timestamp(),
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Strings and byte sequences are empty when zero length, NULL is always empty, every other
    /// value never is.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Varchar(v) => v.is_empty(),
            Value::Blob(v) => v.is_empty(),
            _ => false,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Value::Int8(..)
                | Value::Int16(..)
                | Value::Int32(..)
                | Value::Int64(..)
                | Value::UInt8(..)
                | Value::UInt16(..)
                | Value::UInt32(..)
                | Value::UInt64(..)
        )
    }

    /// Name of the dynamic type carried.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(..) => "bool",
            Value::Int8(..) => "i8",
            Value::Int16(..) => "i16",
            Value::Int32(..) => "i32",
            Value::Int64(..) => "i64",
            Value::UInt8(..) => "u8",
            Value::UInt16(..) => "u16",
            Value::UInt32(..) => "u32",
            Value::UInt64(..) => "u64",
            Value::Float32(..) => "f32",
            Value::Float64(..) => "f64",
            Value::Varchar(..) => "string",
            Value::Blob(..) => "bytes",
            Value::Timestamp(..) => "timestamp",
            Value::Temporal(..) => "temporal",
        }
    }

    /// Native integer content, widened to `i64` (`u64` wraps).
    pub fn as_i64(&self) -> Option<i64> {
        Some(match *self {
            Value::Int8(v) => v as i64,
            Value::Int16(v) => v as i64,
            Value::Int32(v) => v as i64,
            Value::Int64(v) => v,
            Value::UInt8(v) => v as i64,
            Value::UInt16(v) => v as i64,
            Value::UInt32(v) => v as i64,
            Value::UInt64(v) => v as i64,
            _ => return None,
        })
    }

    /// Textual content of strings and byte sequences.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Varchar(v) => Some(Cow::Borrowed(v)),
            Value::Blob(v) => Some(String::from_utf8_lossy(v)),
            _ => None,
        }
    }

    /// Native temporal content, driver specific types normalized.
    pub fn native_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(v) => Some(*v),
            Value::Temporal(v) => Some(v.to_timestamp()),
            _ => None,
        }
    }

    /// Lenient string conversion: integers in base 10, text as is, anything else empty.
    pub fn to_text(&self) -> Cow<'_, str> {
        let mut buffer = itoa::Buffer::new();
        let text = match *self {
            Value::Int8(v) => buffer.format(v),
            Value::Int16(v) => buffer.format(v),
            Value::Int32(v) => buffer.format(v),
            Value::Int64(v) => buffer.format(v),
            Value::UInt8(v) => buffer.format(v),
            Value::UInt16(v) => buffer.format(v),
            Value::UInt32(v) => buffer.format(v),
            Value::UInt64(v) => buffer.format(v),
            _ => return self.as_text().unwrap_or_default(),
        };
        Cow::Owned(text.to_owned())
    }

    /// Lenient integer conversion: text is parsed in base 10, failures and other kinds are zero.
    pub fn to_i64(&self) -> i64 {
        if let Some(v) = self.as_i64() {
            return v;
        }
        self.as_text().map(|v| parse_integer(&v)).unwrap_or(0)
    }

    /// Lenient timestamp conversion, zero when the value is not temporal or cannot be parsed.
    pub fn to_timestamp(&self, options: &Options) -> Timestamp {
        if let Some(v) = self.native_timestamp() {
            return v;
        }
        let Some(text) = self.as_text() else {
            return Timestamp::ZERO;
        };
        Timestamp::parse(&text, &options.time_layout(), options.offset).unwrap_or_default()
    }
}

/// Base 10 parse, `0` on failure. Values above `i64::MAX` that fit `u64` wrap around.
pub(crate) fn parse_integer(text: &str) -> i64 {
    text.parse::<i64>()
        .or_else(|_| text.parse::<u64>().map(|v| v as i64))
        .unwrap_or(0)
}

/// SQL literal form, used to render statements with their bindings.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(v) => f.write_str(if *v { "true" } else { "false" }),
            Value::Int8(v) => write!(f, "{}", v),
            Value::Int16(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::UInt8(v) => write!(f, "{}", v),
            Value::UInt16(v) => write!(f, "{}", v),
            Value::UInt32(v) => write!(f, "{}", v),
            Value::UInt64(v) => write!(f, "{}", v),
            Value::Float32(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::Varchar(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::Blob(v) => write!(f, "X'{}'", hex::encode_upper(v)),
            Value::Timestamp(..) | Value::Temporal(..) => {
                let v = self.native_timestamp().unwrap_or_default();
                write!(
                    f,
                    "'{:04}-{:02}-{:02} {:02}:{:02}:{:02}'",
                    v.year(),
                    v.month() as u8,
                    v.day(),
                    v.hour(),
                    v.minute(),
                    v.second()
                )
            }
        }
    }
}
