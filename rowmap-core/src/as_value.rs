use crate::{Kind, Options, Timestamp, Value, coerce};
use anyhow::{Error, Result};
use std::{any, sync::Arc};
use time::{OffsetDateTime, PrimitiveDateTime};

/// Conversion between native Rust types and the dynamically typed [`Value`].
///
/// It is the typed face of [`coerce`]: `try_from_value` asks for the value to be coerced into
/// [`AsValue::kind`] and unpacks the result. Record fields must implement it to be bound to a
/// column.
///
/// # Implementing `AsValue` for custom types
/// Report `Kind::Custom(any::type_name::<Self>())` and convert from the raw value in
/// `try_from_value`. Returning an error there (or panicking) makes the mapping of the field fail
/// with a [`FieldMapping`](crate::Error::FieldMapping) error naming the column.
///
/// ```rust
/// use rowmap_core::{AsValue, Kind, Options, Value};
/// let v = 42i32.as_value();
/// assert!(matches!(v, Value::Int32(42)));
/// let n = i64::try_from_value(&Value::Varchar("42".into()), &Options::default()).unwrap();
/// assert_eq!(n, 42);
/// assert_eq!(i64::kind(), Kind::Int64);
/// ```
pub trait AsValue {
    /// Kind this type is coerced into.
    fn kind() -> Kind
    where
        Self: Sized;
    /// Convert into the owned [`Value`] representation, used to bind parameters.
    fn as_value(self) -> Value;
    /// Coerce a column value into `Self`.
    fn try_from_value(value: &Value, options: &Options) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(value.into())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Blob(value.into())
    }
}

fn mismatch<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {} value {:?} to {}",
        value.type_name(),
        value,
        any::type_name::<T>()
    ))
}

macro_rules! impl_as_value {
    ($source:ty, $variant:ident) => {
        impl_as_value!($source, $variant, $source);
    };
    ($source:ty, $variant:ident, $carrier:ty) => {
        impl AsValue for $source {
            fn kind() -> Kind {
                Kind::$variant
            }
            fn as_value(self) -> Value {
                Value::$variant(self as $carrier)
            }
            fn try_from_value(value: &Value, options: &Options) -> Result<Self> {
                match coerce(value, &Kind::$variant, options)? {
                    Value::$variant(v) => Ok(v as $source),
                    other => Err(mismatch::<Self>(&other)),
                }
            }
        }
    };
}
impl_as_value!(bool, Boolean);
impl_as_value!(i8, Int8);
impl_as_value!(i16, Int16);
impl_as_value!(i32, Int32);
impl_as_value!(i64, Int64);
impl_as_value!(isize, Int64, i64);
impl_as_value!(u8, UInt8);
impl_as_value!(u16, UInt16);
impl_as_value!(u32, UInt32);
impl_as_value!(u64, UInt64);
impl_as_value!(usize, UInt64, u64);
impl_as_value!(f32, Float32);
impl_as_value!(f64, Float64);

impl AsValue for String {
    fn kind() -> Kind {
        Kind::Varchar
    }
    fn as_value(self) -> Value {
        Value::Varchar(self)
    }
    fn try_from_value(value: &Value, _options: &Options) -> Result<Self> {
        Ok(value.to_text().into_owned())
    }
}

impl AsValue for Arc<str> {
    fn kind() -> Kind {
        Kind::Varchar
    }
    fn as_value(self) -> Value {
        Value::Varchar(self.as_ref().into())
    }
    fn try_from_value(value: &Value, _options: &Options) -> Result<Self> {
        Ok(value.to_text().into())
    }
}

macro_rules! impl_as_value {
    ($source:ty, $into:expr, $from:expr) => {
        impl AsValue for $source {
            fn kind() -> Kind {
                Kind::Blob
            }
            fn as_value(self) -> Value {
                Value::Blob($into(self))
            }
            fn try_from_value(value: &Value, options: &Options) -> Result<Self> {
                match coerce(value, &Kind::Blob, options)? {
                    Value::Blob(v) => Ok($from(v)),
                    other => Err(mismatch::<Self>(&other)),
                }
            }
        }
    };
}
impl_as_value!(Box<[u8]>, |v| v, |v| v);
impl_as_value!(Vec<u8>, Vec::into_boxed_slice, <[u8]>::into_vec);

macro_rules! impl_as_value {
    ($source:ty, $into:expr, $from:expr) => {
        impl AsValue for $source {
            fn kind() -> Kind {
                Kind::Timestamp
            }
            fn as_value(self) -> Value {
                Value::Timestamp($into(self))
            }
            fn try_from_value(value: &Value, options: &Options) -> Result<Self> {
                match coerce(value, &Kind::Timestamp, options)? {
                    Value::Timestamp(v) => Ok($from(v)),
                    other => Err(mismatch::<Self>(&other)),
                }
            }
        }
    };
}
impl_as_value!(Timestamp, |v| v, |v| v);
impl_as_value!(OffsetDateTime, Timestamp::from, Timestamp::into_inner);
impl_as_value!(
    PrimitiveDateTime,
    |v: PrimitiveDateTime| Timestamp::from(v.assume_utc()),
    |v: Timestamp| PrimitiveDateTime::new(v.date(), v.time())
);

/// A wrapper holding a value plus a validity flag, for columns that may be NULL.
///
/// When the row carries the column the field becomes `valid` with the coerced value, otherwise it
/// keeps its default (invalid, zero value).
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Null<T> {
    pub value: T,
    pub valid: bool,
}

impl<T> Null<T> {
    pub fn new(value: T) -> Self {
        Self { value, valid: true }
    }

    pub fn get(&self) -> Option<&T> {
        self.valid.then_some(&self.value)
    }

    pub fn into_option(self) -> Option<T> {
        self.valid.then_some(self.value)
    }
}

impl<T> From<Option<T>> for Null<T>
where
    T: Default,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Null::new(v),
            None => Default::default(),
        }
    }
}

pub type NullString = Null<String>;
pub type NullInt64 = Null<i64>;

/// A type wrapping a scalar with a present/absent state.
///
/// The wrapped scalar is coerced first and the result wrapped afterwards. Implement it and
/// register the wrapper with [`impl_nullable!`](crate::impl_nullable) to use it as a field type.
pub trait Nullable: Sized {
    type Inner: AsValue;
    fn wrap(inner: Self::Inner) -> Self;
    fn unwrap_inner(self) -> Option<Self::Inner>;
}

impl<T: AsValue> Nullable for Option<T> {
    type Inner = T;
    fn wrap(inner: T) -> Self {
        Some(inner)
    }
    fn unwrap_inner(self) -> Option<T> {
        self
    }
}

impl<T: AsValue> Nullable for Null<T> {
    type Inner = T;
    fn wrap(inner: T) -> Self {
        Null::new(inner)
    }
    fn unwrap_inner(self) -> Option<T> {
        self.into_option()
    }
}

/// Shared `AsValue` implementation of the [`Nullable`] wrappers.
pub mod nullable {
    use super::{AsValue, Nullable};
    use crate::{Kind, Options, Value};
    use anyhow::Result;

    pub fn kind<N: Nullable>() -> Kind {
        Kind::Nullable(Box::new(N::Inner::kind()))
    }

    pub fn as_value<N: Nullable>(value: N) -> Value {
        value
            .unwrap_inner()
            .map(AsValue::as_value)
            .unwrap_or_default()
    }

    pub fn try_from_value<N: Nullable>(value: &Value, options: &Options) -> Result<N> {
        N::Inner::try_from_value(value, options).map(N::wrap)
    }
}

/// Implement [`AsValue`] for a type implementing [`Nullable`].
///
/// ```rust
/// use rowmap_core::{AsValue, Kind, Nullable, impl_nullable};
///
/// #[derive(Default)]
/// struct Score(Option<i32>);
///
/// impl Nullable for Score {
///     type Inner = i32;
///     fn wrap(inner: i32) -> Self {
///         Score(Some(inner))
///     }
///     fn unwrap_inner(self) -> Option<i32> {
///         self.0
///     }
/// }
/// impl_nullable!(Score);
///
/// assert_eq!(Score::kind(), Kind::Nullable(Box::new(Kind::Int32)));
/// ```
#[macro_export]
macro_rules! impl_nullable {
    ($wrapper:ty) => {
        impl $crate::AsValue for $wrapper {
            fn kind() -> $crate::Kind {
                $crate::nullable::kind::<Self>()
            }
            fn as_value(self) -> $crate::Value {
                $crate::nullable::as_value(self)
            }
            fn try_from_value(
                value: &$crate::Value,
                options: &$crate::Options,
            ) -> $crate::AnyResult<Self> {
                $crate::nullable::try_from_value(value, options)
            }
        }
    };
}

impl<T: AsValue> AsValue for Option<T> {
    fn kind() -> Kind {
        nullable::kind::<Self>()
    }
    fn as_value(self) -> Value {
        nullable::as_value(self)
    }
    fn try_from_value(value: &Value, options: &Options) -> Result<Self> {
        nullable::try_from_value(value, options)
    }
}

impl<T: AsValue> AsValue for Null<T> {
    fn kind() -> Kind {
        nullable::kind::<Self>()
    }
    fn as_value(self) -> Value {
        nullable::as_value(self)
    }
    fn try_from_value(value: &Value, options: &Options) -> Result<Self> {
        nullable::try_from_value(value, options)
    }
}

impl<T: AsValue> AsValue for Box<T> {
    fn kind() -> Kind {
        T::kind()
    }
    fn as_value(self) -> Value {
        (*self).as_value()
    }
    fn try_from_value(value: &Value, options: &Options) -> Result<Self> {
        T::try_from_value(value, options).map(Box::new)
    }
}
