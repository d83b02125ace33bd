use std::fmt::{self, Display};

/// Static type a column value is coerced into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Varchar,
    Blob,
    Timestamp,
    /// A value plus validity flag, holding the wrapped kind.
    Nullable(Box<Kind>),
    /// A type converting itself, named by its Rust type name.
    Custom(&'static str),
}

impl Kind {
    pub fn is_nullable(&self) -> bool {
        matches!(self, Kind::Nullable(..))
    }

    /// The kind actually coerced into, nullable wrappers removed.
    pub fn scalar(&self) -> &Kind {
        match self {
            Kind::Nullable(inner) => inner.scalar(),
            _ => self,
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Boolean => f.write_str("bool"),
            Kind::Int8 => f.write_str("i8"),
            Kind::Int16 => f.write_str("i16"),
            Kind::Int32 => f.write_str("i32"),
            Kind::Int64 => f.write_str("i64"),
            Kind::UInt8 => f.write_str("u8"),
            Kind::UInt16 => f.write_str("u16"),
            Kind::UInt32 => f.write_str("u32"),
            Kind::UInt64 => f.write_str("u64"),
            Kind::Float32 => f.write_str("f32"),
            Kind::Float64 => f.write_str("f64"),
            Kind::Varchar => f.write_str("string"),
            Kind::Blob => f.write_str("bytes"),
            Kind::Timestamp => f.write_str("timestamp"),
            Kind::Nullable(inner) => write!(f, "nullable {}", inner),
            Kind::Custom(name) => f.write_str(name),
        }
    }
}
