use crate::{Kind, Options, Timestamp, Value};
use anyhow::{Error, Result};

/// Convert a column value into the scalar `kind`.
///
/// The conversion is best effort:
/// - Text and byte sequences that do not parse as integers or floats produce zero.
/// - Unsupported kinds produce the empty string, zero, `false` or the zero timestamp.
/// - Text that is empty or does not match the time layout is an error.
/// - Blob targets accept only strings and byte sequences.
///
/// `Kind::Nullable` coerces into the wrapped kind, wrapping is up to the typed layer.
/// `Kind::Custom` returns the value untouched.
pub fn coerce(value: &Value, kind: &Kind, options: &Options) -> Result<Value> {
    Ok(match kind {
        Kind::Boolean => Value::Boolean(coerce_bool(value)),
        Kind::Int8 => Value::Int8(value.to_i64() as i8),
        Kind::Int16 => Value::Int16(value.to_i64() as i16),
        Kind::Int32 => Value::Int32(value.to_i64() as i32),
        Kind::Int64 => Value::Int64(value.to_i64()),
        Kind::UInt8 => Value::UInt8(value.to_i64() as u8),
        Kind::UInt16 => Value::UInt16(value.to_i64() as u16),
        Kind::UInt32 => Value::UInt32(value.to_i64() as u32),
        Kind::UInt64 => Value::UInt64(value.to_i64() as u64),
        Kind::Float32 => Value::Float32(coerce_float(value) as f32),
        Kind::Float64 => Value::Float64(coerce_float(value)),
        Kind::Varchar => Value::Varchar(value.to_text().into_owned()),
        Kind::Blob => match value {
            Value::Blob(v) => Value::Blob(v.clone()),
            Value::Varchar(v) => Value::Blob(v.as_bytes().into()),
            _ => {
                return Err(Error::msg(format!(
                    "Cannot convert a {} value to bytes",
                    value.type_name()
                )));
            }
        },
        Kind::Timestamp => Value::Timestamp(coerce_timestamp(value, options)?),
        Kind::Nullable(inner) => coerce(value, inner, options)?,
        Kind::Custom(..) => value.clone(),
    })
}

fn coerce_bool(value: &Value) -> bool {
    if let Value::Boolean(v) = value {
        return *v;
    }
    if let Some(text) = value.as_text() {
        if text.eq_ignore_ascii_case("true") {
            return true;
        } else if text.eq_ignore_ascii_case("false") {
            return false;
        }
    }
    value.to_i64() != 0
}

fn coerce_float(value: &Value) -> f64 {
    match *value {
        Value::Float32(v) => v as f64,
        Value::Float64(v) => v,
        Value::UInt64(v) => v as f64,
        _ => match value.as_i64() {
            Some(v) => v as f64,
            None => value
                .as_text()
                .and_then(|v| fast_float::parse::<f64, _>(v.as_bytes()).ok())
                .unwrap_or(0.0),
        },
    }
}

fn coerce_timestamp(value: &Value, options: &Options) -> Result<Timestamp> {
    if let Some(v) = value.native_timestamp() {
        return Ok(v);
    }
    match value.as_text() {
        Some(text) if text.is_empty() => Err(Error::msg(format!(
            "Cannot convert an empty {} to a timestamp",
            value.type_name()
        ))),
        Some(text) => Timestamp::parse(&text, &options.time_layout(), options.offset),
        None => Ok(Timestamp::ZERO),
    }
}
