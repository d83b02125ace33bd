#[cfg(test)]
mod tests {
    use rowmap::{
        AsValue, Kind, Null, NullInt64, NullString, Options, Timestamp, Value, bool_to_int, coerce,
        int_to_bool, printable_query,
    };
    use std::sync::Arc;
    use time::{
        UtcOffset,
        macros::{date, datetime, offset},
    };

    fn utc() -> Options {
        Options::default().with_offset(UtcOffset::UTC)
    }

    #[test]
    fn value_to_string() {
        let options = utc();
        assert_eq!(String::try_from_value(&Value::Int32(42), &options).unwrap(), "42");
        assert_eq!(
            String::try_from_value(&Value::UInt64(u64::MAX), &options).unwrap(),
            "18446744073709551615"
        );
        assert_eq!(String::try_from_value(&Value::Int8(-7), &options).unwrap(), "-7");
        assert_eq!(
            String::try_from_value(&Value::Blob(b"raw text".as_slice().into()), &options).unwrap(),
            "raw text"
        );
        assert_eq!(
            String::try_from_value(&Value::Varchar("as is".into()), &options).unwrap(),
            "as is"
        );
        assert_eq!(String::try_from_value(&Value::Float64(1.5), &options).unwrap(), "");
        assert_eq!(String::try_from_value(&Value::Boolean(true), &options).unwrap(), "");
        assert_eq!(
            String::try_from_value(&Value::Timestamp(Timestamp::ZERO), &options).unwrap(),
            ""
        );
    }

    #[test]
    fn value_to_integer() {
        let options = utc();
        assert_eq!(i32::try_from_value(&Value::Varchar("123".into()), &options).unwrap(), 123);
        assert_eq!(
            i64::try_from_value(&Value::Blob(b"-45".as_slice().into()), &options).unwrap(),
            -45
        );
        assert_eq!(i64::try_from_value(&Value::UInt8(200), &options).unwrap(), 200);
        assert_eq!(u16::try_from_value(&Value::Int64(65), &options).unwrap(), 65);
        assert_eq!(usize::try_from_value(&Value::Int32(9), &options).unwrap(), 9);
        assert_eq!(isize::try_from_value(&Value::Int32(-9), &options).unwrap(), -9);
    }

    #[test]
    fn value_to_integer_lenient() {
        let options = utc();
        assert_eq!(i32::try_from_value(&Value::Varchar("abc".into()), &options).unwrap(), 0);
        assert_eq!(i32::try_from_value(&Value::Varchar("".into()), &options).unwrap(), 0);
        assert_eq!(i32::try_from_value(&Value::Varchar("12.5".into()), &options).unwrap(), 0);
        assert_eq!(i64::try_from_value(&Value::Float64(3.7), &options).unwrap(), 0);
        assert_eq!(u8::try_from_value(&Value::Boolean(true), &options).unwrap(), 0);
        assert_eq!(
            i64::try_from_value(&Value::Timestamp(Timestamp::ZERO), &options).unwrap(),
            0
        );
    }

    #[test]
    fn value_to_integer_narrowing() {
        let options = utc();
        assert_eq!(i8::try_from_value(&Value::Int32(300), &options).unwrap(), 44);
        assert_eq!(u8::try_from_value(&Value::Int64(-1), &options).unwrap(), 255);
        assert_eq!(i16::try_from_value(&Value::Varchar("70000".into()), &options).unwrap(), 4464);
        assert_eq!(u32::try_from_value(&Value::Int64(-2), &options).unwrap(), u32::MAX - 1);
    }

    #[test]
    fn value_to_unsigned_64() {
        let options = utc();
        assert_eq!(
            u64::try_from_value(&Value::Varchar("18446744073709551615".into()), &options).unwrap(),
            u64::MAX
        );
        assert_eq!(
            u64::try_from_value(&Value::UInt64(u64::MAX), &options).unwrap(),
            u64::MAX
        );
        assert_eq!(
            i64::try_from_value(&Value::Varchar("18446744073709551615".into()), &options).unwrap(),
            -1
        );
        assert_eq!(
            u64::try_from_value(&Value::Varchar("18446744073709551616".into()), &options).unwrap(),
            0
        );
    }

    #[test]
    fn value_to_bool() {
        let options = utc();
        assert!(bool::try_from_value(&Value::Boolean(true), &options).unwrap());
        assert!(!bool::try_from_value(&Value::Boolean(false), &options).unwrap());
        assert!(bool::try_from_value(&Value::Int64(2), &options).unwrap());
        assert!(!bool::try_from_value(&Value::UInt8(0), &options).unwrap());
        assert!(bool::try_from_value(&Value::Varchar("1".into()), &options).unwrap());
        assert!(!bool::try_from_value(&Value::Varchar("0".into()), &options).unwrap());
        assert!(bool::try_from_value(&Value::Varchar("true".into()), &options).unwrap());
        assert!(bool::try_from_value(&Value::Varchar("TRUE".into()), &options).unwrap());
        assert!(!bool::try_from_value(&Value::Varchar("false".into()), &options).unwrap());
        assert!(!bool::try_from_value(&Value::Varchar("yes".into()), &options).unwrap());
        assert_eq!(bool_to_int(true), 1);
        assert_eq!(bool_to_int(false), 0);
        assert!(int_to_bool(-3i32));
        assert!(!int_to_bool(0u8));
    }

    #[test]
    fn value_to_float() {
        let options = utc();
        assert_eq!(f64::try_from_value(&Value::Varchar("3.5".into()), &options).unwrap(), 3.5);
        assert_eq!(f64::try_from_value(&Value::Varchar("x".into()), &options).unwrap(), 0.0);
        assert_eq!(f32::try_from_value(&Value::Int32(2), &options).unwrap(), 2.0);
        assert_eq!(f64::try_from_value(&Value::Float32(0.25), &options).unwrap(), 0.25);
        assert_eq!(f64::try_from_value(&Value::Boolean(true), &options).unwrap(), 0.0);
    }

    #[test]
    fn value_to_timestamp() {
        let options = utc();
        assert_eq!(
            Timestamp::try_from_value(&Value::Varchar("2022-04-14 23:49:48".into()), &options)
                .unwrap(),
            Timestamp::from(datetime!(2022-04-14 23:49:48 UTC))
        );
        assert_eq!(
            Timestamp::try_from_value(
                &Value::Blob(b"2022-04-14 23:49:48".as_slice().into()),
                &options
            )
            .unwrap(),
            Timestamp::from(datetime!(2022-04-14 23:49:48 UTC))
        );
        let native = Timestamp::from(datetime!(1999-12-31 23:59:59 +01:00));
        assert_eq!(
            Timestamp::try_from_value(&Value::Timestamp(native), &options).unwrap(),
            native
        );
        assert_eq!(
            Timestamp::try_from_value(&Value::Temporal(Arc::new(date!(2020 - 01 - 02))), &options)
                .unwrap(),
            Timestamp::from(datetime!(2020-01-02 00:00 UTC))
        );
        assert_eq!(
            Timestamp::try_from_value(
                &Value::Temporal(Arc::new(datetime!(2020-01-02 03:04:05))),
                &options
            )
            .unwrap(),
            Timestamp::from(datetime!(2020-01-02 03:04:05 UTC))
        );
    }

    #[test]
    fn value_to_timestamp_zero() {
        let options = utc();
        let zero = Timestamp::default();
        assert!(zero.is_zero());
        assert_eq!(zero, Timestamp::ZERO);
        assert_eq!(zero.year(), 1);
        assert!(Timestamp::try_from_value(&Value::Varchar("".into()), &options).is_err());
        assert!(Timestamp::try_from_value(&Value::Blob(Box::new([0u8; 0])), &options).is_err());
        assert!(Value::Varchar("".into()).to_timestamp(&options).is_zero());
        assert!(
            Timestamp::try_from_value(&Value::Int64(1650000000), &options)
                .unwrap()
                .is_zero()
        );
        assert!(
            Timestamp::try_from_value(&Value::Boolean(true), &options)
                .unwrap()
                .is_zero()
        );
    }

    #[test]
    fn value_to_timestamp_invalid() {
        let options = utc();
        assert!(Timestamp::try_from_value(&Value::Varchar("garbage".into()), &options).is_err());
        assert!(
            Timestamp::try_from_value(&Value::Varchar("2022-04-14 23:49:48 extra".into()), &options)
                .is_err()
        );
        assert!(Value::Varchar("garbage".into()).to_timestamp(&options).is_zero());
    }

    #[test]
    fn value_to_timestamp_options() {
        let options = utc().with_time_layout("[day]/[month]/[year]");
        assert_eq!(
            Timestamp::try_from_value(&Value::Varchar("14/04/2022".into()), &options).unwrap(),
            Timestamp::from(datetime!(2022-04-14 00:00 UTC))
        );
        let options = Options::default().with_offset(offset!(+2));
        let parsed =
            Timestamp::try_from_value(&Value::Varchar("2022-04-14 23:49:48".into()), &options)
                .unwrap();
        assert_eq!(parsed.offset(), offset!(+2));
        assert_eq!(parsed.hour(), 23);
        assert_eq!(parsed, Timestamp::from(datetime!(2022-04-14 21:49:48 UTC)));
        let options = utc().with_time_layout(
            "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]",
        );
        let parsed =
            Timestamp::try_from_value(&Value::Varchar("2022-04-14T23:49:48-05:00".into()), &options)
                .unwrap();
        assert_eq!(parsed.offset(), offset!(-5));
    }

    #[test]
    fn value_to_timestamp_layout_reuse() {
        let options = utc().with_time_layout("[hour]:[minute] [day].[month].[year]");
        for hour in 0..24 {
            let text = format!("{:02}:30 01.02.2023", hour);
            let parsed = Timestamp::try_from_value(&Value::Varchar(text), &options).unwrap();
            assert_eq!(parsed.hour(), hour);
            assert_eq!(parsed.minute(), 30);
        }
        let broken = utc().with_time_layout("[hour");
        for _ in 0..2 {
            let error = Timestamp::try_from_value(&Value::Varchar("10".into()), &broken)
                .unwrap_err();
            assert!(error.to_string().contains("Invalid time layout"));
        }
    }

    #[test]
    fn value_to_blob() {
        let options = utc();
        assert_eq!(
            Vec::<u8>::try_from_value(&Value::Varchar("abc".into()), &options).unwrap(),
            b"abc"
        );
        assert_eq!(
            Box::<[u8]>::try_from_value(&Value::Blob(Box::new([1u8, 2, 3])), &options)
                .unwrap()
                .into_vec(),
            vec![1u8, 2, 3]
        );
        assert!(Vec::<u8>::try_from_value(&Value::Int32(1), &options).is_err());
    }

    #[test]
    fn value_to_nullable() {
        let options = utc();
        assert_eq!(
            Option::<i32>::try_from_value(&Value::Varchar("7".into()), &options).unwrap(),
            Some(7)
        );
        assert_eq!(
            NullString::try_from_value(&Value::Int16(5), &options).unwrap(),
            Null::new("5".to_string())
        );
        let value = NullInt64::try_from_value(&Value::Varchar("x".into()), &options).unwrap();
        assert!(value.valid);
        assert_eq!(value.value, 0);
        assert_eq!(Option::<String>::kind(), Kind::Nullable(Box::new(Kind::Varchar)));
        assert_eq!(NullInt64::default().get(), None);
        assert_eq!(Option::<i32>::None.as_value(), Value::Null);
        assert_eq!(Null::new(3i64).as_value(), Value::Int64(3));
    }

    #[test]
    fn value_coerce() {
        let options = utc();
        assert_eq!(
            coerce(&Value::Varchar("12".into()), &Kind::UInt32, &options).unwrap(),
            Value::UInt32(12)
        );
        assert_eq!(
            coerce(
                &Value::Varchar("12".into()),
                &Kind::Nullable(Box::new(Kind::Int8)),
                &options
            )
            .unwrap(),
            Value::Int8(12)
        );
        let custom = Value::Float64(1.25);
        assert_eq!(
            coerce(&custom, &Kind::Custom("Money"), &options).unwrap(),
            custom
        );
    }

    #[test]
    fn value_empty() {
        assert!(Value::Null.is_empty());
        assert!(Value::Varchar("".into()).is_empty());
        assert!(Value::Blob(Box::new([0u8; 0])).is_empty());
        assert!(!Value::Varchar(" ".into()).is_empty());
        assert!(!Value::Int64(0).is_empty());
        assert!(!Value::Boolean(false).is_empty());
        assert!(!Value::Timestamp(Timestamp::ZERO).is_empty());
    }

    #[test]
    fn value_type_name() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::UInt16(1).type_name(), "u16");
        assert_eq!(Value::Varchar("a".into()).type_name(), "string");
        assert_eq!(Value::Blob(Box::new([1u8])).type_name(), "bytes");
        assert_eq!(
            Value::Temporal(Arc::new(date!(2020 - 01 - 01))).type_name(),
            "temporal"
        );
    }

    #[test]
    fn value_equality() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Int32(1), Value::Int64(1));
        assert_eq!(
            Value::Temporal(Arc::new(datetime!(2020-01-01 00:00 UTC))),
            Value::Timestamp(Timestamp::from(datetime!(2020-01-01 00:00 UTC)))
        );
        assert_eq!(Value::from("text"), Value::Varchar("text".into()));
        assert_eq!(Value::from(5u16), Value::UInt16(5));
        assert_eq!(Value::from(Some(true)), Value::Boolean(true));
    }

    #[test]
    fn value_printable_query() {
        assert_eq!(
            printable_query(
                "SELECT * FROM users WHERE id = ? AND name = '?' AND nick = ? AND blob = ?",
                &[
                    Value::Int64(1),
                    Value::Varchar("o'neil".into()),
                    Value::Blob(Box::new([10u8, 255])),
                ],
            ),
            "SELECT * FROM users WHERE id = 1 AND name = '?' AND nick = 'o''neil' AND blob = X'0AFF'"
        );
        assert_eq!(printable_query("SELECT ?, ?", &[Value::Null]), "SELECT NULL, ?");
        assert_eq!(
            printable_query(
                "SELECT ?",
                &[Value::Timestamp(Timestamp::from(datetime!(2022-04-14 23:49:48 UTC)))]
            ),
            "SELECT '2022-04-14 23:49:48'"
        );
    }
}
