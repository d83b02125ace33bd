use crate::truncate_long;
use anyhow::{Error, Result};
use chrono::{Local, LocalResult, NaiveDate, TimeZone};
use std::{
    collections::HashMap,
    fmt::{self, Debug, Display},
    ops::Deref,
    sync::{Arc, LazyLock, PoisonError, RwLock},
};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::{self, OwnedFormatItem},
    macros::datetime,
    parsing::Parsed,
};

/// Parsed format descriptions, keyed by layout.
static LAYOUTS: LazyLock<RwLock<HashMap<String, Arc<OwnedFormatItem>>>> =
    LazyLock::new(Default::default);

fn layout_format(layout: &str) -> Result<Arc<OwnedFormatItem>> {
    if let Some(format) = LAYOUTS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(layout)
    {
        return Ok(format.clone());
    }
    let format = Arc::new(
        format_description::parse_owned::<2>(layout)
            .map_err(|e| Error::msg(format!("Invalid time layout `{}`: {}", layout, e)))?,
    );
    LAYOUTS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(layout.to_string(), format.clone());
    Ok(format)
}

/// Offset of the local time zone in effect at the wall clock time `value`.
///
/// Times skipped by a forward transition take the offset in effect at the same instant in UTC,
/// repeated times take the earlier one. Falls back to UTC when the zone cannot be resolved.
pub fn local_offset_at(value: PrimitiveDateTime) -> UtcOffset {
    let Some(naive) =
        NaiveDate::from_ymd_opt(value.year(), value.month() as u32, value.day() as u32).and_then(
            |v| {
                v.and_hms_nano_opt(
                    value.hour() as u32,
                    value.minute() as u32,
                    value.second() as u32,
                    value.nanosecond(),
                )
            },
        )
    else {
        log::trace!("Falling back to UTC, {} is out of the local zone range", value);
        return UtcOffset::UTC;
    };
    let offset = match Local.from_local_datetime(&naive) {
        LocalResult::Single(v) | LocalResult::Ambiguous(v, ..) => *v.offset(),
        LocalResult::None => Local.offset_from_utc_datetime(&naive),
    };
    UtcOffset::from_whole_seconds(offset.local_minus_utc()).unwrap_or_else(|e| {
        log::trace!("Falling back to UTC, local offset unavailable: {}", e);
        UtcOffset::UTC
    })
}

/// The universal temporal value records are populated with.
///
/// Its default is the zero timestamp `0001-01-01 00:00:00 UTC`, which is what a field keeps when
/// the row does not carry its column.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(datetime!(0001-01-01 00:00 UTC));

    pub const fn new(value: OffsetDateTime) -> Self {
        Self(value)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    /// Parse `input` using a `time` format description.
    ///
    /// Layouts that carry an offset produce that offset, layouts without one are assumed to be
    /// in `offset`, or in the local time zone on that date when `None`. Date only layouts produce
    /// midnight. Format descriptions are parsed once per layout and reused.
    pub fn parse(input: &str, layout: &str, offset: Option<UtcOffset>) -> Result<Self> {
        let context = || {
            format!(
                "Cannot parse `{}` as a timestamp with layout `{}`",
                truncate_long!(input),
                layout
            )
        };
        let format = layout_format(layout)?;
        let mut parsed = Parsed::new();
        let remaining = parsed
            .parse_item(input.as_bytes(), format.as_ref())
            .map_err(|e| Error::new(e).context(context()))?;
        if !remaining.is_empty() {
            return Err(Error::msg(format!(
                "{} (remaining: `{}`)",
                context(),
                String::from_utf8_lossy(remaining)
            )));
        }
        if let Ok(value) = OffsetDateTime::try_from(parsed.clone()) {
            return Ok(Self(value));
        }
        let value = match PrimitiveDateTime::try_from(parsed.clone()) {
            Ok(value) => value,
            Err(..) => Date::try_from(parsed)
                .map_err(|e| Error::new(e).context(context()))?
                .midnight(),
        };
        let offset = offset.unwrap_or_else(|| local_offset_at(value));
        Ok(Self(value.assume_offset(offset)))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Deref for Timestamp {
    type Target = OffsetDateTime;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(value: OffsetDateTime) -> Self {
        Self(value)
    }
}

impl From<Timestamp> for OffsetDateTime {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Capability of driver specific temporal types to turn into a [`Timestamp`].
///
/// Drivers wrap their own date time types in [`Value::Temporal`](crate::Value::Temporal) so the
/// core never has to name them.
pub trait Temporal: Debug + Send + Sync {
    fn to_timestamp(&self) -> Timestamp;
}

impl Temporal for Timestamp {
    fn to_timestamp(&self) -> Timestamp {
        *self
    }
}

impl Temporal for OffsetDateTime {
    fn to_timestamp(&self) -> Timestamp {
        Timestamp(*self)
    }
}

impl Temporal for PrimitiveDateTime {
    fn to_timestamp(&self) -> Timestamp {
        Timestamp(self.assume_utc())
    }
}

impl Temporal for Date {
    fn to_timestamp(&self) -> Timestamp {
        Timestamp(self.midnight().assume_utc())
    }
}
