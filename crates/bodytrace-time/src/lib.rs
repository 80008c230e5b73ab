//! Simple wrappers to make mistakes with reading times and date filters hard
//! to make

#![warn(unused_crate_dependencies)]

mod date_range;

pub use date_range::{DateRange, DateRangeError};

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Milliseconds since the unix epoch
///
/// Devices report readings either as an RFC 3339 string or as epoch
/// milliseconds, both forms are accepted on deserialization. Always serializes
/// as epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn now() -> Self {
        let elapsed = web_time::SystemTime::UNIX_EPOCH
            .elapsed()
            .expect("expected date on system to be after the epoch");
        Self(elapsed.as_millis().try_into().unwrap_or(i64::MAX))
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    pub fn as_utc_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.0).unwrap_or_default()
    }

    pub fn as_local_datetime(&self) -> DateTime<Local> {
        self.as_utc_datetime().into()
    }

    pub fn display_as_locale_datetime(&self) -> String {
        self.as_local_datetime().format("%c").to_string()
    }

    pub fn display_as_locale_date(&self) -> String {
        self.as_local_datetime().format("%x").to_string()
    }

    /// The calendar date (local time) the reading was taken on
    pub fn local_date(&self) -> NaiveDate {
        self.as_local_datetime().date_naive()
    }

    /// Fractional days since the epoch, used as the x axis on charts
    pub fn as_days_f64(&self) -> f64 {
        self.0 as f64 / MILLIS_PER_DAY
    }

    pub fn from_days_f64(days: f64) -> Self {
        Self((days * MILLIS_PER_DAY).round() as i64)
    }

    /// Parses an RFC 3339 string (what the backend uses for `ts`)
    pub fn parse_rfc3339(value: &str) -> Result<Self, chrono::ParseError> {
        Ok(DateTime::parse_from_rfc3339(value)?.into())
    }
}

const MILLIS_PER_DAY: f64 = 86_400_000.0;

impl<Tz: chrono::TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(value: DateTime<Tz>) -> Self {
        Self(value.timestamp_millis())
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_as_locale_datetime())
    }
}

impl<'de> serde::Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

struct TimestampVisitor;

impl serde::de::Visitor<'_> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("an RFC 3339 date string or epoch milliseconds")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Timestamp::parse_rfc3339(v).map_err(|e| E::custom(format!("invalid timestamp {v:?}: {e}")))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Timestamp(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        i64::try_from(v)
            .map(Timestamp)
            .map_err(|_| E::custom(format!("timestamp out of range: {v}")))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Timestamp(v as i64))
    }
}
