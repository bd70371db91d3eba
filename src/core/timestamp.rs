//! Timestamp sources and formatting
//!
//! The `time` field of every line comes from a [`Clock`] owned by the logger
//! and is rendered with a [`TimestampFormat`].

use super::log_record::FieldValue;
use chrono::{DateTime, FixedOffset, Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Standardized timestamp format options
///
/// # Examples
///
/// ```
/// use leveled_logger::TimestampFormat;
/// use chrono::{FixedOffset, TimeZone};
///
/// let time = FixedOffset::west_opt(3 * 3600)
///     .unwrap()
///     .with_ymd_and_hms(2021, 5, 21, 6, 0, 0)
///     .unwrap();
/// assert_eq!(TimestampFormat::Rfc3339.format(&time), "2021-05-21T06:00:00-03:00");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 with second precision and offset: `2021-05-21T06:00:00-03:00`
    ///
    /// UTC times are written with a `Z` suffix.
    #[default]
    Rfc3339,

    /// RFC 3339 with milliseconds: `2021-05-21T06:00:00.123-03:00`
    Rfc3339Millis,

    /// RFC 3339 with microseconds: `2021-05-21T06:00:00.123456-03:00`
    Rfc3339Micros,

    /// Unix timestamp in seconds, written as a JSON number
    Unix,

    /// Unix timestamp in milliseconds, written as a JSON number
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Format a timestamp according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<FixedOffset>) -> String {
        match self {
            TimestampFormat::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
            TimestampFormat::Rfc3339Millis => datetime.to_rfc3339_opts(SecondsFormat::Millis, true),
            TimestampFormat::Rfc3339Micros => datetime.to_rfc3339_opts(SecondsFormat::Micros, true),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Render the timestamp as a record field value
    pub fn to_field(&self, datetime: &DateTime<FixedOffset>) -> FieldValue {
        match self {
            TimestampFormat::Unix => FieldValue::Int(datetime.timestamp()),
            TimestampFormat::UnixMillis => FieldValue::Int(datetime.timestamp_millis()),
            _ => FieldValue::String(self.format(datetime)),
        }
    }
}

/// Source of the current time for the `time` field
#[derive(Clone)]
pub struct Clock(Arc<dyn Fn() -> DateTime<FixedOffset> + Send + Sync>);

impl Clock {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> DateTime<FixedOffset> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Wall clock in the local time zone
    pub fn system() -> Self {
        Self::new(|| Local::now().fixed_offset())
    }

    /// Always returns `time`
    pub fn fixed(time: DateTime<FixedOffset>) -> Self {
        Self::new(move || time)
    }

    #[inline]
    pub fn now(&self) -> DateTime<FixedOffset> {
        (self.0)()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Clock(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn fixed_datetime() -> DateTime<FixedOffset> {
        FixedOffset::west_opt(3 * 3600)
            .expect("valid offset")
            .with_ymd_and_hms(2021, 5, 21, 6, 0, 0)
            .single()
            .expect("valid datetime")
            + Duration::microseconds(123456)
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime());
        assert_eq!(result, "2021-05-21T06:00:00-03:00");
    }

    #[test]
    fn test_rfc3339_utc_uses_z() {
        let utc = Utc
            .with_ymd_and_hms(2021, 5, 21, 9, 0, 0)
            .single()
            .expect("valid datetime")
            .fixed_offset();
        assert_eq!(TimestampFormat::Rfc3339.format(&utc), "2021-05-21T09:00:00Z");
    }

    #[test]
    fn test_subsecond_formats() {
        assert_eq!(
            TimestampFormat::Rfc3339Millis.format(&fixed_datetime()),
            "2021-05-21T06:00:00.123-03:00"
        );
        assert_eq!(
            TimestampFormat::Rfc3339Micros.format(&fixed_datetime()),
            "2021-05-21T06:00:00.123456-03:00"
        );
    }

    #[test]
    fn test_unix_formats_are_numeric_fields() {
        let time = fixed_datetime();
        assert!(matches!(
            TimestampFormat::Unix.to_field(&time),
            FieldValue::Int(secs) if secs == 1_621_587_600
        ));
        assert!(matches!(
            TimestampFormat::UnixMillis.to_field(&time),
            FieldValue::Int(ms) if ms == 1_621_587_600_123
        ));
        assert!(matches!(
            TimestampFormat::Rfc3339.to_field(&time),
            FieldValue::String(_)
        ));
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2021/05/21 06:00");
    }

    #[test]
    fn test_fixed_clock() {
        let clock = Clock::fixed(fixed_datetime());
        assert_eq!(clock.now(), fixed_datetime());
        assert_eq!(clock.clone().now(), fixed_datetime());
    }

    #[test]
    fn test_deserialization() {
        let format: TimestampFormat =
            serde_json::from_str("\"Rfc3339Millis\"").expect("deserialize");
        assert_eq!(format, TimestampFormat::Rfc3339Millis);

        let format: TimestampFormat =
            serde_json::from_str(r#"{"Custom":"%Y-%m-%d"}"#).expect("deserialize Custom");
        assert_eq!(format, TimestampFormat::Custom("%Y-%m-%d".to_string()));
    }
}
