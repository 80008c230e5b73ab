use chrono::NaiveDate;

use crate::Timestamp;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("'{0}' is not a valid date. Expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("start date {start} is after end date {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
}

/// Inclusive filter on the calendar date of a reading. Either side may be open.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, DateRangeError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(DateRangeError::StartAfterEnd { start, end });
            }
        }
        Ok(Self { start, end })
    }

    /// Parses the text from date inputs. Blank text means that side is open.
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        Self::new(parse_optional_date(start)?, parse_optional_date(end)?)
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Wire format used by the backend, empty string when open
    pub fn start_param(&self) -> String {
        format_optional_date(self.start)
    }

    /// Wire format used by the backend, empty string when open
    pub fn end_param(&self) -> String {
        format_optional_date(self.end)
    }

    pub fn contains(&self, timestamp: Timestamp) -> bool {
        let date = timestamp.as_utc_datetime().date_naive();
        self.start.map_or(true, |start| start <= date) && self.end.map_or(true, |end| date <= end)
    }
}

fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>, DateRangeError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| DateRangeError::InvalidDate(value.to_string()))
}

fn format_optional_date(value: Option<NaiveDate>) -> String {
    value
        .map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
