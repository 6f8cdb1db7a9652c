//! Calendar date + clock time + zone → single UTC instant.
//!
//! Inputs are validated strictly: `YYYY-MM-DD` dates and 24-hour `HH:MM`
//! times only. The zone is either `UTC`, a raw `±HH:MM` offset, or an IANA
//! identifier resolved with DST-aware rules. Historical Local Mean Time is
//! not computed here; callers pre-convert and pass `UTC`.

use super::observer::{Observer, ObserverError};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Local clock time used when no time is supplied.
pub const DEFAULT_TIME: &str = "12:00";

lazy_static::lazy_static! {
    static ref DATE_PATTERN: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    static ref TIME_PATTERN: Regex = Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").unwrap();
    static ref OFFSET_PATTERN: Regex = Regex::new(r"^([+-])(\d{2}):?(\d{2})$").unwrap();
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeError {
    #[error("Invalid date format: {input:?} (expected YYYY-MM-DD)")]
    InvalidDateFormat { input: String },
    #[error("Invalid time format: {input:?} (expected 24-hour HH:MM, 00:00-23:59)")]
    InvalidTimeFormat { input: String },
    #[error("Unknown timezone: {input:?} (expected UTC, ±HH:MM or an IANA zone name)")]
    UnknownTimezone { input: String },
    #[error("Local time {date} {time} does not exist in {zone} (skipped by a clock change)")]
    NonexistentLocalTime {
        date: String,
        time: String,
        zone: String,
    },
    #[error(transparent)]
    InvalidObserver(#[from] ObserverError),
}

/// How a local wall-clock reading is anchored to UTC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimezoneSpec {
    Utc,
    /// A raw offset east of UTC, for callers that already know it.
    FixedOffset(FixedOffset),
    Iana(Tz),
}

impl FromStr for TimezoneSpec {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("UTC") || trimmed == "Z" {
            return Ok(TimezoneSpec::Utc);
        }

        if let Some(caps) = OFFSET_PATTERN.captures(trimmed) {
            let sign = if &caps[1] == "-" { -1 } else { 1 };
            let hours: i32 = caps[2].parse().map_err(|_| unknown(s))?;
            let minutes: i32 = caps[3].parse().map_err(|_| unknown(s))?;
            if hours > 14 || minutes > 59 {
                return Err(unknown(s));
            }
            let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
                .ok_or_else(|| unknown(s))?;
            return Ok(TimezoneSpec::FixedOffset(offset));
        }

        trimmed
            .parse::<Tz>()
            .map(TimezoneSpec::Iana)
            .map_err(|_| unknown(s))
    }
}

impl fmt::Display for TimezoneSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TimezoneSpec::Utc => f.write_str("UTC"),
            TimezoneSpec::FixedOffset(offset) => write!(f, "{}", offset),
            TimezoneSpec::Iana(tz) => f.write_str(tz.name()),
        }
    }
}

fn unknown(input: &str) -> TimeError {
    TimeError::UnknownTimezone {
        input: input.to_string(),
    }
}

/// Optional inputs to [`resolve`], each with a documented default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// 24-hour `HH:MM`; local noon when absent.
    #[serde(default)]
    pub time: Option<String>,
    /// `UTC`, `±HH:MM` or an IANA zone; UTC when absent.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Greenwich when absent.
    #[serde(default)]
    pub observer: Option<Observer>,
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn with_observer(mut self, observer: Observer) -> Self {
        self.observer = Some(observer);
        self
    }
}

/// A validated UTC instant and the observer it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMoment {
    pub instant: DateTime<Utc>,
    pub observer: Observer,
}

/// Resolve a date, optional time and zone into a UTC instant plus observer.
///
/// Ambiguous local times (the repeated hour when clocks go back) resolve to
/// the earlier instant. Local times skipped when clocks go forward are
/// rejected with [`TimeError::NonexistentLocalTime`].
pub fn resolve(date: &str, options: &ResolveOptions) -> Result<ResolvedMoment, TimeError> {
    let naive_date = parse_date(date)?;
    let time_str = options.time.as_deref().unwrap_or(DEFAULT_TIME);
    let naive_time = parse_time(time_str)?;
    let zone = match options.timezone.as_deref() {
        Some(tz) => tz.parse::<TimezoneSpec>()?,
        None => TimezoneSpec::Utc,
    };

    let observer = options.observer.unwrap_or_default();
    observer.validate()?;

    let local = naive_date.and_time(naive_time);
    let instant = match zone {
        TimezoneSpec::Utc => Some(Utc.from_utc_datetime(&local)),
        TimezoneSpec::FixedOffset(offset) => offset
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
        TimezoneSpec::Iana(tz) => tz
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
    };

    let instant = instant.ok_or_else(|| TimeError::NonexistentLocalTime {
        date: date.to_string(),
        time: time_str.to_string(),
        zone: zone.to_string(),
    })?;

    log::debug!("resolved {} {} {} -> {}", date, time_str, zone, instant.to_rfc3339());

    Ok(ResolvedMoment { instant, observer })
}

fn parse_date(input: &str) -> Result<NaiveDate, TimeError> {
    let err = || TimeError::InvalidDateFormat {
        input: input.to_string(),
    };
    if !DATE_PATTERN.is_match(input) {
        return Err(err());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| err())
}

fn parse_time(input: &str) -> Result<NaiveTime, TimeError> {
    let err = || TimeError::InvalidTimeFormat {
        input: input.to_string(),
    };
    let caps = TIME_PATTERN.captures(input).ok_or_else(err)?;
    let hour: u32 = caps[1].parse().map_err(|_| err())?;
    let minute: u32 = caps[2].parse().map_err(|_| err())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(err)
}
