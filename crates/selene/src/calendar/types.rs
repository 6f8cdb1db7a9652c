use crate::ephemeris::Body;
use crate::zodiac::ZodiacSign;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalendarError {
    #[error("Year {year} is outside the supported range {min}..={max}")]
    InvalidYear { year: i32, min: i32, max: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CosmicEventKind {
    MoonPhase,
    RetrogradeStart,
    RetrogradeEnd,
    SignIngress,
    Eclipse,
}

impl CosmicEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CosmicEventKind::MoonPhase => "moon_phase",
            CosmicEventKind::RetrogradeStart => "retrograde_start",
            CosmicEventKind::RetrogradeEnd => "retrograde_end",
            CosmicEventKind::SignIngress => "sign_ingress",
            CosmicEventKind::Eclipse => "eclipse",
        }
    }
}

/// A dated occurrence found by the year scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmicEvent {
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: CosmicEventKind,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planet: Option<Body>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign: Option<ZodiacSign>,
}

/// A body/day the provider could not sample. The scan carried the previous
/// day's state for that body instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanWarning {
    pub date: NaiveDate,
    /// The body that failed (a tracked body, or the Sun or North Node during
    /// an eclipse check). `None` when the lunar phase itself failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmicCalendar {
    pub year: i32,
    pub events: Vec<CosmicEvent>,
    /// iCalendar text of `events`
    pub serialized: String,
    pub warnings: Vec<ScanWarning>,
}

impl CosmicCalendar {
    pub fn events_of(&self, kind: CosmicEventKind) -> impl Iterator<Item = &CosmicEvent> {
        self.events.iter().filter(move |e| e.kind == kind)
    }
}
