use crate::ephemeris::Body;
use crate::houses::{House, HOUSE_COUNT};
use crate::time::{Observer, ResolveOptions};
use crate::zodiac::ZodiacPlacement;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One body's position in a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPlacement {
    pub body: Body,
    #[serde(rename = "eclipticLongitude")]
    pub ecliptic_longitude: f64,
    #[serde(flatten)]
    pub placement: ZodiacPlacement,
    pub retrograde: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
}

/// Input to the chart assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    /// `YYYY-MM-DD`, local to the requested timezone
    pub date: String,
    #[serde(flatten)]
    pub options: ResolveOptions,
}

impl ChartRequest {
    pub fn new(date: impl Into<String>, options: ResolveOptions) -> Self {
        Self {
            date: date.into(),
            options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthChart {
    pub instant: DateTime<Utc>,
    pub observer: Observer,
    pub placements: Vec<BodyPlacement>,
}

impl BirthChart {
    pub fn body(&self, body: Body) -> Option<&BodyPlacement> {
        self.placements.iter().find(|p| p.body == body)
    }

    /// All ten planets, the four sensitive points and the six asteroids are present.
    pub fn is_complete(&self) -> bool {
        Body::CHART.iter().all(|b| self.body(*b).is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartWithHouses {
    pub instant: DateTime<Utc>,
    pub observer: Observer,
    pub planets: Vec<BodyPlacement>,
    pub houses: [House; HOUSE_COUNT],
}

impl ChartWithHouses {
    pub fn body(&self, body: Body) -> Option<&BodyPlacement> {
        self.planets.iter().find(|p| p.body == body)
    }
}
