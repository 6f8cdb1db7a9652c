use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every body or sensitive point a chart or calendar can track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Ascendant,
    Midheaven,
    #[serde(rename = "North Node")]
    NorthNode,
    #[serde(rename = "South Node")]
    SouthNode,
    Chiron,
    Lilith,
    Ceres,
    Pallas,
    Juno,
    Vesta,
}

impl Body {
    /// The ten major bodies, luminaries included.
    pub const PLANETS: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub const SENSITIVE_POINTS: [Body; 4] = [
        Body::Ascendant,
        Body::Midheaven,
        Body::NorthNode,
        Body::SouthNode,
    ];

    pub const ASTEROIDS: [Body; 6] = [
        Body::Chiron,
        Body::Lilith,
        Body::Ceres,
        Body::Pallas,
        Body::Juno,
        Body::Vesta,
    ];

    /// Everything a complete birth chart contains, in output order.
    pub const CHART: [Body; 20] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::Ascendant,
        Body::Midheaven,
        Body::NorthNode,
        Body::SouthNode,
        Body::Chiron,
        Body::Lilith,
        Body::Ceres,
        Body::Pallas,
        Body::Juno,
        Body::Vesta,
    ];

    /// Horizon-derived angles. They have no meaningful day-over-day motion.
    pub fn is_angle(self) -> bool {
        matches!(self, Body::Ascendant | Body::Midheaven)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::Ascendant => "Ascendant",
            Body::Midheaven => "Midheaven",
            Body::NorthNode => "North Node",
            Body::SouthNode => "South Node",
            Body::Chiron => "Chiron",
            Body::Lilith => "Lilith",
            Body::Ceres => "Ceres",
            Body::Pallas => "Pallas",
            Body::Juno => "Juno",
            Body::Vesta => "Vesta",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Body {
    type Err = String;

    /// Accepts display names and snake_case ids ("North Node", "north_node").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', " ");
        Body::CHART
            .iter()
            .copied()
            .find(|b| b.display_name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("Unknown body: {}", s))
    }
}

/// Geocentric ecliptic longitude of one body at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyLongitude {
    pub body: Body,
    /// Degrees, always in [0, 360)
    pub ecliptic_longitude: f64,
}

/// Longitude plus apparent direction of motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetrogradeSample {
    pub body: Body,
    pub longitude: f64,
    /// Longitude one day earlier; `None` for angles, which are not differenced.
    pub previous_longitude: Option<f64>,
    pub retrograde: bool,
}

/// A change of apparent direction suggested by three consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Station {
    Retrograde,
    Direct,
}
