//! Zodiac placements, whole-sign houses and yearly cosmic event calendars
//! computed from geocentric ecliptic longitudes.

pub mod calendar;
pub mod chart;
pub mod config;
pub mod ephemeris;
pub mod houses;
pub mod time;
pub mod zodiac;

pub use calendar::{CosmicCalendar, CosmicEvent, CosmicEventKind, CosmicEventScanner};
pub use chart::{
    BirthChart, BirthChartAssembler, BodyPlacement, ChartError, ChartRequest, ChartWithHouses,
};
pub use config::SeleneConfig;
pub use ephemeris::{Body, EphemerisError, EphemerisProvider, SwissEphemerisAdapter};
pub use time::{resolve, Observer, ResolveOptions, TimeError};
pub use zodiac::{map_longitude, ZodiacPlacement, ZodiacSign};
