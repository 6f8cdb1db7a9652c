//! Analytic stand-ins for the Swiss Ephemeris.
#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use selene::ephemeris::{Body, EphemerisError, EphemerisProvider};
use selene::time::Observer;
use std::f64::consts::TAU;

/// Mean motion plus one epicycle-like term, which is enough to give the
/// planets realistic retrograde loops.
struct Orbit {
    base: f64,
    speed: f64,
    amplitude: f64,
    period: f64,
}

impl Orbit {
    const fn new(base: f64, speed: f64, amplitude: f64, period: f64) -> Self {
        Self {
            base,
            speed,
            amplitude,
            period,
        }
    }

    fn at(&self, t: f64) -> f64 {
        let wobble = if self.period > 0.0 {
            self.amplitude * (TAU * t / self.period).sin()
        } else {
            0.0
        };
        self.base + self.speed * t + wobble
    }
}

const SUN: Orbit = Orbit::new(280.46, 0.985_647_4, 0.0, 0.0);

fn orbit(body: Body) -> Orbit {
    match body {
        Body::Moon => Orbit::new(218.316, 13.176_396, 0.0, 0.0),
        Body::Mercury => Orbit::new(252.25, 0.985_647_4, 22.0, 115.88),
        Body::Venus => Orbit::new(181.98, 0.985_647_4, 46.0, 583.9),
        Body::Mars => Orbit::new(355.45, 0.524, 80.0, 779.9),
        Body::Jupiter => Orbit::new(34.4, 0.0831, 10.0, 398.9),
        Body::Saturn => Orbit::new(50.08, 0.0335, 6.0, 378.1),
        Body::Uranus => Orbit::new(314.0, 0.0117, 3.0, 369.7),
        Body::Neptune => Orbit::new(304.0, 0.006, 1.0, 367.5),
        Body::Pluto => Orbit::new(238.9, 0.004, 1.5, 366.7),
        Body::NorthNode => Orbit::new(125.04, -0.052_953_9, 0.0, 0.0),
        Body::Lilith => Orbit::new(83.35, 0.1114, 0.0, 0.0),
        Body::Chiron => Orbit::new(31.0, 0.0196, 2.0, 365.25),
        Body::Ceres => Orbit::new(160.0, 0.214, 10.0, 466.6),
        Body::Pallas => Orbit::new(200.0, 0.213, 10.0, 466.4),
        Body::Juno => Orbit::new(250.0, 0.226, 10.0, 473.8),
        Body::Vesta => Orbit::new(300.0, 0.272, 10.0, 504.0),
        _ => SUN,
    }
}

pub fn days_since_j2000(instant: DateTime<Utc>) -> f64 {
    let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    (instant - j2000).num_seconds() as f64 / 86_400.0
}

/// Deterministic provider with roughly real mean motions.
pub struct ModelEphemeris;

impl EphemerisProvider for ModelEphemeris {
    fn ecliptic_longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        observer: &Observer,
    ) -> Result<f64, EphemerisError> {
        let t = days_since_j2000(instant);
        Ok(match body {
            Body::Ascendant => {
                100.0 + 360.985_647 * t + observer.longitude + observer.latitude / 10.0
            }
            Body::Midheaven => 10.0 + 360.985_647 * t + observer.longitude,
            Body::SouthNode => orbit(Body::NorthNode).at(t) + 180.0,
            other => orbit(other).at(t),
        })
    }
}

/// Fails one body on the given UTC dates and defers to [`ModelEphemeris`]
/// otherwise.
pub struct FailingDays {
    pub body: Body,
    pub dates: Vec<NaiveDate>,
}

impl EphemerisProvider for FailingDays {
    fn ecliptic_longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        observer: &Observer,
    ) -> Result<f64, EphemerisError> {
        if body == self.body && self.dates.contains(&instant.date_naive()) {
            return Err(EphemerisError::SampleFailed {
                body,
                instant,
                message: "numeric divergence".to_string(),
            });
        }
        ModelEphemeris.ecliptic_longitude(body, instant, observer)
    }
}

/// Sun fixed at 0°, the Moon advancing 1° per day from 0° at noon on
/// `start`, and the North Node fixed at `node`. The lunar phase angle is
/// then simply the day number.
pub struct SlowMoon {
    pub start: NaiveDate,
    pub node: f64,
}

impl EphemerisProvider for SlowMoon {
    fn ecliptic_longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        _observer: &Observer,
    ) -> Result<f64, EphemerisError> {
        let noon = Utc.from_utc_datetime(&self.start.and_hms_opt(12, 0, 0).unwrap());
        let day = (instant - noon).num_seconds() as f64 / 86_400.0;
        Ok(match body {
            Body::Moon => day,
            Body::NorthNode => self.node,
            Body::SouthNode => self.node + 180.0,
            _ => 0.0,
        })
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
