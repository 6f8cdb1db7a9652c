//! Sampling longitudes and apparent direction of motion.
//!
//! Retrograde state is a finite difference against the longitude one day
//! earlier. When the two samples are less than 180° apart the body is
//! retrograde if it moved backwards; otherwise the pair straddles the
//! 0°/360° seam and the comparison is inverted.

use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{Body, BodyLongitude, RetrogradeSample, Station};
use crate::time::Observer;
use crate::zodiac::normalize_degrees;
use chrono::{DateTime, Duration, Utc};

pub struct PositionSampler<'a, P: EphemerisProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: EphemerisProvider + ?Sized> PositionSampler<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &'a P {
        self.provider
    }

    /// Normalized longitude of one body; non-finite values are sample failures.
    pub fn longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        observer: &Observer,
    ) -> Result<f64, EphemerisError> {
        let raw = self.provider.ecliptic_longitude(body, instant, observer)?;
        if !raw.is_finite() {
            return Err(EphemerisError::SampleFailed {
                body,
                instant,
                message: format!("provider returned non-finite longitude {}", raw),
            });
        }
        Ok(normalize_degrees(raw))
    }

    /// Longitudes of `bodies` at `instant`, in the order given. Fails on the
    /// first body the provider cannot compute.
    pub fn sample(
        &self,
        instant: DateTime<Utc>,
        observer: &Observer,
        bodies: &[Body],
    ) -> Result<Vec<BodyLongitude>, EphemerisError> {
        bodies
            .iter()
            .map(|&body| {
                self.longitude(body, instant, observer).map(|ecliptic_longitude| BodyLongitude {
                    body,
                    ecliptic_longitude,
                })
            })
            .collect()
    }

    /// Longitude at `instant` and retrograde state from `instant - 1 day`.
    /// Angles are never retrograde and are not differenced.
    pub fn sample_with_retrograde(
        &self,
        instant: DateTime<Utc>,
        observer: &Observer,
        body: Body,
    ) -> Result<RetrogradeSample, EphemerisError> {
        let longitude = self.longitude(body, instant, observer)?;
        if body.is_angle() {
            return Ok(RetrogradeSample {
                body,
                longitude,
                previous_longitude: None,
                retrograde: false,
            });
        }

        let previous = self.longitude(body, instant - Duration::days(1), observer)?;
        Ok(RetrogradeSample {
            body,
            longitude,
            previous_longitude: Some(previous),
            retrograde: is_retrograde(longitude, previous),
        })
    }
}

/// Two-point retrograde test with the wraparound branch.
pub fn is_retrograde(now: f64, previous: f64) -> bool {
    if (now - previous).abs() < 180.0 {
        now < previous
    } else {
        now > previous
    }
}

/// Three-point station heuristic over samples at d, d-1 and d-2.
///
/// Only the d / d-1 comparison is seam-aware; d-1 against d-2 is compared
/// raw, so a seam crossing on the earlier pair can misclassify the day.
/// Callers treat the result as advisory.
pub fn station_hint(now: f64, previous: f64, before_previous: f64) -> Option<Station> {
    let (new_retrograde, new_direct) = if (now - previous).abs() < 180.0 {
        (
            now < previous && previous > before_previous,
            now > previous && previous < before_previous,
        )
    } else {
        (
            now > previous && previous < before_previous,
            now < previous && previous > before_previous,
        )
    };

    if new_retrograde {
        Some(Station::Retrograde)
    } else if new_direct {
        Some(Station::Direct)
    } else {
        None
    }
}
