use crate::ephemeris::types::Body;
use crate::time::Observer;
use crate::zodiac::normalize_degrees;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {body} at {instant}: {message}")]
    SampleFailed {
        body: Body,
        instant: DateTime<Utc>,
        message: String,
    },
    #[error("Body {body} is not supported by this ephemeris")]
    UnsupportedBody { body: Body },
}

/// Source of geocentric ecliptic longitudes.
///
/// Implementations must be pure functions of their arguments: the same
/// `(body, instant, observer)` always yields the same longitude.
pub trait EphemerisProvider {
    /// Geocentric ecliptic longitude in degrees. Angles (Ascendant,
    /// Midheaven) depend on the observer; everything else may ignore it.
    fn ecliptic_longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        observer: &Observer,
    ) -> Result<f64, EphemerisError>;

    /// Moon minus Sun longitude in [0, 360): 0 new, 90 first quarter,
    /// 180 full, 270 last quarter.
    fn moon_phase_angle(&self, instant: DateTime<Utc>) -> Result<f64, EphemerisError> {
        let observer = Observer::GREENWICH;
        let moon = self.ecliptic_longitude(Body::Moon, instant, &observer)?;
        let sun = self.ecliptic_longitude(Body::Sun, instant, &observer)?;
        Ok(normalize_degrees(moon - sun))
    }

    /// Illuminated fraction of the lunar disc in [0, 1].
    fn moon_illumination(&self, instant: DateTime<Utc>) -> Result<f64, EphemerisError> {
        let phase = self.moon_phase_angle(instant)?;
        Ok(((1.0 - phase.to_radians().cos()) / 2.0).clamp(0.0, 1.0))
    }
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn ecliptic_longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        observer: &Observer,
    ) -> Result<f64, EphemerisError> {
        (**self).ecliptic_longitude(body, instant, observer)
    }

    fn moon_phase_angle(&self, instant: DateTime<Utc>) -> Result<f64, EphemerisError> {
        (**self).moon_phase_angle(instant)
    }

    fn moon_illumination(&self, instant: DateTime<Utc>) -> Result<f64, EphemerisError> {
        (**self).moon_illumination(instant)
    }
}
