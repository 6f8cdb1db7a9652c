use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObserverError {
    #[error("Latitude {value} is outside [-90, 90]")]
    LatitudeOutOfRange { value: f64 },
    #[error("Longitude {value} is outside [-180, 180]")]
    LongitudeOutOfRange { value: f64 },
    #[error("Elevation must be finite, got {value}")]
    InvalidElevation { value: f64 },
}

/// Geographic observer on the Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    /// Degrees north, -90..=90
    pub latitude: f64,
    /// Degrees east, -180..=180
    pub longitude: f64,
    #[serde(default)]
    pub elevation_meters: f64,
}

impl Observer {
    /// Royal Observatory, Greenwich.
    pub const GREENWICH: Observer = Observer {
        latitude: 51.4769,
        longitude: 0.0005,
        elevation_meters: 0.0,
    };

    pub fn new(
        latitude: f64,
        longitude: f64,
        elevation_meters: f64,
    ) -> Result<Self, ObserverError> {
        let observer = Self {
            latitude,
            longitude,
            elevation_meters,
        };
        observer.validate()?;
        Ok(observer)
    }

    pub fn validate(&self) -> Result<(), ObserverError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ObserverError::LatitudeOutOfRange { value: self.latitude });
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ObserverError::LongitudeOutOfRange { value: self.longitude });
        }
        if !self.elevation_meters.is_finite() {
            return Err(ObserverError::InvalidElevation {
                value: self.elevation_meters,
            });
        }
        Ok(())
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::GREENWICH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_greenwich() {
        let o = Observer::default();
        assert_eq!(o, Observer::GREENWICH);
        assert!((o.latitude - 51.4769).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            Observer::new(91.0, 0.0, 0.0),
            Err(ObserverError::LatitudeOutOfRange { .. })
        ));
        assert!(matches!(
            Observer::new(0.0, -180.5, 0.0),
            Err(ObserverError::LongitudeOutOfRange { .. })
        ));
        assert!(matches!(
            Observer::new(0.0, 0.0, f64::NAN),
            Err(ObserverError::InvalidElevation { .. })
        ));
        assert!(Observer::new(-33.8688, 151.2093, 58.0).is_ok());
    }
}
