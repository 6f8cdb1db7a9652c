use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::Body;
use crate::time::Observer;
use crate::zodiac::normalize_degrees;
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::env;
use std::path::{Path, PathBuf};
use swisseph::swe::{calc_ut, julday};

/// Swiss Ephemeris flags
const FLG_SWIEPH: i32 = 2;
const FLG_MOSEPH: i32 = 4;

/// Whole-sign house system byte; only the angles are read from it.
const HOUSE_SYSTEM_WHOLE_SIGN: u8 = b'W';

// Swiss Ephemeris body codes
const BODY_IDS: &[(Body, i32)] = &[
    (Body::Sun, 0),
    (Body::Moon, 1),
    (Body::Mercury, 2),
    (Body::Venus, 3),
    (Body::Mars, 4),
    (Body::Jupiter, 5),
    (Body::Saturn, 6),
    (Body::Uranus, 7),
    (Body::Neptune, 8),
    (Body::Pluto, 9),
    (Body::NorthNode, 11), // TRUE_NODE
    (Body::Lilith, 12),    // MEAN_APOG
    (Body::Chiron, 15),
    (Body::Ceres, 17),
    (Body::Pallas, 18),
    (Body::Juno, 19),
    (Body::Vesta, 20),
];

/// Swiss Ephemeris backed [`EphemerisProvider`].
///
/// With a data directory the adapter reads the `.se1` files, which is
/// required for the asteroids. Without one it runs the built-in Moshier
/// theory, which covers the Sun, Moon, planets, nodes and Lilith only.
pub struct SwissEphemerisAdapter {
    ephemeris_path: Option<PathBuf>,
    flags: i32,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// Falls back to `SWISS_EPHEMERIS_PATH` when no path is given. A path
    /// that is given but missing is an error.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path
            .or_else(|| env::var("SWISS_EPHEMERIS_PATH").ok().map(PathBuf::from));

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(EphemerisError::FileNotFound {
                        path: path.display().to_string(),
                        message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris \
                                  data files are installed."
                            .to_string(),
                    });
                }
                // The C library reads SE_EPHE_PATH on first use. This is
                // process-wide, like the rest of its state.
                env::set_var("SE_EPHE_PATH", &path);
                log::info!("Swiss Ephemeris data directory: {}", path.display());
                Ok(Self {
                    ephemeris_path: Some(path),
                    flags: FLG_SWIEPH,
                })
            }
            None => {
                log::info!("No Swiss Ephemeris data directory configured, using Moshier theory");
                Ok(Self::moshier())
            }
        }
    }

    /// Adapter using only the built-in analytic theory.
    pub fn moshier() -> Self {
        Self {
            ephemeris_path: None,
            flags: FLG_MOSEPH,
        }
    }

    pub fn ephemeris_path(&self) -> Option<&Path> {
        self.ephemeris_path.as_deref()
    }

    fn calc_body(
        &self,
        body: Body,
        jd: f64,
        instant: DateTime<Utc>,
    ) -> Result<f64, EphemerisError> {
        let code = BODY_IDS
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, code)| *code)
            .ok_or(EphemerisError::UnsupportedBody { body })?;

        let result = calc_ut(jd, code as u32, self.flags as u32).map_err(|e| {
            EphemerisError::SampleFailed {
                body,
                instant,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        checked_longitude(body, instant, result.out[0])
    }

    fn calc_angles(&self, jd: f64, observer: &Observer) -> (f64, f64) {
        use swisseph::swe::houses_ex;
        use swisseph::AscMc;

        let (_cusps, a) = houses_ex(
            jd,
            self.flags,
            observer.latitude,
            observer.longitude,
            HOUSE_SYSTEM_WHOLE_SIGN as i32,
        );
        let ascmc = AscMc::from_array(a);
        (ascmc.ascendant, ascmc.mc)
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn ecliptic_longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        observer: &Observer,
    ) -> Result<f64, EphemerisError> {
        let jd = datetime_to_julian_day(instant);
        match body {
            Body::Ascendant => {
                let (asc, _) = self.calc_angles(jd, observer);
                checked_longitude(body, instant, asc)
            }
            Body::Midheaven => {
                let (_, mc) = self.calc_angles(jd, observer);
                checked_longitude(body, instant, mc)
            }
            Body::SouthNode => {
                let north = self.calc_body(Body::NorthNode, jd, instant)?;
                Ok(normalize_degrees(north + 180.0))
            }
            _ => self.calc_body(body, jd, instant),
        }
    }
}

fn checked_longitude(body: Body, instant: DateTime<Utc>, raw: f64) -> Result<f64, EphemerisError> {
    if !raw.is_finite() {
        return Err(EphemerisError::SampleFailed {
            body,
            instant,
            message: format!("non-finite longitude {}", raw),
        });
    }
    Ok(normalize_degrees(raw))
}

/// Convert UTC datetime to Julian Day
pub fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let hour_decimal = dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0;

    // GREG_CAL = 1
    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, 1)
}
