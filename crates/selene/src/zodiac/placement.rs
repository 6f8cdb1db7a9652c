//! Mapping ecliptic longitude onto sign, degree and minute.
//!
//! Degree and minute are always truncated. Rounding would promote a body at
//! 29°59.6' into the following sign.

use super::sign::{ZodiacSign, SIGN_COUNT, SIGN_WIDTH};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZodiacPlacement {
    pub sign: ZodiacSign,
    /// Whole degrees within the sign, 0..30
    pub degree: u8,
    /// Whole arcminutes within the degree, 0..60
    pub minute: u8,
}

impl ZodiacPlacement {
    /// Degree and minute within the sign, e.g. `29°44'`.
    pub fn format_dms(&self) -> String {
        format!("{}°{:02}'", self.degree, self.minute)
    }
}

/// Wrap any finite angle into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid of a tiny negative value can land exactly on 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Map a longitude in [0, 360) to its zodiac placement.
///
/// The caller is responsible for normalization; the function is total over
/// that domain and never rounds up across a sign boundary.
pub fn map_longitude(longitude: f64) -> ZodiacPlacement {
    let sign_index = ((longitude / SIGN_WIDTH).floor().max(0.0) as usize).min(SIGN_COUNT - 1);
    let within_sign = (longitude - sign_index as f64 * SIGN_WIDTH).clamp(0.0, SIGN_WIDTH);

    let degree = (within_sign.floor() as u8).min(29);
    let fraction = (within_sign - degree as f64).max(0.0);
    let minute = ((fraction * 60.0).floor() as u8).min(59);

    ZodiacPlacement {
        sign: ZodiacSign::from_index(sign_index),
        degree,
        minute,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(370.5), 10.5);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        let tiny = normalize_degrees(-1e-20);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_capricorn_cusp_never_rounds_up() {
        let p = map_longitude(299.999_999);
        assert_eq!(p.sign, ZodiacSign::Capricorn);
        assert_eq!(p.degree, 29);
        assert_eq!(p.minute, 59);
    }

    #[test]
    fn test_just_below_360() {
        let p = map_longitude(359.999_999_999_999_94);
        assert_eq!(p.sign, ZodiacSign::Pisces);
        assert_eq!(p.degree, 29);
        assert!(p.minute <= 59);
    }

    #[test]
    fn test_sun_reference_value() {
        // 299.74° is 29°44.4' Capricorn
        let p = map_longitude(299.74);
        assert_eq!(p.sign, ZodiacSign::Capricorn);
        assert_eq!(p.degree, 29);
        assert_eq!(p.minute, 44);
        assert_eq!(p.format_dms(), "29°44'");
    }

    #[test]
    fn test_exact_sign_start() {
        let p = map_longitude(120.0);
        assert_eq!(p.sign, ZodiacSign::Leo);
        assert_eq!(p.degree, 0);
        assert_eq!(p.minute, 0);
    }

    #[test]
    fn test_ranges_hold_across_circle() {
        let mut lon = 0.0;
        while lon < 360.0 {
            let p = map_longitude(lon);
            assert!(p.degree < 30);
            assert!(p.minute < 60);
            assert_eq!(p.sign, ZodiacSign::from_longitude(lon));
            lon += 0.137;
        }
    }
}
