//! Lunar phase classification.
//!
//! The phase angle (Moon minus Sun longitude) is split into eight bands. The
//! four cardinal phases are 10° wide, centred on 0°, 90°, 180° and 270°; the
//! intermediate phases fill the gaps between them.

use crate::zodiac::normalize_degrees;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-width of a cardinal phase band in degrees
pub const CARDINAL_HALF_WIDTH: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// Band containing `phase_angle` (any real value; normalized first).
    pub fn classify(phase_angle: f64) -> Self {
        let a = normalize_degrees(phase_angle);
        let near = |centre: f64| (a - centre).abs() <= CARDINAL_HALF_WIDTH;

        if a >= 360.0 - CARDINAL_HALF_WIDTH || a <= CARDINAL_HALF_WIDTH {
            MoonPhase::NewMoon
        } else if near(90.0) {
            MoonPhase::FirstQuarter
        } else if near(180.0) {
            MoonPhase::FullMoon
        } else if near(270.0) {
            MoonPhase::LastQuarter
        } else if a < 90.0 {
            MoonPhase::WaxingCrescent
        } else if a < 180.0 {
            MoonPhase::WaxingGibbous
        } else if a < 270.0 {
            MoonPhase::WaningGibbous
        } else {
            MoonPhase::WaningCrescent
        }
    }

    pub fn is_cardinal(self) -> bool {
        matches!(
            self,
            MoonPhase::NewMoon
                | MoonPhase::FirstQuarter
                | MoonPhase::FullMoon
                | MoonPhase::LastQuarter
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent Moon",
            MoonPhase::FirstQuarter => "First Quarter Moon",
            MoonPhase::WaxingGibbous => "Waxing Gibbous Moon",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous Moon",
            MoonPhase::LastQuarter => "Last Quarter Moon",
            MoonPhase::WaningCrescent => "Waning Crescent Moon",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "🌑",
            MoonPhase::WaxingCrescent => "🌒",
            MoonPhase::FirstQuarter => "🌓",
            MoonPhase::WaxingGibbous => "🌔",
            MoonPhase::FullMoon => "🌕",
            MoonPhase::WaningGibbous => "🌖",
            MoonPhase::LastQuarter => "🌗",
            MoonPhase::WaningCrescent => "🌘",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Traditional name of the full moon falling in `month` (1 = January).
pub fn full_moon_name(month: u32) -> &'static str {
    const NAMES: &[&str] = &[
        "Wolf Moon",       // January
        "Snow Moon",       // February
        "Worm Moon",       // March
        "Pink Moon",       // April
        "Flower Moon",     // May
        "Strawberry Moon", // June
        "Buck Moon",       // July
        "Sturgeon Moon",   // August
        "Harvest Moon",    // September
        "Hunter's Moon",   // October
        "Beaver Moon",     // November
        "Cold Moon",       // December
    ];
    NAMES[(month.clamp(1, 12) - 1) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(MoonPhase::classify(0.0), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::classify(5.0), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::classify(355.0), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::classify(5.01), MoonPhase::WaxingCrescent);
        assert_eq!(MoonPhase::classify(85.0), MoonPhase::FirstQuarter);
        assert_eq!(MoonPhase::classify(95.0), MoonPhase::FirstQuarter);
        assert_eq!(MoonPhase::classify(95.5), MoonPhase::WaxingGibbous);
        assert_eq!(MoonPhase::classify(180.0), MoonPhase::FullMoon);
        assert_eq!(MoonPhase::classify(200.0), MoonPhase::WaningGibbous);
        assert_eq!(MoonPhase::classify(270.0), MoonPhase::LastQuarter);
        assert_eq!(MoonPhase::classify(300.0), MoonPhase::WaningCrescent);
        assert_eq!(MoonPhase::classify(354.9), MoonPhase::WaningCrescent);
    }

    #[test]
    fn test_classify_normalizes() {
        assert_eq!(MoonPhase::classify(-2.0), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::classify(540.0), MoonPhase::FullMoon);
    }

    #[test]
    fn test_cardinal_phases() {
        let cardinal: Vec<MoonPhase> = (0..360)
            .map(|a| MoonPhase::classify(a as f64))
            .filter(|p| p.is_cardinal())
            .collect();
        assert!(cardinal.contains(&MoonPhase::NewMoon));
        assert!(cardinal.contains(&MoonPhase::LastQuarter));
        assert!(!MoonPhase::WaxingGibbous.is_cardinal());
    }

    #[test]
    fn test_full_moon_names() {
        assert_eq!(full_moon_name(1), "Wolf Moon");
        assert_eq!(full_moon_name(9), "Harvest Moon");
        assert_eq!(full_moon_name(12), "Cold Moon");
    }
}
