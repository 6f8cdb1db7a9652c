//! The twelve tropical zodiac signs.
//!
//! Signs are 30° sectors of ecliptic longitude in fixed cyclic order starting
//! at Aries (0°). All ordering logic is index arithmetic modulo 12.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SIGN_COUNT: usize = 12;
pub const SIGN_WIDTH: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; SIGN_COUNT] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Position in zodiacal order, Aries = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Sign at `index`, wrapping modulo 12.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % SIGN_COUNT]
    }

    /// The following sign in zodiacal order; Pisces wraps to Aries.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Sign containing `longitude`. The longitude is normalized first, so
    /// any finite value is accepted.
    pub fn from_longitude(longitude: f64) -> Self {
        let lon = super::normalize_degrees(longitude);
        let index = ((lon / SIGN_WIDTH).floor() as usize).min(SIGN_COUNT - 1);
        Self::ALL[index]
    }

    /// Ecliptic longitude where this sign begins.
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * SIGN_WIDTH
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    /// Short descriptive phrase used in event descriptions.
    pub fn quality(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "initiating and pioneering",
            ZodiacSign::Taurus => "grounding and stabilizing",
            ZodiacSign::Gemini => "communicating and adapting",
            ZodiacSign::Cancer => "nurturing and protective",
            ZodiacSign::Leo => "creative and expressive",
            ZodiacSign::Virgo => "practical and analytical",
            ZodiacSign::Libra => "harmonizing and diplomatic",
            ZodiacSign::Scorpio => "transforming and intense",
            ZodiacSign::Sagittarius => "expanding and philosophical",
            ZodiacSign::Capricorn => "structuring and ambitious",
            ZodiacSign::Aquarius => "innovative and independent",
            ZodiacSign::Pisces => "intuitive and compassionate",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZodiacSign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|sign| sign.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown zodiac sign: {}", s))
    }
}
