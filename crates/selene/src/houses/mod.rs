//! Whole-sign houses.
//!
//! House 1 is the whole sign holding the Ascendant and every following
//! house is the next sign in zodiacal order. A body's house depends only on
//! its sign, so the layout is valid at every latitude, including the polar
//! regions where quadrant systems degenerate.

use crate::chart::BodyPlacement;
use crate::zodiac::{ZodiacSign, SIGN_COUNT};
use serde::{Deserialize, Serialize};

pub const HOUSE_COUNT: usize = SIGN_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct House {
    /// 1..=12
    pub number: u8,
    pub sign: ZodiacSign,
}

/// Lay out the twelve houses starting from the Ascendant's sign.
pub fn assign_houses(ascendant_sign: ZodiacSign) -> [House; HOUSE_COUNT] {
    let first = ascendant_sign.index();
    std::array::from_fn(|i| House {
        number: (i + 1) as u8,
        sign: ZodiacSign::from_index(first + i),
    })
}

/// House number (1-based) whose sign is `sign`.
pub fn house_for_sign(houses: &[House; HOUSE_COUNT], sign: ZodiacSign) -> u8 {
    houses
        .iter()
        .find(|h| h.sign == sign)
        .map(|h| h.number)
        // Twelve consecutive signs always cover the zodiac
        .unwrap_or(1)
}

/// Copy of `placements` with `house` set on every body, angles included.
/// The Ascendant always lands in house 1.
pub fn place_in_houses(
    houses: &[House; HOUSE_COUNT],
    placements: &[BodyPlacement],
) -> Vec<BodyPlacement> {
    placements
        .iter()
        .map(|p| BodyPlacement {
            house: Some(house_for_sign(houses, p.placement.sign)),
            ..p.clone()
        })
        .collect()
}
