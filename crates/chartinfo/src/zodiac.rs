//! Angle normalization and zodiac sign placement.
//!
//! Every absolute degree handled by the chart pipeline goes through
//! [`normalize`] before it is placed with [`place_in_zodiac`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of one zodiac sign in degrees.
pub const SIGN_SPAN: f64 = 30.0;

const FULL_CIRCLE: f64 = 360.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries = 0,
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
    pub const ALL: [ZodiacSign; 12] = [
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

    pub fn from_index(index: usize) -> Option<ZodiacSign> {
        Self::ALL.get(index).copied()
    }

    /// Sign index 0 (Aries) ..= 11 (Pisces).
    pub fn index(self) -> usize {
        self as usize
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

    /// Absolute degree at which this sign starts.
    pub fn start_degree(self) -> f64 {
        self.index() as f64 * SIGN_SPAN
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sign and sign-relative degree of an absolute ecliptic degree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZodiacPlacement {
    pub sign: ZodiacSign,
    /// Degree within the sign, 0 <= x < 30
    pub degree: f64,
}

/// Fold any angle into [0, 360).
pub fn normalize(angle: f64) -> f64 {
    let angle = angle % FULL_CIRCLE;
    if angle < 0.0 {
        let folded = angle + FULL_CIRCLE;
        // -1e-20 + 360 rounds to 360
        if folded >= FULL_CIRCLE {
            0.0
        } else {
            folded
        }
    } else {
        angle
    }
}

/// Place a normalized absolute degree in the zodiac.
///
/// Exact multiples of 30 belong to the sign starting there. The caller is
/// responsible for normalizing; out-of-range input is clamped to Aries or
/// Pisces.
pub fn place_in_zodiac(absolute_degree: f64) -> ZodiacPlacement {
    let index = (absolute_degree / SIGN_SPAN).floor().clamp(0.0, 11.0) as usize;
    let sign = ZodiacSign::ALL[index];
    ZodiacPlacement {
        sign,
        degree: absolute_degree - sign.start_degree(),
    }
}
