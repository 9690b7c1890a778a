//! Body selection and placement.

use crate::catalogue::CelestialBody;
use crate::ephemeris::{EphemerisError, EphemerisProvider};
use crate::zodiac::{normalize, place_in_zodiac, ZodiacSign};
use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

lazy_static! {
    /// `"0,1,...,22"`: every body the provider computes directly.
    pub static ref CANONICAL_DISPLAY: String = CelestialBody::ALL
        .iter()
        .filter(|body| body.is_displayed_by_default())
        .map(|body| body.id().to_string())
        .collect::<Vec<_>>()
        .join(",");
}

#[derive(Error, Debug, PartialEq)]
pub enum DisplayFilterError {
    #[error("Display filter is empty")]
    Empty,
    #[error("Invalid body id in display filter: {token:?}")]
    InvalidToken { token: String },
    #[error("Unknown body id in display filter: {id}")]
    UnknownBody { id: i32 },
}

/// Set of bodies to include in a chart, plus the raw string it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayFilter {
    raw: String,
    included: Vec<CelestialBody>,
}

impl DisplayFilter {
    pub fn canonical() -> Self {
        Self {
            raw: CANONICAL_DISPLAY.clone(),
            included: CelestialBody::ALL
                .iter()
                .copied()
                .filter(|body| body.is_displayed_by_default())
                .collect(),
        }
    }

    /// Parse a comma separated list of catalogue ids. Duplicates are allowed.
    pub fn parse(raw: &str) -> Result<Self, DisplayFilterError> {
        if raw.trim().is_empty() {
            return Err(DisplayFilterError::Empty);
        }

        let mut included = Vec::new();
        for token in raw.split(',') {
            let id: i32 = token.trim().parse().map_err(|_| DisplayFilterError::InvalidToken {
                token: token.to_string(),
            })?;
            let body = CelestialBody::from_id(id).ok_or(DisplayFilterError::UnknownBody { id })?;
            if !included.contains(&body) {
                included.push(body);
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            included,
        })
    }

    pub fn contains(&self, body: CelestialBody) -> bool {
        self.included.contains(&body)
    }

    /// The string echoed back in the chart document.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Default for DisplayFilter {
    fn default() -> Self {
        Self::canonical()
    }
}

impl FromStr for DisplayFilter {
    type Err = DisplayFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DisplayFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBody {
    pub body: CelestialBody,
    pub sign: ZodiacSign,
    pub degree: f64,
    pub degree_ut: f64,
    pub retrograde: bool,
    /// Stacking index among bodies close to each other, set by the cluster pass.
    pub cluster: usize,
}

impl PlacedBody {
    pub fn new(body: CelestialBody, absolute_degree: f64, retrograde: bool) -> Self {
        let degree_ut = normalize(absolute_degree);
        let placement = place_in_zodiac(degree_ut);
        Self {
            body,
            sign: placement.sign,
            degree: placement.degree,
            degree_ut,
            retrograde,
            cluster: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.body.name()
    }

    pub fn id(&self) -> i32 {
        self.body.id()
    }
}

/// Compute and place one body. South nodes are the antipode of their north node.
pub fn place_body<P: EphemerisProvider + ?Sized>(
    provider: &mut P,
    julian_day: f64,
    body: CelestialBody,
) -> Result<PlacedBody, EphemerisError> {
    match body.north_node() {
        Some(north) => {
            let position = provider.calc_body(julian_day, north).map_err(|err| match err {
                EphemerisError::CalculationFailed {
                    julian_day,
                    datetime,
                    message,
                    ..
                } => EphemerisError::CalculationFailed {
                    body,
                    julian_day,
                    datetime,
                    message: format!("{north}: {message}"),
                },
                other => other,
            })?;
            Ok(PlacedBody::new(body, position.lon + 180.0, position.retrograde))
        }
        None => {
            let position = provider.calc_body(julian_day, body)?;
            Ok(PlacedBody::new(body, position.lon, position.retrograde))
        }
    }
}

/// Place every body of the filter, in catalogue order.
pub fn place_bodies<P: EphemerisProvider + ?Sized>(
    provider: &mut P,
    julian_day: f64,
    filter: &DisplayFilter,
) -> Result<Vec<PlacedBody>, EphemerisError> {
    let bodies = CelestialBody::ALL
        .iter()
        .copied()
        .filter(|&body| filter.contains(body))
        .map(|body| place_body(provider, julian_day, body))
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Placed {} bodies at JD {}", bodies.len(), julian_day);
    Ok(bodies)
}
