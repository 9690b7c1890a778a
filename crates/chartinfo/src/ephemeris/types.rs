use crate::catalogue::CelestialBody;
use crate::houses::HouseSystem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Julian day of the Unix epoch (1970-01-01T00:00:00Z).
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {body} at JD {julian_day} ({datetime}): {message}")]
    CalculationFailed {
        body: CelestialBody,
        julian_day: f64,
        datetime: String,
        message: String,
    },
    #[error("House calculation failed for system {system}: {message}")]
    HouseCalculationFailed { system: HouseSystem, message: String },
}

impl EphemerisError {
    pub fn calculation_failed(body: CelestialBody, julian_day: f64, message: impl Into<String>) -> Self {
        EphemerisError::CalculationFailed {
            body,
            julian_day,
            datetime: julian_day_to_utc(julian_day)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| "out of range".to_string()),
            message: message.into(),
        }
    }
}

/// UTC instant of a Julian day, when chrono can represent it.
pub fn julian_day_to_utc(julian_day: f64) -> Option<DateTime<Utc>> {
    let seconds = ((julian_day - UNIX_EPOCH_JD) * 86_400.0).round();
    if !seconds.is_finite() || seconds.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::<Utc>::from_timestamp(seconds as i64, 0)
}

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Planetary position data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    /// Longitude in degrees, as returned by the provider
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
    /// Speed in longitude (degrees per day)
    pub speed_lon: f64,
    /// Whether the planet is retrograde
    pub retrograde: bool,
}

impl PlanetPosition {
    pub fn new(lon: f64, lat: f64, speed_lon: f64) -> Self {
        Self {
            lon,
            lat,
            speed_lon,
            retrograde: speed_lon < 0.0,
        }
    }
}

/// Raw house computation output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousePositions {
    pub system: HouseSystem,
    /// Cusps in house order, starting with house 1
    pub cusps: Vec<f64>,
    /// Ascendant, MC, ARMC, Vertex, equatorial ascendant, co-ascendants, polar ascendant
    pub angles: Vec<f64>,
}

/// Source of astronomical positions used to build a chart.
///
/// Implementations may hold process-global state (Swiss Ephemeris does), so
/// the calculation methods take `&mut self` and callers serialize access.
pub trait EphemerisProvider {
    /// Julian day (UT) of a Gregorian calendar date and decimal hour.
    fn julian_day(&self, year: i32, month: u32, day: u32, hour: f64) -> f64;

    fn calc_houses(
        &mut self,
        julian_day: f64,
        location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<HousePositions, EphemerisError>;

    fn calc_body(&mut self, julian_day: f64, body: CelestialBody) -> Result<PlanetPosition, EphemerisError>;
}
