use crate::catalogue::CelestialBody;
use crate::ephemeris::types::{
    EphemerisError, EphemerisProvider, GeoLocation, HousePositions, PlanetPosition,
};
use crate::houses::HouseSystem;
use std::collections::HashMap;

/// Table-driven provider returning the same positions for every date.
///
/// Used where real ephemeris data is unavailable: tests, benchmarks and
/// offline demos. Bodies without an entry fail like a missing data file would.
#[derive(Debug, Clone, Default)]
pub struct FixedEphemeris {
    cusps: Vec<f64>,
    angles: Vec<f64>,
    bodies: HashMap<CelestialBody, PlanetPosition>,
}

impl FixedEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// House cusps (house 1 first) and the angular marks in provider order.
    pub fn with_houses(mut self, cusps: Vec<f64>, angles: Vec<f64>) -> Self {
        self.cusps = cusps;
        self.angles = angles;
        self
    }

    pub fn with_body(mut self, body: CelestialBody, lon: f64, speed_lon: f64) -> Self {
        self.bodies.insert(body, PlanetPosition::new(lon, 0.0, speed_lon));
        self
    }
}

impl EphemerisProvider for FixedEphemeris {
    fn julian_day(&self, year: i32, month: u32, day: u32, hour: f64) -> f64 {
        gregorian_julian_day(year, month, day, hour)
    }

    fn calc_houses(
        &mut self,
        _julian_day: f64,
        _location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<HousePositions, EphemerisError> {
        Ok(HousePositions {
            system,
            cusps: self.cusps.clone(),
            angles: self.angles.clone(),
        })
    }

    fn calc_body(&mut self, julian_day: f64, body: CelestialBody) -> Result<PlanetPosition, EphemerisError> {
        self.bodies
            .get(&body)
            .copied()
            .ok_or_else(|| EphemerisError::calculation_failed(body, julian_day, "no fixed position"))
    }
}

/// Julian day of a proleptic Gregorian date (Meeus, Astronomical Algorithms, ch. 7).
pub fn gregorian_julian_day(year: i32, month: u32, day: u32, hour: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b - 1524.5
        + hour / 24.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gregorian_julian_day() {
        assert_eq!(gregorian_julian_day(2000, 1, 1, 12.0), 2_451_545.0);
        assert_eq!(gregorian_julian_day(1970, 1, 1, 0.0), 2_440_587.5);
        assert_eq!(gregorian_julian_day(1957, 10, 4, 0.0), 2_436_115.5);
    }

    #[test]
    fn test_missing_body_fails_with_its_name() {
        let mut provider = FixedEphemeris::new().with_body(CelestialBody::Sun, 10.0, 1.0);
        assert!(provider.calc_body(2_451_545.0, CelestialBody::Sun).is_ok());
        let err = provider.calc_body(2_451_545.0, CelestialBody::Vesta).unwrap_err();
        assert!(err.to_string().contains("Vesta"));
    }
}
