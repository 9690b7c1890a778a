use crate::bodies::DisplayFilter;
use crate::ephemeris::GeoLocation;
use crate::houses::HouseSystem;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Everything needed to compute one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Decimal hours, UT
    pub time: f64,
    pub lat: f64,
    pub lon: f64,
    pub house_system: HouseSystem,
    pub display: DisplayFilter,
    // Echoed back only
    pub name: String,
    pub city: String,
}

impl Default for ChartRequest {
    fn default() -> Self {
        Self {
            year: 1970,
            month: 1,
            day: 1,
            time: 0.0,
            lat: 0.0,
            lon: 0.0,
            house_system: HouseSystem::EQUAL,
            display: DisplayFilter::canonical(),
            name: String::new(),
            city: String::new(),
        }
    }
}

impl ChartRequest {
    /// Build a request from query parameters.
    ///
    /// Missing values take their default silently; malformed or out of range
    /// values take it with a warning. This never fails.
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let defaults = Self::default();

        let house_system = match query.get("hsys") {
            None => defaults.house_system,
            Some(raw) => match raw.chars().next() {
                Some(code) if code.is_ascii_graphic() => HouseSystem::new(code),
                _ => {
                    warn!("Ignoring invalid hsys {:?}, using {}", raw, defaults.house_system);
                    defaults.house_system
                }
            },
        };

        let display = match query.get("display") {
            None => defaults.display.clone(),
            Some(raw) => raw.parse::<DisplayFilter>().unwrap_or_else(|err| {
                warn!("Ignoring display {:?}: {}", raw, err);
                defaults.display.clone()
            }),
        };

        Self {
            year: parse_field(query, "year", defaults.year, |_| true),
            month: parse_field(query, "month", defaults.month, |m| (1..=12).contains(m)),
            day: parse_field(query, "day", defaults.day, |d| (1..=31).contains(d)),
            time: parse_field(query, "time", defaults.time, |t| t.is_finite() && (0.0..24.0).contains(t)),
            lat: parse_field(query, "lat", defaults.lat, |l| (-90.0..=90.0).contains(l)),
            lon: parse_field(query, "lon", defaults.lon, |l| (-180.0..=180.0).contains(l)),
            house_system,
            display,
            name: query.get("name").cloned().unwrap_or(defaults.name),
            city: query.get("city").cloned().unwrap_or(defaults.city),
        }
    }

    pub fn location(&self) -> GeoLocation {
        GeoLocation {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

fn parse_field<T>(query: &HashMap<String, String>, key: &str, default: T, valid: impl Fn(&T) -> bool) -> T
where
    T: FromStr + std::fmt::Display,
{
    let Some(raw) = query.get(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        _ => {
            warn!("Ignoring invalid {} {:?}, using {}", key, raw, default);
            default
        }
    }
}
