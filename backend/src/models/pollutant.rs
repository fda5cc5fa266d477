//! Pollutant codes and the metric selector used across the API.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Pollutants the forecasting source reports.
///
/// Concentration units are implicit per pollutant: µg/m³ for particulates,
/// ppb for gases, ppm for CO.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pollutant {
    Pm25,
    Pm10,
    O3,
    No2,
    So2,
    Co,
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::O3,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::Co,
    ];

    /// Wire code used by the forecasting source (`PM2.5`, `NO2`, ...).
    pub fn code(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::O3 => "O3",
            Pollutant::No2 => "NO2",
            Pollutant::So2 => "SO2",
            Pollutant::Co => "CO",
        }
    }

    /// Lowercase selector used in query strings (`pm25`, `no2`, ...).
    pub fn selector(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm25",
            Pollutant::Pm10 => "pm10",
            Pollutant::O3 => "o3",
            Pollutant::No2 => "no2",
            Pollutant::So2 => "so2",
            Pollutant::Co => "co",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Pollutant {
    type Err = String;

    /// Accepts both wire codes and query selectors, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pm2.5" | "pm25" | "pm2_5" => Ok(Pollutant::Pm25),
            "pm10" => Ok(Pollutant::Pm10),
            "o3" => Ok(Pollutant::O3),
            "no2" => Ok(Pollutant::No2),
            "so2" => Ok(Pollutant::So2),
            "co" => Ok(Pollutant::Co),
            other => Err(format!("unknown pollutant '{}'", other)),
        }
    }
}

impl Serialize for Pollutant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Pollutant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Concentration per pollutant. Ordered so serialized output is stable.
pub type PollutantSnapshot = BTreeMap<Pollutant, f64>;

/// A single concentration observation.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
    pub pollutant: Pollutant,
    pub concentration: f64,
}

impl PollutantReading {
    pub fn new(pollutant: Pollutant, concentration: f64) -> Self {
        Self {
            pollutant,
            concentration,
        }
    }
}

/// What a prediction series should express: the aggregate AQI, or the
/// sub-index of one pollutant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Metric {
    Aqi,
    Pollutant(Pollutant),
}

impl Metric {
    pub const DEFAULT: Metric = Metric::Pollutant(Pollutant::Pm25);

    /// Parse a query selector. Returns `None` for anything unrecognized.
    pub fn from_selector(selector: &str) -> Option<Self> {
        if selector.trim().eq_ignore_ascii_case("aqi") {
            return Some(Metric::Aqi);
        }
        selector.parse().ok().map(Metric::Pollutant)
    }

    /// Parse a selector, coercing unknown values to the default metric.
    pub fn from_selector_or_default(selector: Option<&str>) -> Self {
        match selector {
            None => Metric::DEFAULT,
            Some(s) => Self::from_selector(s).unwrap_or_else(|| {
                log::warn!("unknown metric selector '{}', using {}", s, Metric::DEFAULT);
                Metric::DEFAULT
            }),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Metric::Aqi => "AQI",
            Metric::Pollutant(p) => p.code(),
        }
    }

    pub fn selector(self) -> &'static str {
        match self {
            Metric::Aqi => "aqi",
            Metric::Pollutant(p) => p.selector(),
        }
    }
}

impl Default for Metric {
    fn default() -> Self {
        Metric::DEFAULT
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
