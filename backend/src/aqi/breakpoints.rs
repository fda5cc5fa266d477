//! EPA-style concentration breakpoints.
//!
//! Only PM2.5, PM10, O3 and NO2 are configured; SO2 and CO deliberately have
//! no table, so callers asking for them get `UnknownPollutant` and fall back
//! to the aggregate AQI.

use serde::Serialize;

use crate::error::{ForecastError, ForecastResult};
use crate::models::Pollutant;

/// A concentration interval mapped linearly onto an index interval.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct BreakpointRange {
    pub pollutant: Pollutant,
    pub concentration_low: f64,
    pub concentration_high: f64,
    pub index_low: u16,
    pub index_high: u16,
}

const fn range(pollutant: Pollutant, c_low: f64, c_high: f64, i_low: u16, i_high: u16) -> BreakpointRange {
    BreakpointRange {
        pollutant,
        concentration_low: c_low,
        concentration_high: c_high,
        index_low: i_low,
        index_high: i_high,
    }
}

// PM2.5, µg/m³
static PM25: [BreakpointRange; 6] = [
    range(Pollutant::Pm25, 0.0, 12.0, 0, 50),
    range(Pollutant::Pm25, 12.1, 35.4, 51, 100),
    range(Pollutant::Pm25, 35.5, 55.4, 101, 150),
    range(Pollutant::Pm25, 55.5, 150.4, 151, 200),
    range(Pollutant::Pm25, 150.5, 250.4, 201, 300),
    range(Pollutant::Pm25, 250.5, 500.4, 301, 500),
];

// PM10, µg/m³
static PM10: [BreakpointRange; 6] = [
    range(Pollutant::Pm10, 0.0, 54.0, 0, 50),
    range(Pollutant::Pm10, 55.0, 154.0, 51, 100),
    range(Pollutant::Pm10, 155.0, 254.0, 101, 150),
    range(Pollutant::Pm10, 255.0, 354.0, 151, 200),
    range(Pollutant::Pm10, 355.0, 424.0, 201, 300),
    range(Pollutant::Pm10, 425.0, 604.0, 301, 500),
];

// O3, ppb. No band above 200 ppb; anything higher is reported at the ceiling.
static O3: [BreakpointRange; 5] = [
    range(Pollutant::O3, 0.0, 54.0, 0, 50),
    range(Pollutant::O3, 55.0, 70.0, 51, 100),
    range(Pollutant::O3, 71.0, 85.0, 101, 150),
    range(Pollutant::O3, 86.0, 105.0, 151, 200),
    range(Pollutant::O3, 106.0, 200.0, 201, 300),
];

// NO2, ppb
static NO2: [BreakpointRange; 6] = [
    range(Pollutant::No2, 0.0, 53.0, 0, 50),
    range(Pollutant::No2, 54.0, 100.0, 51, 100),
    range(Pollutant::No2, 101.0, 360.0, 101, 150),
    range(Pollutant::No2, 361.0, 649.0, 151, 200),
    range(Pollutant::No2, 650.0, 1249.0, 201, 300),
    range(Pollutant::No2, 1250.0, 2049.0, 301, 500),
];

/// Process-wide, read-only breakpoint configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreakpointTable;

impl BreakpointTable {
    /// Ordered ranges for `pollutant`, lowest concentration first.
    pub fn ranges_for(pollutant: Pollutant) -> ForecastResult<&'static [BreakpointRange]> {
        match pollutant {
            Pollutant::Pm25 => Ok(&PM25),
            Pollutant::Pm10 => Ok(&PM10),
            Pollutant::O3 => Ok(&O3),
            Pollutant::No2 => Ok(&NO2),
            Pollutant::So2 | Pollutant::Co => Err(ForecastError::UnknownPollutant(pollutant)),
        }
    }

    pub fn is_configured(pollutant: Pollutant) -> bool {
        Self::ranges_for(pollutant).is_ok()
    }

    /// Pollutants that have a table, in declaration order.
    pub fn configured() -> impl Iterator<Item = Pollutant> {
        Pollutant::ALL.into_iter().filter(|p| Self::is_configured(*p))
    }
}
