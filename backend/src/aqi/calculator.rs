//! Concentration to AQI sub-index conversion.

use serde::Serialize;

use super::breakpoints::BreakpointTable;
use crate::error::ForecastResult;
use crate::models::{Pollutant, PollutantReading, PollutantSnapshot};

/// Ceiling of the AQI scale.
pub const AQI_MAX: u16 = 500;

/// Sub-index computed for one pollutant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct AqiResult {
    pub value: u16,
    pub pollutant: Pollutant,
}

/// Calculate the AQI sub-index for a concentration.
///
/// Uses linear interpolation inside the matching breakpoint band:
///
/// `AQI = (Ihigh - Ilow) / (Chigh - Clow) * (C - Clow) + Ilow`
///
/// rounded half away from zero. Concentrations above the last band return
/// [`AQI_MAX`]; anything below the first band (including negative input and
/// NaN) returns 0. A concentration that falls in the gap between two bands
/// (e.g. PM2.5 12.05) takes the lower index of the band above it.
///
/// # Errors
/// `UnknownPollutant` when the pollutant has no breakpoint table.
///
/// # Examples
///
/// ```
/// use aqi_forecast::aqi::compute;
/// use aqi_forecast::models::Pollutant;
///
/// assert_eq!(compute(Pollutant::Pm25, 12.0).unwrap().value, 50);
/// assert_eq!(compute(Pollutant::Pm25, 35.5).unwrap().value, 101);
/// assert_eq!(compute(Pollutant::Pm25, 1000.0).unwrap().value, 500);
/// ```
pub fn compute(pollutant: Pollutant, concentration: f64) -> ForecastResult<AqiResult> {
    let ranges = BreakpointTable::ranges_for(pollutant)?;
    let result = |value| AqiResult { value, pollutant };

    for (i, r) in ranges.iter().enumerate() {
        if concentration > r.concentration_high {
            continue;
        }
        if concentration < r.concentration_low {
            // Below the table, or between two bands
            return Ok(result(if i == 0 { 0 } else { r.index_low }));
        }

        let span = r.concentration_high - r.concentration_low;
        if span <= 0.0 {
            return Ok(result(r.index_low));
        }
        let aqi = (r.index_high - r.index_low) as f64 / span
            * (concentration - r.concentration_low)
            + r.index_low as f64;
        return Ok(result(aqi.round().clamp(0.0, AQI_MAX as f64) as u16));
    }

    match ranges.last() {
        Some(last) if concentration > last.concentration_high => Ok(result(AQI_MAX)),
        _ => Ok(result(0)),
    }
}

/// Sub-index of a single observation.
pub fn compute_reading(reading: &PollutantReading) -> ForecastResult<AqiResult> {
    compute(reading.pollutant, reading.concentration)
}

/// Aggregate AQI of a set of concentrations: the worst sub-index among the
/// configured pollutants present. `None` when no configured pollutant is in
/// the snapshot.
pub fn aggregate(snapshot: &PollutantSnapshot) -> Option<AqiResult> {
    snapshot
        .iter()
        .map(|(pollutant, c)| PollutantReading::new(*pollutant, *c))
        .filter_map(|reading| compute_reading(&reading).ok())
        .max_by_key(|r| r.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;

    #[test]
    fn test_compute_pm25() {
        assert_eq!(compute(Pollutant::Pm25, 0.0).unwrap().value, 0);
        assert_eq!(compute(Pollutant::Pm25, 6.0).unwrap().value, 25);
        assert_eq!(compute(Pollutant::Pm25, 12.0).unwrap().value, 50);
        assert_eq!(compute(Pollutant::Pm25, 12.1).unwrap().value, 51);
        assert_eq!(compute(Pollutant::Pm25, 35.4).unwrap().value, 100);
        assert_eq!(compute(Pollutant::Pm25, 45.0).unwrap().value, 124);
        assert_eq!(compute(Pollutant::Pm25, 55.4).unwrap().value, 150);
        assert_eq!(compute(Pollutant::Pm25, 500.4).unwrap().value, 500);
    }

    #[test]
    fn test_compute_other_tables() {
        assert_eq!(compute(Pollutant::Pm10, 54.0).unwrap().value, 50);
        assert_eq!(compute(Pollutant::Pm10, 100.0).unwrap().value, 73);
        assert_eq!(compute(Pollutant::O3, 70.0).unwrap().value, 100);
        assert_eq!(compute(Pollutant::O3, 200.0).unwrap().value, 300);
        assert_eq!(compute(Pollutant::No2, 53.0).unwrap().value, 50);
        assert_eq!(compute(Pollutant::No2, 2049.0).unwrap().value, 500);
    }

    #[test]
    fn test_out_of_table_policy() {
        assert_eq!(compute(Pollutant::Pm25, -1.0).unwrap().value, 0);
        assert_eq!(compute(Pollutant::Pm25, 10_000.0).unwrap().value, 500);
        assert_eq!(compute(Pollutant::O3, 250.0).unwrap().value, 500);
        assert_eq!(compute(Pollutant::Pm25, f64::NAN).unwrap().value, 0);
    }

    #[test]
    fn test_gap_between_bands() {
        assert_eq!(compute(Pollutant::Pm25, 12.05).unwrap().value, 51);
        assert_eq!(compute(Pollutant::Pm10, 54.5).unwrap().value, 51);
    }

    #[test]
    fn test_unknown_pollutant() {
        assert_eq!(
            compute(Pollutant::Co, 1.0),
            Err(ForecastError::UnknownPollutant(Pollutant::Co))
        );
    }

    #[test]
    fn test_aggregate_takes_worst_subindex() {
        let mut snapshot = PollutantSnapshot::new();
        snapshot.insert(Pollutant::Pm25, 12.0); // 50
        snapshot.insert(Pollutant::O3, 70.0); // 100
        snapshot.insert(Pollutant::Co, 9.0); // unconfigured, ignored
        let result = aggregate(&snapshot).unwrap();
        assert_eq!(result.value, 100);
        assert_eq!(result.pollutant, Pollutant::O3);

        let mut only_co = PollutantSnapshot::new();
        only_co.insert(Pollutant::Co, 9.0);
        assert!(aggregate(&only_co).is_none());
    }

    #[test]
    fn test_compute_reading() {
        let reading = PollutantReading::new(Pollutant::No2, 100.0);
        assert_eq!(compute_reading(&reading).unwrap().value, 100);
    }
}
