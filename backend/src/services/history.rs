//! Synthetic recent history for a location.

use chrono::{DateTime, Duration, DurationRound, Utc};
use rand::Rng;

use super::normalizer::round2;
use crate::models::HistoricalSample;

pub const DEFAULT_POINTS: usize = 4;
pub const DEFAULT_STEP_HOURS: u32 = 3;
pub const MAX_POINTS: usize = 96;
pub const MAX_STEP_HOURS: u32 = 24;

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// `points` samples spaced `step_hours` apart, oldest first, ending at the
/// start of the current hour.
pub fn generate_series<R: Rng + ?Sized>(
    points: usize,
    step_hours: u32,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<HistoricalSample> {
    let anchor = now.duration_trunc(Duration::hours(1)).unwrap_or(now);

    (0..points)
        .rev()
        .map(|i| {
            let k = i as f64;
            HistoricalSample {
                timestamp: anchor - Duration::hours(i as i64 * step_hours as i64),
                pm25: round2(10.0 + (k / 3.0).sin() * 5.0 + rng.gen::<f64>() * 3.0),
                pm10: round2(20.0 + (k / 4.0).cos() * 6.0 + rng.gen::<f64>() * 4.0),
                o3: round3(0.02 + rng.gen::<f64>() * 0.02),
                no2: round3(0.01 + rng.gen::<f64>() * 0.015),
                so2: round3(0.002 + rng.gen::<f64>() * 0.005),
                co: round2(0.1 + rng.gen::<f64>() * 0.3),
                aqi: (30.0 + rng.gen::<f64>() * 50.0).floor() as u16,
                temp: (10.0 * (15.0 + rng.gen::<f64>() * 15.0)).round() / 10.0,
                rh: (40.0 + rng.gen::<f64>() * 40.0).floor() as u8,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_series_spacing() {
        let now = Utc.with_ymd_and_hms(2025, 10, 4, 12, 41, 7).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let series = generate_series(4, 3, now, &mut rng);

        assert_eq!(series.len(), 4);
        assert_eq!(series[3].timestamp, Utc.with_ymd_and_hms(2025, 10, 4, 12, 0, 0).unwrap());
        assert_eq!(series[0].timestamp, Utc.with_ymd_and_hms(2025, 10, 4, 3, 0, 0).unwrap());
        for pair in series.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(3));
        }
    }

    #[test]
    fn test_sample_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        for s in generate_series(MAX_POINTS, 1, Utc::now(), &mut rng) {
            assert!((5.0..=18.0).contains(&s.pm25));
            assert!((30..80).contains(&s.aqi));
            assert!((40..80).contains(&s.rh));
        }
    }
}
