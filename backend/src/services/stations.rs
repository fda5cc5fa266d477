//! Monitoring stations, optionally annotated with a synthesized reading.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::normalizer::round2;
use crate::models::{LatestReading, Metric, Pollutant, Station, StationReading};

const fn station(id: &'static str, name: &'static str, lat: f64, lng: f64) -> Station {
    Station { id, name, lat, lng }
}

static LOS_ANGELES: [Station; 6] = [
    station("la-1", "Downtown LA", 34.0407, -118.2468),
    station("la-2", "Hollywood", 34.0928, -118.3287),
    station("la-3", "West LA", 34.0390, -118.4437),
    station("la-4", "South LA", 33.9739, -118.2487),
    station("la-5", "Echo Park", 34.0782, -118.2606),
    station("la-6", "East LA", 34.0239, -118.1726),
];

/// Stations known for a city. Only Los Angeles has stations.
pub fn stations_for(city: &str) -> &'static [Station] {
    if city.trim().eq_ignore_ascii_case("los-angeles") {
        &LOS_ANGELES
    } else {
        &[]
    }
}

/// A plausible reading for `metric`.
pub fn random_metric_value<R: Rng + ?Sized>(metric: Metric, rng: &mut R) -> f64 {
    let (low, spread) = match metric {
        Metric::Aqi => return (20.0 + rng.gen::<f64>() * 120.0).floor(),
        Metric::Pollutant(Pollutant::Pm25) => (5.0, 50.0),
        Metric::Pollutant(Pollutant::Pm10) => (10.0, 80.0),
        Metric::Pollutant(Pollutant::O3) => (10.0, 60.0),
        Metric::Pollutant(Pollutant::No2) => (5.0, 40.0),
        Metric::Pollutant(Pollutant::So2) => (1.0, 9.0),
        Metric::Pollutant(Pollutant::Co) => (0.1, 1.5),
    };
    round2(low + rng.gen::<f64>() * spread)
}

/// Stations for `city`; with `include_latest` each carries a reading for
/// `metric` stamped `now`.
pub fn station_readings<R: Rng + ?Sized>(
    city: &str,
    include_latest: bool,
    metric: Metric,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<StationReading> {
    stations_for(city)
        .iter()
        .map(|s| StationReading {
            station: s.clone(),
            latest: include_latest.then(|| LatestReading {
                timestamp: now,
                value: random_metric_value(metric, rng),
                metric: metric.selector(),
            }),
        })
        .collect()
}
