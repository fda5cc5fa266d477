//! Static directory of forecastable cities.

use crate::models::City;

const fn city(name: &'static str, slug: &'static str, state: &'static str, lat: f64, lng: f64) -> City {
    City { name, slug, state, lat, lng }
}

static CITIES: [City; 12] = [
    city("Los Angeles", "los-angeles", "CA", 34.0522, -118.2437),
    city("San Francisco", "san-francisco", "CA", 37.7749, -122.4194),
    city("San Diego", "san-diego", "CA", 32.7157, -117.1611),
    city("San Jose", "san-jose", "CA", 37.3382, -121.8863),
    city("New York", "new-york", "NY", 40.7128, -74.0060),
    city("Chicago", "chicago", "IL", 41.8781, -87.6298),
    city("Houston", "houston", "TX", 29.7604, -95.3698),
    city("San Antonio", "san-antonio", "TX", 29.4241, -98.4936),
    city("Dallas", "dallas", "TX", 32.7767, -96.7970),
    city("Phoenix", "phoenix", "AZ", 33.4484, -112.0740),
    city("Philadelphia", "philadelphia", "PA", 39.9526, -75.1652),
    city("Miami", "miami", "FL", 25.7617, -80.1918),
];

pub fn all() -> &'static [City] {
    &CITIES
}

/// Look up a city by slug, case-insensitively.
pub fn find(slug: &str) -> Option<&'static City> {
    let slug = slug.trim();
    CITIES.iter().find(|c| c.slug.eq_ignore_ascii_case(slug))
}

/// Cities in a region (US state code), case-insensitively. `None` lists all.
pub fn filter_by_state(state: Option<&str>) -> Vec<&'static City> {
    match state.map(str::trim).filter(|s| !s.is_empty()) {
        Some(state) => CITIES
            .iter()
            .filter(|c| c.state.eq_ignore_ascii_case(state))
            .collect(),
        None => CITIES.iter().collect(),
    }
}

/// Slug to send to the forecasting source: the canonical slug for a known
/// city, `default` for anything else.
pub fn forecast_slug<'a>(location: &str, default: &'a str) -> &'a str {
    match find(location) {
        Some(city) => city.slug,
        None => default,
    }
}

/// Human-readable name for a location slug.
pub fn display_name(location: &str) -> String {
    match find(location) {
        Some(city) => format!("{}, {}", city.name, city.state),
        None => location.to_string(),
    }
}
