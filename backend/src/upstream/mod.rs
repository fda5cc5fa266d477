//! The external forecasting source: wire payload and client.

pub mod client;
pub mod payload;

pub use client::{ForecastSource, HttpForecastSource};
pub use payload::{pollutant_snapshot, RawConcentrations, UpstreamEntry, UpstreamForecast, Warnings};
