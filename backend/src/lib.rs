//! # AQI Forecast Backend
//!
//! Air-quality prediction service for a map-centric web client.
//!
//! The crate turns forecasts from an external forecasting service into
//! chart-ready prediction series, converts pollutant concentrations into
//! AQI sub-indices, classifies values into colored categories and, when
//! the forecasting service is unavailable, serves a clearly-labelled
//! simulated series instead of an error.
//!
//! ## Architecture
//!
//! - [`aqi`]: Breakpoint tables, AQI calculator and category scales
//! - [`models`]: Pollutants, prediction series and map geometry types
//! - [`upstream`]: Forecasting source wire format and HTTP client
//! - [`services`]: Normalization, fallback synthesis, prediction orchestration,
//!   station/city directory, synthetic history and heatmap radius policy
//! - [`config`]: File and environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod aqi;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod upstream;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{ForecastError, ForecastResult};
