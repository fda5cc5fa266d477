//! Error taxonomy for the forecasting core.
//!
//! None of these are fatal: each one has a defined recovery in the layer that
//! observes it (see `services::prediction`).

use crate::models::Pollutant;

/// Result type for forecasting operations
pub type ForecastResult<T> = Result<T, ForecastError>;

/// Failures raised while computing, fetching, or normalizing a forecast.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForecastError {
    /// The pollutant has no configured breakpoint table.
    #[error("no breakpoint table configured for {0}")]
    UnknownPollutant(Pollutant),

    /// A forecast entry carried a horizon label that is not `<integer>h`.
    #[error("malformed forecast horizon '{0}'")]
    MalformedHorizon(String),

    /// The forecasting source could not be reached or answered with a
    /// non-success status.
    #[error("forecast source unavailable: {message}")]
    UpstreamUnavailable {
        message: String,
        /// HTTP status when the source answered
        status: Option<u16>,
    },

    /// The forecasting source answered with a body that lacks required fields.
    #[error("malformed forecast payload: {0}")]
    MalformedUpstreamPayload(String),
}

impl ForecastError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        ForecastError::UpstreamUnavailable {
            message: message.into(),
            status: None,
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        ForecastError::UpstreamUnavailable {
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        ForecastError::MalformedUpstreamPayload(message.into())
    }

    /// True for failures that switch the whole response to simulated data.
    pub fn triggers_fallback(&self) -> bool {
        matches!(
            self,
            ForecastError::UpstreamUnavailable { .. } | ForecastError::MalformedUpstreamPayload(_)
        )
    }
}
