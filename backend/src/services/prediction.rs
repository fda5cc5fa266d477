//! Prediction orchestration: live forecast when possible, simulated series
//! otherwise.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::{cities, fallback, normalizer::PredictionNormalizer};
use crate::error::{ForecastError, ForecastResult};
use crate::models::{Metric, PredictionResponse};
use crate::upstream::ForecastSource;

/// Which path produced a response.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Live(PredictionResponse),
    Fallback {
        response: PredictionResponse,
        reason: ForecastError,
    },
}

impl PredictionOutcome {
    pub fn response(&self) -> &PredictionResponse {
        match self {
            PredictionOutcome::Live(response) => response,
            PredictionOutcome::Fallback { response, .. } => response,
        }
    }

    pub fn into_response(self) -> PredictionResponse {
        match self {
            PredictionOutcome::Live(response) => response,
            PredictionOutcome::Fallback { response, .. } => response,
        }
    }

    pub fn fallback_reason(&self) -> Option<&ForecastError> {
        match self {
            PredictionOutcome::Live(_) => None,
            PredictionOutcome::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, PredictionOutcome::Live(_))
    }
}

/// Serves prediction requests. Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct PredictionService {
    source: Arc<dyn ForecastSource>,
    default_location: String,
}

impl PredictionService {
    pub fn new(source: Arc<dyn ForecastSource>, default_location: impl Into<String>) -> Self {
        Self {
            source,
            default_location: default_location.into(),
        }
    }

    /// Prediction for `location`, evaluated now. Never fails.
    pub async fn get_prediction(&self, location: &str, metric: Metric) -> PredictionOutcome {
        self.get_prediction_at(location, metric, Utc::now()).await
    }

    /// Prediction for `location` with horizons anchored at `now`.
    pub async fn get_prediction_at(
        &self,
        location: &str,
        metric: Metric,
        now: DateTime<Utc>,
    ) -> PredictionOutcome {
        match self.fetch_live(location, metric, now).await {
            Ok(response) => PredictionOutcome::Live(response),
            Err(reason) => {
                log::warn!(
                    "serving simulated forecast for '{}' ({}): {}",
                    location,
                    metric,
                    reason
                );
                let response =
                    fallback::synthesize(&cities::display_name(location), metric, now, &reason);
                PredictionOutcome::Fallback { response, reason }
            }
        }
    }

    async fn fetch_live(
        &self,
        location: &str,
        metric: Metric,
        now: DateTime<Utc>,
    ) -> ForecastResult<PredictionResponse> {
        let slug = cities::forecast_slug(location, &self.default_location);
        let payload = self.source.fetch(slug).await?;
        PredictionNormalizer::new(metric, now, cities::display_name(slug)).normalize(&payload)
    }
}
