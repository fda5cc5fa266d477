//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use super::dto::{
    flag_enabled, CitiesQuery, HealthResponse, HeatmapQuery, HeatmapResponse, HistoryQuery,
    HistoryResponse, PredictQuery, PredictionEnvelope, StationsQuery, StationsResponse,
    DEFAULT_CITY, DEFAULT_ZOOM,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::{City, Metric};
use crate::services::heatmap::{self, HeatmapLayer};
use crate::services::{cities, history, stations};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn city_or_default(city: Option<String>) -> String {
    city.filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CITY.to_string())
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        upstream: state.upstream_base_url.clone(),
    }))
}

// =============================================================================
// Predictions
// =============================================================================

/// GET /v1/predict?city=&metric=
///
/// Always answers 200; when the forecasting source cannot be used the body
/// carries a simulated series and `fallbackReason`. Responses are never cached.
pub async fn get_prediction(
    State(state): State<AppState>,
    Query(query): Query<PredictQuery>,
) -> impl IntoResponse {
    let city = city_or_default(query.city);
    let metric = Metric::from_selector_or_default(query.metric.as_deref());

    let outcome = state.predictions.get_prediction(&city, metric).await;
    let fallback_reason = outcome.fallback_reason().map(|e| e.to_string());

    let body = PredictionEnvelope {
        city,
        metric: metric.selector(),
        prediction: outcome.into_response(),
        fallback_reason,
    };

    (
        [(header::CACHE_CONTROL, "no-store, max-age=0")],
        Json(body),
    )
}

// =============================================================================
// Directory
// =============================================================================

/// GET /v1/stations?city=&includeLatest=&metric=
pub async fn list_stations(Query(query): Query<StationsQuery>) -> HandlerResult<StationsResponse> {
    let city = city_or_default(query.city);
    let metric = Metric::from_selector_or_default(query.metric.as_deref());
    let include_latest = flag_enabled(query.include_latest.as_deref());

    let readings = stations::station_readings(
        &city,
        include_latest,
        metric,
        Utc::now(),
        &mut rand::thread_rng(),
    );

    Ok(Json(StationsResponse {
        city,
        stations: readings,
    }))
}

/// GET /v1/cities?state=
pub async fn list_cities(Query(query): Query<CitiesQuery>) -> HandlerResult<Vec<&'static City>> {
    Ok(Json(cities::filter_by_state(query.state.as_deref())))
}

/// GET /v1/cities/{slug}
pub async fn get_city(Path(slug): Path<String>) -> HandlerResult<&'static City> {
    cities::find(&slug)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("City '{}' not found", slug)))
}

// =============================================================================
// History
// =============================================================================

/// GET /v1/history?city=&points=&step=
pub async fn get_history(Query(query): Query<HistoryQuery>) -> HandlerResult<HistoryResponse> {
    let points = query.points.unwrap_or(history::DEFAULT_POINTS);
    if points == 0 || points > history::MAX_POINTS {
        return Err(AppError::BadRequest(format!(
            "points must be between 1 and {}",
            history::MAX_POINTS
        )));
    }

    let step = query.step.unwrap_or(history::DEFAULT_STEP_HOURS);
    if step == 0 || step > history::MAX_STEP_HOURS {
        return Err(AppError::BadRequest(format!(
            "step must be between 1 and {} hours",
            history::MAX_STEP_HOURS
        )));
    }

    let series = history::generate_series(points, step, Utc::now(), &mut rand::thread_rng());

    Ok(Json(HistoryResponse {
        city: city_or_default(query.city),
        series,
    }))
}

// =============================================================================
// Heatmap
// =============================================================================

/// GET /v1/heatmap?city=&zoom=&metric=&layer=&radius=
///
/// Station layers weight by each station's latest reading; the city layer
/// weights by each city's most recent simulated PM2.5 sample.
pub async fn get_heatmap(Query(query): Query<HeatmapQuery>) -> HandlerResult<HeatmapResponse> {
    let layer = match query.layer.as_deref() {
        None => HeatmapLayer::default(),
        Some(selector) => HeatmapLayer::from_selector(selector)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown heatmap layer '{}'", selector)))?,
    };
    let zoom = query.zoom.unwrap_or(DEFAULT_ZOOM);
    let city = city_or_default(query.city);
    let metric = Metric::from_selector_or_default(query.metric.as_deref());
    let now = Utc::now();

    let points = {
        let mut rng = rand::thread_rng();
        match layer {
            HeatmapLayer::Stations => {
                let readings = stations::station_readings(&city, true, metric, now, &mut rng);
                heatmap::station_points(&readings)
            }
            HeatmapLayer::Cities => heatmap::city_points(&cities::filter_by_state(None), |_| {
                history::generate_series(1, history::DEFAULT_STEP_HOURS, now, &mut rng)
                    .last()
                    .map(|sample| sample.pm25)
            }),
        }
    };

    Ok(Json(HeatmapResponse {
        city,
        layer,
        zoom,
        policy: heatmap::policy(zoom, layer, query.radius),
        points,
    }))
}
