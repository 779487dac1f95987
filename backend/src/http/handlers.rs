//! HTTP handlers for the dashboard API.
//!
//! Each handler corresponds to an endpoint and delegates to
//! [`DashboardService`](crate::services::DashboardService). File access runs
//! on the blocking pool.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};

use super::dto::{
    Conditions, HealthResponse, HistoryQuery, HistoryView, InputsResponse, ModelResponse,
    PredictRequest, PredictionOutcome, StatusQuery, StatusResponse,
};
use super::error::AppError;
use super::page::DASHBOARD_PAGE;
use super::state::AppState;
use crate::models::conditions::{HUMIDITY_BOUNDS, TEMPERATURE_BOUNDS, WIND_SPEED_BOUNDS};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Run a blocking service call off the async executor.
async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> crate::error::EcoResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .map_err(AppError::from)
}

// =============================================================================
// Page and health
// =============================================================================

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        model_file: state.dashboard.model_path().display().to_string(),
        history_file: state.dashboard.history().path().display().to_string(),
    }))
}

// =============================================================================
// Inputs and prediction
// =============================================================================

/// GET /v1/inputs
///
/// Slider bounds and defaults.
pub async fn get_inputs() -> HandlerResult<InputsResponse> {
    Ok(Json(InputsResponse {
        temperature: TEMPERATURE_BOUNDS,
        humidity: HUMIDITY_BOUNDS,
        wind_speed: WIND_SPEED_BOUNDS,
    }))
}

/// GET /v1/status
///
/// Environmental safety cards for the given conditions.
pub async fn get_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> HandlerResult<StatusResponse> {
    let conditions = query.conditions();
    let cards = state.dashboard.status(&conditions).to_vec();
    Ok(Json(StatusResponse { conditions, cards }))
}

/// POST /v1/predict
///
/// Predict AQI and append the result to the history log.
pub async fn predict(
    State(state): State<AppState>,
    request: Result<Json<PredictRequest>, JsonRejection>,
) -> HandlerResult<PredictionOutcome> {
    let Json(request) = request?;
    let conditions: Conditions = request.into();
    let dashboard = state.dashboard.clone();
    let outcome = blocking(move || dashboard.predict_now(&conditions)).await?;
    Ok(Json(outcome))
}

/// GET /v1/model
///
/// Fitted coefficients and their influence statements.
pub async fn get_model(State(state): State<AppState>) -> HandlerResult<ModelResponse> {
    let model = state.dashboard.model();
    Ok(Json(ModelResponse {
        feature_names: model.feature_names.clone(),
        coefficients: model.coefficients.to_vec(),
        intercept: model.intercept,
        influences: state.dashboard.explanation(),
    }))
}

// =============================================================================
// History
// =============================================================================

/// GET /v1/history
///
/// Trend series over all records plus the rows of one date.
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> HandlerResult<HistoryView> {
    let dashboard = state.dashboard.clone();
    let view = blocking(move || dashboard.history_view(query.date)).await?;
    Ok(Json(view))
}

/// GET /v1/history/download
///
/// The full log as a CSV attachment.
pub async fn download_history(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let dashboard = state.dashboard.clone();
    let csv = blocking(move || dashboard.export_csv()).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"aqi_history.csv\"",
            ),
        ],
        csv,
    ))
}
