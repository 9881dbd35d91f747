use crate::errors::AppError;
use crate::insights::build_insights;
use crate::models::{ConsumptionReading, InsightsPayload, ReadingRequest};
use crate::state::AppState;
use crate::ui::render_dashboard;
use axum::{extract::State, response::Html, Json};
use chrono::Local;
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let latest = state.latest().await;
    Html(render_dashboard(latest.as_ref()))
}

pub async fn get_insights(State(state): State<AppState>) -> Json<InsightsPayload> {
    let latest = state.latest().await;
    Json(build_insights(latest.as_ref()))
}

pub async fn get_latest(State(state): State<AppState>) -> Result<Json<ConsumptionReading>, AppError> {
    state
        .latest()
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found("no readings recorded"))
}

pub async fn add_reading(
    State(state): State<AppState>,
    Json(payload): Json<ReadingRequest>,
) -> Result<Json<ConsumptionReading>, AppError> {
    if !payload.has_values() {
        return Err(AppError::bad_request("no data provided"));
    }
    if let Some(field) = payload.invalid_field() {
        return Err(AppError::bad_request(format!(
            "{field} must be a non-negative number"
        )));
    }

    let reading = payload.into_reading(Local::now().to_rfc3339());
    let mut readings = state.readings.lock().await;
    readings.push(reading.clone());
    info!(total = readings.len(), "recorded consumption reading");

    Ok(Json(reading))
}
