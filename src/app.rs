use crate::handlers;
use crate::source::INSIGHTS_PATH;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(INSIGHTS_PATH, get(handlers::get_insights))
        .route("/api/readings", post(handlers::add_reading))
        .route("/api/readings/latest", get(handlers::get_latest))
        .with_state(state)
}
