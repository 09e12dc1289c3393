use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/accounts/:account/report", get(handlers::account_report))
        .with_state(state)
}
