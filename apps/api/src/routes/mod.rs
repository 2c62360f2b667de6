pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobs::handlers;
use crate::state::AppState;

/// Every route is served at the root and again under `/api`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api_routes())
        .nest("/api", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/jobs", get(handlers::handle_list_jobs))
        .route("/jobs/score", post(handlers::handle_score_job))
        .route("/jobs/score-bulk", post(handlers::handle_score_bulk))
}
