use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/visit", post(handlers::visit))
        .route("/api/views", get(handlers::get_views))
        .with_state(state)
}
