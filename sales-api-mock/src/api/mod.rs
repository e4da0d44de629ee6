//! Sales API routes

mod handler;

use axum::{
    Router,
    routing::get,
};

use crate::state::MockState;

/// Routes at the API root (`/sales`, `/sales/stats`, `/sales/predict`)
pub fn routes() -> Router<MockState> {
    Router::new()
        .route("/sales", get(handler::list).post(handler::create))
        .route("/sales/stats", get(handler::stats))
        .route("/sales/predict", get(handler::predict))
}

/// Routes with state applied, ready for `oneshot` or `axum::serve`
pub fn router(state: MockState) -> Router {
    routes().with_state(state)
}

/// Routes nested under `/api`, as the deployed service exposes them
pub fn app(state: MockState) -> Router {
    Router::new().nest("/api", routes()).with_state(state)
}
