//! Underwriting route definitions

use axum::{routing::post, Router};

use crate::handlers::underwriting::evaluate_underwriting;
use crate::state::AppState;

pub fn underwriting_routes() -> Router<AppState> {
    Router::new().route("/api/underwriting/evaluate", post(evaluate_underwriting))
}
