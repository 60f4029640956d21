//! Loan status route definitions

use axum::{routing::post, Router};

use crate::handlers::loan_status::evaluate_loan_status;
use crate::state::AppState;

pub fn loan_status_routes() -> Router<AppState> {
    Router::new().route("/api/loan-status", post(evaluate_loan_status))
}
