//! Credit score route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::credit_score::{get_credit_score, post_credit_score};
use crate::state::AppState;

pub fn credit_score_routes() -> Router<AppState> {
    Router::new()
        .route("/api/credit-score/:wallet", get(get_credit_score))
        .route("/api/credit-score", post(post_credit_score))
}
