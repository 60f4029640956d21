//! Business connection route definitions

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::connections::{create_connection, delete_connection, list_connections};
use crate::state::AppState;

pub fn connection_routes() -> Router<AppState> {
    Router::new()
        .route("/api/connections/:wallet", get(list_connections))
        .route("/api/connections", post(create_connection))
        .route(
            "/api/connections/:wallet/:platform/:platform_user_id",
            delete(delete_connection),
        )
}
