//! Business connection API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::error::ApiError;
use crate::models::{ApiResponse, BusinessConnection, CreateConnectionRequest, Platform};
use crate::state::AppState;

/// GET /api/connections/:wallet - List a wallet's active connections
pub async fn list_connections(
    State(state): State<AppState>,
    Path(wallet): Path<String>,
) -> Result<Json<ApiResponse<Vec<BusinessConnection>>>, ApiError> {
    let connections = state.connection_store.list_active(&wallet).await?;
    Ok(Json(ApiResponse::ok(connections)))
}

/// POST /api/connections - Record a platform connection
///
/// The raw platform payload is run through the normalizer registry; the
/// OAuth exchange that produced it happens upstream.
pub async fn create_connection(
    State(state): State<AppState>,
    Json(request): Json<CreateConnectionRequest>,
) -> Result<Json<ApiResponse<BusinessConnection>>, ApiError> {
    request.validate()?;

    let revenue_data = state
        .normalizers
        .normalize(&request.platform, &request.raw_revenue);

    // The store returns the written row; a wallet may hold several
    // connections on the same platform under different user ids, so a
    // list-and-match could echo the wrong one.
    let connection = state
        .connection_store
        .upsert(
            &request.wallet_address,
            &request.platform,
            &request.platform_user_id,
            &revenue_data,
        )
        .await?;

    Ok(Json(ApiResponse::ok(connection)))
}

/// DELETE /api/connections/:wallet/:platform/:platform_user_id - Deactivate
/// a connection so scoring no longer considers it
pub async fn delete_connection(
    State(state): State<AppState>,
    Path((wallet, platform, platform_user_id)): Path<(String, String, String)>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let platform = Platform::from_str(&platform);
    state
        .connection_store
        .deactivate(&wallet, &platform, &platform_user_id)
        .await?;

    Ok(Json(ApiResponse::ok(())))
}
