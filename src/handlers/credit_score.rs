//! Credit score API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::error::ApiError;
use crate::models::CreditScoreRequest;
use crate::scoring::{calculate_credit_score, CreditScoreResult};
use crate::services::ConnectionStore;

/// GET /api/credit-score/:wallet - Compute the credit score for a wallet
///
/// The response body is the bare `CreditScoreResult` shape; downstream
/// clients depend on its exact field names.
pub async fn get_credit_score(
    State(store): State<Arc<ConnectionStore>>,
    Path(wallet): Path<String>,
) -> Result<Json<CreditScoreResult>, ApiError> {
    let connections = store.list_active(&wallet).await?;
    let result = calculate_credit_score(&connections, Utc::now());

    tracing::info!(
        wallet = %wallet,
        score = result.score,
        connections = connections.len(),
        "Credit score computed"
    );

    Ok(Json(result))
}

/// POST /api/credit-score - Compute the credit score for the wallet in the body
pub async fn post_credit_score(
    State(store): State<Arc<ConnectionStore>>,
    Json(request): Json<CreditScoreRequest>,
) -> Result<Json<CreditScoreResult>, ApiError> {
    request.validate()?;

    let connections = store.list_active(&request.wallet_address).await?;
    let result = calculate_credit_score(&connections, Utc::now());

    Ok(Json(result))
}
