//! Underwriting API handlers

use axum::Json;
use validator::Validate;

use crate::error::ApiError;
use crate::models::FundingRequest;
use crate::scoring::{evaluate_funding_request, UnderwritingResult};

/// POST /api/underwriting/evaluate - Evaluate a funding request
///
/// Declined requests are normal 200 responses with `approved: false`.
pub async fn evaluate_underwriting(
    Json(request): Json<FundingRequest>,
) -> Result<Json<UnderwritingResult>, ApiError> {
    request.validate()?;

    let result = evaluate_funding_request(
        request.credit_score,
        request.monthly_revenue,
        request.requested_amount,
        request.business_age_months,
        request.industry.as_deref(),
    );

    tracing::info!(
        credit_score = request.credit_score,
        approved = result.approved,
        offered = result.max_funding_amount,
        "Funding request evaluated"
    );

    Ok(Json(result))
}
