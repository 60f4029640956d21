//! Loan payment-status API handlers

use axum::Json;
use chrono::Utc;

use crate::error::ApiError;
use crate::models::LoanStatusRequest;
use crate::scoring::{calculate_loan_status, LoanStatusInfo};

/// POST /api/loan-status - Classify a loan's repayment state
///
/// The caller supplies the on-chain loan facts; evaluation happens at
/// server time.
pub async fn evaluate_loan_status(
    Json(request): Json<LoanStatusRequest>,
) -> Result<Json<LoanStatusInfo>, ApiError> {
    if request.principal < 0 || request.total_repaid < 0 {
        return Err(ApiError::BadRequest(
            "principal and totalRepaid must be non-negative".to_string(),
        ));
    }

    let info = calculate_loan_status(
        request.disbursement_time,
        request.term_periods,
        request.principal,
        request.total_repaid,
        Utc::now(),
    );

    Ok(Json(info))
}
