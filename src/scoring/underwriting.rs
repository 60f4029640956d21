//! Funding underwriting for LendFriend
//!
//! Translates a credit score plus requested financing terms into an approval
//! decision, a revenue-based funding cap, an interest rate, and a payback
//! percentage of revenue. Pure and infallible: declined requests are normal
//! return values, not errors.

use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration Constants
// ============================================================================

/// Minimum credit score for approval
pub const MIN_APPROVAL_SCORE: u8 = 45;

/// Risk band thresholds are fixed, not tenant-configurable
const LOW_RISK_THRESHOLD: u8 = 75;
const MEDIUM_RISK_THRESHOLD: u8 = 55;

/// Revenue multipliers per risk tier
const MULTIPLIER_LOW: f64 = 6.0;
const MULTIPLIER_MEDIUM: f64 = 4.0;
const MULTIPLIER_HIGH: f64 = 2.5;

/// Base annual interest rates per risk tier
const INTEREST_LOW: f64 = 0.08;
const INTEREST_MEDIUM: f64 = 0.12;
const INTEREST_HIGH: f64 = 0.18;

/// Interest rate floor after score fine-tuning
const INTEREST_FLOOR: f64 = 0.06;

/// Base payback percentages of revenue per risk tier
const PAYBACK_LOW: f64 = 0.08;
const PAYBACK_MEDIUM: f64 = 0.12;
const PAYBACK_HIGH: f64 = 0.15;

/// Payback percentage bounds
const PAYBACK_MIN: f64 = 0.06;
const PAYBACK_MAX: f64 = 0.20;

// ============================================================================
// Data Models
// ============================================================================

/// Risk tier derived from credit score via fixed thresholds
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Monotonic step function of the credit score
    pub fn from_score(score: u8) -> Self {
        if score >= LOW_RISK_THRESHOLD {
            RiskLevel::Low
        } else if score >= MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Strong revenue health, favorable terms",
            RiskLevel::Medium => "Moderate revenue health, standard terms",
            RiskLevel::High => "Elevated risk, conservative terms",
        }
    }

    fn revenue_multiplier(&self) -> f64 {
        match self {
            RiskLevel::Low => MULTIPLIER_LOW,
            RiskLevel::Medium => MULTIPLIER_MEDIUM,
            RiskLevel::High => MULTIPLIER_HIGH,
        }
    }

    fn base_interest_rate(&self) -> f64 {
        match self {
            RiskLevel::Low => INTEREST_LOW,
            RiskLevel::Medium => INTEREST_MEDIUM,
            RiskLevel::High => INTEREST_HIGH,
        }
    }

    fn base_payback_percentage(&self) -> f64 {
        match self {
            RiskLevel::Low => PAYBACK_LOW,
            RiskLevel::Medium => PAYBACK_MEDIUM,
            RiskLevel::High => PAYBACK_HIGH,
        }
    }
}

/// Underwriting decision for one funding request
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UnderwritingResult {
    /// False iff score below minimum threshold or zero revenue
    pub approved: bool,
    /// Offered amount; never exceeds the requested amount
    pub max_funding_amount: f64,
    /// Annual interest rate (fraction)
    pub interest_rate: f64,
    /// Share of revenue routed to repayment (fraction)
    pub payback_percentage: f64,
    pub risk_level: RiskLevel,
    /// Advisory caveats; non-blocking
    pub conditions: Vec<String>,
}

// ============================================================================
// Evaluation
// ============================================================================

/// Evaluate a funding request against a credit score and revenue facts.
pub fn evaluate_funding_request(
    credit_score: u8,
    monthly_revenue: f64,
    requested_amount: f64,
    business_age_months: Option<u32>,
    industry: Option<&str>,
) -> UnderwritingResult {
    let risk_level = RiskLevel::from_score(credit_score);

    // Approval gate: terminal for this request, not retryable
    if credit_score < MIN_APPROVAL_SCORE || monthly_revenue <= 0.0 {
        let mut conditions = Vec::new();
        if credit_score < MIN_APPROVAL_SCORE {
            conditions.push("Credit score below minimum threshold".to_string());
        }
        if monthly_revenue <= 0.0 {
            conditions.push("No verified monthly revenue".to_string());
        }
        return UnderwritingResult {
            approved: false,
            max_funding_amount: 0.0,
            interest_rate: 0.0,
            payback_percentage: 0.0,
            risk_level,
            conditions,
        };
    }

    let multiplier = risk_level.revenue_multiplier() * age_adjustment(business_age_months);
    let funding_cap = (monthly_revenue * multiplier).floor();
    let max_funding_amount = requested_amount.min(funding_cap);

    let interest_rate = (risk_level.base_interest_rate()
        + (LOW_RISK_THRESHOLD as f64 - credit_score as f64) * 0.001)
        .max(INTEREST_FLOOR);

    let funding_ratio = max_funding_amount / monthly_revenue;
    let payback_percentage = (risk_level.base_payback_percentage()
        * payback_scale(funding_ratio))
    .clamp(PAYBACK_MIN, PAYBACK_MAX);

    let conditions = build_conditions(
        credit_score,
        risk_level,
        monthly_revenue,
        requested_amount,
        max_funding_amount,
        funding_cap,
        business_age_months,
        industry,
    );

    UnderwritingResult {
        approved: true,
        max_funding_amount,
        interest_rate,
        payback_percentage,
        risk_level,
        conditions,
    }
}

/// Business age bands adjust the revenue multiplier. No adjustment when the
/// age is unknown or between six and twelve months.
fn age_adjustment(business_age_months: Option<u32>) -> f64 {
    match business_age_months {
        Some(age) if age >= 24 => 1.2,
        Some(age) if age >= 12 => 1.1,
        Some(age) if age < 6 => 0.8,
        _ => 1.0,
    }
}

/// Heavier funding relative to revenue raises the payback share, lighter
/// funding lowers it.
fn payback_scale(funding_ratio: f64) -> f64 {
    if funding_ratio >= 4.0 {
        1.2
    } else if funding_ratio >= 2.0 {
        1.1
    } else if funding_ratio < 0.5 {
        0.8
    } else if funding_ratio < 1.0 {
        0.9
    } else {
        1.0
    }
}

#[allow(clippy::too_many_arguments)]
fn build_conditions(
    credit_score: u8,
    risk_level: RiskLevel,
    monthly_revenue: f64,
    requested_amount: f64,
    max_funding_amount: f64,
    funding_cap: f64,
    business_age_months: Option<u32>,
    industry: Option<&str>,
) -> Vec<String> {
    let mut conditions = Vec::new();

    if risk_level == RiskLevel::High {
        conditions.push("Enhanced monitoring required for high-risk profile".to_string());
    }
    if credit_score < MEDIUM_RISK_THRESHOLD {
        conditions.push("Personal guarantee required".to_string());
    }
    if requested_amount > funding_cap {
        conditions.push("Requested amount reduced to revenue-based funding cap".to_string());
    }
    if max_funding_amount > monthly_revenue * 3.0 {
        conditions.push("Additional financial documentation required for large requests".to_string());
    }
    if matches!(business_age_months, Some(age) if age < 6) {
        conditions.push(
            "Six months of verified revenue history required before disbursement".to_string(),
        );
    }
    if let Some(industry) = industry {
        if !industry.is_empty() {
            conditions.push(format!("Standard terms applied for {} industry", industry));
        }
    }

    conditions
}
