//! Credit score calculation for LendFriend
//!
//! Maps a wallet's active business connections to a 0-100 credit score with
//! four weighted sub-scores. The calculation is a pure function of the
//! connection list and the evaluation instant; it never fails. Empty input
//! is a defined edge case (score 0), not an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::BusinessConnection;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Maximum points from revenue magnitude
pub const MAX_REVENUE_SCORE: u8 = 40;

/// Maximum points from revenue consistency
pub const MAX_CONSISTENCY_SCORE: u8 = 20;

/// Maximum points from payment reliability and data freshness
pub const MAX_RELIABILITY_SCORE: u8 = 25;

/// Maximum points from revenue growth
pub const MAX_GROWTH_SCORE: u8 = 15;

/// Neutral consistency score when fewer than two samples exist
const NEUTRAL_CONSISTENCY_SCORE: u8 = 10;

/// Neutral growth score when there is not enough history to compare windows
const NEUTRAL_GROWTH_SCORE: u8 = 8;

/// Assumed payment success rate for platforms that do not report one
const DEFAULT_SUCCESS_RATE: f64 = 0.8;

/// Coefficient of variation at or above which consistency scores zero
const MAX_CONSISTENCY_CV: f64 = 1.5;

/// Minimum monthly samples required to compare growth windows
const MIN_GROWTH_SAMPLES: usize = 4;

// ============================================================================
// Data Models
// ============================================================================

/// Computed credit score for one wallet
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreditScoreResult {
    /// Overall score, 0-100
    pub score: u8,
    /// Weighted sub-scores, each bounded by its weight
    pub breakdown: ScoreBreakdown,
    /// Human-readable signals that contributed to the score
    pub factors: Vec<String>,
    /// Actionable suggestions for improving the score
    pub recommendations: Vec<String>,
}

/// Sub-components of the overall score
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub revenue_score: u8,
    pub consistency_score: u8,
    pub reliability_score: u8,
    pub growth_score: u8,
}

// ============================================================================
// Calculation
// ============================================================================

/// Calculate the credit score for a set of active business connections.
///
/// `now` is the evaluation instant, passed explicitly so the calculation is
/// deterministic and testable.
pub fn calculate_credit_score(
    connections: &[BusinessConnection],
    now: DateTime<Utc>,
) -> CreditScoreResult {
    if connections.is_empty() {
        return CreditScoreResult {
            score: 0,
            breakdown: ScoreBreakdown::default(),
            factors: vec!["No business connections".to_string()],
            recommendations: vec![
                "Connect a business platform to start building your credit score".to_string(),
            ],
        };
    }

    let monthly_revenue = estimated_monthly_revenue(connections);
    let samples = combine_monthly_samples(connections);

    let revenue_score = score_revenue(monthly_revenue);
    let (consistency_score, cv) = score_consistency(&samples);
    let (reliability_score, success_rate, freshness) = score_reliability(connections, now);
    let (growth_score, growth_ratio) = score_growth(&samples);

    let breakdown = ScoreBreakdown {
        revenue_score,
        consistency_score,
        reliability_score,
        growth_score,
    };

    let total = (revenue_score as u16
        + consistency_score as u16
        + reliability_score as u16
        + growth_score as u16)
        .min(100) as u8;

    let factors = build_factors(monthly_revenue, &samples, cv, success_rate, growth_ratio);
    let recommendations = build_recommendations(connections, &samples, freshness);

    CreditScoreResult {
        score: total,
        breakdown,
        factors,
        recommendations,
    }
}

/// Estimated combined monthly revenue across all connections.
///
/// Connections reporting a period length are scaled to a 30-day month;
/// otherwise the total is taken as-is.
fn estimated_monthly_revenue(connections: &[BusinessConnection]) -> f64 {
    connections
        .iter()
        .map(|c| {
            let data = &c.revenue_data;
            if data.period_days > 0 {
                data.total_revenue / data.period_days as f64 * 30.0
            } else {
                data.total_revenue
            }
        })
        .sum()
}

/// Combine monthly revenue buckets across connections, aligned at the most
/// recent month. Months a platform did not report contribute nothing.
fn combine_monthly_samples(connections: &[BusinessConnection]) -> Vec<f64> {
    let max_len = connections
        .iter()
        .map(|c| c.revenue_data.monthly_revenue.len())
        .max()
        .unwrap_or(0);
    if max_len == 0 {
        return Vec::new();
    }

    let mut combined = vec![0.0; max_len];
    for connection in connections {
        let samples = &connection.revenue_data.monthly_revenue;
        let offset = max_len - samples.len();
        for (i, value) in samples.iter().enumerate() {
            combined[offset + i] += value;
        }
    }
    combined
}

/// Monotonic step function of monthly revenue magnitude
fn score_revenue(monthly_revenue: f64) -> u8 {
    if monthly_revenue >= 2000.0 {
        40
    } else if monthly_revenue >= 1000.0 {
        32
    } else if monthly_revenue >= 500.0 {
        24
    } else if monthly_revenue >= 250.0 {
        16
    } else if monthly_revenue >= 100.0 {
        10
    } else if monthly_revenue > 0.0 {
        5
    } else {
        0
    }
}

/// Consistency from the coefficient of variation of monthly samples.
///
/// Returns the score and the CV (None when not enough samples).
fn score_consistency(samples: &[f64]) -> (u8, Option<f64>) {
    if samples.len() < 2 {
        return (NEUTRAL_CONSISTENCY_SCORE, None);
    }

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        return (0, None);
    }

    let variance = samples
        .iter()
        .map(|&x| {
            let diff = x - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    let cv = variance.sqrt() / mean;

    let normalized = 1.0 - (cv / MAX_CONSISTENCY_CV).min(1.0);
    let score = (normalized * MAX_CONSISTENCY_SCORE as f64).round() as u8;
    (score, Some(cv))
}

/// Reliability from payment success rate and data freshness.
///
/// Returns the score, the averaged success rate, and the averaged freshness
/// factor (0.0-1.0).
fn score_reliability(
    connections: &[BusinessConnection],
    now: DateTime<Utc>,
) -> (u8, f64, f64) {
    let rates: Vec<f64> = connections
        .iter()
        .filter_map(|c| c.revenue_data.success_rate)
        .collect();
    let success_rate = if rates.is_empty() {
        DEFAULT_SUCCESS_RATE
    } else {
        rates.iter().sum::<f64>() / rates.len() as f64
    };

    let freshness = connections
        .iter()
        .map(|c| freshness_factor(c.last_synced_at, now))
        .sum::<f64>()
        / connections.len() as f64;

    let score = (MAX_RELIABILITY_SCORE as f64 * success_rate.clamp(0.0, 1.0) * freshness)
        .round()
        .min(MAX_RELIABILITY_SCORE as f64) as u8;
    (score, success_rate, freshness)
}

/// Staleness reduces the reliability component; never-synced connections sit
/// at the midpoint.
fn freshness_factor(last_synced_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(synced) = last_synced_at else {
        return 0.5;
    };
    let age_days = (now - synced).num_days();
    if age_days <= 7 {
        1.0
    } else if age_days <= 30 {
        0.85
    } else if age_days <= 90 {
        0.6
    } else {
        0.4
    }
}

/// Growth from a recent window of monthly samples against the earlier half.
///
/// Returns the score and the recent/early ratio when computable.
fn score_growth(samples: &[f64]) -> (u8, Option<f64>) {
    if samples.len() < MIN_GROWTH_SAMPLES {
        return (NEUTRAL_GROWTH_SCORE, None);
    }

    let mid = samples.len() / 2;
    let early = &samples[..mid];
    let recent = &samples[mid..];
    let early_avg = early.iter().sum::<f64>() / early.len() as f64;
    let recent_avg = recent.iter().sum::<f64>() / recent.len() as f64;

    if early_avg <= 0.0 {
        let score = if recent_avg > 0.0 {
            MAX_GROWTH_SCORE
        } else {
            NEUTRAL_GROWTH_SCORE
        };
        return (score, None);
    }

    let ratio = recent_avg / early_avg;
    let score = if ratio >= 1.25 {
        15
    } else if ratio >= 1.1 {
        12
    } else if ratio >= 0.95 {
        8
    } else if ratio >= 0.75 {
        4
    } else {
        0
    };
    (score, Some(ratio))
}

fn build_factors(
    monthly_revenue: f64,
    samples: &[f64],
    cv: Option<f64>,
    success_rate: f64,
    growth_ratio: Option<f64>,
) -> Vec<String> {
    let mut factors = Vec::new();

    if monthly_revenue >= 2000.0 {
        factors.push(format!("Strong monthly revenue (${:.0}/month)", monthly_revenue));
    } else if monthly_revenue >= 500.0 {
        factors.push(format!("Moderate monthly revenue (${:.0}/month)", monthly_revenue));
    } else if monthly_revenue > 0.0 {
        factors.push(format!("Limited monthly revenue (${:.0}/month)", monthly_revenue));
    } else {
        factors.push("No recorded revenue".to_string());
    }

    if let Some(cv) = cv {
        if cv <= 0.3 {
            factors.push("Stable month-over-month revenue".to_string());
        } else if cv > 0.8 {
            factors.push("High revenue volatility".to_string());
        }
    } else if samples.len() < 2 {
        factors.push("Insufficient revenue history for consistency analysis".to_string());
    }

    if success_rate >= 0.95 {
        factors.push("Excellent payment success rate".to_string());
    } else if success_rate < 0.85 {
        factors.push("Payment success rate below average".to_string());
    }

    if let Some(ratio) = growth_ratio {
        if ratio >= 1.1 {
            factors.push("Positive revenue growth trend".to_string());
        } else if ratio < 0.75 {
            factors.push("Declining revenue trend".to_string());
        }
    }

    factors
}

fn build_recommendations(
    connections: &[BusinessConnection],
    samples: &[f64],
    freshness: f64,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if connections.len() < 2 {
        recommendations.push("Connect more platforms to strengthen your score".to_string());
    }
    if freshness < 0.85 {
        recommendations.push("Sync your platform data to keep your score current".to_string());
    }
    if samples.len() < MIN_GROWTH_SAMPLES {
        recommendations
            .push("Build more months of revenue history to unlock growth scoring".to_string());
    }

    recommendations
}
