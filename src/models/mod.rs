//! Data models for the LendFriend backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

/// Supported commerce/social revenue platforms
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Shopify,
    Stripe,
    Square,
    TiktokShop,
    Twitch,
    Youtube,
    /// Unknown platforms pass through with empty revenue data
    #[serde(untagged)]
    Other(String),
}

impl Platform {
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Shopify => "shopify",
            Platform::Stripe => "stripe",
            Platform::Square => "square",
            Platform::TiktokShop => "tiktok_shop",
            Platform::Twitch => "twitch",
            Platform::Youtube => "youtube",
            Platform::Other(name) => name.as_str(),
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "shopify" => Platform::Shopify,
            "stripe" => Platform::Stripe,
            "square" => Platform::Square,
            "tiktok_shop" => Platform::TiktokShop,
            "twitch" => Platform::Twitch,
            "youtube" => Platform::Youtube,
            other => Platform::Other(other.to_string()),
        }
    }
}

/// Normalized revenue metrics shared by every platform.
///
/// Missing or malformed fields in the raw platform payload normalize to
/// zero/empty rather than erroring.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RevenueData {
    /// Total revenue over the reporting period, in the platform currency
    pub total_revenue: f64,
    /// Orders / charges / payments, depending on the platform
    pub transaction_count: u32,
    /// Length of the reporting period in days
    pub period_days: u32,
    /// ISO currency code as reported by the platform
    pub currency: String,
    /// Payment success rate (0.0-1.0), where the platform reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_rate: Option<f64>,
    /// Recurring revenue component (subscriptions), where applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_revenue: Option<f64>,
    /// Time-bucketed revenue samples, oldest first
    #[serde(default)]
    pub monthly_revenue: Vec<f64>,
}

/// A wallet's link to one commerce/social platform account
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BusinessConnection {
    pub platform: Platform,
    pub revenue_data: RevenueData,
    pub connected_at: DateTime<Utc>,
    /// Most recent data refresh; absent if never refreshed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_synced_at: Option<DateTime<Utc>>,
}

/// Persisted business connection row.
///
/// At most one active row per (wallet, platform, platform_user_id).
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct BusinessConnectionRow {
    pub id: Uuid,
    pub wallet_address: String,
    pub platform: String,
    pub platform_user_id: String,
    pub revenue_data: Value,
    pub is_active: bool,
    pub connected_at: DateTime<Utc>,
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl From<BusinessConnectionRow> for BusinessConnection {
    fn from(row: BusinessConnectionRow) -> Self {
        let revenue_data = serde_json::from_value(row.revenue_data).unwrap_or_default();
        Self {
            platform: Platform::from_str(&row.platform),
            revenue_data,
            connected_at: row.connected_at,
            last_synced_at: row.last_synced_at,
        }
    }
}

/// Request to record a platform connection for a wallet
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateConnectionRequest {
    #[validate(length(min = 1, message = "wallet address is required"))]
    pub wallet_address: String,
    pub platform: Platform,
    #[validate(length(min = 1, message = "platform user id is required"))]
    pub platform_user_id: String,
    /// Raw platform payload; run through the normalizer registry
    pub raw_revenue: Value,
}

/// Body for POST /api/credit-score
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreditScoreRequest {
    #[validate(length(min = 1, message = "wallet address is required"))]
    pub wallet_address: String,
}

/// Body for POST /api/underwriting/evaluate
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FundingRequest {
    #[validate(range(min = 0, max = 100))]
    pub credit_score: u8,
    #[validate(range(min = 0.0))]
    pub monthly_revenue: f64,
    #[validate(range(min = 0.0))]
    pub requested_amount: f64,
    pub business_age_months: Option<u32>,
    pub industry: Option<String>,
}

/// Body for POST /api/loan-status
///
/// Loan facts as read from the on-chain loan, evaluated at server time.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanStatusRequest {
    /// Unix timestamp (seconds); zero means not yet disbursed
    pub disbursement_time: i64,
    pub term_periods: u32,
    pub principal: i128,
    pub total_repaid: i128,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}
