//! Revenue normalization for platform payloads
//!
//! Each supported platform reports revenue in its own shape. A
//! `RevenueSource` implementation per platform maps the raw payload into the
//! common `RevenueData` form; a registry keyed on platform selects the right
//! one. Unknown platforms normalize to empty revenue data. Presence checks
//! only - missing or malformed fields become zero, never errors.

use serde_json::Value;
use std::collections::HashMap;

use crate::models::{Platform, RevenueData};

/// A normalizer for one platform's raw revenue payload
pub trait RevenueSource: Send + Sync {
    fn platform(&self) -> Platform;
    fn normalize(&self, raw: &Value) -> RevenueData;
}

fn read_f64(raw: &Value, key: &str) -> f64 {
    raw.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn read_opt_f64(raw: &Value, key: &str) -> Option<f64> {
    raw.get(key).and_then(Value::as_f64)
}

fn read_u32(raw: &Value, key: &str) -> u32 {
    raw.get(key)
        .and_then(Value::as_u64)
        .map(|v| v.min(u32::MAX as u64) as u32)
        .unwrap_or(0)
}

fn read_currency(raw: &Value) -> String {
    raw.get("currency")
        .and_then(Value::as_str)
        .unwrap_or("USD")
        .to_string()
}

fn read_monthly(raw: &Value) -> Vec<f64> {
    raw.get("monthlyRevenue")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(Value::as_f64).collect())
        .unwrap_or_default()
}

/// Shared normalization: every platform carries totals, a period length,
/// a currency and optional monthly buckets; only the count field differs.
fn normalize_common(raw: &Value, count_field: &str) -> RevenueData {
    RevenueData {
        total_revenue: read_f64(raw, "totalRevenue"),
        transaction_count: read_u32(raw, count_field),
        period_days: read_u32(raw, "periodDays"),
        currency: read_currency(raw),
        success_rate: read_opt_f64(raw, "successRate"),
        recurring_revenue: read_opt_f64(raw, "recurringRevenue"),
        monthly_revenue: read_monthly(raw),
    }
}

/// Shopify order aggregates
pub struct ShopifySource;

impl RevenueSource for ShopifySource {
    fn platform(&self) -> Platform {
        Platform::Shopify
    }

    fn normalize(&self, raw: &Value) -> RevenueData {
        normalize_common(raw, "orderCount")
    }
}

/// Stripe charge aggregates, including recurring revenue and success rate
pub struct StripeSource;

impl RevenueSource for StripeSource {
    fn platform(&self) -> Platform {
        Platform::Stripe
    }

    fn normalize(&self, raw: &Value) -> RevenueData {
        normalize_common(raw, "chargeCount")
    }
}

/// Square payment aggregates
pub struct SquareSource;

impl RevenueSource for SquareSource {
    fn platform(&self) -> Platform {
        Platform::Square
    }

    fn normalize(&self, raw: &Value) -> RevenueData {
        normalize_common(raw, "paymentCount")
    }
}

/// TikTok Shop order aggregates
pub struct TiktokShopSource;

impl RevenueSource for TiktokShopSource {
    fn platform(&self) -> Platform {
        Platform::TiktokShop
    }

    fn normalize(&self, raw: &Value) -> RevenueData {
        normalize_common(raw, "orderCount")
    }
}

/// Twitch subscription and bits revenue
pub struct TwitchSource;

impl RevenueSource for TwitchSource {
    fn platform(&self) -> Platform {
        Platform::Twitch
    }

    fn normalize(&self, raw: &Value) -> RevenueData {
        let mut data = normalize_common(raw, "subscriptionCount");
        // Subscriptions are recurring by nature; fall back to the sub total
        // when the payload lacks an explicit recurring figure.
        if data.recurring_revenue.is_none() {
            data.recurring_revenue = read_opt_f64(raw, "subscriptionRevenue");
        }
        data
    }
}

/// YouTube channel revenue (ads plus memberships)
pub struct YoutubeSource;

impl RevenueSource for YoutubeSource {
    fn platform(&self) -> Platform {
        Platform::Youtube
    }

    fn normalize(&self, raw: &Value) -> RevenueData {
        let mut data = normalize_common(raw, "videoCount");
        if data.recurring_revenue.is_none() {
            data.recurring_revenue = read_opt_f64(raw, "membershipRevenue");
        }
        data
    }
}

/// Registry of per-platform normalizers, keyed on platform identifier
pub struct NormalizerRegistry {
    sources: HashMap<Platform, Box<dyn RevenueSource>>,
}

impl NormalizerRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    /// Registry with every supported platform registered
    pub fn with_default_sources() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ShopifySource));
        registry.register(Box::new(StripeSource));
        registry.register(Box::new(SquareSource));
        registry.register(Box::new(TiktokShopSource));
        registry.register(Box::new(TwitchSource));
        registry.register(Box::new(YoutubeSource));
        registry
    }

    pub fn register(&mut self, source: Box<dyn RevenueSource>) {
        self.sources.insert(source.platform(), source);
    }

    /// Normalize a raw platform payload.
    ///
    /// Unknown platforms produce empty revenue data rather than an error.
    pub fn normalize(&self, platform: &Platform, raw: &Value) -> RevenueData {
        match self.sources.get(platform) {
            Some(source) => source.normalize(raw),
            None => RevenueData {
                currency: "USD".to_string(),
                ..RevenueData::default()
            },
        }
    }
}

impl Default for NormalizerRegistry {
    fn default() -> Self {
        Self::with_default_sources()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shopify_normalization() {
        let raw = json!({
            "totalRevenue": 4500.0,
            "orderCount": 120,
            "periodDays": 90,
            "currency": "EUR",
            "monthlyRevenue": [1400.0, 1500.0, 1600.0]
        });

        let data = ShopifySource.normalize(&raw);
        assert_eq!(data.total_revenue, 4500.0);
        assert_eq!(data.transaction_count, 120);
        assert_eq!(data.period_days, 90);
        assert_eq!(data.currency, "EUR");
        assert_eq!(data.monthly_revenue, vec![1400.0, 1500.0, 1600.0]);
        assert!(data.success_rate.is_none());
    }

    #[test]
    fn test_stripe_success_rate_and_recurring() {
        let raw = json!({
            "totalRevenue": 2000.0,
            "chargeCount": 50,
            "periodDays": 30,
            "successRate": 0.97,
            "recurringRevenue": 800.0
        });

        let data = StripeSource.normalize(&raw);
        assert_eq!(data.transaction_count, 50);
        assert_eq!(data.success_rate, Some(0.97));
        assert_eq!(data.recurring_revenue, Some(800.0));
    }

    #[test]
    fn test_twitch_subscription_fallback() {
        let raw = json!({
            "totalRevenue": 600.0,
            "subscriptionCount": 40,
            "subscriptionRevenue": 500.0,
            "periodDays": 30
        });

        let data = TwitchSource.normalize(&raw);
        assert_eq!(data.recurring_revenue, Some(500.0));
    }

    #[test]
    fn test_missing_fields_become_zero() {
        let data = SquareSource.normalize(&json!({}));
        assert_eq!(data.total_revenue, 0.0);
        assert_eq!(data.transaction_count, 0);
        assert_eq!(data.period_days, 0);
        assert_eq!(data.currency, "USD");
        assert!(data.monthly_revenue.is_empty());
    }

    #[test]
    fn test_unknown_platform_yields_empty_revenue() {
        let registry = NormalizerRegistry::with_default_sources();
        let data = registry.normalize(
            &Platform::Other("etsy".to_string()),
            &json!({"totalRevenue": 999.0}),
        );
        assert_eq!(data.total_revenue, 0.0);
        assert_eq!(data.transaction_count, 0);
    }

    #[test]
    fn test_registry_dispatches_by_platform() {
        let registry = NormalizerRegistry::with_default_sources();
        let raw = json!({"totalRevenue": 100.0, "chargeCount": 3});

        let data = registry.normalize(&Platform::Stripe, &raw);
        assert_eq!(data.transaction_count, 3);

        // Shopify reads orderCount, so the same payload yields zero
        let data = registry.normalize(&Platform::Shopify, &raw);
        assert_eq!(data.transaction_count, 0);
    }
}
