//! Rate limiting middleware
//!
//! Bounds requests per client address per day. The counter store sits behind
//! a trait so a shared keyed store (e.g. Redis) can replace the in-process
//! map without touching the middleware; the in-memory implementation does
//! not survive restarts or span instances.

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;

/// Keyed request counter with a fixed window
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Record one request for `key`; returns false once the quota for the
    /// current window is spent.
    async fn try_acquire(&self, key: &str) -> bool;

    /// Drop expired windows
    async fn cleanup(&self);
}

#[derive(Debug)]
struct Window {
    count: u32,
    started: Instant,
}

/// In-process fixed-window counter store
pub struct InMemoryRateLimitStore {
    windows: RwLock<HashMap<String, Window>>,
    max_per_window: u32,
    window: Duration,
}

impl InMemoryRateLimitStore {
    /// Daily quota per key
    pub fn per_day(max_requests: u32) -> Self {
        Self::new(max_requests, Duration::from_secs(24 * 60 * 60))
    }

    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: RwLock::new(HashMap::new()),
            max_per_window: max_requests,
            window,
        }
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn try_acquire(&self, key: &str) -> bool {
        let mut windows = self.windows.write().await;
        let now = Instant::now();

        let entry = windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            started: now,
        });

        // Window elapsed: reset the counter
        if now.duration_since(entry.started) >= self.window {
            entry.count = 0;
            entry.started = now;
        }

        if entry.count < self.max_per_window {
            entry.count += 1;
            true
        } else {
            false
        }
    }

    async fn cleanup(&self) {
        let mut windows = self.windows.write().await;
        let now = Instant::now();
        let window = self.window;

        windows.retain(|_, entry| now.duration_since(entry.started) < window);
    }
}

/// Rate limiter over an injected counter store
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
}

impl RateLimiter {
    /// Rate limiter with the in-process daily store
    pub fn per_day(max_requests: u32) -> Self {
        Self::with_store(Arc::new(InMemoryRateLimitStore::per_day(max_requests)))
    }

    pub fn with_store(store: Arc<dyn RateLimitStore>) -> Self {
        Self { store }
    }

    /// Check if a request is allowed
    pub async fn check(&self, key: &str) -> bool {
        self.store.try_acquire(key).await
    }

    /// Cleanup expired windows (call periodically)
    pub async fn cleanup(&self) {
        self.store.cleanup().await;
    }
}

/// Create rate limiting middleware layer
pub fn rate_limit_layer(
    rate_limiter: RateLimiter,
) -> impl Fn(
    Request<Body>,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Response> + Send>>
       + Clone
       + Send {
    move |request: Request<Body>, next: Next| {
        let rate_limiter = rate_limiter.clone();
        Box::pin(async move {
            // Extract client identifier (IP address)
            let client_key = extract_client_ip(&request);

            if !rate_limiter.check(&client_key).await {
                tracing::warn!(client = %client_key, "Daily rate limit exceeded");
                return (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(header::RETRY_AFTER, "86400")],
                    "Daily request limit reached. Please try again later.",
                )
                    .into_response();
            }

            next.run(request).await
        })
    }
}

/// Extract client IP from request headers
fn extract_client_ip(request: &Request<Body>) -> String {
    // Try X-Forwarded-For first
    if let Some(forwarded) = request.headers().get("x-forwarded-for") {
        if let Ok(s) = forwarded.to_str() {
            if let Some(ip) = s.split(',').next() {
                return ip.trim().to_string();
            }
        }
    }

    // Try X-Real-IP
    if let Some(real_ip) = request.headers().get("x-real-ip") {
        if let Ok(s) = real_ip.to_str() {
            return s.to_string();
        }
    }

    // Fallback to a default
    "unknown".to_string()
}
