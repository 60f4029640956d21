//! Middleware for the LendFriend API
//!
//! Rate limiting and security headers. Request logging is handled by
//! tower-http's `TraceLayer`, wired up in `main`.

mod rate_limiter;
mod security;

pub use rate_limiter::{rate_limit_layer, InMemoryRateLimitStore, RateLimitStore, RateLimiter};
pub use security::{hsts_header, security_headers};
