//! Rate limiting configuration for the credential endpoints.

use serde::{Deserialize, Serialize};

/// Token bucket settings applied per client address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether auth routes are rate limited at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Bucket capacity (burst size).
    #[serde(default = "default_burst")]
    pub burst: u32,
    /// Tokens refilled per second.
    #[serde(default = "default_refill")]
    pub refill_per_second: f64,
    /// Key clients by the first `X-Forwarded-For` hop instead of the peer
    /// address. Enable only behind a proxy that overwrites the header.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            burst: default_burst(),
            refill_per_second: default_refill(),
            trust_forwarded_for: false,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_burst() -> u32 {
    10
}

fn default_refill() -> f64 {
    0.2
}
