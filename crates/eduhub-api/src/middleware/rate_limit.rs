//! Token bucket rate limiter for the credential endpoints.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::warn;

use eduhub_core::config::RateLimitConfig;
use eduhub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Simple in-memory token bucket rate limiter.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Client key → bucket state.
    buckets: Arc<Mutex<HashMap<String, TokenBucket>>>,
    /// Maximum tokens per bucket.
    max_tokens: u32,
    /// Token refill rate per second.
    refill_rate: f64,
    enabled: bool,
    trust_forwarded_for: bool,
}

#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn refilled(&self, now: Instant, refill_rate: f64, max_tokens: f64) -> f64 {
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        (self.tokens + elapsed * refill_rate).min(max_tokens)
    }
}

impl RateLimiter {
    /// Creates a new rate limiter keyed on the peer address.
    pub fn new(max_tokens: u32, refill_rate: f64) -> Self {
        Self {
            buckets: Arc::new(Mutex::new(HashMap::new())),
            max_tokens,
            refill_rate,
            enabled: true,
            trust_forwarded_for: false,
        }
    }

    /// Creates a limiter from configuration.
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self {
            enabled: config.enabled,
            trust_forwarded_for: config.trust_forwarded_for,
            ..Self::new(config.burst, config.refill_per_second)
        }
    }

    /// Attempts to consume a token for the given key.
    ///
    /// Buckets that have refilled completely are dropped first; a fresh
    /// bucket is equivalent to a full one.
    pub async fn check(&self, key: &str) -> bool {
        if !self.enabled {
            return true;
        }

        let mut buckets = self.buckets.lock().await;
        let now = Instant::now();
        let max = self.max_tokens as f64;

        buckets.retain(|_, bucket| bucket.refilled(now, self.refill_rate, max) < max);

        let bucket = buckets.entry(key.to_string()).or_insert(TokenBucket {
            tokens: max,
            last_refill: now,
        });

        bucket.tokens = bucket.refilled(now, self.refill_rate, max);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Identifies the client by peer address. The first `X-Forwarded-For`
    /// hop is used instead only when the limiter is configured to trust it.
    /// Requests without either share one bucket.
    fn client_key(&self, request: &Request) -> String {
        if self.trust_forwarded_for {
            if let Some(forwarded) = request
                .headers()
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty())
            {
                return forwarded.to_string();
            }
        }

        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    #[cfg(test)]
    async fn bucket_count(&self) -> usize {
        self.buckets.lock().await.len()
    }
}

/// Rejects the request with 429 once the client's bucket is empty.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let key = state.rate_limiter.client_key(&request);

    if !state.rate_limiter.check(&key).await {
        warn!(client = %key, path = %request.uri().path(), "Rate limit exceeded");
        return Err(AppError::rate_limited("Too many requests, slow down").into());
    }

    Ok(next.run(request).await)
}
