//! User-Agent providers for outgoing requests.
//!
//! The listing is requested with a browser-looking `User-Agent` picked at
//! random per request. Tests and callers that need a stable value inject a
//! [`FixedUserAgent`] instead.

use rand::rng;
use rand::seq::IndexedRandom;
use std::fmt;

/// Desktop and mobile browser strings used when no pool is configured.
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.2478.80",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 YaBrowser/24.4.0.0 Safari/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.6367.82 Mobile Safari/537.36",
];

/// Source of the `User-Agent` header value.
pub trait UserAgentProvider: Send + Sync + fmt::Debug {
    fn user_agent(&self) -> String;
}

/// Picks uniformly from a pool on every call.
#[derive(Debug, Clone)]
pub struct RandomUserAgent {
    pool: Vec<String>,
}

impl RandomUserAgent {
    /// Build from a custom pool; an empty pool falls back to [`DEFAULT_USER_AGENTS`].
    pub fn new(pool: Vec<String>) -> Self {
        if pool.is_empty() {
            Self::default()
        } else {
            Self { pool }
        }
    }
}

impl Default for RandomUserAgent {
    fn default() -> Self {
        Self {
            pool: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl UserAgentProvider for RandomUserAgent {
    fn user_agent(&self) -> String {
        self.pool
            .choose(&mut rng())
            .cloned()
            .unwrap_or_else(|| DEFAULT_USER_AGENTS[0].to_string())
    }
}

/// Always returns the same value.
#[derive(Debug, Clone)]
pub struct FixedUserAgent(pub String);

impl UserAgentProvider for FixedUserAgent {
    fn user_agent(&self) -> String {
        self.0.clone()
    }
}
