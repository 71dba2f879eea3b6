//! Source configuration.
//!
//! Everything that used to be a constant of the parser (listing URL, source
//! name) is a field here, so tests and other deployments can point the same
//! code at a different address. Values come from an optional YAML file:
//!
//! ```yaml
//! source_name: Oleoscope
//! listing_url: https://oleoscope.com/news
//! request_timeout_secs: 30
//! content_mode: link_markup
//! user_agents: []
//! environment: production
//! ```
//!
//! Missing keys take their defaults.

use crate::error::{NewsError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_SOURCE_NAME: &str = "Oleoscope";
pub const DEFAULT_LISTING_URL: &str = "https://oleoscope.com/news";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where a record's `content` comes from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    /// Parse the item's href string itself as markup and look for the article
    /// body in it. No real href contains one, so every on-date item is dropped.
    #[default]
    LinkMarkup,
    /// Download the linked article page and read the body from there.
    ///
    /// Article requests are sequential and use the listing's headers. A failed
    /// article drops only its item and does not go to the notifier, which is
    /// kept for listing outages.
    ArticlePage,
}

/// Settings of one news source.
///
/// `environment` falls back to `$ENVIRONMENT` when the file leaves it out.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    pub source_name: String,
    pub listing_url: String,
    pub request_timeout_secs: u64,
    pub content_mode: ContentMode,
    /// Pool for the random `User-Agent`; empty means the built-in pool.
    pub user_agents: Vec<String>,
    /// Deployment tag for failure diagnostics.
    pub environment: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            source_name: DEFAULT_SOURCE_NAME.to_string(),
            listing_url: DEFAULT_LISTING_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            content_mode: ContentMode::default(),
            user_agents: Vec::new(),
            environment: std::env::var("ENVIRONMENT").ok(),
        }
    }
}

impl SourceConfig {
    /// Read and validate a YAML config file.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref()).await?;
        let config = Self::from_yaml(&raw)?;
        info!(source = %config.source_name, url = %config.listing_url, "Loaded configuration");
        Ok(config)
    }

    /// Parse and validate YAML text; missing keys take their defaults.
    pub fn from_yaml(raw: &str) -> Result<Self> {
        let config: SourceConfig = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the listing URL parses, the timeout is non-zero and the source
    /// name is not blank.
    pub fn validate(&self) -> Result<()> {
        self.listing_url()?;
        if self.request_timeout_secs == 0 {
            return Err(NewsError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.source_name.trim().is_empty() {
            return Err(NewsError::Config("source_name must not be empty".to_string()));
        }
        Ok(())
    }

    /// The listing URL, parsed.
    pub fn listing_url(&self) -> Result<Url> {
        Url::parse(&self.listing_url).map_err(|source| NewsError::InvalidUrl {
            url: self.listing_url.clone(),
            source,
        })
    }

    /// Client-wide request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
