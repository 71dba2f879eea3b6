//! # Oleoscope News
//!
//! Fetches the news listing of [Oleoscope](https://oleoscope.com/news), keeps
//! the entries published on a target date and extracts each into a
//! [`NewsRecord`]: title, link, content, tags, author and external id.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use oleoscope_news::{OleoscopeNews, SourceConfig};
//!
//! let news = OleoscopeNews::new(SourceConfig::default())?;
//! let records = news.parse(chrono::Local::now().date_naive()).await?;
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetching** ([`fetcher`]): one GET with browser-like headers; an error
//!    status produces a diagnostic for the [`notify`] seam
//! 2. **Scanning** ([`scrapers::oleoscope`]): list items are located in the
//!    parsed tree ([`document`]) and filtered by date
//! 3. **Assembling**: per-item results are split into records and failures,
//!    reported together in a [`ScrapeOutcome`]

pub mod config;
pub mod document;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod notify;
pub mod output;
pub mod scrapers;
pub mod user_agent;
pub mod utils;

pub use config::{ContentMode, SourceConfig};
pub use error::{ItemError, NewsError, Result};
pub use fetcher::{FetchOutcome, Fetcher, RequestParams};
pub use models::{ExtractionReport, FetchFailure, ItemFailure, NewsRecord, ScrapeOutcome};
pub use notify::{LogNotifier, Notifier};
pub use scrapers::oleoscope::OleoscopeNews;
pub use user_agent::{FixedUserAgent, RandomUserAgent, UserAgentProvider};
