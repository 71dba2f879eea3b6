//! Data models for extracted news and the outcome of a scrape.
//!
//! - [`NewsRecord`]: one article summary taken from the listing page
//! - [`ItemFailure`]: a list item that was dropped, with the reason
//! - [`ExtractionReport`]: everything one pass over a listing produced
//! - [`ScrapeOutcome`]: what a full fetch-and-extract call ended with

use crate::error::ItemError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Author value used when an item carries no link to read a name from.
pub const AUTHOR_FALLBACK: &str = "None";

/// A news article summary as extracted from the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsRecord {
    /// Configured name of the site, e.g. `"Oleoscope"`.
    pub source_name: String,
    /// The item's link exactly as written in the `href` attribute.
    pub source_url: String,
    pub title: String,
    /// Always equal to the date the caller asked for.
    pub public_date: NaiveDate,
    pub content: String,
    pub tags: Vec<String>,
    /// Link text, or [`AUTHOR_FALLBACK`].
    pub author: String,
    /// Final `/`-delimited segment of `source_url`.
    pub external_id: String,
}

/// A list item that was dropped during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    /// Position of the item among all list items, in document order.
    pub index: usize,
    pub error: ItemError,
}

/// Result of one pass over a listing page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Successfully assembled records in document order.
    pub records: Vec<NewsRecord>,
    pub failures: Vec<ItemFailure>,
    /// Number of list items found on the page.
    pub items_seen: usize,
    /// Items whose date parsed but differed from the target date.
    pub off_date: usize,
}

/// A listing request the server answered with an error status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub status: u16,
    /// Message handed to the notifier.
    pub diagnostic: String,
}

/// How a full fetch-and-extract call ended.
///
/// Callers that only want records use [`ScrapeOutcome::into_records`]; the
/// variants let them tell "nothing published" apart from "site unreachable".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeOutcome {
    Parsed(ExtractionReport),
    /// The listing answered OK with an empty body.
    EmptyPage,
    FetchFailed(FetchFailure),
}

impl ScrapeOutcome {
    /// Records of a parsed listing; empty for every other outcome.
    pub fn into_records(self) -> Vec<NewsRecord> {
        match self {
            ScrapeOutcome::Parsed(report) => report.records,
            ScrapeOutcome::EmptyPage | ScrapeOutcome::FetchFailed(_) => Vec::new(),
        }
    }
}
