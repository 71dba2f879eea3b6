//! Command-line interface definitions.
//!
//! Every option can also come from the YAML config; flags given here win.
//! `$ENVIRONMENT` is only a fallback for a config that leaves `environment`
//! out, so it never overrides the file.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use oleoscope_news::{ContentMode, SourceConfig};
use std::path::PathBuf;

/// Fetch the Oleoscope news listing and print the articles of one day as JSON.
///
/// # Examples
///
/// ```sh
/// # Today's news to stdout
/// oleoscope_news
///
/// # A given day, with article bodies, into a file
/// oleoscope_news --date 2024-03-05 --content-mode article-page -o ./out/news.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Publication date to keep, as YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the records to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Where record content is read from
    #[arg(long, value_enum)]
    pub content_mode: Option<ContentModeArg>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Deployment environment reported in failure diagnostics
    #[arg(long)]
    pub environment: Option<String>,
}

/// Command-line spelling of [`ContentMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContentModeArg {
    /// Look for the article body inside the item's href string
    LinkMarkup,
    /// Download each article page and read the body there
    ArticlePage,
}

impl From<ContentModeArg> for ContentMode {
    fn from(arg: ContentModeArg) -> Self {
        match arg {
            ContentModeArg::LinkMarkup => ContentMode::LinkMarkup,
            ContentModeArg::ArticlePage => ContentMode::ArticlePage,
        }
    }
}

impl Cli {
    /// Apply the flags that were given on top of `config`.
    pub fn apply_to(&self, config: &mut SourceConfig) {
        if let Some(mode) = self.content_mode {
            config.content_mode = mode.into();
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout_secs = secs;
        }
        if let Some(env) = &self.environment {
            config.environment = Some(env.clone());
        }
    }
}
