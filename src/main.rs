//! Command-line entry point: scrape one day of Oleoscope news into JSON.

use chrono::Local;
use clap::Parser;
use oleoscope_news::output::write_records;
use oleoscope_news::{OleoscopeNews, ScrapeOutcome, SourceConfig};
use std::error::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("oleoscope_news starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut config = match &args.config {
        Some(path) => SourceConfig::load(path).await?,
        None => SourceConfig::default(),
    };
    args.apply_to(&mut config);

    let target_date = args.date.unwrap_or_else(|| Local::now().date_naive());
    info!(%target_date, url = %config.listing_url, mode = ?config.content_mode, "Scraping listing");

    let news = OleoscopeNews::new(config)?;
    let records = match news.collect(target_date).await {
        Ok(ScrapeOutcome::Parsed(report)) => {
            if !report.failures.is_empty() {
                warn!(failed = report.failures.len(), "Some news items were skipped");
            }
            report.records
        }
        Ok(ScrapeOutcome::EmptyPage) => {
            warn!("Listing page was empty");
            Vec::new()
        }
        Ok(ScrapeOutcome::FetchFailed(failure)) => {
            error!(status = failure.status, "Listing could not be fetched");
            Vec::new()
        }
        Err(e) => {
            error!(error = %e, "Scrape failed");
            return Err(e.into());
        }
    };

    write_records(&records, args.output.as_deref()).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        count = records.len(),
        "Execution complete"
    );

    Ok(())
}
