//! JSON output of extracted records.
//!
//! Records are written as a pretty-printed JSON array, either to a file
//! (parent directories are created) or to stdout when no path is given.

use crate::models::NewsRecord;
use crate::utils::ensure_parent_dir;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

/// Serialize `records` and write them to `output`, or to stdout.
#[instrument(level = "info", skip_all, fields(count = records.len()))]
pub async fn write_records(
    records: &[NewsRecord],
    output: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(records)?;

    match output {
        Some(path) => {
            ensure_parent_dir(path).await?;
            fs::write(path, json).await?;
            info!(path = %path.display(), "Wrote records JSON");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(json.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}
