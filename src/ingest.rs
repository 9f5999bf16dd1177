use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{LegacyReportRow, RawWorklogEntry};

// Thin serde boundary: the upload/export layer hands us a JSON array of rows
// keyed by the spreadsheet's column headers. Shape problems here are fatal to
// the run (there is nothing to recover per-row from an unreadable file);
// row-content problems are the normalizer's business.

pub fn read_worklog_rows(path: &Path) -> Result<Vec<RawWorklogEntry>> {
  let text = std::fs::read_to_string(path)
    .with_context(|| format!("reading worklog export {}", path.display()))?;
  let rows: Vec<RawWorklogEntry> = serde_json::from_str(&text)
    .with_context(|| format!("parsing worklog rows from {}", path.display()))?;
  log::info!("read {} worklog rows from {}", rows.len(), path.display());
  Ok(rows)
}

pub fn read_legacy_rows(path: &Path) -> Result<Vec<LegacyReportRow>> {
  let text = std::fs::read_to_string(path)
    .with_context(|| format!("reading legacy report {}", path.display()))?;
  let rows: Vec<LegacyReportRow> = serde_json::from_str(&text)
    .with_context(|| format!("parsing legacy report rows from {}", path.display()))?;
  log::info!("read {} legacy report rows from {}", rows.len(), path.display());
  Ok(rows)
}
