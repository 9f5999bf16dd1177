// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Clean and canonicalize raw worklog rows (and legacy hierarchical report rows) into CanonicalWorklogEntry
// role: processing/normalization
// inputs: RawWorklogEntry[] or LegacyReportRow[] straight from the ingest boundary
// outputs: NormalizeOutcome { ordered canonical entries, rejection report }
// invariants:
// - a bad row is excluded and tallied, never zeroed and never fatal to the rest of the file
// - person identity is exact-match after trim + encoding repair; no fuzzy merging
// - hours always come from a successfully parsed time value
// errors: row problems become RowError tallies; this module itself never fails
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::NaiveDate;

use crate::encoding::repair;
use crate::errors::RowError;
use crate::model::{CanonicalWorklogEntry, LegacyReportRow, NumOrText, RawWorklogEntry, RejectionReport};
use crate::timeparse::{parse_percentage, parse_time};

pub struct NormalizeOutcome {
  pub entries: Vec<CanonicalWorklogEntry>,
  pub rejections: RejectionReport,
}

/// Trim + encoding-repair a text field; `None` when nothing usable remains.
fn clean_text(raw: Option<&str>) -> Option<String> {
  let repaired = repair(raw?.trim());
  let trimmed = repaired.trim();
  if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

fn clean_or_empty(raw: Option<&str>) -> String {
  clean_text(raw).unwrap_or_default()
}

/// Dates arrive either as ISO dates, as full timestamps, or in the European
/// dotted form, depending on which tool produced the export.
fn parse_date(raw: &str) -> Result<NaiveDate, RowError> {
  let s = raw.trim();
  let iso_prefix: String = s.chars().take(10).collect();

  NaiveDate::parse_from_str(&iso_prefix, "%Y-%m-%d")
    .or_else(|_| NaiveDate::parse_from_str(s, "%d.%m.%Y"))
    .map_err(|_| RowError::BadDate { value: raw.to_string() })
}

fn month_of(date: NaiveDate) -> String {
  date.format("%Y-%m").to_string()
}

fn creative_hours(hours: f64, pct: Option<f64>) -> f64 {
  crate::metrics::creative_hours(hours, pct.unwrap_or(0.0))
}

/// Normalize flat worklog rows. Rows missing person/task key/date or carrying
/// malformed time or percentage values are excluded and counted; everything
/// else becomes an ordered sequence of canonical entries.
pub fn normalize_worklogs(rows: &[RawWorklogEntry]) -> NormalizeOutcome {
  let mut entries = Vec::with_capacity(rows.len());
  let mut rejections = RejectionReport::default();

  for (index, row) in rows.iter().enumerate() {
    match normalize_one(row) {
      Ok(entry) => entries.push(entry),
      Err(err) => rejections.record(index, &err),
    }
  }

  rejections.accepted = entries.len();
  log::info!(
    "normalized {} worklog rows: {} accepted, {} rejected",
    rows.len(),
    rejections.accepted,
    rejections.rejected
  );
  NormalizeOutcome { entries, rejections }
}

fn normalize_one(row: &RawWorklogEntry) -> Result<CanonicalWorklogEntry, RowError> {
  let person =
    clean_text(row.author.as_deref()).ok_or(RowError::MissingField { field: "person" })?;
  let task_key =
    clean_text(row.issue_key.as_deref()).ok_or(RowError::MissingField { field: "task_key" })?;
  let date_raw =
    row.start_date.as_deref().map(str::trim).filter(|s| !s.is_empty()).ok_or(RowError::MissingField { field: "date" })?;
  let date = parse_date(date_raw)?;

  let time_raw = row.time_spent.as_ref().ok_or(RowError::MissingField { field: "time_spent" })?;
  let hours = parse_time(&time_raw.as_text())?;

  let creative_pct = match &row.creative_pct {
    Some(value) => parse_percentage(value)?,
    None => None,
  };

  Ok(CanonicalWorklogEntry {
    task_summary: clean_or_empty(row.issue_summary.as_deref()),
    task_type: clean_or_empty(row.issue_type.as_deref()),
    status: clean_or_empty(row.status.as_deref()),
    creative_hours: creative_hours(hours, creative_pct),
    month: Some(month_of(date)),
    date: Some(date),
    person,
    task_key,
    hours,
    creative_pct,
  })
}

/// Convert the legacy hierarchical report (Level 0 = person, Level 1 = task,
/// Level 2 = creative percentage) into the same canonical shape. Best-effort:
/// legacy rows carry no dates, task types, or statuses, so those fields stay
/// empty and the entries only participate in the all-time window.
pub fn normalize_legacy(rows: &[LegacyReportRow]) -> NormalizeOutcome {
  let mut entries: Vec<CanonicalWorklogEntry> = Vec::new();
  let mut rejections = RejectionReport::default();
  let mut current_person: Option<String> = None;

  for (index, row) in rows.iter().enumerate() {
    let description = row.description.as_ref().map(NumOrText::as_text);

    match row.level.map(|l| l as i64) {
      Some(0) => match clean_text(description.as_deref()) {
        Some(person) => current_person = Some(person),
        None => {
          rejections.record(index, &RowError::MissingField { field: "person" });
          current_person = None;
        }
      },
      Some(1) => {
        let Some(person) = current_person.clone() else {
          rejections.record(index, &RowError::MissingField { field: "person" });
          continue;
        };
        match normalize_legacy_task(row, person, description.as_deref()) {
          Ok(entry) => entries.push(entry),
          Err(err) => rejections.record(index, &err),
        }
      }
      Some(2) => {
        // Percentage row attaches to the task pushed right before it.
        let Some(value) = &row.description else { continue };
        match parse_percentage(value) {
          Ok(Some(pct)) => {
            if let Some(task) = entries.last_mut() {
              task.creative_pct = Some(pct);
              task.creative_hours = creative_hours(task.hours, Some(pct));
            }
          }
          Ok(None) => {}
          Err(err) => rejections.record(index, &err),
        }
      }
      _ => {}
    }
  }

  rejections.accepted = entries.len();
  log::info!(
    "normalized {} legacy rows: {} tasks accepted, {} rejected",
    rows.len(),
    rejections.accepted,
    rejections.rejected
  );
  NormalizeOutcome { entries, rejections }
}

fn normalize_legacy_task(
  row: &LegacyReportRow,
  person: String,
  description: Option<&str>,
) -> Result<CanonicalWorklogEntry, RowError> {
  let task_summary = clean_or_empty(description);
  // Legacy reports sometimes omit the key column; the summary then doubles as
  // the grouping key so distinct tasks stay distinct.
  let task_key = match clean_text(row.key.as_deref()) {
    Some(key) => key,
    None if !task_summary.is_empty() => task_summary.clone(),
    None => return Err(RowError::MissingField { field: "task_key" }),
  };

  let time_raw = row.time_spent.as_ref().ok_or(RowError::MissingField { field: "time_spent" })?;
  let hours = parse_time(&time_raw.as_text())?;

  Ok(CanonicalWorklogEntry {
    person,
    task_key,
    task_summary,
    date: None,
    hours,
    creative_pct: None,
    creative_hours: 0.0,
    task_type: String::new(),
    status: String::new(),
    month: None,
  })
}
