// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the JSON model (raw rows, canonical entries, aggregates, summaries, cost allocations) shared across the pipeline
// role: model/types
// outputs: Serializable structs with stable field names; raw input shapes bound to the export's column headers
// invariants: aggregate rows are keyed by (person, task_key); optional fields are omitted from JSON when absent
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::category::TaskCategory;

/// A cell that the export writes either as a number or as text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumOrText {
  Num(f64),
  Text(String),
}

impl NumOrText {
  pub fn as_text(&self) -> String {
    match self {
      NumOrText::Num(n) => n.to_string(),
      NumOrText::Text(s) => s.clone(),
    }
  }
}

/// One row as exported from the worklog spreadsheet. Field names are bound to
/// the export's column headers; the legacy Polish header for the creative
/// percentage is accepted as an alias. Discarded after normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWorklogEntry {
  #[serde(rename = "Author", default)]
  pub author: Option<String>,
  #[serde(rename = "Issue Key", default)]
  pub issue_key: Option<String>,
  #[serde(rename = "Issue Summary", default)]
  pub issue_summary: Option<String>,
  #[serde(rename = "Start Date", default)]
  pub start_date: Option<String>,
  #[serde(rename = "Time Spent", default)]
  pub time_spent: Option<NumOrText>,
  #[serde(rename = "Creative Percentage", alias = "Procent pracy twórczej", default)]
  pub creative_pct: Option<NumOrText>,
  #[serde(rename = "Issue Type", default)]
  pub issue_type: Option<String>,
  #[serde(rename = "Status", default)]
  pub status: Option<String>,
  #[serde(rename = "Components", default)]
  pub components: Option<String>,
}

/// One row of the legacy hierarchical report (Level 0 = person, Level 1 =
/// task + key + time, Level 2 = creative percentage).
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyReportRow {
  // Spreadsheet tools write the level as 0 or 0.0 interchangeably.
  #[serde(rename = "Level", default)]
  pub level: Option<f64>,
  #[serde(rename = "Users / Issues / Procent pracy twórczej", default)]
  pub description: Option<NumOrText>,
  #[serde(rename = "Key", default)]
  pub key: Option<String>,
  #[serde(rename = "Total Time Spent", default)]
  pub time_spent: Option<NumOrText>,
}

/// A validated, typed worklog entry. Created once during normalization and
/// immutable afterwards.
///
/// `creative_pct` is `None` when the source row carried a "no data" marker;
/// that absence is preserved (coverage metrics depend on it), never zeroed.
/// `date`/`month` are `None` only for legacy-report rows, which carry no
/// dates; such rows match the all-time window and no month window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalWorklogEntry {
  pub person: String,
  pub task_key: String,
  pub task_summary: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date: Option<NaiveDate>,
  pub hours: f64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub creative_pct: Option<f64>,
  pub creative_hours: f64,
  pub task_type: String,
  pub status: String,
  /// "YYYY-MM", derived from `date`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub month: Option<String>,
}

/// Per-(person, task_key) rollup. The composite key is the contract: grouping
/// by task key alone collapses co-authored tasks and silently drops hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateRow {
  pub person: String,
  pub task_key: String,
  pub task_summary: String,
  pub task_type: String,
  pub category: TaskCategory,
  pub total_hours: f64,
  pub total_hours_hm: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub weighted_creative_pct: Option<f64>,
  pub creative_hours: f64,
  pub creative_hours_hm: String,
  pub creative_score: f64,
  pub entry_count: usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub first_date: Option<NaiveDate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_date: Option<NaiveDate>,
  #[serde(skip_serializing_if = "Vec::is_empty", default)]
  pub months: Vec<String>,
}

/// The person's standout task: highest Creative Score, or the longest task
/// when the person has no creative data at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTask {
  pub task_key: String,
  pub task_summary: String,
  pub total_hours: f64,
  pub creative_score: f64,
  pub has_creative_data: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonSummary {
  pub person: String,
  pub entry_count: usize,
  pub task_count: usize,
  pub total_hours: f64,
  pub creative_hours: f64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub weighted_creative_pct: Option<f64>,
  /// Share of the person's tasks that carry a creative percentage, 0..=100.
  pub coverage_pct: f64,
  pub creative_score: f64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub top_task: Option<TopTask>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedRow {
  pub index: usize,
  pub reason: String,
}

/// What was excluded during normalization and why. Row diagnostics are capped;
/// the per-reason tally is always complete.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RejectionReport {
  pub accepted: usize,
  pub rejected: usize,
  pub reasons: BTreeMap<String, usize>,
  #[serde(skip_serializing_if = "Vec::is_empty", default)]
  pub rows: Vec<RejectedRow>,
}

impl RejectionReport {
  pub const MAX_ROW_DIAGNOSTICS: usize = 50;

  pub fn record(&mut self, index: usize, error: &crate::errors::RowError) {
    self.rejected += 1;
    *self.reasons.entry(error.reason_code()).or_insert(0) += 1;
    if self.rows.len() < Self::MAX_ROW_DIAGNOSTICS {
      self.rows.push(RejectedRow { index, reason: error.to_string() });
    }
    log::debug!("row {} rejected: {}", index, error);
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowInfo {
  pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
  pub source: String,
  pub window: WindowInfo,
  pub entry_count: usize,
  pub aggregate_count: usize,
  pub total_hours: f64,
  pub total_hours_hm: String,
  pub creative_hours: f64,
  /// Entry counts per person inside the window.
  pub people: BTreeMap<String, usize>,
  /// Hours per "YYYY-MM" bucket inside the window; dateless legacy rows land
  /// under "undated".
  pub months: BTreeMap<String, f64>,
  pub rejections: RejectionReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCost {
  pub hours: f64,
  pub creative_hours: f64,
  pub cost: f64,
  pub creative_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCost {
  pub task_key: String,
  pub task_summary: String,
  pub hours: f64,
  pub cost: f64,
}

/// Window-scoped cost distribution for one person. Computed on demand; the
/// compensation amount is caller-supplied per run and never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostAllocation {
  pub person: String,
  pub window: WindowInfo,
  pub gross_compensation: f64,
  pub standard_monthly_hours: f64,
  pub hourly_rate: f64,
  pub total_hours: f64,
  pub total_cost: f64,
  pub creative_cost: f64,
  pub no_hours_logged: bool,
  pub cost_by_category: BTreeMap<String, CategoryCost>,
  pub cost_by_task: BTreeMap<String, f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub most_expensive_task: Option<TaskCost>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub least_expensive_task: Option<TaskCost>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
  pub summary: ReportSummary,
  pub aggregates: Vec<AggregateRow>,
  pub person_summaries: Vec<PersonSummary>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cost_allocation: Option<CostAllocation>,
}
