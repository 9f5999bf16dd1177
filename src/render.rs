// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Assemble the full report: normalize -> window filter -> aggregate -> summaries -> optional cost allocation
// role: processing/orchestrator
// inputs: ReportParams (source label, window, optional cost request), raw rows from the ingest boundary
// outputs: Report value ready for serialization; EmptyInput error when nothing survives normalization
// invariants:
// - summary totals are computed from the same filtered entries the aggregate table is built from
// - a window with zero matching entries yields an empty (not erroneous) report section
// - the pipeline is a pure function of (rows, params); rerunning it yields identical output
// errors: EngineError::EmptyInput surfaced through anyhow; everything row-level is already tallied
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use anyhow::Result;

use crate::aggregate::aggregate;
use crate::cost::{allocate, CostParams};
use crate::errors::EngineError;
use crate::metrics::person_summaries;
use crate::model::{
  CanonicalWorklogEntry, LegacyReportRow, RawWorklogEntry, Report, ReportSummary, WindowInfo,
};
use crate::normalize::{normalize_legacy, normalize_worklogs, NormalizeOutcome};
use crate::timeparse::hours_to_hm;
use crate::window::Window;

#[derive(Debug, Clone)]
pub struct ReportParams {
  /// Label recorded in the report's summary, normally the input path.
  pub source: String,
  pub window: Window,
  pub cost: Option<CostRequest>,
}

#[derive(Debug, Clone)]
pub struct CostRequest {
  pub person: String,
  pub gross_compensation: f64,
  pub standard_monthly_hours: f64,
}

pub fn run_worklog_report(rows: &[RawWorklogEntry], params: &ReportParams) -> Result<Report> {
  build_report(normalize_worklogs(rows), params)
}

pub fn run_legacy_report(rows: &[LegacyReportRow], params: &ReportParams) -> Result<Report> {
  build_report(normalize_legacy(rows), params)
}

fn build_report(outcome: NormalizeOutcome, params: &ReportParams) -> Result<Report> {
  let NormalizeOutcome { entries, rejections } = outcome;

  if entries.is_empty() {
    return Err(EngineError::EmptyInput { rejected: rejections.rejected }.into());
  }

  let in_window: Vec<CanonicalWorklogEntry> =
    entries.iter().filter(|e| params.window.contains(e)).cloned().collect();
  if in_window.is_empty() {
    log::warn!("window {} matches none of the {} entries", params.window.label(), entries.len());
  }

  let aggregates = aggregate(&in_window);
  let summaries = person_summaries(&aggregates);

  let total_hours: f64 = in_window.iter().map(|e| e.hours).sum();
  let creative_hours: f64 = in_window.iter().map(|e| e.creative_hours).sum();

  let mut people: BTreeMap<String, usize> = BTreeMap::new();
  let mut months: BTreeMap<String, f64> = BTreeMap::new();
  for e in &in_window {
    *people.entry(e.person.clone()).or_insert(0) += 1;
    let bucket = e.month.clone().unwrap_or_else(|| "undated".to_string());
    *months.entry(bucket).or_insert(0.0) += e.hours;
  }

  let cost_allocation = params.cost.as_ref().map(|req| {
    allocate(
      &in_window,
      &CostParams {
        person: req.person.clone(),
        gross_compensation: req.gross_compensation,
        standard_monthly_hours: req.standard_monthly_hours,
        window: params.window.clone(),
      },
    )
  });

  Ok(Report {
    summary: ReportSummary {
      source: params.source.clone(),
      window: WindowInfo { label: params.window.label() },
      entry_count: in_window.len(),
      aggregate_count: aggregates.len(),
      total_hours,
      total_hours_hm: hours_to_hm(total_hours),
      creative_hours,
      people,
      months,
      rejections,
    },
    aggregates,
    person_summaries: summaries,
    cost_allocation,
  })
}

/// Write the report to `out` ("-" means stdout), pretty-printed.
pub fn write_report(report: &Report, out: &str) -> Result<()> {
  let json = serde_json::to_string_pretty(report)?;

  if out == "-" {
    println!("{json}");
    return Ok(());
  }

  let out_path = std::path::Path::new(out);
  if let Some(parent) = out_path.parent() {
    if !parent.as_os_str().is_empty() {
      std::fs::create_dir_all(parent)?;
    }
  }
  std::fs::write(out_path, json.as_bytes())?;
  log::info!("report written to {}", out_path.display());
  Ok(())
}
