#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use serde_json::{json, Value};

/// One flat worklog row with the export's column headers.
pub fn worklog_row(
  author: &str,
  key: &str,
  summary: &str,
  date: &str,
  time: &str,
  pct: Option<Value>,
) -> Value {
  let mut row = json!({
    "Author": author,
    "Issue Key": key,
    "Issue Summary": summary,
    "Start Date": date,
    "Time Spent": time,
    "Issue Type": "Task",
    "Status": "Done",
  });
  if let Some(p) = pct {
    row["Creative Percentage"] = p;
  }
  row
}

pub fn write_rows(dir: &tempfile::TempDir, name: &str, rows: &Value) -> PathBuf {
  let path = dir.path().join(name);
  std::fs::write(&path, serde_json::to_vec_pretty(rows).unwrap()).unwrap();
  path
}

/// Run the binary with the given args and parse its stdout as a JSON report.
pub fn run_report(args: &[&str]) -> Value {
  let out = Command::cargo_bin("worklog-cost-report").unwrap().args(args).output().unwrap();
  assert!(
    out.status.success(),
    "run failed: {}",
    String::from_utf8_lossy(&out.stderr)
  );
  serde_json::from_slice(&out.stdout).expect("stdout is a JSON report")
}

pub fn total_hours_of(report: &Value) -> f64 {
  report["summary"]["total_hours"].as_f64().unwrap()
}
