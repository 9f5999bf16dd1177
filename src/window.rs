use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::CanonicalWorklogEntry;

/// The time scope of a report or cost computation. The two variants carry
/// structurally different cost semantics (fixed monthly pay vs hourly-valued
/// total), so allocation logic pattern-matches on this and never merges the
/// branches.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum Window {
  Month { ym: String },
  All,
}

impl Window {
  /// Validate and normalize a `YYYY-MM` month selector.
  pub fn parse_month(year_month: &str) -> Result<Window> {
    let parts: Vec<&str> = year_month.split('-').collect();

    if parts.len() != 2 {
      bail!("invalid --month, expected YYYY-MM");
    }
    let y: i32 = parts[0].parse().context("parsing year in --month")?;
    let m: u32 = parts[1].parse().context("parsing month in --month")?;

    if !(1..=12).contains(&m) {
      bail!("invalid month in --month");
    }

    Ok(Window::Month { ym: format!("{y:04}-{m:02}") })
  }

  pub fn label(&self) -> String {
    match self {
      Window::Month { ym } => ym.clone(),
      Window::All => "all".to_string(),
    }
  }

  /// Whether an entry falls inside this window. Dateless (legacy) entries
  /// belong to the all-time window only.
  pub fn contains(&self, entry: &CanonicalWorklogEntry) -> bool {
    match self {
      Window::All => true,
      Window::Month { ym } => entry.month.as_deref() == Some(ym.as_str()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry_in(month: Option<&str>) -> CanonicalWorklogEntry {
    CanonicalWorklogEntry {
      person: "A".into(),
      task_key: "T-1".into(),
      task_summary: "".into(),
      date: month.map(|m| format!("{m}-15").parse().unwrap()),
      hours: 1.0,
      creative_pct: None,
      creative_hours: 0.0,
      task_type: "".into(),
      status: "".into(),
      month: month.map(String::from),
    }
  }

  #[test]
  fn parse_month_normalizes() {
    assert_eq!(Window::parse_month("2025-8").unwrap(), Window::Month { ym: "2025-08".into() });
    assert_eq!(Window::parse_month("2025-12").unwrap().label(), "2025-12");
  }

  #[test]
  fn parse_month_rejects_invalid() {
    assert!(Window::parse_month("2025-13").is_err());
    assert!(Window::parse_month("2025-0").is_err());
    assert!(Window::parse_month("2025").is_err());
    assert!(Window::parse_month("August 2025").is_err());
  }

  #[test]
  fn month_window_filters_by_month() {
    let w = Window::parse_month("2025-08").unwrap();
    assert!(w.contains(&entry_in(Some("2025-08"))));
    assert!(!w.contains(&entry_in(Some("2025-09"))));
    assert!(!w.contains(&entry_in(None)));
  }

  #[test]
  fn all_window_includes_dateless_entries() {
    assert!(Window::All.contains(&entry_in(None)));
    assert!(Window::All.contains(&entry_in(Some("2025-08"))));
    assert_eq!(Window::All.label(), "all");
  }
}
