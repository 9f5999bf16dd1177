// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Allocate one person's gross compensation across tasks and categories for a selected window
// role: processing/cost-allocation
// inputs: window-filtered CanonicalWorklogEntry slice, CostParams (person, gross, standard monthly hours, window)
// outputs: CostAllocation with per-category and per-task costs, extreme tasks, no-hours flag
// invariants:
// - Month window: total_cost == gross, category costs are proportional shares of gross
// - All window: costs are hours × hourly_rate; the two formulas are never merged
// - zero logged hours degrades to an all-zero allocation with no_hours_logged set, never a division error
// errors: none at this layer; parameter validation happens in cli::normalize
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use crate::aggregate::aggregate;
use crate::category::TaskCategory;
use crate::model::{CanonicalWorklogEntry, CategoryCost, CostAllocation, TaskCost, WindowInfo};
use crate::window::Window;

#[derive(Debug, Clone)]
pub struct CostParams {
  pub person: String,
  pub gross_compensation: f64,
  pub standard_monthly_hours: f64,
  pub window: Window,
}

pub const DEFAULT_STANDARD_MONTHLY_HOURS: f64 = 168.0;

/// Distribute `gross_compensation` across the person's tasks and categories.
///
/// `entries` must already be filtered to the window; this function filters to
/// the person. The two window variants carry different business semantics:
/// a specific month attributes the full monthly pay to that month's logged
/// work, while the all-time view values every hour at the derived rate. The
/// arithmetic is a match over `Window`, kept deliberately unmerged.
pub fn allocate(entries: &[CanonicalWorklogEntry], params: &CostParams) -> CostAllocation {
  let person_entries: Vec<CanonicalWorklogEntry> =
    entries.iter().filter(|e| e.person == params.person).cloned().collect();
  let tasks = aggregate(&person_entries);

  let total_hours: f64 = tasks.iter().map(|t| t.total_hours).sum();
  let total_creative_hours: f64 = tasks.iter().map(|t| t.creative_hours).sum();
  let gross = params.gross_compensation;
  let hourly_rate = gross / params.standard_monthly_hours;
  let no_hours_logged = total_hours <= 0.0;

  if no_hours_logged {
    log::warn!(
      "no hours logged for {:?} in window {}; reporting zero-cost allocation",
      params.person,
      params.window.label()
    );
    return zero_allocation(params, hourly_rate);
  }

  // Cost of a slice of hours under this window's formula.
  let cost_of = |hours: f64| -> f64 {
    match &params.window {
      Window::Month { .. } => hours / total_hours * gross,
      Window::All => hours * hourly_rate,
    }
  };

  let total_cost = match &params.window {
    // The full month's pay belongs to that month's work, whether the person
    // logged below or above the standard.
    Window::Month { .. } => gross,
    Window::All => total_hours * hourly_rate,
  };
  let creative_cost = cost_of(total_creative_hours);

  let mut cost_by_category: BTreeMap<String, CategoryCost> = BTreeMap::new();
  for task in &tasks {
    let slot = cost_by_category.entry(task.category.label().to_string()).or_insert(CategoryCost {
      hours: 0.0,
      creative_hours: 0.0,
      cost: 0.0,
      creative_cost: 0.0,
    });
    slot.hours += task.total_hours;
    slot.creative_hours += task.creative_hours;
  }
  for slot in cost_by_category.values_mut() {
    slot.cost = cost_of(slot.hours);
    slot.creative_cost = cost_of(slot.creative_hours);
  }

  let cost_by_task: BTreeMap<String, f64> =
    tasks.iter().map(|t| (t.task_key.clone(), cost_of(t.total_hours))).collect();

  // Extremes over tasks that actually carry hours; ties go to the
  // lexically-smaller task key.
  let mut most: Option<TaskCost> = None;
  let mut least: Option<TaskCost> = None;
  for task in tasks.iter().filter(|t| t.total_hours > 0.0) {
    let candidate = TaskCost {
      task_key: task.task_key.clone(),
      task_summary: task.task_summary.clone(),
      hours: task.total_hours,
      cost: cost_of(task.total_hours),
    };
    let wins_max = most.as_ref().map_or(true, |best| {
      candidate.cost > best.cost || (candidate.cost == best.cost && candidate.task_key < best.task_key)
    });
    if wins_max {
      most = Some(candidate.clone());
    }
    let wins_min = least.as_ref().map_or(true, |best| {
      candidate.cost < best.cost || (candidate.cost == best.cost && candidate.task_key < best.task_key)
    });
    if wins_min {
      least = Some(candidate);
    }
  }

  CostAllocation {
    person: params.person.clone(),
    window: WindowInfo { label: params.window.label() },
    gross_compensation: gross,
    standard_monthly_hours: params.standard_monthly_hours,
    hourly_rate,
    total_hours,
    total_cost,
    creative_cost,
    no_hours_logged: false,
    cost_by_category,
    cost_by_task,
    most_expensive_task: most,
    least_expensive_task: least,
  }
}

/// Every category present with an explicit zero, so the consumer sees a full
/// table rather than a hole.
fn zero_allocation(params: &CostParams, hourly_rate: f64) -> CostAllocation {
  let cost_by_category = TaskCategory::ALL
    .iter()
    .map(|c| {
      (
        c.label().to_string(),
        CategoryCost { hours: 0.0, creative_hours: 0.0, cost: 0.0, creative_cost: 0.0 },
      )
    })
    .collect();

  CostAllocation {
    person: params.person.clone(),
    window: WindowInfo { label: params.window.label() },
    gross_compensation: params.gross_compensation,
    standard_monthly_hours: params.standard_monthly_hours,
    hourly_rate,
    total_hours: 0.0,
    total_cost: 0.0,
    creative_cost: 0.0,
    no_hours_logged: true,
    cost_by_category,
    cost_by_task: BTreeMap::new(),
    most_expensive_task: None,
    least_expensive_task: None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(person: &str, key: &str, summary: &str, hours: f64, pct: Option<f64>) -> CanonicalWorklogEntry {
    CanonicalWorklogEntry {
      person: person.to_string(),
      task_key: key.to_string(),
      task_summary: summary.to_string(),
      date: Some("2025-08-04".parse().unwrap()),
      hours,
      creative_pct: pct,
      creative_hours: pct.map(|p| crate::metrics::creative_hours(hours, p)).unwrap_or(0.0),
      task_type: String::new(),
      status: String::new(),
      month: Some("2025-08".into()),
    }
  }

  fn params(window: Window) -> CostParams {
    CostParams {
      person: "Jan".into(),
      gross_compensation: 16000.0,
      standard_monthly_hours: DEFAULT_STANDARD_MONTHLY_HOURS,
      window,
    }
  }

  #[test]
  fn month_window_attributes_full_gross() {
    // 100h total, 40h in one testing task: category share = 40/100 × 16000.
    let entries = vec![
      entry("Jan", "T-1", "Testy e2e", 40.0, None),
      entry("Jan", "T-2", "Implement feature", 60.0, None),
    ];
    let alloc = allocate(&entries, &params(Window::Month { ym: "2025-08".into() }));

    assert_eq!(alloc.total_cost, 16000.0);
    assert!(!alloc.no_hours_logged);
    assert!((alloc.cost_by_category["Testing"].cost - 6400.0).abs() < 1e-9);
    assert!((alloc.cost_by_category["Development"].cost - 9600.0).abs() < 1e-9);
  }

  #[test]
  fn month_total_is_gross_regardless_of_hours_logged() {
    // Far fewer hours than the 168h standard: still the full month's pay.
    let entries = vec![entry("Jan", "T-1", "Fix crash", 10.0, None)];
    let alloc = allocate(&entries, &params(Window::Month { ym: "2025-08".into() }));
    assert_eq!(alloc.total_cost, 16000.0);
    assert!((alloc.cost_by_task["T-1"] - 16000.0).abs() < 1e-9);
  }

  #[test]
  fn all_time_window_values_hours_at_rate() {
    // rate = 16800/168 = 100; 250h total, 40h in the testing category.
    let mut p = params(Window::All);
    p.gross_compensation = 16800.0;
    let entries = vec![
      entry("Jan", "T-1", "Testy regresyjne", 40.0, None),
      entry("Jan", "T-2", "Implement exporter", 210.0, None),
    ];
    let alloc = allocate(&entries, &p);

    assert!((alloc.hourly_rate - 100.0).abs() < 1e-9);
    assert!((alloc.total_cost - 25000.0).abs() < 1e-9);
    assert!((alloc.cost_by_category["Testing"].cost - 4000.0).abs() < 1e-9);
    assert!((alloc.cost_by_category["Development"].cost - 21000.0).abs() < 1e-9);
  }

  #[test]
  fn creative_cost_follows_the_window_formula() {
    // Month: creative share of gross. 50% of 100h creative -> half the gross.
    let entries = vec![entry("Jan", "T-1", "praca", 100.0, Some(50.0))];
    let alloc = allocate(&entries, &params(Window::Month { ym: "2025-08".into() }));
    assert!((alloc.creative_cost - 8000.0).abs() < 1e-9);

    // All-time: creative hours × rate.
    let mut p = params(Window::All);
    p.gross_compensation = 16800.0;
    let alloc = allocate(&entries, &p);
    assert!((alloc.creative_cost - 5000.0).abs() < 1e-9);
  }

  #[test]
  fn zero_hours_window_flags_and_zeroes() {
    let entries: Vec<CanonicalWorklogEntry> = Vec::new();
    let alloc = allocate(&entries, &params(Window::Month { ym: "2025-08".into() }));

    assert!(alloc.no_hours_logged);
    assert_eq!(alloc.total_cost, 0.0);
    assert_eq!(alloc.cost_by_category.len(), TaskCategory::ALL.len());
    assert!(alloc.cost_by_category.values().all(|c| c.cost == 0.0));
    assert!(alloc.most_expensive_task.is_none());
    assert!(alloc.least_expensive_task.is_none());
  }

  #[test]
  fn other_peoples_entries_are_ignored() {
    let entries = vec![
      entry("Jan", "T-1", "praca", 10.0, None),
      entry("Anna", "T-1", "praca", 90.0, None),
    ];
    let alloc = allocate(&entries, &params(Window::Month { ym: "2025-08".into() }));
    assert_eq!(alloc.total_hours, 10.0);
    assert_eq!(alloc.total_cost, 16000.0);
  }

  #[test]
  fn extreme_tasks_break_ties_by_key() {
    let entries = vec![
      entry("Jan", "B-2", "praca", 5.0, None),
      entry("Jan", "A-1", "praca", 5.0, None),
      entry("Jan", "C-3", "praca", 1.0, None),
    ];
    let alloc = allocate(&entries, &params(Window::All));

    // A-1 and B-2 tie for most expensive; the lexically-smaller key wins.
    assert_eq!(alloc.most_expensive_task.as_ref().unwrap().task_key, "A-1");
    assert_eq!(alloc.least_expensive_task.as_ref().unwrap().task_key, "C-3");
  }
}
