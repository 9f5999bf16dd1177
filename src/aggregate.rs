// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Group canonical worklog entries into per-(person, task_key) aggregate rows
// role: processing/aggregation
// inputs: ordered CanonicalWorklogEntry slice
// outputs: AggregateRow table, deterministically ordered (person asc, hours desc, key asc)
// invariants:
// - grouping key is the (person, task_key) pair; task_key alone would collapse co-authored tasks and drop hours
// - sum(output total_hours) == sum(input hours) within float tolerance, always
// - zero-hour groups define the weighted percentage as 0, not a division error
// errors: none; aggregation of valid entries cannot fail
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::category::categorize;
use crate::metrics::creative_score;
use crate::model::{AggregateRow, CanonicalWorklogEntry};
use crate::timeparse::hours_to_hm;

#[derive(Default)]
struct Group {
  total_hours: f64,
  creative_hours: f64,
  weighted_numerator: f64,
  weighted_denominator: f64,
  has_pct: bool,
  entry_count: usize,
  // summary text -> (occurrences, first position seen)
  summaries: BTreeMap<String, (usize, usize)>,
  task_type: String,
  first_date: Option<NaiveDate>,
  last_date: Option<NaiveDate>,
  months: BTreeSet<String>,
}

impl Group {
  fn absorb(&mut self, entry: &CanonicalWorklogEntry, position: usize) {
    self.total_hours += entry.hours;
    self.creative_hours += entry.creative_hours;
    self.entry_count += 1;

    if let Some(pct) = entry.creative_pct {
      self.has_pct = true;
      self.weighted_numerator += entry.hours * pct;
      self.weighted_denominator += entry.hours;
    }

    if !entry.task_summary.is_empty() {
      let slot = self.summaries.entry(entry.task_summary.clone()).or_insert((0, position));
      slot.0 += 1;
    }
    if self.task_type.is_empty() && !entry.task_type.is_empty() {
      self.task_type = entry.task_type.clone();
    }

    if let Some(date) = entry.date {
      self.first_date = Some(self.first_date.map_or(date, |d| d.min(date)));
      self.last_date = Some(self.last_date.map_or(date, |d| d.max(date)));
    }
    if let Some(month) = &entry.month {
      self.months.insert(month.clone());
    }
  }

  /// Most frequent non-empty summary; ties go to the one seen first.
  fn representative_summary(&self) -> String {
    self
      .summaries
      .iter()
      .max_by(|(_, &(count_a, first_a)), (_, &(count_b, first_b))| {
        (count_a, std::cmp::Reverse(first_a)).cmp(&(count_b, std::cmp::Reverse(first_b)))
      })
      .map(|(text, _)| text.clone())
      .unwrap_or_default()
  }

  fn weighted_creative_pct(&self) -> Option<f64> {
    if !self.has_pct {
      return None;
    }
    if self.weighted_denominator > 0.0 {
      Some(self.weighted_numerator / self.weighted_denominator)
    } else {
      Some(0.0)
    }
  }
}

/// Aggregate canonical entries into one row per (person, task_key).
///
/// Hours are conserved exactly: every input hour lands in exactly one output
/// row. Output order is deterministic (person ascending, then total hours
/// descending, then task key) for reproducible export, though ordering is not
/// part of the aggregation contract itself.
pub fn aggregate(entries: &[CanonicalWorklogEntry]) -> Vec<AggregateRow> {
  let mut groups: BTreeMap<(String, String), Group> = BTreeMap::new();

  for (position, entry) in entries.iter().enumerate() {
    groups
      .entry((entry.person.clone(), entry.task_key.clone()))
      .or_default()
      .absorb(entry, position);
  }

  let mut rows: Vec<AggregateRow> = groups
    .into_iter()
    .map(|((person, task_key), group)| {
      let weighted = group.weighted_creative_pct();
      let task_summary = group.representative_summary();
      let category = categorize(&task_summary, &group.task_type);

      AggregateRow {
        person,
        task_key,
        task_summary,
        task_type: group.task_type.clone(),
        category,
        total_hours: group.total_hours,
        total_hours_hm: hours_to_hm(group.total_hours),
        weighted_creative_pct: weighted,
        creative_hours: group.creative_hours,
        creative_hours_hm: hours_to_hm(group.creative_hours),
        creative_score: creative_score(group.creative_hours, weighted.unwrap_or(0.0)),
        entry_count: group.entry_count,
        first_date: group.first_date,
        last_date: group.last_date,
        months: group.months.into_iter().collect(),
      }
    })
    .collect();

  rows.sort_by(|a, b| {
    a.person
      .cmp(&b.person)
      .then_with(|| b.total_hours.total_cmp(&a.total_hours))
      .then_with(|| a.task_key.cmp(&b.task_key))
  });
  rows
}
