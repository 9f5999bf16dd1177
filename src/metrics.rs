use crate::model::{AggregateRow, PersonSummary, TopTask};
use std::collections::BTreeMap;

/// Hours attributable to creative work: `hours × pct / 100`.
pub fn creative_hours(hours: f64, creative_pct: f64) -> f64 {
  hours * creative_pct / 100.0
}

/// Creative Score: `creative_hours × pct / 100`, i.e. `hours × (pct/100)²`.
///
/// Quadratic in the percentage on purpose: the metric rewards the combination
/// of high volume AND high creativity over either alone. Ten routine hours
/// score below three highly-creative ones.
pub fn creative_score(creative_hours: f64, creative_pct: f64) -> f64 {
  creative_hours * creative_pct / 100.0
}

/// Roll aggregate rows up to one summary per person.
///
/// The weighted creative percentage and Creative Score only draw on tasks that
/// carry a percentage; coverage reports how many of the person's tasks do. The
/// top task is the highest-scoring one, or the longest when the person has no
/// creative data at all.
pub fn person_summaries(aggregates: &[AggregateRow]) -> Vec<PersonSummary> {
  let mut by_person: BTreeMap<&str, Vec<&AggregateRow>> = BTreeMap::new();
  for row in aggregates {
    by_person.entry(row.person.as_str()).or_default().push(row);
  }

  let mut summaries: Vec<PersonSummary> = by_person
    .into_iter()
    .map(|(person, rows)| {
      let task_count = rows.len();
      let entry_count: usize = rows.iter().map(|r| r.entry_count).sum();
      let total_hours: f64 = rows.iter().map(|r| r.total_hours).sum();
      let creative_hours: f64 = rows.iter().map(|r| r.creative_hours).sum();
      let creative_score: f64 = rows.iter().map(|r| r.creative_score).sum();

      let with_data: Vec<&&AggregateRow> =
        rows.iter().filter(|r| r.weighted_creative_pct.is_some()).collect();
      let hours_with_data: f64 = with_data.iter().map(|r| r.total_hours).sum();
      let weighted_creative_pct = if hours_with_data > 0.0 {
        let weighted_sum: f64 = with_data
          .iter()
          .map(|r| r.total_hours * r.weighted_creative_pct.unwrap_or(0.0))
          .sum();
        Some(weighted_sum / hours_with_data)
      } else if with_data.is_empty() {
        None
      } else {
        Some(0.0)
      };

      let coverage_pct = if task_count > 0 {
        with_data.len() as f64 / task_count as f64 * 100.0
      } else {
        0.0
      };

      PersonSummary {
        person: person.to_string(),
        entry_count,
        task_count,
        total_hours,
        creative_hours,
        weighted_creative_pct,
        coverage_pct,
        creative_score,
        top_task: top_task(&rows),
      }
    })
    .collect();

  // Highest Creative Score first, name as the stable tie-breaker.
  summaries.sort_by(|a, b| {
    b.creative_score.total_cmp(&a.creative_score).then_with(|| a.person.cmp(&b.person))
  });
  summaries
}

fn top_task(rows: &[&AggregateRow]) -> Option<TopTask> {
  let best_creative = rows
    .iter()
    .filter(|r| r.weighted_creative_pct.is_some())
    .max_by(|a, b| {
      a.creative_score.total_cmp(&b.creative_score).then_with(|| b.task_key.cmp(&a.task_key))
    });

  let (row, has_creative_data) = match best_creative {
    Some(row) => (row, true),
    // Nobody filled in percentages: fall back to the longest task.
    None => {
      let longest = rows.iter().max_by(|a, b| {
        a.total_hours.total_cmp(&b.total_hours).then_with(|| b.task_key.cmp(&a.task_key))
      })?;
      (longest, false)
    }
  };

  Some(TopTask {
    task_key: row.task_key.clone(),
    task_summary: row.task_summary.clone(),
    total_hours: row.total_hours,
    creative_score: if has_creative_data { row.creative_score } else { 0.0 },
    has_creative_data,
  })
}
