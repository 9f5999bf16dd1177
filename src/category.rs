use serde::{Deserialize, Serialize};
use std::fmt;

/// Task categories, in evaluation order. The order is part of the contract:
/// classification walks `KEYWORDS` top to bottom and the first category with a
/// matching keyword wins, so reordering changes results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskCategory {
  #[serde(rename = "Bug/Hotfix")]
  BugHotfix,
  #[serde(rename = "Code Review")]
  CodeReview,
  #[serde(rename = "Testing")]
  Testing,
  #[serde(rename = "Development")]
  Development,
  #[serde(rename = "Analysis/Design")]
  AnalysisDesign,
  #[serde(rename = "DevOps/Infrastructure")]
  DevOpsInfrastructure,
  #[serde(rename = "Training")]
  Training,
  #[serde(rename = "Administration/Support")]
  AdministrationSupport,
  #[serde(rename = "Meetings")]
  Meetings,
  #[serde(rename = "Other")]
  Other,
}

impl TaskCategory {
  pub fn label(&self) -> &'static str {
    match self {
      TaskCategory::BugHotfix => "Bug/Hotfix",
      TaskCategory::CodeReview => "Code Review",
      TaskCategory::Testing => "Testing",
      TaskCategory::Development => "Development",
      TaskCategory::AnalysisDesign => "Analysis/Design",
      TaskCategory::DevOpsInfrastructure => "DevOps/Infrastructure",
      TaskCategory::Training => "Training",
      TaskCategory::AdministrationSupport => "Administration/Support",
      TaskCategory::Meetings => "Meetings",
      TaskCategory::Other => "Other",
    }
  }

  /// All categories in evaluation order, `Other` last.
  pub const ALL: &'static [TaskCategory] = &[
    TaskCategory::BugHotfix,
    TaskCategory::CodeReview,
    TaskCategory::Testing,
    TaskCategory::Development,
    TaskCategory::AnalysisDesign,
    TaskCategory::DevOpsInfrastructure,
    TaskCategory::Training,
    TaskCategory::AdministrationSupport,
    TaskCategory::Meetings,
    TaskCategory::Other,
  ];
}

impl fmt::Display for TaskCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

// Keyword table, Polish and English mixed as in the source data. A static
// ordered slice, never a map: iteration order is the tie-breaker.
static KEYWORDS: &[(TaskCategory, &[&str])] = &[
  (
    TaskCategory::BugHotfix,
    &[
      "bug", "hotfix", "crash", "błąd", "error", "problem z", "niezgodność", "uszkodz", "awaria",
      "napr", "fix",
    ],
  ),
  (
    TaskCategory::CodeReview,
    &["review", "pull request", "pr ", "feedback code", "sprawdzenie kodu", "code review"],
  ),
  (
    TaskCategory::Testing,
    &["test", "qa", "validation", "weryfikacja", "acceptance", "e2e", "unit", "testowani", "testy"],
  ),
  (
    TaskCategory::Development,
    &[
      "feature", "implement", "develop", "build", "funkcj", "kod", "refactor", "wdrożeni",
      "stworz", "endpoint", "komponent", "obsług", "logik", "edycj", "popraw", "ulepsz", "improve",
    ],
  ),
  (
    TaskCategory::AnalysisDesign,
    &[
      "analiz", "przegląd", "diagram", "design", "dokumentuj", "architektur", "zapoznani",
      "sprawdz", "research", "badani", "ocen", "koncepcj", "wymagan",
    ],
  ),
  (
    TaskCategory::DevOpsInfrastructure,
    &[
      "deploy", "deployment", "ci/cd", "ci ", "cd ", "pipeline", "gitlab-ci", "docker",
      "kubernetes", "infra", "serwer", "baza danych", "monitoring", "logging", "konfiguruj",
      "infrastructure", "środowisk",
    ],
  ),
  (
    TaskCategory::Training,
    &[
      "szkoleni", "webinar", "training", "workshop", "moduł", "kurs", "nauk", "edukacj",
      "certyfikacj", "copilot", "samoszkoleni",
    ],
  ),
  (
    TaskCategory::AdministrationSupport,
    &[
      "administracj", "support", "help desk", "help ", "incident", "zgłoszeni", "wsparci", "mail",
      "telefon", "biuro", "dostęp", "uprawni", "konto",
    ],
  ),
  (
    TaskCategory::Meetings,
    &[
      "spotkani", "meeting", "call", "standup", "daily", "retro", "retrospectiv", "planning",
      "refinement", "grooming", "sesj", "briefing", "sync", "kick-off", "komitet", "posiedzeni",
      "dyskusj", "scrum",
    ],
  ),
];

/// Classify a task by its summary and type text. Lower-cased substring match,
/// first category in table order wins, no match falls through to `Other`.
pub fn categorize(summary: &str, task_type: &str) -> TaskCategory {
  let haystack = format!("{} {}", summary, task_type).to_lowercase();

  for (category, keywords) in KEYWORDS {
    if keywords.iter().any(|kw| haystack.contains(kw)) {
      return *category;
    }
  }
  TaskCategory::Other
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn matches_english_and_polish_keywords() {
    assert_eq!(categorize("Fix login crash", ""), TaskCategory::BugHotfix);
    assert_eq!(categorize("Naprawa błędu w module płatności", ""), TaskCategory::BugHotfix);
    assert_eq!(categorize("Code review sprintu", ""), TaskCategory::CodeReview);
    assert_eq!(categorize("Testy e2e koszyka", ""), TaskCategory::Testing);
    assert_eq!(categorize("Implement export endpoint", ""), TaskCategory::Development);
    assert_eq!(categorize("Analiza wymagań klienta", ""), TaskCategory::AnalysisDesign);
    assert_eq!(categorize("Deployment na serwer produkcyjny", ""), TaskCategory::DevOpsInfrastructure);
    assert_eq!(categorize("Szkolenie z Copilota", ""), TaskCategory::Training);
    assert_eq!(categorize("Obsługa zgłoszenia help desk", ""), TaskCategory::Development); // "obsług" wins first
    assert_eq!(categorize("Daily standup", ""), TaskCategory::Meetings);
  }

  #[test]
  fn task_type_participates_in_matching() {
    assert_eq!(categorize("PROJ-1", "Bug"), TaskCategory::BugHotfix);
  }

  #[test]
  fn unmatched_falls_through_to_other() {
    assert_eq!(categorize("zzz", ""), TaskCategory::Other);
    assert_eq!(categorize("", ""), TaskCategory::Other);
  }

  #[test]
  fn first_match_in_table_order_wins() {
    // "fix" (Bug/Hotfix) appears before "implement" (Development) in the table.
    assert_eq!(categorize("Implement fix for exporter", ""), TaskCategory::BugHotfix);
    // Same input, same answer, every time.
    for _ in 0..100 {
      assert_eq!(categorize("Implement fix for exporter", ""), TaskCategory::BugHotfix);
    }
  }

  #[test]
  fn serializes_with_slash_labels() {
    let json = serde_json::to_string(&TaskCategory::BugHotfix).unwrap();
    assert_eq!(json, "\"Bug/Hotfix\"");
    assert_eq!(TaskCategory::BugHotfix.label(), "Bug/Hotfix");
  }
}
