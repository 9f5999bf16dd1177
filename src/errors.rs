// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed error kinds for row-level rejection and engine-level terminal conditions
// role: model/errors
// outputs: RowError (recovered per row, tallied), EngineError (surfaced to the caller)
// invariants:
// - RowError never aborts a run; every variant maps to a stable reason code for the rejection report
// - EngineError::EmptyInput is the only terminal condition the engine itself raises
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use thiserror::Error;

/// A problem with a single raw row. Rows carrying one of these are excluded
/// and counted; processing of the remaining rows always continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
  #[error("malformed time value {value:?}")]
  BadTime { value: String },

  #[error("malformed date value {value:?}")]
  BadDate { value: String },

  #[error("creative percentage {value} outside 0..=100")]
  PercentOutOfRange { value: f64 },

  #[error("missing mandatory field {field:?}")]
  MissingField { field: &'static str },
}

impl RowError {
  /// Stable short code used as the key in the rejection report's tally.
  pub fn reason_code(&self) -> String {
    match self {
      RowError::BadTime { .. } => "parse/time".to_string(),
      RowError::BadDate { .. } => "parse/date".to_string(),
      RowError::PercentOutOfRange { .. } => "validation/percentage".to_string(),
      RowError::MissingField { field } => format!("validation/missing-{field}"),
    }
  }
}

#[derive(Error, Debug)]
pub enum EngineError {
  #[error("no valid worklog rows after normalization ({rejected} rejected)")]
  EmptyInput { rejected: usize },
}
