use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::RowError;
use crate::model::NumOrText;

/// Parse a logged time value into hours.
///
/// Accepts `H:MM` (hours may exceed 24), bare decimals ("10.5"), and decimals
/// with a trailing `h` unit marker. Empty, negative, or unparseable input is a
/// `RowError::BadTime`; the caller excludes the row and counts it, and nothing is
/// ever silently zeroed.
pub fn parse_time(raw: &str) -> Result<f64, RowError> {
  let bad = || RowError::BadTime { value: raw.to_string() };
  let s = raw.trim();

  if s.is_empty() {
    return Err(bad());
  }

  if let Some((h, m)) = s.split_once(':') {
    let hours: i64 = h.trim().parse().map_err(|_| bad())?;
    let minutes: u32 = m.trim().parse().map_err(|_| bad())?;
    if hours < 0 || minutes >= 60 {
      return Err(bad());
    }
    return Ok(hours as f64 + minutes as f64 / 60.0);
  }

  let num = s.strip_suffix('h').or_else(|| s.strip_suffix('H')).unwrap_or(s).trim();
  let value: f64 = num.parse().map_err(|_| bad())?;

  if !value.is_finite() || value < 0.0 {
    return Err(bad());
  }
  Ok(value)
}

/// Format hours back into `H:MM` for display strings ("10.5" -> "10:30").
pub fn hours_to_hm(hours: f64) -> String {
  if hours <= 0.0 || !hours.is_finite() {
    return "0:00".to_string();
  }
  let total_minutes = (hours * 60.0).round() as i64;
  format!("{}:{:02}", total_minutes / 60, total_minutes % 60)
}

static PERCENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)").unwrap());

/// Markers the export writes when nobody entered a percentage.
fn is_no_data_marker(s: &str) -> bool {
  s.is_empty()
    || s.contains("No Procent")
    || s.contains("Brak danych")
    || s.eq_ignore_ascii_case("none")
    || s.eq_ignore_ascii_case("nan")
}

/// Extract a creative-work percentage from a raw cell value.
///
/// Numeric input is range-checked directly. Textual input may carry a `%` sign
/// or surrounding words ("90 %"); the known "no data" markers yield `Ok(None)`.
/// Out-of-range values are `RowError::PercentOutOfRange`, never clamped, since
/// clamping would corrupt every downstream creative metric.
pub fn parse_percentage(value: &NumOrText) -> Result<Option<f64>, RowError> {
  let number = match value {
    NumOrText::Num(n) => *n,
    NumOrText::Text(s) => {
      let s = s.trim();
      if is_no_data_marker(s) {
        return Ok(None);
      }
      match s.parse::<f64>() {
        Ok(n) => n,
        Err(_) => match PERCENT_RE.captures(s).and_then(|c| c.get(1)) {
          Some(m) => m.as_str().parse::<f64>().unwrap_or(f64::NAN),
          None => return Ok(None),
        },
      }
    }
  };

  if !number.is_finite() || !(0.0..=100.0).contains(&number) {
    return Err(RowError::PercentOutOfRange { value: number });
  }
  Ok(Some(number))
}
