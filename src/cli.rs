use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::cost::DEFAULT_STANDARD_MONTHLY_HOURS;
use crate::render::CostRequest;
use crate::util;
use crate::window::Window;

#[derive(Parser, Debug)]
#[command(
    name = "worklog-cost-report",
    version,
    about = "Aggregate worklog exports and allocate labor cost to JSON",
    long_about = None
)]
pub struct Cli {
  /// Worklog export to read (JSON array of rows)
  #[arg(long)]
  pub input: Option<PathBuf>,

  /// Treat the input as the legacy hierarchical report (Level 0/1/2 rows)
  #[arg(long)]
  pub legacy: bool,

  /// Restrict the report to one calendar month, e.g. 2025-08 (default: all time)
  #[arg(long)]
  pub month: Option<String>,

  /// Person to compute a cost allocation for; must be paired with --gross
  #[arg(long)]
  pub person: Option<String>,

  /// Gross monthly compensation for --person; must be paired with --person
  #[arg(long)]
  pub gross: Option<f64>,

  /// Standard working hours per month used to derive the hourly rate
  #[arg(long, default_value_t = DEFAULT_STANDARD_MONTHLY_HOURS)]
  pub standard_hours: f64,

  /// Output location: file path, or "-" for stdout
  #[arg(long, default_value = "-")]
  pub out: String,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

#[derive(Debug)]
pub struct EffectiveConfig {
  pub input: PathBuf,
  pub source_label: String, // absolute path for stability
  pub legacy: bool,
  pub window: Window,
  pub out: String,
  pub cost: Option<CostRequest>,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let Some(input) = cli.input else {
    bail!("--input is required");
  };

  let window = match &cli.month {
    Some(ym) => Window::parse_month(ym)?,
    None => Window::All,
  };

  // Cost allocation needs both halves of the request.
  let cost = match (&cli.person, cli.gross) {
    (Some(person), Some(gross)) => {
      if gross <= 0.0 {
        bail!("--gross must be positive");
      }
      if cli.standard_hours <= 0.0 {
        bail!("--standard-hours must be positive");
      }
      Some(CostRequest {
        person: person.clone(),
        gross_compensation: gross,
        standard_monthly_hours: cli.standard_hours,
      })
    }
    (None, None) => None,
    _ => bail!("cost allocation needs both --person and --gross"),
  };

  let source_label = util::canonicalize_lossy(&input);

  Ok(EffectiveConfig { input, source_label, legacy: cli.legacy, window, out: cli.out, cost })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn base_cli() -> Cli {
    Cli {
      input: Some(PathBuf::from("rows.json")),
      legacy: false,
      month: None,
      person: None,
      gross: None,
      standard_hours: DEFAULT_STANDARD_MONTHLY_HOURS,
      out: "-".into(),
      gen_man: false,
    }
  }

  #[test]
  fn defaults_to_all_time_window() {
    let cfg = normalize(base_cli()).unwrap();
    assert_eq!(cfg.window, Window::All);
    assert!(cfg.cost.is_none());
    assert!(!cfg.legacy);
  }

  #[test]
  fn month_flag_selects_month_window() {
    let mut cli = base_cli();
    cli.month = Some("2025-08".into());
    let cfg = normalize(cli).unwrap();
    assert_eq!(cfg.window, Window::Month { ym: "2025-08".into() });
  }

  #[test]
  fn missing_input_is_an_error() {
    let mut cli = base_cli();
    cli.input = None;
    assert!(normalize(cli).is_err());
  }

  #[test]
  fn cost_flags_must_come_in_pairs() {
    let mut cli = base_cli();
    cli.person = Some("Jan".into());
    assert!(normalize(cli).is_err());

    let mut cli = base_cli();
    cli.gross = Some(16000.0);
    assert!(normalize(cli).is_err());

    let mut cli = base_cli();
    cli.person = Some("Jan".into());
    cli.gross = Some(16000.0);
    let cfg = normalize(cli).unwrap();
    let cost = cfg.cost.unwrap();
    assert_eq!(cost.standard_monthly_hours, DEFAULT_STANDARD_MONTHLY_HOURS);
  }

  #[test]
  fn nonpositive_amounts_are_rejected() {
    let mut cli = base_cli();
    cli.person = Some("Jan".into());
    cli.gross = Some(0.0);
    assert!(normalize(cli).is_err());

    let mut cli = base_cli();
    cli.person = Some("Jan".into());
    cli.gross = Some(16000.0);
    cli.standard_hours = 0.0;
    assert!(normalize(cli).is_err());
  }
}
