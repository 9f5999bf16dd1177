use anyhow::Result;
use clap::Parser;

mod aggregate;
mod category;
mod cli;
mod cost;
mod encoding;
mod errors;
mod ingest;
mod metrics;
mod model;
mod normalize;
mod render;
mod timeparse;
mod util;
mod window;

use crate::cli::{normalize, Cli};
use crate::render::ReportParams;

fn main() -> Result<()> {
  env_logger::init();
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: ingest and run the pipeline
  let params = ReportParams {
    source: cfg.source_label.clone(),
    window: cfg.window.clone(),
    cost: cfg.cost.clone(),
  };
  let report = if cfg.legacy {
    let rows = ingest::read_legacy_rows(&cfg.input)?;
    render::run_legacy_report(&rows, &params)?
  } else {
    let rows = ingest::read_worklog_rows(&cfg.input)?;
    render::run_worklog_report(&rows, &params)?
  };

  // Phase 3: emit
  render::write_report(&report, &cfg.out)
}
