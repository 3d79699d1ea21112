pub mod aliases;
pub mod notify;
pub mod reports;
pub mod tables;

use std::sync::Arc;

use anyhow::{Context, Result};
use cps_core::Config;
use cps_reports::{LocalTableSink, ReportsPipeline};

/// Pipeline over the local table store named by the config
pub fn build_pipeline(config: Config) -> Result<ReportsPipeline> {
  let sink = Arc::new(LocalTableSink::new(&config.store_dir));
  ReportsPipeline::new(config, sink).context("Failed to set up the reports pipeline")
}
