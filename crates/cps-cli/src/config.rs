use anyhow::{Context, Result};
use cps_core::Config as CoreConfig;
use std::path::PathBuf;

/// Command line overrides applied on top of the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub data_dir: Option<PathBuf>,
  pub store_dir: Option<PathBuf>,
  pub dry_run: bool,
}

pub fn load(overrides: Overrides) -> Result<CoreConfig> {
  let mut config = CoreConfig::from_env().context("Failed to load configuration from environment")?;

  if let Some(data_dir) = overrides.data_dir {
    config.data_dir = data_dir;
  }
  if let Some(store_dir) = overrides.store_dir {
    config.store_dir = store_dir;
  }
  // --dry-run can only switch dry run on
  config.dry_run |= overrides.dry_run;

  Ok(config)
}
