//! Configuration management for the reports pipeline

use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Runtime configuration shared by every pipeline step
#[derive(Debug, Clone)]
pub struct Config {
  /// Root folder for snapshot artifacts (source copies, silver/gold CSVs)
  pub data_dir: PathBuf,

  /// Root folder of the local table store
  pub store_dir: PathBuf,

  /// Skip every push to the table store and every notification
  pub dry_run: bool,

  /// Rows per upsert batch
  pub push_batch_size: usize,

  /// Retry attempts for table store pushes and notifications
  pub max_retries: u32,

  /// Initial retry delay in milliseconds, doubled per attempt
  pub retry_delay_ms: u64,

  /// Push notification service
  pub ntfy_base_url: String,

  /// Push notification topic
  pub ntfy_topic: Option<String>,

  /// Maximum per-algorithm notification messages per run
  pub max_notifications: usize,
}

impl Config {
  /// Load configuration from environment variables
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let data_dir = PathBuf::from(env::var("CPS_DATA_DIR").unwrap_or_else(|_| "./out".to_string()));
    let store_dir =
      PathBuf::from(env::var("CPS_STORE_DIR").unwrap_or_else(|_| "./store".to_string()));

    let dry_run = env::var("DRY_RUN").map(|v| v.eq_ignore_ascii_case("true")).unwrap_or(false);

    let push_batch_size = parse_var("CPS_PUSH_BATCH_SIZE", crate::DEFAULT_PUSH_BATCH_SIZE)?;
    if push_batch_size == 0 {
      return Err(Error::Config("CPS_PUSH_BATCH_SIZE must be positive".to_string()));
    }

    let max_retries = parse_var("CPS_MAX_RETRIES", 5)?;
    let retry_delay_ms = parse_var("CPS_RETRY_DELAY_MS", 500)?;
    let max_notifications = parse_var("CPS_MAX_NOTIFICATIONS", 5)?;

    let ntfy_base_url =
      env::var("NTFY_BASE_URL").unwrap_or_else(|_| crate::DEFAULT_NTFY_BASE_URL.to_string());
    let ntfy_topic = env::var("NTFY_TOPIC_NAME").ok().filter(|t| !t.trim().is_empty());

    Ok(Config {
      data_dir,
      store_dir,
      dry_run,
      push_batch_size,
      max_retries,
      retry_delay_ms,
      ntfy_base_url,
      ntfy_topic,
      max_notifications,
    })
  }

  /// Create a config with default values rooted at the given folders (for testing)
  pub fn with_dirs(data_dir: impl Into<PathBuf>, store_dir: impl Into<PathBuf>) -> Self {
    Config {
      data_dir: data_dir.into(),
      store_dir: store_dir.into(),
      dry_run: false,
      push_batch_size: crate::DEFAULT_PUSH_BATCH_SIZE,
      max_retries: 3,
      retry_delay_ms: 10,
      ntfy_base_url: crate::DEFAULT_NTFY_BASE_URL.to_string(),
      ntfy_topic: None,
      max_notifications: 5,
    }
  }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
  match env::var(name) {
    Ok(raw) => raw.trim().parse().map_err(|_| Error::Config(format!("Invalid {}: {}", name, raw))),
    Err(_) => Ok(default),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn test_config_from_env_defaults() {
    env::remove_var("CPS_PUSH_BATCH_SIZE");
    env::remove_var("DRY_RUN");
    env::remove_var("CPS_MAX_RETRIES");
    let config = Config::from_env().unwrap();
    assert_eq!(config.push_batch_size, 1000);
    assert_eq!(config.max_retries, 5);
    assert!(!config.dry_run);
  }

  #[test]
  #[serial]
  fn test_config_dry_run_flag() {
    env::set_var("DRY_RUN", "TRUE");
    let config = Config::from_env().unwrap();
    assert!(config.dry_run);
    env::remove_var("DRY_RUN");
  }

  #[test]
  #[serial]
  fn test_config_rejects_invalid_batch_size() {
    env::set_var("CPS_PUSH_BATCH_SIZE", "lots");
    let err = Config::from_env().unwrap_err();
    assert!(err.to_string().contains("CPS_PUSH_BATCH_SIZE"));

    env::set_var("CPS_PUSH_BATCH_SIZE", "0");
    assert!(Config::from_env().is_err());
    env::remove_var("CPS_PUSH_BATCH_SIZE");
  }

  #[test]
  fn test_config_with_dirs() {
    let config = Config::with_dirs("/tmp/out", "/tmp/store");
    assert_eq!(config.data_dir, PathBuf::from("/tmp/out"));
    assert_eq!(config.store_dir, PathBuf::from("/tmp/store"));
    assert!(config.ntfy_topic.is_none());
  }
}
