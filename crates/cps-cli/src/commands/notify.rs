use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use cps_core::Config;
use cps_reports::{
  check_and_notify, ArtifactStore, LocalTableSink, LogNotifier, Notifier, NtfyNotifier,
};
use tracing::{error, info};

#[derive(Args, Debug)]
pub struct NotifyArgs {
  /// Run continuously in a loop instead of once
  #[arg(short, long)]
  pub daemon: bool,

  /// Seconds between checks in daemon mode
  #[arg(long, default_value = "3600")]
  pub interval_secs: u64,
}

fn notifier(config: &Config) -> Result<Box<dyn Notifier>> {
  if config.dry_run {
    return Ok(Box::new(LogNotifier));
  }
  let notifier = NtfyNotifier::from_config(config).context("Cannot send notifications")?;
  info!("Sending notifications to {}", notifier.url());
  Ok(Box::new(notifier))
}

async fn check_once(config: &Config, notifier: &dyn Notifier) -> Result<()> {
  let store = ArtifactStore::new(&config.data_dir);
  let sink = LocalTableSink::new(&config.store_dir);
  let outcome = check_and_notify(config, &store, &sink, notifier).await?;
  info!(
    "{} new algorithm(s), {} message(s) sent",
    outcome.new_algorithms.len(),
    outcome.messages_sent
  );
  Ok(())
}

pub async fn execute(args: NotifyArgs, config: Config) -> Result<()> {
  let notifier = notifier(&config)?;

  if !args.daemon {
    return check_once(&config, notifier.as_ref()).await;
  }

  loop {
    if let Err(e) = check_once(&config, notifier.as_ref()).await {
      error!("Error during check: {:#}", e);
    }
    info!("Sleeping for {} seconds before next check...", args.interval_secs);
    tokio::time::sleep(Duration::from_secs(args.interval_secs)).await;
  }
}
