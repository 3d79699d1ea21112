/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Announce algorithms that appeared in `gold_algorithms` since the last check.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use cps_core::{to_table_rows, Cell, Config, TableId, TableRecord};
use cps_models::{GoldAlgorithm, NotifyLogEntry};
use reqwest::Client;
use tracing::{debug, error, info};

use crate::artifacts::{rows_to_records, ArtifactStore};
use crate::error::{ReportError, ReportResult};
use crate::retry::{retry_with_backoff, RetryPolicy};
use crate::sink::{push_table, PushOptions, TableSink};

const INDENT: &str = "    ";

/// Delivery channel for plain text notifications
#[async_trait]
pub trait Notifier: Send + Sync {
  async fn send(&self, message: &str) -> ReportResult<()>;
}

/// Posts each message as the body of a request to an ntfy topic
pub struct NtfyNotifier {
  client: Client,
  url: String,
}

impl NtfyNotifier {
  pub fn new(base_url: &str, topic: &str) -> ReportResult<Self> {
    let client = Client::builder().timeout(Duration::from_secs(25)).build()?;
    Ok(Self { client, url: format!("{}/{}", base_url.trim_end_matches('/'), topic) })
  }

  pub fn from_config(config: &Config) -> ReportResult<Self> {
    let topic = config
      .ntfy_topic
      .as_deref()
      .ok_or_else(|| ReportError::Configuration("NTFY_TOPIC_NAME is not set".to_string()))?;
    Self::new(&config.ntfy_base_url, topic)
  }

  pub fn url(&self) -> &str {
    &self.url
  }
}

#[async_trait]
impl Notifier for NtfyNotifier {
  async fn send(&self, message: &str) -> ReportResult<()> {
    let response = self.client.post(&self.url).body(message.to_string()).send().await?;

    if !response.status().is_success() {
      return Err(ReportError::Notification(format!(
        "ntfy returned status: {}",
        response.status()
      )));
    }

    info!("Notification sent: {}. {} bytes.", response.status().as_u16(), message.len());
    Ok(())
  }
}

/// Dry-run notifier: messages only reach the log
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
  async fn send(&self, message: &str) -> ReportResult<()> {
    info!("Dry run mode: not sending notification.\n{}", message);
    Ok(())
  }
}

/// Gold rows not yet present in the notification log, newest first
pub fn detect_new_algorithms(gold: &[GoldAlgorithm], known: &[NotifyLogEntry]) -> Vec<GoldAlgorithm> {
  let known: BTreeSet<&str> = known.iter().map(|k| k.algo_name.as_str()).collect();

  let mut new: Vec<GoldAlgorithm> =
    gold.iter().filter(|g| !known.contains(g.algo_name.as_str())).cloned().collect();
  new.sort_by(|a, b| {
    b.earliest_coin_created_at
      .cmp(&a.earliest_coin_created_at)
      .then_with(|| a.algo_name.cmp(&b.algo_name))
  });
  new
}

/// Coarse relative age, e.g. `"3 months ago"`
pub fn humanize_since(then: NaiveDate, today: NaiveDate) -> String {
  let days = (today - then).num_days();
  match days {
    d if d < 0 => "in the future".to_string(),
    0 => "today".to_string(),
    1 => "a day ago".to_string(),
    2..=29 => format!("{} days ago", days),
    30..=59 => "a month ago".to_string(),
    60..=364 => format!("{} months ago", days / 30),
    365..=729 => "a year ago".to_string(),
    _ => format!("{} years ago", days / 365),
  }
}

/// `1234567` as `"1,234,567"`
pub fn format_thousands(value: u64) -> String {
  let digits = value.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(c);
  }
  out
}

fn algorithm_message(row: &GoldAlgorithm, index: usize, total: usize, today: NaiveDate) -> String {
  let mut message = format!("🧠 New algorithm (#{}/{}): ✨ {} ✨\n", index, total, row.algo_name);
  message.push_str(&format!(
    "{INDENT}- Tracked since {}.\n",
    humanize_since(row.earliest_coin_created_at, today)
  ));

  match row.asic_count {
    Some(count) if count > 0 => message.push_str(&format!("{INDENT}- 🔴 ASIC Count: {}\n", count)),
    _ => message.push_str(&format!("{INDENT}- 🟢 No ASICs reported. You could be the first!\n")),
  }

  message.push_str("\nDetails:\n");
  let columns = GoldAlgorithm::TABLE.schema().column_names();
  for (column, cell) in columns.into_iter().zip(row.cells()) {
    if matches!(column, "algo_name" | "asic_count") {
      continue;
    }
    match cell {
      Cell::Null => {}
      Cell::UInt(value) => message.push_str(&format!("{INDENT}- {}: {}\n", column, format_thousands(value))),
      other => message.push_str(&format!("{INDENT}- {}: {}\n", column, other)),
    }
  }
  message
}

/// Intro message followed by one message for each of the first `max` algorithms
pub fn format_notifications(new: &[GoldAlgorithm], max: usize, today: NaiveDate) -> Vec<String> {
  if new.is_empty() {
    return Vec::new();
  }

  let mut intro = format!("🧠 Detected {} new algorithms! See following messages!", new.len());
  if new.len() > max {
    intro.push_str(&format!(" (only showing first {} of {})", max, new.len()));
  }

  let mut messages = vec![intro];
  messages.extend(
    new.iter().take(max).enumerate().map(|(i, row)| algorithm_message(row, i + 1, new.len(), today)),
  );
  messages
}

/// Send every message, logging failures instead of aborting. Returns the delivered count.
pub async fn send_all(notifier: &dyn Notifier, messages: &[String], retry: &RetryPolicy) -> usize {
  let mut delivered = 0;
  for message in messages {
    debug!("Notification message ({} bytes):\n{}", message.len(), message);
    match retry_with_backoff(retry, "send notification", move || notifier.send(message)).await {
      Ok(()) => delivered += 1,
      Err(e) => error!("Failed to send notification: {}", e),
    }
  }
  delivered
}

/// Result of one notification check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifyOutcome {
  pub new_algorithms: Vec<String>,
  pub messages_sent: usize,
}

/// Compare the gold table with the log, notify, then store the full algorithm list as the new log
pub async fn check_and_notify(
  config: &Config,
  store: &ArtifactStore,
  sink: &dyn TableSink,
  notifier: &dyn Notifier,
) -> ReportResult<NotifyOutcome> {
  info!("Starting notification check...");

  let gold_rows = sink
    .read_table(TableId::GoldAlgorithms)
    .await?
    .ok_or_else(|| ReportError::Sink("gold_algorithms is not in the table store".to_string()))?;
  let gold: Vec<GoldAlgorithm> = rows_to_records(&gold_rows.project(TableId::GoldAlgorithms.schema())?)?;

  let known: Vec<NotifyLogEntry> = match sink.read_table(TableId::NotifyLogNewAlgorithms).await? {
    Some(rows) => rows_to_records(&rows.project(TableId::NotifyLogNewAlgorithms.schema())?)?,
    None => Vec::new(),
  };

  let new = detect_new_algorithms(&gold, &known);
  let mut outcome = NotifyOutcome {
    new_algorithms: new.iter().map(|g| g.algo_name.clone()).collect(),
    messages_sent: 0,
  };

  if new.is_empty() {
    info!("No new algorithms detected.");
  } else {
    info!("Detected {} new algorithms: {:?}", new.len(), outcome.new_algorithms);
    let messages = format_notifications(&new, config.max_notifications, Utc::now().date_naive());
    outcome.messages_sent = send_all(notifier, &messages, &RetryPolicy::from_config(config)).await;
  }

  let mut log: Vec<NotifyLogEntry> = gold.iter().map(|g| NotifyLogEntry::new(g.algo_name.as_str())).collect();
  log.sort();
  log.dedup();
  store.ensure_valid(&log)?;
  store.write_records(&log)?;
  info!("Stored updated algorithm list.");

  push_table(sink, TableId::NotifyLogNewAlgorithms, &to_table_rows(&log), &PushOptions::from_config(config))
    .await?;
  Ok(outcome)
}
