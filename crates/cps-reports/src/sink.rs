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

//! Downstream table store: an idempotent upsert-by-primary-key target.
//!
//! [`push_table`] validates a snapshot, diffs it against what the sink holds
//! ([`plan_upsert`]) and applies the difference in batches. Only tables whose
//! [`TableId::prunes_absent_rows`] is set lose rows missing from the snapshot.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use cps_core::{validate_rows, Cell, Config, TableId, TableRows, TableSchema};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::error::{ReportError, ReportResult};
use crate::retry::{retry_with_backoff, RetryPolicy};

/// Storage backend holding the shared copy of every table
#[async_trait]
pub trait TableSink: Send + Sync {
  /// Current content of a table, `None` when the table was never written
  async fn read_table(&self, table: TableId) -> ReportResult<Option<TableRows>>;

  /// Insert or replace rows by primary key. Rows are in schema column order.
  async fn upsert_rows(&self, table: TableId, rows: &[Vec<Cell>]) -> ReportResult<()>;

  /// Delete rows by rendered primary key (see [`TableSchema::primary_key_of`])
  async fn delete_rows(&self, table: TableId, keys: &[String]) -> ReportResult<()>;

  /// Record the changes applied since the last commit
  async fn commit(&self, message: &str) -> ReportResult<()>;
}

/// Difference between the sink's copy of a table and a new snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpsertPlan {
  pub inserts: Vec<Vec<Cell>>,
  pub updates: Vec<Vec<Cell>>,
  pub deletes: Vec<String>,
  pub unchanged: usize,
}

impl UpsertPlan {
  pub fn is_empty(&self) -> bool {
    self.inserts.is_empty() && self.updates.is_empty() && self.deletes.is_empty()
  }
}

/// Diff `incoming` against `current` by primary key.
///
/// Float columns are left out of the change check: re-scraped floats differ
/// in the last digits on every run. Deletes are only planned when `prune` is set.
pub fn plan_upsert(
  schema: &TableSchema,
  current: &TableRows,
  incoming: &TableRows,
  prune: bool,
) -> UpsertPlan {
  let float_columns: HashSet<usize> = schema.float_columns().into_iter().collect();
  let comparable = |row: &[Cell]| -> Vec<Cell> {
    row
      .iter()
      .enumerate()
      .filter(|(idx, _)| !float_columns.contains(idx))
      .map(|(_, cell)| cell.clone())
      .collect()
  };

  let existing: HashMap<String, Vec<Cell>> =
    current.rows.iter().map(|row| (schema.primary_key_of(row), comparable(row))).collect();

  let mut plan = UpsertPlan::default();
  let mut incoming_keys = HashSet::with_capacity(incoming.len());

  for row in &incoming.rows {
    let key = schema.primary_key_of(row);
    match existing.get(&key) {
      None => plan.inserts.push(row.clone()),
      Some(old) if *old != comparable(row) => plan.updates.push(row.clone()),
      Some(_) => plan.unchanged += 1,
    }
    incoming_keys.insert(key);
  }

  if prune {
    let mut deletes: Vec<String> =
      existing.keys().filter(|key| !incoming_keys.contains(*key)).cloned().collect();
    deletes.sort();
    plan.deletes = deletes;
  }

  plan
}

/// How a snapshot is pushed
#[derive(Debug, Clone)]
pub struct PushOptions {
  pub batch_size: usize,
  pub dry_run: bool,
  pub retry: RetryPolicy,
  pub show_progress: bool,
}

impl Default for PushOptions {
  fn default() -> Self {
    Self {
      batch_size: cps_core::DEFAULT_PUSH_BATCH_SIZE,
      dry_run: false,
      retry: RetryPolicy::default(),
      show_progress: true,
    }
  }
}

impl PushOptions {
  pub fn from_config(config: &Config) -> Self {
    Self {
      batch_size: config.push_batch_size,
      dry_run: config.dry_run,
      retry: RetryPolicy::from_config(config),
      show_progress: true,
    }
  }
}

/// Outcome of one [`push_table`] call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushStats {
  pub inserted: usize,
  pub updated: usize,
  pub deleted: usize,
  pub unchanged: usize,
  pub batches: usize,
  pub dry_run: bool,
}

fn progress_bar(batches: usize, show: bool) -> ProgressBar {
  if !show {
    return ProgressBar::hidden();
  }
  let bar = ProgressBar::new(batches as u64);
  if let Ok(style) = ProgressStyle::with_template(
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
  ) {
    bar.set_style(style.progress_chars("#>-"));
  }
  bar
}

/// Validate a snapshot and upsert it into the sink.
///
/// Nothing is written when validation fails. A dry run stops after planning.
pub async fn push_table(
  sink: &dyn TableSink,
  table: TableId,
  rows: &TableRows,
  options: &PushOptions,
) -> ReportResult<PushStats> {
  let schema = table.schema();
  let rows = rows.project(schema)?;

  let violations = validate_rows(schema, &rows.rows);
  if let Some(first) = violations.first() {
    error!("Refusing to push {}: {} violation(s)", table, violations.len());
    return Err(ReportError::SchemaValidation {
      table,
      violation_count: violations.len(),
      first: first.to_string(),
    });
  }

  let current = retry_with_backoff(&options.retry, &format!("read {}", table), move || {
    sink.read_table(table)
  })
  .await?
  .map(|current| current.project(schema))
  .transpose()?
  .unwrap_or_else(|| TableRows::empty(schema));

  let plan = plan_upsert(schema, &current, &rows, table.prunes_absent_rows());
  let mut stats = PushStats {
    inserted: plan.inserts.len(),
    updated: plan.updates.len(),
    deleted: plan.deletes.len(),
    unchanged: plan.unchanged,
    batches: 0,
    dry_run: options.dry_run,
  };

  info!(
    "{}: {} inserts, {} updates, {} deletes, {} unchanged",
    table, stats.inserted, stats.updated, stats.deleted, stats.unchanged
  );

  if options.dry_run {
    info!("Dry run: not pushing {}", table);
    return Ok(stats);
  }
  if plan.is_empty() {
    debug!("{} is up to date", table);
    return Ok(stats);
  }

  let batch_size = options.batch_size.max(1);
  let changed: Vec<Vec<Cell>> = plan.inserts.into_iter().chain(plan.updates).collect();
  let total_batches = changed.len().div_ceil(batch_size);
  let bar = progress_bar(total_batches, options.show_progress);
  bar.set_message(format!("Upserting {}", table));

  for batch in changed.chunks(batch_size) {
    retry_with_backoff(&options.retry, &format!("upsert {}", table), move || {
      sink.upsert_rows(table, batch)
    })
    .await?;
    stats.batches += 1;
    bar.inc(1);
  }
  bar.finish_and_clear();

  if !plan.deletes.is_empty() {
    let deletes = plan.deletes.as_slice();
    retry_with_backoff(&options.retry, &format!("delete from {}", table), move || {
      sink.delete_rows(table, deletes)
    })
    .await?;
  }

  let message = format!(
    "Update {}: {} inserted, {} updated, {} deleted",
    table, stats.inserted, stats.updated, stats.deleted
  );
  let commit_message = message.as_str();
  retry_with_backoff(&options.retry, &format!("commit {}", table), move || {
    sink.commit(commit_message)
  })
  .await?;

  info!("Pushed {} in {} batch(es)", table, stats.batches);
  Ok(stats)
}

/// Sink backed by a folder: one JSON snapshot per table plus `commit.log`
pub struct LocalTableSink {
  root: PathBuf,
  lock: Mutex<()>,
}

impl LocalTableSink {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into(), lock: Mutex::new(()) }
  }

  pub fn table_path(&self, table: TableId) -> PathBuf {
    self.root.join(format!("{}.json", table.name()))
  }

  pub fn commit_log_path(&self) -> PathBuf {
    self.root.join("commit.log")
  }

  async fn load(&self, table: TableId) -> ReportResult<Option<TableRows>> {
    let path = self.table_path(table);
    match tokio::fs::read(&path).await {
      Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(ReportError::Sink(format!("{}: {}", path.display(), e))),
    }
  }

  async fn store(&self, table: TableId, rows: &TableRows) -> ReportResult<()> {
    tokio::fs::create_dir_all(&self.root).await?;
    let path = self.table_path(table);
    tokio::fs::write(&path, serde_json::to_vec(rows)?)
      .await
      .map_err(|e| ReportError::Sink(format!("{}: {}", path.display(), e)))
  }
}

#[async_trait]
impl TableSink for LocalTableSink {
  async fn read_table(&self, table: TableId) -> ReportResult<Option<TableRows>> {
    let _guard = self.lock.lock().await;
    self.load(table).await
  }

  async fn upsert_rows(&self, table: TableId, rows: &[Vec<Cell>]) -> ReportResult<()> {
    let _guard = self.lock.lock().await;
    let schema = table.schema();
    let mut current = match self.load(table).await? {
      Some(current) => current.project(schema)?,
      None => TableRows::empty(schema),
    };

    let mut positions: HashMap<String, usize> =
      current.rows.iter().enumerate().map(|(i, row)| (schema.primary_key_of(row), i)).collect();
    for row in rows {
      let key = schema.primary_key_of(row);
      match positions.get(&key) {
        Some(&idx) => current.rows[idx] = row.clone(),
        None => {
          positions.insert(key, current.rows.len());
          current.rows.push(row.clone());
        }
      }
    }

    self.store(table, &current).await
  }

  async fn delete_rows(&self, table: TableId, keys: &[String]) -> ReportResult<()> {
    let _guard = self.lock.lock().await;
    let schema = table.schema();
    let Some(mut current) = self.load(table).await? else {
      return Ok(());
    };

    let doomed: HashSet<&str> = keys.iter().map(String::as_str).collect();
    current.rows.retain(|row| !doomed.contains(schema.primary_key_of(row).as_str()));
    self.store(table, &current).await
  }

  async fn commit(&self, message: &str) -> ReportResult<()> {
    let _guard = self.lock.lock().await;
    tokio::fs::create_dir_all(&self.root).await?;
    let mut file = tokio::fs::OpenOptions::new()
      .create(true)
      .append(true)
      .open(self.commit_log_path())
      .await?;
    let line = format!("{}\t{}\n", Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true), message);
    file.write_all(line.as_bytes()).await?;
    file.flush().await?;
    Ok(())
  }
}
