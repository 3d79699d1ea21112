//! Orchestration of the reports run: sources, silver tables, gold table.

use std::path::Path;
use std::sync::Arc;

use cps_core::{to_table_rows, Config, TableId, TableRecord};
use cps_models::{GoldAlgorithm, SilverCoin, SilverMiner};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::artifacts::{read_csv_rows, rows_to_records, ArtifactStore};
use crate::error::ReportResult;
use crate::gold_algorithms::build_gold_algorithms;
use crate::normalize::AlgorithmNormalizer;
use crate::silver_coins::build_silver_coins;
use crate::silver_miners::build_silver_miners;
use crate::sink::{push_table, PushOptions, PushStats, TableSink};

/// Row counts of a full run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
  pub source_tables: usize,
  pub silver_coins: usize,
  pub silver_miners: usize,
  pub gold_algorithms: usize,
}

pub struct ReportsPipeline {
  config: Config,
  store: ArtifactStore,
  sink: Arc<dyn TableSink>,
  normalizer: AlgorithmNormalizer,
  push_options: PushOptions,
}

impl ReportsPipeline {
  /// Pipeline with the builtin alias table
  pub fn new(config: Config, sink: Arc<dyn TableSink>) -> ReportResult<Self> {
    let normalizer = AlgorithmNormalizer::builtin()?;
    Ok(Self::with_normalizer(config, sink, normalizer))
  }

  pub fn with_normalizer(config: Config, sink: Arc<dyn TableSink>, normalizer: AlgorithmNormalizer) -> Self {
    let store = ArtifactStore::new(&config.data_dir);
    let push_options = PushOptions::from_config(&config);
    Self { config, store, sink, normalizer, push_options }
  }

  pub fn with_push_options(mut self, push_options: PushOptions) -> Self {
    self.push_options = push_options;
    self
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn store(&self) -> &ArtifactStore {
    &self.store
  }

  pub fn normalizer(&self) -> &AlgorithmNormalizer {
    &self.normalizer
  }

  /// Copy every raw source table from the sink into local snapshots.
  ///
  /// Tables the sink does not have are skipped, and any stale snapshot of
  /// them is removed so it cannot leak into this run.
  pub async fn fetch_source_tables(&self) -> ReportResult<usize> {
    let mut fetched = 0;
    for table in TableId::source_tables() {
      match self.sink.read_table(table).await? {
        Some(rows) => {
          let rows = rows.project(table.schema())?;
          self.store.write_rows(table, &rows)?;
          fetched += 1;
        }
        None => {
          warn!("{} is not in the table store, skipping", table);
          self.store.remove(table)?;
        }
      }
    }
    info!("Fetched {} source tables", fetched);
    Ok(fetched)
  }

  pub fn run_silver_coins(&self) -> ReportResult<Vec<SilverCoin>> {
    info!("🪙 Stacking silver coins");
    build_silver_coins(&self.store, &self.normalizer)
  }

  pub fn run_silver_miners(&self) -> ReportResult<Vec<SilverMiner>> {
    info!("⛏️ Stacking silver miners");
    build_silver_miners(&self.store, &self.normalizer)
  }

  /// Validate and upsert typed records into their table
  pub async fn push_records<R: TableRecord>(&self, records: &[R]) -> ReportResult<PushStats> {
    push_table(self.sink.as_ref(), R::TABLE, &to_table_rows(records), &self.push_options).await
  }

  /// Parse a CSV with the table's schema and push it.
  ///
  /// This is how scraper output enters the store.
  pub async fn import_csv(&self, table: TableId, path: &Path) -> ReportResult<PushStats> {
    let rows = read_csv_rows(path, table.schema())?;
    info!("Importing {} rows into {} from {}", rows.len(), table, path.display());
    push_table(self.sink.as_ref(), table, &rows, &self.push_options).await
  }

  async fn read_silver<R: DeserializeOwned>(&self, table: TableId) -> ReportResult<Vec<R>> {
    if self.config.dry_run {
      info!("Dry run: reading {} from the local snapshot", table);
      return self.store.read_records(table);
    }

    match self.sink.read_table(table).await? {
      Some(rows) => rows_to_records(&rows.project(table.schema())?),
      None => {
        warn!("{} is not in the table store, using the local snapshot", table);
        self.store.read_records(table)
      }
    }
  }

  /// Aggregate the stored silver tables into `gold_algorithms` and push it
  pub async fn run_gold_algorithms(&self) -> ReportResult<Vec<GoldAlgorithm>> {
    info!("🥇 Building gold algorithms");
    let coins: Vec<SilverCoin> = self.read_silver(TableId::SilverStackedCoins).await?;
    let miners: Vec<SilverMiner> = self.read_silver(TableId::SilverStackedMiners).await?;

    let gold = build_gold_algorithms(&self.store, &coins, &miners)?;
    self.push_records(&gold).await?;
    Ok(gold)
  }

  /// Sources, both silver tables, then gold
  pub async fn run(&self) -> ReportResult<RunSummary> {
    let source_tables = self.fetch_source_tables().await?;

    let coins = self.run_silver_coins()?;
    let miners = self.run_silver_miners()?;
    self.push_records(&coins).await?;
    self.push_records(&miners).await?;

    let gold = self.run_gold_algorithms().await?;

    let summary = RunSummary {
      source_tables,
      silver_coins: coins.len(),
      silver_miners: miners.len(),
      gold_algorithms: gold.len(),
    };
    info!("✅ Reports run complete: {:?}", summary);
    Ok(summary)
  }
}
