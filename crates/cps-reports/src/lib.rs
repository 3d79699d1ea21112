//! # cps-reports
//!
//! Reconciliation of scraped coin, algorithm and miner listings.
//!
//! This crate provides:
//! - Algorithm name normalization (regex pass, curated aliases) and coin name canonicalization
//! - One adapter per source table, mapping raw rows into shared coin and miner records
//! - The silver stackers (`silver_stacked_coins`, `silver_stacked_miners`)
//! - The gold aggregator (`gold_algorithms`) with alias diagnostics
//! - Snapshot artifacts, the table sink and upsert planning
//! - New algorithm notifications

pub mod artifacts;
pub mod error;
pub mod gold_algorithms;
pub mod normalize;
pub mod notify;
pub mod pipeline;
pub mod retry;
pub mod silver_coins;
pub mod silver_miners;
pub mod sink;
pub mod sources;

// Re-export commonly used types
pub use artifacts::ArtifactStore;
pub use error::{ReportError, ReportResult};
pub use gold_algorithms::{aggregate_algorithms, build_gold_algorithms, find_alias_opportunities};
pub use normalize::{AlgorithmNormalizer, AliasTable, build_coin_name_map, boring_form};
pub use notify::{LogNotifier, Notifier, NtfyNotifier, check_and_notify};
pub use pipeline::{ReportsPipeline, RunSummary};
pub use retry::RetryPolicy;
pub use silver_coins::{build_silver_coins, stack_coins};
pub use silver_miners::{build_silver_miners, stack_miners};
pub use sink::{LocalTableSink, PushOptions, PushStats, TableSink, push_table};

pub mod prelude {
  pub use crate::{
    AlgorithmNormalizer, ArtifactStore, LocalTableSink, PushOptions, ReportError, ReportResult,
    ReportsPipeline, TableSink,
  };
}
