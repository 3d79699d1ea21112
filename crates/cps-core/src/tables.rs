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

//! Registry of every table the pipeline reads or writes.
//!
//! Each [`TableId`] carries its schema and artifact location, so adding a
//! table means adding one variant and the compiler points at every match
//! that needs updating.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;
use crate::schema::{FieldSpec, FieldType, TableSchema};
use crate::types::MinerType;

/// Which processing layer a table belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableLayer {
  /// Raw per-source scrape output
  Source,
  /// Cross-source stacked and normalized entities
  Silver,
  /// Aggregated summaries
  Gold,
  /// Bookkeeping tables (notification history)
  Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableId {
  Crypto51Coins,
  CryptodelverCoins,
  CryptoslateCoins,
  MinerstatCoins,
  MiningnowCoins,
  MiningnowAsics,
  WhattomineCoins,
  WhattomineMiners,
  WheretomineCoins,
  SilverStackedCoins,
  SilverStackedMiners,
  GoldAlgorithms,
  NotifyLogNewAlgorithms,
}

impl TableId {
  pub const ALL: [TableId; 13] = [
    TableId::Crypto51Coins,
    TableId::CryptodelverCoins,
    TableId::CryptoslateCoins,
    TableId::MinerstatCoins,
    TableId::MiningnowCoins,
    TableId::MiningnowAsics,
    TableId::WhattomineCoins,
    TableId::WhattomineMiners,
    TableId::WheretomineCoins,
    TableId::SilverStackedCoins,
    TableId::SilverStackedMiners,
    TableId::GoldAlgorithms,
    TableId::NotifyLogNewAlgorithms,
  ];

  pub fn name(&self) -> &'static str {
    match self {
      TableId::Crypto51Coins => "crypto51_coins",
      TableId::CryptodelverCoins => "cryptodelver_coins",
      TableId::CryptoslateCoins => "cryptoslate_coins",
      TableId::MinerstatCoins => "minerstat_coins",
      TableId::MiningnowCoins => "miningnow_coins",
      TableId::MiningnowAsics => "miningnow_asics",
      TableId::WhattomineCoins => "whattomine_coins",
      TableId::WhattomineMiners => "whattomine_miners",
      TableId::WheretomineCoins => "wheretomine_coins",
      TableId::SilverStackedCoins => "silver_stacked_coins",
      TableId::SilverStackedMiners => "silver_stacked_miners",
      TableId::GoldAlgorithms => "gold_algorithms",
      TableId::NotifyLogNewAlgorithms => "notify_log_new_algorithms",
    }
  }

  pub fn layer(&self) -> TableLayer {
    match self {
      TableId::SilverStackedCoins | TableId::SilverStackedMiners => TableLayer::Silver,
      TableId::GoldAlgorithms => TableLayer::Gold,
      TableId::NotifyLogNewAlgorithms => TableLayer::Log,
      _ => TableLayer::Source,
    }
  }

  pub fn schema(&self) -> &'static TableSchema {
    match self {
      TableId::Crypto51Coins => &CRYPTO51_COINS,
      TableId::CryptodelverCoins => &CRYPTODELVER_COINS,
      TableId::CryptoslateCoins => &CRYPTOSLATE_COINS,
      TableId::MinerstatCoins => &MINERSTAT_COINS,
      TableId::MiningnowCoins => &MININGNOW_COINS,
      TableId::MiningnowAsics => &MININGNOW_ASICS,
      TableId::WhattomineCoins => &WHATTOMINE_COINS,
      TableId::WhattomineMiners => &WHATTOMINE_MINERS,
      TableId::WheretomineCoins => &WHERETOMINE_COINS,
      TableId::SilverStackedCoins => &SILVER_STACKED_COINS,
      TableId::SilverStackedMiners => &SILVER_STACKED_MINERS,
      TableId::GoldAlgorithms => &GOLD_ALGORITHMS,
      TableId::NotifyLogNewAlgorithms => &NOTIFY_LOG_NEW_ALGORITHMS,
    }
  }

  /// Snapshot CSV location below the data folder
  pub fn artifact_path(&self, data_dir: &Path) -> PathBuf {
    let file = format!("{}.csv", self.name());
    match self.layer() {
      TableLayer::Source => data_dir.join("sources").join(file),
      TableLayer::Silver | TableLayer::Gold => data_dir.join("reports").join(self.name()).join(file),
      TableLayer::Log => data_dir.join("notify").join(file),
    }
  }

  /// Rows absent from the latest snapshot are deleted from the store
  pub fn prunes_absent_rows(&self) -> bool {
    matches!(self, TableId::GoldAlgorithms)
  }

  pub fn source_tables() -> impl Iterator<Item = TableId> {
    TableId::ALL.into_iter().filter(|t| t.layer() == TableLayer::Source)
  }

  pub fn silver_tables() -> impl Iterator<Item = TableId> {
    TableId::ALL.into_iter().filter(|t| t.layer() == TableLayer::Silver)
  }
}

impl fmt::Display for TableId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}

impl FromStr for TableId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    TableId::ALL
      .into_iter()
      .find(|t| t.name() == s.trim())
      .ok_or_else(|| Error::UnknownVariant { kind: "table", value: s.to_string() })
  }
}

const SOURCE_SITES: &[&str] =
  &["crypto51", "cryptodelver", "cryptoslate", "minerstat", "miningnow", "whattomine", "wheretomine"];
const MINER_TYPES: &[&str] = &MinerType::LABELS;

use FieldType::{Date, Datetime, Enum, Float64, UInt32, UInt64};

const fn text(name: &'static str) -> FieldSpec {
  FieldSpec::new(name, FieldType::String)
}

static CRYPTO51_COINS: TableSchema = TableSchema {
  table: TableId::Crypto51Coins,
  fields: &[
    text("coin_name").primary_key().length(1, 100),
    text("coin_symbol").length(1, 100),
    text("algorithm").length(1, 100),
    text("url").length(1, 500),
    FieldSpec::new("created_at", Datetime).required(),
  ],
};

static CRYPTODELVER_COINS: TableSchema = TableSchema {
  table: TableId::CryptodelverCoins,
  fields: &[
    text("coin_slug").primary_key().length(1, 100),
    text("coin_name").required().length(1, 100),
    text("algo_name").length(1, 100),
    FieldSpec::new("market_cap_usd", UInt64),
    FieldSpec::new("volume_usd", UInt64),
    text("coin_url").length(1, 500),
    FieldSpec::new("created_at", Datetime).required(),
  ],
};

static CRYPTOSLATE_COINS: TableSchema = TableSchema {
  table: TableId::CryptoslateCoins,
  fields: &[
    text("coin_slug").primary_key().length(1, 100),
    text("coin_name").required().length(1, 100),
    text("hash_algo").length(1, 100),
    FieldSpec::new("market_cap_usd", UInt64),
    text("url").length(1, 500),
    FieldSpec::new("earliest_logo_date", Date),
    FieldSpec::new("earliest_year_in_description", UInt32),
    FieldSpec::new("created_at", Datetime).required(),
  ],
};

static MINERSTAT_COINS: TableSchema = TableSchema {
  table: TableId::MinerstatCoins,
  fields: &[
    text("coin_slug").primary_key().length(1, 100),
    text("reported_algorithm").length(1, 100),
    FieldSpec::new("volume_usd", UInt64),
    FieldSpec::new("reported_founded", UInt32),
    FieldSpec::new("created_at", Datetime).required(),
  ],
};

static MININGNOW_COINS: TableSchema = TableSchema {
  table: TableId::MiningnowCoins,
  fields: &[
    text("coin_slug").primary_key().length(1, 100),
    text("coin_name").required().length(1, 100),
    text("ticker").length(1, 100),
    text("algorithm").length(1, 100),
    FieldSpec::new("market_cap_usd", UInt64),
    FieldSpec::new("volume_usd", UInt64),
    FieldSpec::new("founded_date", Date),
    FieldSpec::new("created_at", Datetime).required(),
  ],
};

static MININGNOW_ASICS: TableSchema = TableSchema {
  table: TableId::MiningnowAsics,
  fields: &[
    text("asic_slug").primary_key().length(1, 200),
    text("title").length(1, 200),
    text("algo_title").length(1, 200),
    FieldSpec::new("hash_rate", Float64),
    text("hash_rate_type_title").length(1, 200),
    text("cooling").length(1, 200),
    FieldSpec::new("best_price_usd", Float64),
    FieldSpec::new("power_watts", Float64),
    FieldSpec::new("weight_kg", Float64),
    text("announcement_date").length(1, 200),
    text("launch_date").length(1, 200),
    FieldSpec::new("created_at", Datetime).required(),
  ],
};

static WHATTOMINE_COINS: TableSchema = TableSchema {
  table: TableId::WhattomineCoins,
  fields: &[
    FieldSpec::new("whattomine_id", UInt32).primary_key(),
    text("coin_name").required().length(1, 100),
    text("tag").length(1, 100),
    text("algorithm").length(1, 100),
    FieldSpec::new("market_cap_usd", Float64),
    FieldSpec::new("created_at", Datetime).required(),
  ],
};

static WHATTOMINE_MINERS: TableSchema = TableSchema {
  table: TableId::WhattomineMiners,
  fields: &[
    text("miner_name").primary_key().length(1, 200),
    text("algorithm_name").primary_key().length(1, 100),
    FieldSpec::new("miner_type", Enum(MINER_TYPES)).required(),
    FieldSpec::new("hashrate_hashes_per_second", Float64).required(),
    FieldSpec::new("power_watts", Float64),
    FieldSpec::new("release_date", Date),
    FieldSpec::new("created_at", Datetime).required(),
  ],
};

static WHERETOMINE_COINS: TableSchema = TableSchema {
  table: TableId::WheretomineCoins,
  fields: &[
    text("coin_slug").primary_key().length(1, 100),
    text("coin_name").required().length(1, 100),
    text("coin_abbreviation").length(1, 100),
    text("algorithm_name").length(1, 100),
    FieldSpec::new("market_cap", Float64),
    FieldSpec::new("volume_24h", Float64),
    FieldSpec::new("created_at", Datetime).required(),
  ],
};

static SILVER_STACKED_COINS: TableSchema = TableSchema {
  table: TableId::SilverStackedCoins,
  fields: &[
    FieldSpec::new("source_site", Enum(SOURCE_SITES)).primary_key().length(1, 100),
    // Name when unique within the source, otherwise the slug.
    text("coin_unique_source_id").primary_key().length(1, 100),
    text("coin_name").required().length(1, 100),
    text("reported_coin_name").required().length(1, 100),
    text("algo_name").length(1, 100),
    text("reported_algo_name").length(1, 100),
    text("coin_url").length(1, 500),
    text("source_table").required().length(1, 100),
    text("coin_symbol").length(1, 100),
    FieldSpec::new("market_cap_usd", UInt64),
    FieldSpec::new("volume_24h_usd", UInt64),
    FieldSpec::new("founded_date", Date),
    FieldSpec::new("coin_created_at", Datetime).required(),
  ],
};

static SILVER_STACKED_MINERS: TableSchema = TableSchema {
  table: TableId::SilverStackedMiners,
  fields: &[
    FieldSpec::new("source_site", Enum(SOURCE_SITES)).primary_key().length(4, 100),
    text("miner_name").primary_key().length(2, 200),
    text("algo_name").primary_key().length(2, 100),
    text("reported_algo_name").required().length(2, 100),
    FieldSpec::new("miner_type", Enum(MINER_TYPES)).required(),
    text("source_table").required().length(4, 100),
    FieldSpec::new("hashrate_hashes_per_second", UInt64).required(),
    text("cooling_type").length(1, 200),
    FieldSpec::new("price_usd", Float64),
    FieldSpec::new("power_watts", Float64),
    FieldSpec::new("weight_kg", Float64),
    FieldSpec::new("announcement_date", Date),
    FieldSpec::new("launch_date", Date),
    FieldSpec::new("miner_created_at", Datetime).required(),
  ],
};

static GOLD_ALGORITHMS: TableSchema = TableSchema {
  table: TableId::GoldAlgorithms,
  fields: &[
    text("algo_name").primary_key().length(1, 100),
    text("source_sites_json").required().length(2, 1000),
    text("source_tables_json").required().length(2, 1000),
    FieldSpec::new("coin_count", UInt32).required(),
    FieldSpec::new("earliest_coin_created_at", Date).required(),
    FieldSpec::new("latest_coin_created_at", Date).required(),
    text("earliest_coin").required().length(1, 100),
    text("latest_coin").required().length(1, 100),
    FieldSpec::new("volume_24h_usd", UInt64),
    FieldSpec::new("market_cap_usd", UInt64),
    FieldSpec::new("asic_count", UInt32),
    FieldSpec::new("earliest_asic_announcement_date", Date),
    FieldSpec::new("earliest_asic_launch_date", Date),
    FieldSpec::new("earliest_asic_created_at", Date),
    FieldSpec::new("latest_asic_created_at", Date),
    text("reported_aliases_json").required().length(2, 1000),
    text("coin_names_json").required().length(2, 10_000),
  ],
};

static NOTIFY_LOG_NEW_ALGORITHMS: TableSchema = TableSchema {
  table: TableId::NotifyLogNewAlgorithms,
  fields: &[text("algo_name").primary_key().length(1, 100)],
};
