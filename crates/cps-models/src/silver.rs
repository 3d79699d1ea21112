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

//! Silver layer: cross-source stacked coins and miners.

use chrono::{DateTime, NaiveDate, Utc};
use cps_core::{Cell, MinerType, SourceSite, TableId, TableRecord};
use serde::{Deserialize, Serialize};

/// One coin row as produced by a per-source adapter, before name normalization
#[derive(Debug, Clone, PartialEq)]
pub struct SourceCoinRecord {
  pub source_site: SourceSite,
  pub source_table: TableId,
  /// Name when unique within the source, otherwise a slug
  pub coin_unique_source_id: String,
  pub reported_coin_name: String,
  pub coin_symbol: Option<String>,
  pub reported_algo_name: Option<String>,
  pub coin_url: Option<String>,
  pub market_cap_usd: Option<u64>,
  pub volume_24h_usd: Option<u64>,
  pub founded_date: Option<NaiveDate>,
  /// When the record was first observed, not when the coin launched
  pub coin_created_at: DateTime<Utc>,
}

/// Row of `silver_stacked_coins`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SilverCoin {
  pub source_site: SourceSite,
  pub coin_unique_source_id: String,
  pub coin_name: String,
  pub reported_coin_name: String,
  pub algo_name: Option<String>,
  pub reported_algo_name: Option<String>,
  pub coin_url: Option<String>,
  pub source_table: String,
  pub coin_symbol: Option<String>,
  pub market_cap_usd: Option<u64>,
  pub volume_24h_usd: Option<u64>,
  pub founded_date: Option<NaiveDate>,
  pub coin_created_at: DateTime<Utc>,
}

impl SilverCoin {
  /// Attach the canonical coin and algorithm names to an adapter record
  pub fn from_source(record: SourceCoinRecord, coin_name: String, algo_name: Option<String>) -> Self {
    SilverCoin {
      source_site: record.source_site,
      coin_unique_source_id: record.coin_unique_source_id,
      coin_name,
      reported_coin_name: record.reported_coin_name,
      algo_name,
      reported_algo_name: record.reported_algo_name,
      coin_url: record.coin_url,
      source_table: record.source_table.name().to_string(),
      coin_symbol: record.coin_symbol,
      market_cap_usd: record.market_cap_usd,
      volume_24h_usd: record.volume_24h_usd,
      founded_date: record.founded_date,
      coin_created_at: record.coin_created_at,
    }
  }
}

impl TableRecord for SilverCoin {
  const TABLE: TableId = TableId::SilverStackedCoins;

  fn cells(&self) -> Vec<Cell> {
    vec![
      Cell::from(self.source_site.as_str()),
      Cell::from(self.coin_unique_source_id.as_str()),
      Cell::from(self.coin_name.as_str()),
      Cell::from(self.reported_coin_name.as_str()),
      Cell::from(self.algo_name.clone()),
      Cell::from(self.reported_algo_name.clone()),
      Cell::from(self.coin_url.clone()),
      Cell::from(self.source_table.as_str()),
      Cell::from(self.coin_symbol.clone()),
      Cell::from(self.market_cap_usd),
      Cell::from(self.volume_24h_usd),
      Cell::from(self.founded_date),
      Cell::from(self.coin_created_at),
    ]
  }
}

/// One miner performance report from an adapter, hash rate already in H/s
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMinerRecord {
  pub source_site: SourceSite,
  pub source_table: TableId,
  pub miner_name: String,
  pub reported_algo_name: String,
  pub miner_type: MinerType,
  pub hashrate_hashes_per_second: u64,
  pub cooling_type: Option<String>,
  pub price_usd: Option<f64>,
  pub power_watts: Option<f64>,
  pub weight_kg: Option<f64>,
  pub announcement_date: Option<NaiveDate>,
  pub launch_date: Option<NaiveDate>,
  pub miner_created_at: DateTime<Utc>,
}

/// Row of `silver_stacked_miners`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SilverMiner {
  pub source_site: SourceSite,
  pub miner_name: String,
  pub algo_name: String,
  pub reported_algo_name: String,
  pub miner_type: MinerType,
  pub source_table: String,
  pub hashrate_hashes_per_second: u64,
  pub cooling_type: Option<String>,
  pub price_usd: Option<f64>,
  pub power_watts: Option<f64>,
  pub weight_kg: Option<f64>,
  pub announcement_date: Option<NaiveDate>,
  pub launch_date: Option<NaiveDate>,
  pub miner_created_at: DateTime<Utc>,
}

impl SilverMiner {
  pub fn from_source(record: SourceMinerRecord, algo_name: String) -> Self {
    SilverMiner {
      source_site: record.source_site,
      miner_name: record.miner_name,
      algo_name,
      reported_algo_name: record.reported_algo_name,
      miner_type: record.miner_type,
      source_table: record.source_table.name().to_string(),
      hashrate_hashes_per_second: record.hashrate_hashes_per_second,
      cooling_type: record.cooling_type,
      price_usd: record.price_usd,
      power_watts: record.power_watts,
      weight_kg: record.weight_kg,
      announcement_date: record.announcement_date,
      launch_date: record.launch_date,
      miner_created_at: record.miner_created_at,
    }
  }
}

impl TableRecord for SilverMiner {
  const TABLE: TableId = TableId::SilverStackedMiners;

  fn cells(&self) -> Vec<Cell> {
    vec![
      Cell::from(self.source_site.as_str()),
      Cell::from(self.miner_name.as_str()),
      Cell::from(self.algo_name.as_str()),
      Cell::from(self.reported_algo_name.as_str()),
      Cell::from(self.miner_type.as_str()),
      Cell::from(self.source_table.as_str()),
      Cell::from(self.hashrate_hashes_per_second),
      Cell::from(self.cooling_type.clone()),
      Cell::from(self.price_usd),
      Cell::from(self.power_watts),
      Cell::from(self.weight_kg),
      Cell::from(self.announcement_date),
      Cell::from(self.launch_date),
      Cell::from(self.miner_created_at),
    ]
  }
}
