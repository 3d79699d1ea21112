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

//! Raw per-source rows, restricted to the columns the silver stackers consume.

use chrono::{DateTime, NaiveDate, Utc};
use cps_core::{Cell, TableId, TableRecord};
use serde::{Deserialize, Serialize};

/// `crypto51_coins`: coins listed on the 51%-attack cost page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crypto51CoinRow {
  pub coin_name: String,
  pub coin_symbol: Option<String>,
  pub algorithm: Option<String>,
  pub url: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl TableRecord for Crypto51CoinRow {
  const TABLE: TableId = TableId::Crypto51Coins;

  fn cells(&self) -> Vec<Cell> {
    vec![
      Cell::from(self.coin_name.as_str()),
      Cell::from(self.coin_symbol.clone()),
      Cell::from(self.algorithm.clone()),
      Cell::from(self.url.clone()),
      Cell::from(self.created_at),
    ]
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptodelverCoinRow {
  pub coin_slug: String,
  pub coin_name: String,
  pub algo_name: Option<String>,
  pub market_cap_usd: Option<u64>,
  pub volume_usd: Option<u64>,
  pub coin_url: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl TableRecord for CryptodelverCoinRow {
  const TABLE: TableId = TableId::CryptodelverCoins;

  fn cells(&self) -> Vec<Cell> {
    vec![
      Cell::from(self.coin_slug.as_str()),
      Cell::from(self.coin_name.as_str()),
      Cell::from(self.algo_name.clone()),
      Cell::from(self.market_cap_usd),
      Cell::from(self.volume_usd),
      Cell::from(self.coin_url.clone()),
      Cell::from(self.created_at),
    ]
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoslateCoinRow {
  pub coin_slug: String,
  pub coin_name: String,
  pub hash_algo: Option<String>,
  pub market_cap_usd: Option<u64>,
  pub url: Option<String>,
  /// Date of the oldest archived logo, best proxy for the founding date
  pub earliest_logo_date: Option<NaiveDate>,
  /// Earliest four-digit year mentioned in the coin description
  pub earliest_year_in_description: Option<u32>,
  pub created_at: DateTime<Utc>,
}

impl TableRecord for CryptoslateCoinRow {
  const TABLE: TableId = TableId::CryptoslateCoins;

  fn cells(&self) -> Vec<Cell> {
    vec![
      Cell::from(self.coin_slug.as_str()),
      Cell::from(self.coin_name.as_str()),
      Cell::from(self.hash_algo.clone()),
      Cell::from(self.market_cap_usd),
      Cell::from(self.url.clone()),
      Cell::from(self.earliest_logo_date),
      Cell::from(self.earliest_year_in_description),
      Cell::from(self.created_at),
    ]
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinerstatCoinRow {
  pub coin_slug: String,
  pub reported_algorithm: Option<String>,
  pub volume_usd: Option<u64>,
  /// Founding year
  pub reported_founded: Option<u32>,
  pub created_at: DateTime<Utc>,
}

impl TableRecord for MinerstatCoinRow {
  const TABLE: TableId = TableId::MinerstatCoins;

  fn cells(&self) -> Vec<Cell> {
    vec![
      Cell::from(self.coin_slug.as_str()),
      Cell::from(self.reported_algorithm.clone()),
      Cell::from(self.volume_usd),
      Cell::from(self.reported_founded),
      Cell::from(self.created_at),
    ]
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningnowCoinRow {
  pub coin_slug: String,
  pub coin_name: String,
  pub ticker: Option<String>,
  pub algorithm: Option<String>,
  pub market_cap_usd: Option<u64>,
  pub volume_usd: Option<u64>,
  pub founded_date: Option<NaiveDate>,
  pub created_at: DateTime<Utc>,
}

impl TableRecord for MiningnowCoinRow {
  const TABLE: TableId = TableId::MiningnowCoins;

  fn cells(&self) -> Vec<Cell> {
    vec![
      Cell::from(self.coin_slug.as_str()),
      Cell::from(self.coin_name.as_str()),
      Cell::from(self.ticker.clone()),
      Cell::from(self.algorithm.clone()),
      Cell::from(self.market_cap_usd),
      Cell::from(self.volume_usd),
      Cell::from(self.founded_date),
      Cell::from(self.created_at),
    ]
  }
}

/// `miningnow_asics`: one row per product listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningnowAsicRow {
  pub asic_slug: String,
  pub title: Option<String>,
  pub algo_title: Option<String>,
  pub hash_rate: Option<f64>,
  /// Unit suffix of `hash_rate`, e.g. `TH/s`
  pub hash_rate_type_title: Option<String>,
  pub cooling: Option<String>,
  pub best_price_usd: Option<f64>,
  pub power_watts: Option<f64>,
  pub weight_kg: Option<f64>,
  /// Free-form date or datetime text as published
  pub announcement_date: Option<String>,
  pub launch_date: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl TableRecord for MiningnowAsicRow {
  const TABLE: TableId = TableId::MiningnowAsics;

  fn cells(&self) -> Vec<Cell> {
    vec![
      Cell::from(self.asic_slug.as_str()),
      Cell::from(self.title.clone()),
      Cell::from(self.algo_title.clone()),
      Cell::from(self.hash_rate),
      Cell::from(self.hash_rate_type_title.clone()),
      Cell::from(self.cooling.clone()),
      Cell::from(self.best_price_usd),
      Cell::from(self.power_watts),
      Cell::from(self.weight_kg),
      Cell::from(self.announcement_date.clone()),
      Cell::from(self.launch_date.clone()),
      Cell::from(self.created_at),
    ]
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhattomineCoinRow {
  pub whattomine_id: u32,
  pub coin_name: String,
  pub tag: Option<String>,
  pub algorithm: Option<String>,
  pub market_cap_usd: Option<f64>,
  pub created_at: DateTime<Utc>,
}

impl TableRecord for WhattomineCoinRow {
  const TABLE: TableId = TableId::WhattomineCoins;

  fn cells(&self) -> Vec<Cell> {
    vec![
      Cell::from(self.whattomine_id),
      Cell::from(self.coin_name.as_str()),
      Cell::from(self.tag.clone()),
      Cell::from(self.algorithm.clone()),
      Cell::from(self.market_cap_usd),
      Cell::from(self.created_at),
    ]
  }
}

/// `whattomine_miners`: already unit-normalized hash rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhattomineMinerRow {
  pub miner_name: String,
  pub algorithm_name: String,
  pub miner_type: String,
  pub hashrate_hashes_per_second: f64,
  pub power_watts: Option<f64>,
  pub release_date: Option<NaiveDate>,
  pub created_at: DateTime<Utc>,
}

impl TableRecord for WhattomineMinerRow {
  const TABLE: TableId = TableId::WhattomineMiners;

  fn cells(&self) -> Vec<Cell> {
    vec![
      Cell::from(self.miner_name.as_str()),
      Cell::from(self.algorithm_name.as_str()),
      Cell::from(self.miner_type.as_str()),
      Cell::from(self.hashrate_hashes_per_second),
      Cell::from(self.power_watts),
      Cell::from(self.release_date),
      Cell::from(self.created_at),
    ]
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheretomineCoinRow {
  pub coin_slug: String,
  pub coin_name: String,
  pub coin_abbreviation: Option<String>,
  pub algorithm_name: Option<String>,
  pub market_cap: Option<f64>,
  pub volume_24h: Option<f64>,
  pub created_at: DateTime<Utc>,
}

impl TableRecord for WheretomineCoinRow {
  const TABLE: TableId = TableId::WheretomineCoins;

  fn cells(&self) -> Vec<Cell> {
    vec![
      Cell::from(self.coin_slug.as_str()),
      Cell::from(self.coin_name.as_str()),
      Cell::from(self.coin_abbreviation.clone()),
      Cell::from(self.algorithm_name.clone()),
      Cell::from(self.market_cap),
      Cell::from(self.volume_24h),
      Cell::from(self.created_at),
    ]
  }
}
