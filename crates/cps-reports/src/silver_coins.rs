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

//! `silver_stacked_coins`: every coin listing of every source in one table.

use cps_models::{
  Crypto51CoinRow, CryptodelverCoinRow, CryptoslateCoinRow, MinerstatCoinRow, MiningnowCoinRow,
  SilverCoin, SourceCoinRecord, WhattomineCoinRow, WheretomineCoinRow,
};
use tracing::info;

use crate::artifacts::ArtifactStore;
use crate::error::ReportResult;
use crate::normalize::{build_coin_name_map, AlgorithmNormalizer};
use crate::sources::load_coin_records;

/// Union of all coin sources present in the store
pub fn load_coin_sources(store: &ArtifactStore) -> ReportResult<Vec<SourceCoinRecord>> {
  let mut records = Vec::new();
  records.extend(load_coin_records::<Crypto51CoinRow>(store)?);
  records.extend(load_coin_records::<CryptodelverCoinRow>(store)?);
  records.extend(load_coin_records::<CryptoslateCoinRow>(store)?);
  records.extend(load_coin_records::<MinerstatCoinRow>(store)?);
  records.extend(load_coin_records::<MiningnowCoinRow>(store)?);
  records.extend(load_coin_records::<WhattomineCoinRow>(store)?);
  records.extend(load_coin_records::<WheretomineCoinRow>(store)?);
  Ok(records)
}

/// Canonicalize coin and algorithm names of the unioned adapter output.
///
/// Rows come out sorted by `(source_site, coin_unique_source_id)` so equal
/// inputs always give equal snapshots, whatever order the sources were read in.
pub fn stack_coins(
  mut records: Vec<SourceCoinRecord>,
  normalizer: &AlgorithmNormalizer,
) -> ReportResult<Vec<SilverCoin>> {
  records.sort_by(|a, b| {
    (a.source_site, &a.coin_unique_source_id).cmp(&(b.source_site, &b.coin_unique_source_id))
  });

  let coin_names = build_coin_name_map(records.iter().map(|r| r.reported_coin_name.as_str()))?;

  let coins = records
    .into_iter()
    .map(|record| {
      let coin_name = coin_names
        .get(&record.reported_coin_name)
        .cloned()
        .unwrap_or_else(|| record.reported_coin_name.clone());
      let algo_name = normalizer.normalize_opt(record.reported_algo_name.as_deref());
      SilverCoin::from_source(record, coin_name, algo_name)
    })
    .collect();

  Ok(coins)
}

/// Load, stack, validate and snapshot the silver coin table
pub fn build_silver_coins(
  store: &ArtifactStore,
  normalizer: &AlgorithmNormalizer,
) -> ReportResult<Vec<SilverCoin>> {
  let records = load_coin_sources(store)?;
  info!("Stacking {} coin records", records.len());

  let coins = stack_coins(records, normalizer)?;
  store.ensure_valid(&coins)?;
  store.write_records(&coins)?;

  info!("Stacked coin list with {} entries", coins.len());
  Ok(coins)
}
