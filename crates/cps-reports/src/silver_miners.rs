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

//! `silver_stacked_miners`: one row per (source, miner, algorithm).

use std::cmp::Ordering;

use cps_models::{MiningnowAsicRow, SilverMiner, SourceMinerRecord, WhattomineMinerRow};
use tracing::info;

use crate::artifacts::ArtifactStore;
use crate::error::ReportResult;
use crate::normalize::AlgorithmNormalizer;
use crate::sources::load_miner_records;

/// Union of all miner sources present in the store
pub fn load_miner_sources(store: &ArtifactStore) -> ReportResult<Vec<SourceMinerRecord>> {
  let mut records = load_miner_records::<MiningnowAsicRow>(store)?;
  records.extend(load_miner_records::<WhattomineMinerRow>(store)?);
  Ok(records)
}

fn identity_order(a: &SilverMiner, b: &SilverMiner) -> Ordering {
  (a.source_site, &a.miner_name, &a.algo_name).cmp(&(b.source_site, &b.miner_name, &b.algo_name))
}

fn performance_order(a: &SilverMiner, b: &SilverMiner) -> Ordering {
  (a.hashrate_hashes_per_second, a.announcement_date, a.launch_date).cmp(&(
    b.hashrate_hashes_per_second,
    b.announcement_date,
    b.launch_date,
  ))
}

/// Keep one row per `(source_site, miner_name, algo_name)`.
///
/// Sources list the same device at several power set-points. Rows are ordered
/// by hash rate, then announcement and launch date (unknown dates first), and
/// the last one wins, so the best-case profile represents the device.
pub fn dedupe_miners(mut miners: Vec<SilverMiner>) -> Vec<SilverMiner> {
  miners.sort_by(|a, b| identity_order(a, b).then_with(|| performance_order(a, b)));

  let mut kept: Vec<SilverMiner> = Vec::with_capacity(miners.len());
  for miner in miners {
    if let Some(last) = kept.last_mut() {
      if identity_order(last, &miner) == Ordering::Equal {
        *last = miner;
        continue;
      }
    }
    kept.push(miner);
  }
  kept
}

/// Normalize algorithm names, then deduplicate
pub fn stack_miners(records: Vec<SourceMinerRecord>, normalizer: &AlgorithmNormalizer) -> Vec<SilverMiner> {
  let total = records.len();
  let miners: Vec<SilverMiner> = records
    .into_iter()
    .map(|record| {
      let algo_name = normalizer.normalize(&record.reported_algo_name);
      SilverMiner::from_source(record, algo_name)
    })
    .collect();

  let miners = dedupe_miners(miners);
  info!("Deduplicated {} miner reports into {} rows", total, miners.len());
  miners
}

/// Load, stack, validate and snapshot the silver miner table
pub fn build_silver_miners(
  store: &ArtifactStore,
  normalizer: &AlgorithmNormalizer,
) -> ReportResult<Vec<SilverMiner>> {
  let records = load_miner_sources(store)?;
  let miners = stack_miners(records, normalizer);
  store.ensure_valid(&miners)?;
  store.write_records(&miners)?;

  info!("Stacked miner list with {} entries", miners.len());
  Ok(miners)
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;
  use cps_core::{MinerType, SourceSite, TableId};

  fn report(name: &str, algo: &str, hashrate: u64, launch: Option<NaiveDate>) -> SourceMinerRecord {
    SourceMinerRecord {
      source_site: SourceSite::Miningnow,
      source_table: TableId::MiningnowAsics,
      miner_name: name.to_string(),
      reported_algo_name: algo.to_string(),
      miner_type: MinerType::ASIC,
      hashrate_hashes_per_second: hashrate,
      cooling_type: None,
      price_usd: None,
      power_watts: Some(hashrate as f64 / 100.0),
      weight_kg: None,
      announcement_date: None,
      launch_date: launch,
      miner_created_at: "2024-02-02T00:00:00Z".parse().unwrap(),
    }
  }

  #[test]
  fn test_highest_hashrate_wins() {
    let normalizer = AlgorithmNormalizer::builtin().unwrap();
    let miners = stack_miners(
      vec![report("Antminer L7", "Scrypt", 1200, None), report("Antminer L7", "Scrypt", 1000, None)],
      &normalizer,
    );
    assert_eq!(miners.len(), 1);
    assert_eq!(miners[0].hashrate_hashes_per_second, 1200);
    assert_eq!(miners[0].power_watts, Some(12.0));
  }

  #[test]
  fn test_dedup_runs_after_algorithm_normalization() {
    let normalizer = AlgorithmNormalizer::builtin().unwrap();
    let miners = stack_miners(
      vec![report("Antminer S9", "SHA256", 13, None), report("Antminer S9", "SHA-256D", 14, None)],
      &normalizer,
    );
    assert_eq!(miners.len(), 1);
    assert_eq!(miners[0].algo_name, "SHA-256");
    assert_eq!(miners[0].reported_algo_name, "SHA-256D");
  }

  #[test]
  fn test_later_launch_breaks_hashrate_ties() {
    let early = NaiveDate::from_ymd_opt(2021, 1, 1);
    let late = NaiveDate::from_ymd_opt(2022, 1, 1);
    let normalizer = AlgorithmNormalizer::builtin().unwrap();
    let miners = stack_miners(
      vec![report("KS3", "kHeavyHash", 9, late), report("KS3", "kHeavyHash", 9, None), report("KS3", "kHeavyHash", 9, early)],
      &normalizer,
    );
    assert_eq!(miners.len(), 1);
    assert_eq!(miners[0].launch_date, late);
    assert_eq!(miners[0].algo_name, "KHeavyHash");
  }

  #[test]
  fn test_distinct_algorithms_are_kept_apart() {
    let normalizer = AlgorithmNormalizer::builtin().unwrap();
    let miners = stack_miners(
      vec![report("Goldshell Box", "Scrypt", 5, None), report("Goldshell Box", "Blake2b", 7, None)],
      &normalizer,
    );
    let algos: Vec<&str> = miners.iter().map(|m| m.algo_name.as_str()).collect();
    assert_eq!(algos, vec!["Blake2B", "Scrypt"]);
  }
}
