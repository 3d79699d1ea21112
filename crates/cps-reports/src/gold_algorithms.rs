//! `gold_algorithms`: coins and ASICs summarized per canonical algorithm.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use cps_core::MinerType;
use cps_models::{GoldAlgorithm, SilverCoin, SilverMiner};
use tracing::{info, warn};

use crate::artifacts::ArtifactStore;
use crate::error::ReportResult;
use crate::normalize::boring_form;

/// Per-algorithm ASIC statistics, joined onto the coin summary
#[derive(Debug, Clone, Default, PartialEq)]
struct AsicSummary {
  asic_count: u32,
  earliest_announcement_date: Option<NaiveDate>,
  earliest_launch_date: Option<NaiveDate>,
  earliest_created_at: Option<NaiveDate>,
  latest_created_at: Option<NaiveDate>,
  reported_aliases: BTreeSet<String>,
}

fn earliest(current: Option<NaiveDate>, candidate: Option<NaiveDate>) -> Option<NaiveDate> {
  match (current, candidate) {
    (Some(a), Some(b)) => Some(a.min(b)),
    (a, b) => a.or(b),
  }
}

fn latest(current: Option<NaiveDate>, candidate: Option<NaiveDate>) -> Option<NaiveDate> {
  match (current, candidate) {
    (Some(a), Some(b)) => Some(a.max(b)),
    (a, b) => a.or(b),
  }
}

/// Sum of the reported values; unreported values count as zero
fn sum_reported(values: impl Iterator<Item = Option<u64>>) -> Option<u64> {
  Some(values.flatten().fold(0, u64::saturating_add))
}

fn json_list<'a>(values: impl IntoIterator<Item = &'a str>) -> ReportResult<String> {
  let set: BTreeSet<&str> = values.into_iter().collect();
  Ok(serde_json::to_string(&set)?)
}

fn summarize_asics(miners: &[SilverMiner]) -> BTreeMap<&str, AsicSummary> {
  let mut groups: BTreeMap<&str, (BTreeSet<&str>, AsicSummary)> = BTreeMap::new();

  // GPU rows are not summarized yet
  for miner in miners.iter().filter(|m| m.miner_type == MinerType::ASIC) {
    let (names, summary) = groups.entry(miner.algo_name.as_str()).or_default();
    names.insert(miner.miner_name.as_str());

    let created = Some(miner.miner_created_at.date_naive());
    summary.earliest_announcement_date =
      earliest(summary.earliest_announcement_date, miner.announcement_date);
    summary.earliest_launch_date = earliest(summary.earliest_launch_date, miner.launch_date);
    summary.earliest_created_at = earliest(summary.earliest_created_at, created);
    summary.latest_created_at = latest(summary.latest_created_at, created);
    summary.reported_aliases.insert(miner.reported_algo_name.clone());
  }

  groups
    .into_iter()
    .map(|(algo, (names, mut summary))| {
      summary.asic_count = names.len() as u32;
      (algo, summary)
    })
    .collect()
}

fn coin_label(coin: &SilverCoin) -> String {
  format!("{} @ {}", coin.coin_name, coin.source_site)
}

/// Aggregate the silver tables into one row per algorithm.
///
/// Coins without an algorithm are ignored. Algorithms only known from ASIC
/// listings are dropped, since the join is driven by the coin side. Volume and
/// market cap are summed over every coin row of the group, so a coin listed by
/// several sources counts several times.
pub fn aggregate_algorithms(
  coins: &[SilverCoin],
  miners: &[SilverMiner],
) -> ReportResult<Vec<GoldAlgorithm>> {
  let mut ordered: Vec<&SilverCoin> = coins.iter().filter(|c| c.algo_name.is_some()).collect();
  ordered.sort_by_key(|c| c.coin_created_at);

  let mut groups: BTreeMap<&str, Vec<&SilverCoin>> = BTreeMap::new();
  for coin in ordered {
    if let Some(algo) = coin.algo_name.as_deref() {
      groups.entry(algo).or_default().push(coin);
    }
  }

  let asics = summarize_asics(miners);
  let mut gold = Vec::with_capacity(groups.len());

  for (algo, group) in groups {
    let (Some(first), Some(last)) = (group.first(), group.last()) else {
      continue;
    };

    let coin_names: BTreeSet<&str> = group.iter().map(|c| c.coin_name.as_str()).collect();
    let mut aliases: BTreeSet<&str> =
      group.iter().filter_map(|c| c.reported_algo_name.as_deref()).collect();

    let asic = asics.get(algo);
    if let Some(asic) = asic {
      aliases.extend(asic.reported_aliases.iter().map(String::as_str));
    }

    gold.push(GoldAlgorithm {
      algo_name: algo.to_string(),
      source_sites_json: json_list(group.iter().map(|c| c.source_site.as_str()))?,
      source_tables_json: json_list(group.iter().map(|c| c.source_table.as_str()))?,
      coin_count: coin_names.len() as u32,
      earliest_coin_created_at: first.coin_created_at.date_naive(),
      latest_coin_created_at: last.coin_created_at.date_naive(),
      earliest_coin: coin_label(first),
      latest_coin: coin_label(last),
      volume_24h_usd: sum_reported(group.iter().map(|c| c.volume_24h_usd)),
      market_cap_usd: sum_reported(group.iter().map(|c| c.market_cap_usd)),
      asic_count: asic.map(|a| a.asic_count),
      earliest_asic_announcement_date: asic.and_then(|a| a.earliest_announcement_date),
      earliest_asic_launch_date: asic.and_then(|a| a.earliest_launch_date),
      earliest_asic_created_at: asic.and_then(|a| a.earliest_created_at),
      latest_asic_created_at: asic.and_then(|a| a.latest_created_at),
      reported_aliases_json: json_list(aliases)?,
      coin_names_json: json_list(coin_names)?,
    });
  }

  Ok(gold)
}

/// Clusters of distinct algorithm names that share a boring form.
///
/// Each cluster most likely is one algorithm spelled two ways and wants an
/// alias table entry.
pub fn find_alias_opportunities(gold: &[GoldAlgorithm]) -> Vec<Vec<String>> {
  let mut clusters: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
  for row in gold {
    clusters.entry(boring_form(&row.algo_name)).or_default().insert(row.algo_name.as_str());
  }

  clusters
    .into_values()
    .filter(|names| names.len() > 1)
    .map(|names| names.into_iter().map(str::to_string).collect())
    .collect()
}

pub fn log_alias_opportunities(gold: &[GoldAlgorithm]) -> usize {
  let clusters = find_alias_opportunities(gold);
  for cluster in &clusters {
    warn!("🔍 Possible missing algorithm alias: {}", cluster.join(" | "));
  }
  clusters.len()
}

/// Aggregate, validate, diagnose and snapshot the gold table
pub fn build_gold_algorithms(
  store: &ArtifactStore,
  coins: &[SilverCoin],
  miners: &[SilverMiner],
) -> ReportResult<Vec<GoldAlgorithm>> {
  let gold = aggregate_algorithms(coins, miners)?;
  store.ensure_valid(&gold)?;

  let clusters = log_alias_opportunities(&gold);
  if clusters > 0 {
    info!("{} algorithm name cluster(s) need review", clusters);
  }

  store.write_records(&gold)?;
  info!("Built {} algorithms from {} coins and {} miners", gold.len(), coins.len(), miners.len());
  Ok(gold)
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{DateTime, Utc};
  use cps_core::SourceSite;
  use pretty_assertions::assert_eq;

  fn at(date: &str) -> DateTime<Utc> {
    format!("{date}T00:00:00Z").parse().unwrap()
  }

  fn coin(algo: Option<&str>, name: &str, site: SourceSite, created: &str) -> SilverCoin {
    SilverCoin {
      source_site: site,
      coin_unique_source_id: name.to_string(),
      coin_name: name.to_string(),
      reported_coin_name: name.to_string(),
      algo_name: algo.map(str::to_string),
      reported_algo_name: algo.map(str::to_string),
      coin_url: None,
      source_table: format!("{}_coins", site),
      coin_symbol: None,
      market_cap_usd: None,
      volume_24h_usd: None,
      founded_date: None,
      coin_created_at: at(created),
    }
  }

  fn asic(algo: &str, name: &str, created: &str) -> SilverMiner {
    SilverMiner {
      source_site: SourceSite::Miningnow,
      miner_name: name.to_string(),
      algo_name: algo.to_string(),
      reported_algo_name: algo.to_lowercase(),
      miner_type: MinerType::ASIC,
      source_table: "miningnow_asics".to_string(),
      hashrate_hashes_per_second: 1_000,
      cooling_type: None,
      price_usd: None,
      power_watts: None,
      weight_kg: None,
      announcement_date: None,
      launch_date: NaiveDate::from_ymd_opt(2022, 3, 1),
      miner_created_at: at(created),
    }
  }

  #[test]
  fn test_two_coins_no_asics() {
    let coins = vec![
      coin(Some("SHA-256"), "Bitcoin Cash", SourceSite::Cryptodelver, "2021-06-01"),
      coin(Some("SHA-256"), "Bitcoin", SourceSite::Crypto51, "2020-01-01"),
    ];
    let gold = aggregate_algorithms(&coins, &[]).unwrap();

    assert_eq!(gold.len(), 1);
    let row = &gold[0];
    assert_eq!(row.algo_name, "SHA-256");
    assert_eq!(row.coin_count, 2);
    assert_eq!(row.earliest_coin, "Bitcoin @ crypto51");
    assert_eq!(row.latest_coin, "Bitcoin Cash @ cryptodelver");
    assert_eq!(row.asic_count, None);
    assert_eq!(row.source_sites_json, r#"["crypto51","cryptodelver"]"#);
    assert_eq!(row.coin_names_json, r#"["Bitcoin","Bitcoin Cash"]"#);
    assert_eq!(row.earliest_coin_created_at, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    assert_eq!(row.volume_24h_usd, Some(0));
    assert_eq!(row.market_cap_usd, Some(0));
  }

  #[test]
  fn test_unreported_amounts_sum_to_zero() {
    let mut reported = coin(Some("X11"), "Dash", SourceSite::Crypto51, "2020-01-01");
    reported.volume_24h_usd = Some(50);
    let unreported = coin(Some("X11"), "Dash", SourceSite::Cryptodelver, "2020-02-01");
    let gold = aggregate_algorithms(&[reported, unreported.clone()], &[]).unwrap();
    assert_eq!(gold[0].volume_24h_usd, Some(50));
    assert_eq!(gold[0].market_cap_usd, Some(0));

    let gold = aggregate_algorithms(&[unreported], &[]).unwrap();
    assert_eq!(gold[0].volume_24h_usd, Some(0));
    assert_eq!(gold[0].market_cap_usd, Some(0));
  }

  #[test]
  fn test_asic_only_algorithms_are_dropped() {
    let coins = vec![coin(Some("Scrypt"), "Litecoin", SourceSite::Crypto51, "2020-01-01")];
    let miners = vec![asic("Scrypt", "Antminer L7", "2023-01-01"), asic("Eaglesong", "Goldshell CK6", "2023-01-01")];
    let gold = aggregate_algorithms(&coins, &miners).unwrap();

    let algos: Vec<&str> = gold.iter().map(|g| g.algo_name.as_str()).collect();
    assert_eq!(algos, vec!["Scrypt"]);
    assert_eq!(gold[0].asic_count, Some(1));
    assert_eq!(gold[0].reported_aliases(), vec!["Scrypt".to_string(), "scrypt".to_string()]);
    assert_eq!(gold[0].earliest_asic_launch_date, NaiveDate::from_ymd_opt(2022, 3, 1));
  }

  #[test]
  fn test_volume_double_counts_across_sources() {
    let mut first = coin(Some("Ethash"), "Ethereum Classic", SourceSite::Crypto51, "2020-01-01");
    first.volume_24h_usd = Some(100);
    first.market_cap_usd = Some(1_000);
    let mut second = coin(Some("Ethash"), "Ethereum Classic", SourceSite::Cryptodelver, "2020-02-01");
    second.volume_24h_usd = Some(100);
    let third = coin(Some("Ethash"), "Ethereum Classic", SourceSite::Miningnow, "2020-03-01");

    let gold = aggregate_algorithms(&[first, second, third], &[]).unwrap();
    assert_eq!(gold[0].coin_count, 1);
    assert_eq!(gold[0].volume_24h_usd, Some(200));
    assert_eq!(gold[0].market_cap_usd, Some(1_000));
  }

  #[test]
  fn test_gpu_rows_and_coins_without_algorithm_are_ignored() {
    let coins = vec![
      coin(Some("Ethash"), "Ethereum Classic", SourceSite::Crypto51, "2020-01-01"),
      coin(None, "Mystery", SourceSite::Crypto51, "2020-01-01"),
    ];
    let mut gpu = asic("Ethash", "RTX 3090", "2021-01-01");
    gpu.miner_type = MinerType::GPU;

    let gold = aggregate_algorithms(&coins, &[gpu]).unwrap();
    assert_eq!(gold.len(), 1);
    assert_eq!(gold[0].asic_count, None);
  }

  #[test]
  fn test_asic_count_uses_distinct_names_and_date_bounds() {
    let coins = vec![coin(Some("Scrypt"), "Litecoin", SourceSite::Crypto51, "2020-01-01")];
    let mut miners = vec![
      asic("Scrypt", "Antminer L7", "2023-05-01"),
      asic("Scrypt", "Antminer L3+", "2019-01-01"),
    ];
    let mut duplicate = asic("Scrypt", "Antminer L7", "2024-01-01");
    duplicate.source_site = SourceSite::Whattomine;
    miners.push(duplicate);

    let gold = aggregate_algorithms(&coins, &miners).unwrap();
    assert_eq!(gold[0].asic_count, Some(2));
    assert_eq!(gold[0].earliest_asic_created_at, NaiveDate::from_ymd_opt(2019, 1, 1));
    assert_eq!(gold[0].latest_asic_created_at, NaiveDate::from_ymd_opt(2024, 1, 1));
  }

  #[test]
  fn test_every_gold_row_has_an_alias() {
    let coins = vec![
      coin(Some("X11"), "Dash", SourceSite::Crypto51, "2020-01-01"),
      coin(Some("Scrypt"), "Dogecoin", SourceSite::Minerstat, "2020-01-01"),
    ];
    let gold = aggregate_algorithms(&coins, &[]).unwrap();
    assert!(gold.iter().all(|g| !g.reported_aliases().is_empty()));
  }

  #[test]
  fn test_alias_opportunities() {
    let coins = vec![
      coin(Some("Blake2S"), "A", SourceSite::Crypto51, "2020-01-01"),
      coin(Some("Blake-2S"), "B", SourceSite::Crypto51, "2020-01-01"),
      coin(Some("Scrypt"), "C", SourceSite::Crypto51, "2020-01-01"),
    ];
    let gold = aggregate_algorithms(&coins, &[]).unwrap();
    let clusters = find_alias_opportunities(&gold);
    assert_eq!(clusters, vec![vec!["Blake-2S".to_string(), "Blake2S".to_string()]]);
    assert_eq!(log_alias_opportunities(&gold), 1);
  }

  #[test]
  fn test_build_writes_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let coins = vec![coin(Some("X11"), "Dash", SourceSite::Crypto51, "2020-01-01")];

    build_gold_algorithms(&store, &coins, &[]).unwrap();
    let back: Vec<GoldAlgorithm> = store.read_records(cps_core::TableId::GoldAlgorithms).unwrap();
    assert_eq!(back.len(), 1);
    assert_eq!(back[0].algo_name, "X11");
  }
}
