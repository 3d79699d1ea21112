//! End-to-end runs of the reports pipeline against a local table store.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use cps_core::{Config, TableId};
use cps_models::{GoldAlgorithm, SilverCoin, SilverMiner};
use cps_reports::{LocalTableSink, PushOptions, ReportError, ReportsPipeline};
use pretty_assertions::assert_eq;

const CRYPTO51: &str = "\
coin_name,coin_symbol,algorithm,url,created_at
Bitcoin,BTC,SHA-256,https://www.crypto51.app/coins/BTC.html,2020-01-01T00:00:00Z
Litecoin,LTC,Scrypt,,2020-02-01T00:00:00Z
";

const CRYPTODELVER: &str = "\
coin_slug,coin_name,algo_name,market_cap_usd,volume_usd,coin_url,created_at
bitcoin-cash,Bitcoin Cash,SHA256,1000,50,,2021-06-01T00:00:00Z
litecoin,LiteCoin,Scrypt,,,,2021-07-01T00:00:00Z
";

const MININGNOW_ASICS: &str = "\
asic_slug,title,algo_title,hash_rate,hash_rate_type_title,cooling,best_price_usd,power_watts,weight_kg,announcement_date,launch_date,created_at
antminer-l7-9050,Antminer L7,Scrypt,9050,MH/s,Air,,3425,,,Nov 2021,2023-01-01T00:00:00Z
antminer-l7-9500,Antminer L7,Scrypt,9500,MH/s,Air,,3425,,,,2023-01-01T00:00:00Z
goldshell-ck6,Goldshell CK6,Eaglesong,19.3,TH/s,Air,,3300,,,,2023-01-01T00:00:00Z
";

fn pipeline(root: &Path) -> ReportsPipeline {
  let config = Config::with_dirs(root.join("out"), root.join("store"));
  let sink = Arc::new(LocalTableSink::new(&config.store_dir));
  let options = PushOptions { show_progress: false, ..PushOptions::from_config(&config) };
  ReportsPipeline::new(config, sink).unwrap().with_push_options(options)
}

async fn import(pipeline: &ReportsPipeline, root: &Path, table: TableId, csv: &str) {
  let path = root.join(format!("{}.import.csv", table.name()));
  fs::write(&path, csv).unwrap();
  pipeline.import_csv(table, &path).await.unwrap();
}

async fn seeded(root: &Path) -> ReportsPipeline {
  let pipeline = pipeline(root);
  import(&pipeline, root, TableId::Crypto51Coins, CRYPTO51).await;
  import(&pipeline, root, TableId::CryptodelverCoins, CRYPTODELVER).await;
  import(&pipeline, root, TableId::MiningnowAsics, MININGNOW_ASICS).await;
  pipeline
}

#[tokio::test]
async fn test_full_run_builds_every_table() {
  let dir = tempfile::tempdir().unwrap();
  let pipeline = seeded(dir.path()).await;

  let summary = pipeline.run().await.unwrap();
  assert_eq!(summary.source_tables, 3);
  assert_eq!(summary.silver_coins, 4);
  assert_eq!(summary.silver_miners, 2);
  assert_eq!(summary.gold_algorithms, 2);

  let coins: Vec<SilverCoin> = pipeline.store().read_records(TableId::SilverStackedCoins).unwrap();
  let names: Vec<&str> = coins.iter().map(|c| c.coin_name.as_str()).collect();
  assert_eq!(names, vec!["Bitcoin", "LiteCoin", "Bitcoin Cash", "LiteCoin"]);

  let miners: Vec<SilverMiner> = pipeline.store().read_records(TableId::SilverStackedMiners).unwrap();
  let l7 = miners.iter().find(|m| m.miner_name == "Antminer L7").unwrap();
  assert_eq!(l7.hashrate_hashes_per_second, 9_500_000_000);

  let gold: Vec<GoldAlgorithm> = pipeline.store().read_records(TableId::GoldAlgorithms).unwrap();
  let algos: Vec<&str> = gold.iter().map(|g| g.algo_name.as_str()).collect();
  assert_eq!(algos, vec!["SHA-256", "Scrypt"]);

  let sha = &gold[0];
  assert_eq!(sha.coin_count, 2);
  assert_eq!(sha.earliest_coin, "Bitcoin @ crypto51");
  assert_eq!(sha.latest_coin, "Bitcoin Cash @ cryptodelver");
  assert_eq!(sha.asic_count, None);
  assert_eq!(sha.reported_aliases(), vec!["SHA-256".to_string(), "SHA256".to_string()]);
  assert_eq!(sha.market_cap_usd, Some(1000));

  let scrypt = &gold[1];
  assert_eq!(scrypt.coin_count, 1);
  assert_eq!(scrypt.asic_count, Some(1));
}

#[tokio::test]
async fn test_rerun_is_byte_identical() {
  let dir = tempfile::tempdir().unwrap();
  let pipeline = seeded(dir.path()).await;

  pipeline.run().await.unwrap();
  let coins_path = pipeline.store().path(TableId::SilverStackedCoins);
  let gold_path = pipeline.store().path(TableId::GoldAlgorithms);
  let first = (fs::read(&coins_path).unwrap(), fs::read(&gold_path).unwrap());

  pipeline.run().await.unwrap();
  let second = (fs::read(&coins_path).unwrap(), fs::read(&gold_path).unwrap());
  assert_eq!(first, second);
}

#[tokio::test]
async fn test_invalid_source_rows_are_dumped() {
  let dir = tempfile::tempdir().unwrap();
  let pipeline = pipeline(dir.path());
  let path = pipeline.store().path(TableId::Crypto51Coins);
  fs::create_dir_all(path.parent().unwrap()).unwrap();
  fs::write(
    &path,
    "coin_name,coin_symbol,algorithm,url,created_at\n\
     Bitcoin,BTC,SHA-256,,2020-01-01T00:00:00Z\n\
     Bitcoin,BTC,SHA256,,2020-01-02T00:00:00Z\n",
  )
  .unwrap();

  let err = pipeline.run_silver_coins().unwrap_err();
  assert!(matches!(err, ReportError::SchemaValidation { table: TableId::Crypto51Coins, .. }));
  assert!(pipeline.store().invalid_path(TableId::Crypto51Coins).is_file());
  assert!(!pipeline.store().exists(TableId::SilverStackedCoins));
}

#[tokio::test]
async fn test_unknown_hashrate_unit_fails_the_run() {
  let dir = tempfile::tempdir().unwrap();
  let pipeline = pipeline(dir.path());
  import(
    &pipeline,
    dir.path(),
    TableId::MiningnowAsics,
    "asic_slug,title,algo_title,hash_rate,hash_rate_type_title,cooling,best_price_usd,power_watts,weight_kg,announcement_date,launch_date,created_at\n\
     odd,Odd Miner,Scrypt,5,PH/s,,,,,,,2023-01-01T00:00:00Z\n",
  )
  .await;
  pipeline.fetch_source_tables().await.unwrap();

  let err = pipeline.run_silver_miners().unwrap_err();
  assert!(matches!(err, ReportError::UnknownHashrateUnit { .. }));
}
