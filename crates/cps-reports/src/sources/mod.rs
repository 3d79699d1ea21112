//! Per-source adapters mapping raw scraped rows onto the shared coin and
//! miner record shapes.

pub mod coins;
pub mod miners;

use chrono::NaiveDate;
use cps_core::{SourceSite, TableId, TableRecord};
use cps_models::{SourceCoinRecord, SourceMinerRecord};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::artifacts::ArtifactStore;
use crate::error::{ReportError, ReportResult};

/// Raw row of a coin listing table
pub trait CoinAdapter: TableRecord + DeserializeOwned {
  const SITE: SourceSite;

  fn into_coin_record(self) -> ReportResult<SourceCoinRecord>;
}

/// Raw row of a mining hardware table
pub trait MinerAdapter: TableRecord + DeserializeOwned {
  const SITE: SourceSite;

  fn into_miner_record(self) -> ReportResult<SourceMinerRecord>;
}

/// Read and validate the snapshot of one raw source table. A missing
/// snapshot means the source produced nothing this cycle and yields `None`.
pub fn load_source_rows<R>(store: &ArtifactStore) -> ReportResult<Option<Vec<R>>>
where
  R: TableRecord + DeserializeOwned,
{
  if !store.exists(R::TABLE) {
    warn!("No snapshot of {}, leaving it out of this run", R::TABLE);
    return Ok(None);
  }

  let rows: Vec<R> = store.read_records(R::TABLE)?;
  store.ensure_valid(&rows)?;
  info!("Loaded {}: {} rows", R::TABLE, rows.len());
  Ok(Some(rows))
}

pub fn load_coin_records<R: CoinAdapter>(store: &ArtifactStore) -> ReportResult<Vec<SourceCoinRecord>> {
  load_source_rows::<R>(store)?
    .unwrap_or_default()
    .into_iter()
    .map(CoinAdapter::into_coin_record)
    .collect()
}

pub fn load_miner_records<R: MinerAdapter>(
  store: &ArtifactStore,
) -> ReportResult<Vec<SourceMinerRecord>> {
  load_source_rows::<R>(store)?
    .unwrap_or_default()
    .into_iter()
    .map(MinerAdapter::into_miner_record)
    .collect()
}

/// Collapse whitespace runs, trim, and turn empty text into `None`
pub fn clean_text(value: Option<&str>) -> Option<String> {
  let cleaned = value?.split_whitespace().collect::<Vec<_>>().join(" ");
  (!cleaned.is_empty()).then_some(cleaned)
}

/// [`clean_text`] for columns that must carry a value
pub(crate) fn required_text(table: TableId, column: &str, value: &str) -> ReportResult<String> {
  clean_text(Some(value)).ok_or_else(|| ReportError::InvalidRecord {
    table,
    message: format!("{} is empty", column),
  })
}

/// Round a non-negative amount to whole units
pub(crate) fn whole_units(table: TableId, column: &str, value: f64) -> ReportResult<u64> {
  if !value.is_finite() || value < 0.0 {
    return Err(ReportError::InvalidRecord {
      table,
      message: format!("{} must be a non-negative number, got {}", column, value),
    });
  }
  let rounded = value.round();
  if rounded >= u64::MAX as f64 {
    return Err(ReportError::InvalidRecord {
      table,
      message: format!("{} is out of range, got {}", column, value),
    });
  }
  Ok(rounded as u64)
}

pub(crate) fn optional_whole_units(
  table: TableId,
  column: &str,
  value: Option<f64>,
) -> ReportResult<Option<u64>> {
  value.map(|v| whole_units(table, column, v)).transpose()
}

/// January 1st of the given year
pub(crate) fn start_of_year(table: TableId, year: u32) -> ReportResult<NaiveDate> {
  i32::try_from(year).ok().and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)).ok_or_else(|| {
    ReportError::InvalidRecord { table, message: format!("{} is not a valid year", year) }
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_clean_text() {
    assert_eq!(clean_text(Some("  Bitcoin \t Cash\n")), Some("Bitcoin Cash".to_string()));
    assert_eq!(clean_text(Some("   ")), None);
    assert_eq!(clean_text(Some("")), None);
    assert_eq!(clean_text(None), None);
  }

  #[test]
  fn test_whole_units_rounds_and_rejects_negatives() {
    assert_eq!(whole_units(TableId::WheretomineCoins, "market_cap", 10.5).unwrap(), 11);
    assert_eq!(whole_units(TableId::WheretomineCoins, "market_cap", 0.0).unwrap(), 0);
    assert!(whole_units(TableId::WheretomineCoins, "market_cap", -1.0).is_err());
    assert!(whole_units(TableId::WheretomineCoins, "market_cap", f64::NAN).is_err());
    assert!(whole_units(TableId::WheretomineCoins, "market_cap", 1.0e20).is_err());
  }

  #[test]
  fn test_start_of_year() {
    assert_eq!(
      start_of_year(TableId::MinerstatCoins, 2013).unwrap(),
      NaiveDate::from_ymd_opt(2013, 1, 1).unwrap()
    );
    assert!(start_of_year(TableId::MinerstatCoins, u32::MAX).is_err());
  }
}
