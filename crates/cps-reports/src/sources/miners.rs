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

//! Mining hardware adapters.

use chrono::NaiveDate;
use cps_core::{Cell, FieldType, HashrateUnit, MinerType, SourceSite, TableRecord};
use cps_models::{MiningnowAsicRow, SourceMinerRecord, WhattomineMinerRow};
use tracing::debug;

use crate::error::{ReportError, ReportResult};
use crate::sources::{clean_text, required_text, whole_units, MinerAdapter};

const LISTING_DATE_FORMATS: [&str; 4] = ["%b %d, %Y", "%B %d, %Y", "%b %d %Y", "%d %b %Y"];
const MONTH_YEAR_FORMATS: [&str; 2] = ["%d %B %Y", "%d %b %Y"];

/// Best-effort parse of a date published as free text. Unparseable text is
/// treated as unknown.
pub fn parse_listing_date(text: Option<&str>) -> Option<NaiveDate> {
  let text = clean_text(text)?;

  if let Ok(Cell::Date(date)) = Cell::parse(&text, FieldType::Date) {
    return Some(date);
  }
  for format in LISTING_DATE_FORMATS {
    if let Ok(date) = NaiveDate::parse_from_str(&text, format) {
      return Some(date);
    }
  }
  // "March 2024" style: pin to the first of the month.
  let padded = format!("1 {}", text);
  for format in MONTH_YEAR_FORMATS {
    if let Ok(date) = NaiveDate::parse_from_str(&padded, format) {
      return Some(date);
    }
  }

  debug!("Ignoring unparseable listing date '{}'", text);
  None
}

/// Convert a hash rate with a unit suffix into raw hashes per second
pub fn hashrate_to_hashes_per_second(
  miner: &str,
  value: f64,
  unit: Option<&str>,
) -> ReportResult<u64> {
  let label = unit.map(str::trim).unwrap_or_default();
  let unit = HashrateUnit::from_label(label).ok_or_else(|| ReportError::UnknownHashrateUnit {
    miner: miner.to_string(),
    unit: label.to_string(),
  })?;
  whole_units(MiningnowAsicRow::TABLE, "hash_rate", value * unit.multiplier())
}

impl MinerAdapter for MiningnowAsicRow {
  const SITE: SourceSite = SourceSite::Miningnow;

  fn into_miner_record(self) -> ReportResult<SourceMinerRecord> {
    let miner_name = required_text(Self::TABLE, "title", self.title.as_deref().unwrap_or_default())?;
    let reported_algo_name =
      required_text(Self::TABLE, "algo_title", self.algo_title.as_deref().unwrap_or_default())?;
    let hash_rate = self.hash_rate.ok_or_else(|| ReportError::InvalidRecord {
      table: Self::TABLE,
      message: format!("hash_rate missing for '{}'", miner_name),
    })?;
    let hashrate_hashes_per_second =
      hashrate_to_hashes_per_second(&miner_name, hash_rate, self.hash_rate_type_title.as_deref())?;

    Ok(SourceMinerRecord {
      source_site: Self::SITE,
      source_table: Self::TABLE,
      miner_name,
      reported_algo_name,
      miner_type: MinerType::ASIC,
      hashrate_hashes_per_second,
      cooling_type: clean_text(self.cooling.as_deref()),
      price_usd: self.best_price_usd,
      power_watts: self.power_watts,
      weight_kg: self.weight_kg,
      announcement_date: parse_listing_date(self.announcement_date.as_deref()),
      launch_date: parse_listing_date(self.launch_date.as_deref()),
      miner_created_at: self.created_at,
    })
  }
}

impl MinerAdapter for WhattomineMinerRow {
  const SITE: SourceSite = SourceSite::Whattomine;

  fn into_miner_record(self) -> ReportResult<SourceMinerRecord> {
    let miner_name = required_text(Self::TABLE, "miner_name", &self.miner_name)?;
    let miner_type = self.miner_type.parse::<MinerType>().map_err(|e| ReportError::InvalidRecord {
      table: Self::TABLE,
      message: format!("{} ({})", e, miner_name),
    })?;

    Ok(SourceMinerRecord {
      source_site: Self::SITE,
      source_table: Self::TABLE,
      reported_algo_name: required_text(Self::TABLE, "algorithm_name", &self.algorithm_name)?,
      miner_type,
      hashrate_hashes_per_second: whole_units(
        Self::TABLE,
        "hashrate_hashes_per_second",
        self.hashrate_hashes_per_second,
      )?,
      cooling_type: None,
      price_usd: None,
      power_watts: self.power_watts,
      weight_kg: None,
      // Only a release date is published; it stands in for both.
      announcement_date: self.release_date,
      launch_date: self.release_date,
      miner_created_at: self.created_at,
      miner_name,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{DateTime, Utc};

  fn created() -> DateTime<Utc> {
    "2024-05-01T12:00:00Z".parse().unwrap()
  }

  fn asic(hash_rate: f64, unit: &str) -> MiningnowAsicRow {
    MiningnowAsicRow {
      asic_slug: "antminer-s19-pro".to_string(),
      title: Some("Antminer  S19 Pro".to_string()),
      algo_title: Some("SHA-256".to_string()),
      hash_rate: Some(hash_rate),
      hash_rate_type_title: Some(unit.to_string()),
      cooling: Some("Air".to_string()),
      best_price_usd: Some(1500.0),
      power_watts: Some(3250.0),
      weight_kg: None,
      announcement_date: Some("2020-03-01".to_string()),
      launch_date: Some("May 12, 2020".to_string()),
      created_at: created(),
    }
  }

  #[test]
  fn test_asic_units_are_normalized() {
    let record = asic(110.0, "TH/s").into_miner_record().unwrap();
    assert_eq!(record.hashrate_hashes_per_second, 110_000_000_000_000);
    assert_eq!(record.miner_name, "Antminer S19 Pro");
    assert_eq!(record.miner_type, MinerType::ASIC);
    assert_eq!(record.launch_date, NaiveDate::from_ymd_opt(2020, 5, 12));

    let record = asic(1.5, "kSol/s").into_miner_record().unwrap();
    assert_eq!(record.hashrate_hashes_per_second, 1_500);
  }

  #[test]
  fn test_unknown_unit_is_fatal() {
    let err = asic(1.0, "PH/s").into_miner_record().unwrap_err();
    assert!(matches!(err, ReportError::UnknownHashrateUnit { .. }));

    let mut row = asic(1.0, "TH/s");
    row.hash_rate_type_title = None;
    assert!(matches!(row.into_miner_record().unwrap_err(), ReportError::UnknownHashrateUnit { .. }));
  }

  #[test]
  fn test_hashrate_overflow_is_rejected() {
    let err = hashrate_to_hashes_per_second("Antminer X", 1.0e9, Some("TH/s")).unwrap_err();
    assert!(matches!(err, ReportError::InvalidRecord { .. }));
    assert!(asic(1.0e9, "TH/s").into_miner_record().is_err());
  }

  #[test]
  fn test_listing_dates() {
    assert_eq!(parse_listing_date(Some("2021-07-04")), NaiveDate::from_ymd_opt(2021, 7, 4));
    assert_eq!(
      parse_listing_date(Some("2021-07-04T10:00:00Z")),
      NaiveDate::from_ymd_opt(2021, 7, 4)
    );
    assert_eq!(parse_listing_date(Some("March 2024")), NaiveDate::from_ymd_opt(2024, 3, 1));
    assert_eq!(parse_listing_date(Some("Q3 2024")), None);
    assert_eq!(parse_listing_date(None), None);
  }

  #[test]
  fn test_whattomine_miner() {
    let release = NaiveDate::from_ymd_opt(2020, 9, 24);
    let record = WhattomineMinerRow {
      miner_name: "RTX 3080".to_string(),
      algorithm_name: "Ethash".to_string(),
      miner_type: "GPU".to_string(),
      hashrate_hashes_per_second: 97_500_000.4,
      power_watts: Some(220.0),
      release_date: release,
      created_at: created(),
    }
    .into_miner_record()
    .unwrap();
    assert_eq!(record.miner_type, MinerType::GPU);
    assert_eq!(record.hashrate_hashes_per_second, 97_500_000);
    assert_eq!(record.announcement_date, release);
    assert_eq!(record.launch_date, release);
  }
}
