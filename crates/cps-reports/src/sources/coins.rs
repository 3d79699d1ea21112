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

//! Coin listing adapters, one per source table.

use cps_core::{SourceSite, TableRecord};
use cps_models::{
  Crypto51CoinRow, CryptodelverCoinRow, CryptoslateCoinRow, MinerstatCoinRow, MiningnowCoinRow,
  SourceCoinRecord, WhattomineCoinRow, WheretomineCoinRow,
};

use crate::error::ReportResult;
use crate::sources::{clean_text, optional_whole_units, required_text, start_of_year, CoinAdapter};

impl CoinAdapter for Crypto51CoinRow {
  const SITE: SourceSite = SourceSite::Crypto51;

  fn into_coin_record(self) -> ReportResult<SourceCoinRecord> {
    let name = required_text(Self::TABLE, "coin_name", &self.coin_name)?;
    Ok(SourceCoinRecord {
      source_site: Self::SITE,
      source_table: Self::TABLE,
      coin_unique_source_id: name.clone(),
      reported_coin_name: name,
      coin_symbol: clean_text(self.coin_symbol.as_deref()),
      reported_algo_name: clean_text(self.algorithm.as_deref()),
      coin_url: clean_text(self.url.as_deref()),
      market_cap_usd: None,
      volume_24h_usd: None,
      founded_date: None,
      coin_created_at: self.created_at,
    })
  }
}

impl CoinAdapter for CryptodelverCoinRow {
  const SITE: SourceSite = SourceSite::Cryptodelver;

  fn into_coin_record(self) -> ReportResult<SourceCoinRecord> {
    Ok(SourceCoinRecord {
      source_site: Self::SITE,
      source_table: Self::TABLE,
      coin_unique_source_id: required_text(Self::TABLE, "coin_slug", &self.coin_slug)?,
      reported_coin_name: required_text(Self::TABLE, "coin_name", &self.coin_name)?,
      coin_symbol: None,
      reported_algo_name: clean_text(self.algo_name.as_deref()),
      coin_url: clean_text(self.coin_url.as_deref()),
      market_cap_usd: self.market_cap_usd,
      volume_24h_usd: self.volume_usd,
      founded_date: None,
      coin_created_at: self.created_at,
    })
  }
}

impl CoinAdapter for CryptoslateCoinRow {
  const SITE: SourceSite = SourceSite::Cryptoslate;

  fn into_coin_record(self) -> ReportResult<SourceCoinRecord> {
    let slug = required_text(Self::TABLE, "coin_slug", &self.coin_slug)?;
    // The logo archive date is more precise than a year from the description.
    let founded_date = match (self.earliest_logo_date, self.earliest_year_in_description) {
      (Some(date), _) => Some(date),
      (None, Some(year)) => Some(start_of_year(Self::TABLE, year)?),
      (None, None) => None,
    };

    Ok(SourceCoinRecord {
      source_site: Self::SITE,
      source_table: Self::TABLE,
      coin_unique_source_id: slug.clone(),
      reported_coin_name: required_text(Self::TABLE, "coin_name", &self.coin_name)?,
      coin_symbol: Some(slug),
      reported_algo_name: clean_text(self.hash_algo.as_deref()),
      coin_url: clean_text(self.url.as_deref()),
      market_cap_usd: self.market_cap_usd,
      volume_24h_usd: None,
      founded_date,
      coin_created_at: self.created_at,
    })
  }
}

impl CoinAdapter for MinerstatCoinRow {
  const SITE: SourceSite = SourceSite::Minerstat;

  fn into_coin_record(self) -> ReportResult<SourceCoinRecord> {
    // Minerstat only exposes the slug, which doubles as name and symbol.
    let slug = required_text(Self::TABLE, "coin_slug", &self.coin_slug)?;
    let founded_date = self.reported_founded.map(|y| start_of_year(Self::TABLE, y)).transpose()?;

    Ok(SourceCoinRecord {
      source_site: Self::SITE,
      source_table: Self::TABLE,
      coin_unique_source_id: slug.clone(),
      reported_coin_name: slug.clone(),
      coin_symbol: Some(slug.clone()),
      reported_algo_name: clean_text(self.reported_algorithm.as_deref()),
      coin_url: Some(format!("https://minerstat.com/coin/{}", slug)),
      market_cap_usd: None,
      volume_24h_usd: self.volume_usd,
      founded_date,
      coin_created_at: self.created_at,
    })
  }
}

impl CoinAdapter for MiningnowCoinRow {
  const SITE: SourceSite = SourceSite::Miningnow;

  fn into_coin_record(self) -> ReportResult<SourceCoinRecord> {
    let name = required_text(Self::TABLE, "coin_name", &self.coin_name)?;
    let slug = required_text(Self::TABLE, "coin_slug", &self.coin_slug)?;

    Ok(SourceCoinRecord {
      source_site: Self::SITE,
      source_table: Self::TABLE,
      coin_unique_source_id: name.clone(),
      reported_coin_name: name,
      coin_symbol: clean_text(self.ticker.as_deref()),
      reported_algo_name: clean_text(self.algorithm.as_deref()),
      coin_url: Some(format!("https://miningnow.com/coins/{}/", slug)),
      market_cap_usd: self.market_cap_usd,
      volume_24h_usd: self.volume_usd,
      founded_date: self.founded_date,
      coin_created_at: self.created_at,
    })
  }
}

impl CoinAdapter for WhattomineCoinRow {
  const SITE: SourceSite = SourceSite::Whattomine;

  fn into_coin_record(self) -> ReportResult<SourceCoinRecord> {
    let name = required_text(Self::TABLE, "coin_name", &self.coin_name)?;

    Ok(SourceCoinRecord {
      source_site: Self::SITE,
      source_table: Self::TABLE,
      // WhatToMine lists one coin per algorithm, so names repeat.
      coin_unique_source_id: format!("{}-{}", self.whattomine_id, name),
      reported_coin_name: name,
      coin_symbol: clean_text(self.tag.as_deref()),
      reported_algo_name: clean_text(self.algorithm.as_deref()),
      coin_url: Some(format!("https://whattomine.com/coins/{}", self.whattomine_id)),
      market_cap_usd: optional_whole_units(Self::TABLE, "market_cap_usd", self.market_cap_usd)?,
      volume_24h_usd: None,
      founded_date: None,
      coin_created_at: self.created_at,
    })
  }
}

impl CoinAdapter for WheretomineCoinRow {
  const SITE: SourceSite = SourceSite::Wheretomine;

  fn into_coin_record(self) -> ReportResult<SourceCoinRecord> {
    let name = required_text(Self::TABLE, "coin_name", &self.coin_name)?;
    let slug = required_text(Self::TABLE, "coin_slug", &self.coin_slug)?;

    Ok(SourceCoinRecord {
      source_site: Self::SITE,
      source_table: Self::TABLE,
      coin_unique_source_id: name.clone(),
      reported_coin_name: name,
      coin_symbol: clean_text(self.coin_abbreviation.as_deref()),
      reported_algo_name: clean_text(self.algorithm_name.as_deref()),
      coin_url: Some(format!("https://wheretomine.io/coins/{}/", slug)),
      market_cap_usd: optional_whole_units(Self::TABLE, "market_cap", self.market_cap)?,
      volume_24h_usd: optional_whole_units(Self::TABLE, "volume_24h", self.volume_24h)?,
      founded_date: None,
      coin_created_at: self.created_at,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{DateTime, NaiveDate, Utc};
  use cps_core::TableId;

  fn created() -> DateTime<Utc> {
    "2024-05-01T12:00:00Z".parse().unwrap()
  }

  #[test]
  fn test_crypto51_uses_name_as_id() {
    let record = Crypto51CoinRow {
      coin_name: " Bitcoin  Cash ".to_string(),
      coin_symbol: Some("BCH".to_string()),
      algorithm: Some("SHA-256".to_string()),
      url: Some("".to_string()),
      created_at: created(),
    }
    .into_coin_record()
    .unwrap();

    assert_eq!(record.coin_unique_source_id, "Bitcoin Cash");
    assert_eq!(record.reported_coin_name, "Bitcoin Cash");
    assert_eq!(record.coin_url, None);
    assert_eq!(record.source_table, TableId::Crypto51Coins);
    assert_eq!(record.source_site, SourceSite::Crypto51);
  }

  #[test]
  fn test_cryptoslate_founded_date_fallback() {
    let row = CryptoslateCoinRow {
      coin_slug: "monero".to_string(),
      coin_name: "Monero".to_string(),
      hash_algo: Some("RandomX".to_string()),
      market_cap_usd: Some(3_000_000_000),
      url: None,
      earliest_logo_date: None,
      earliest_year_in_description: Some(2014),
      created_at: created(),
    };
    let record = row.clone().into_coin_record().unwrap();
    assert_eq!(record.founded_date, NaiveDate::from_ymd_opt(2014, 1, 1));
    assert_eq!(record.coin_symbol.as_deref(), Some("monero"));

    let logo = NaiveDate::from_ymd_opt(2015, 3, 2);
    let record = CryptoslateCoinRow { earliest_logo_date: logo, ..row }.into_coin_record().unwrap();
    assert_eq!(record.founded_date, logo);
  }

  #[test]
  fn test_minerstat_builds_url_from_slug() {
    let record = MinerstatCoinRow {
      coin_slug: "KAS".to_string(),
      reported_algorithm: Some("kHeavyHash".to_string()),
      volume_usd: Some(1_000),
      reported_founded: Some(2021),
      created_at: created(),
    }
    .into_coin_record()
    .unwrap();
    assert_eq!(record.coin_url.as_deref(), Some("https://minerstat.com/coin/KAS"));
    assert_eq!(record.reported_coin_name, "KAS");
    assert_eq!(record.volume_24h_usd, Some(1_000));
  }

  #[test]
  fn test_whattomine_id_and_rounding() {
    let record = WhattomineCoinRow {
      whattomine_id: 1,
      coin_name: "Bitcoin".to_string(),
      tag: Some("BTC".to_string()),
      algorithm: Some("SHA-256".to_string()),
      market_cap_usd: Some(1234.6),
      created_at: created(),
    }
    .into_coin_record()
    .unwrap();
    assert_eq!(record.coin_unique_source_id, "1-Bitcoin");
    assert_eq!(record.market_cap_usd, Some(1235));
  }

  #[test]
  fn test_wheretomine_rejects_negative_amounts() {
    let err = WheretomineCoinRow {
      coin_slug: "zcash".to_string(),
      coin_name: "Zcash".to_string(),
      coin_abbreviation: Some("ZEC".to_string()),
      algorithm_name: Some("Equihash".to_string()),
      market_cap: Some(-5.0),
      volume_24h: None,
      created_at: created(),
    }
    .into_coin_record()
    .unwrap_err();
    assert!(err.to_string().contains("market_cap"));
  }

  #[test]
  fn test_blank_name_is_invalid() {
    let err = MiningnowCoinRow {
      coin_slug: "x".to_string(),
      coin_name: "   ".to_string(),
      ticker: None,
      algorithm: None,
      market_cap_usd: None,
      volume_usd: None,
      founded_date: None,
      created_at: created(),
    }
    .into_coin_record()
    .unwrap_err();
    assert!(err.to_string().contains("coin_name is empty"));
  }
}
