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

//! Gold layer: one summary row per canonical algorithm.

use chrono::NaiveDate;
use cps_core::{Cell, RowRule, TableId, TableRecord};
use serde::{Deserialize, Serialize};

/// Row of `gold_algorithms`.
///
/// The `*_json` columns hold compact JSON string arrays, sorted and deduplicated.
/// `volume_24h_usd` and `market_cap_usd` are plain sums over every coin report
/// in the group, so a coin listed by two sources is counted twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldAlgorithm {
  pub algo_name: String,
  pub source_sites_json: String,
  pub source_tables_json: String,
  pub coin_count: u32,
  pub earliest_coin_created_at: NaiveDate,
  pub latest_coin_created_at: NaiveDate,
  /// `"<coin_name> @ <source_site>"` of the first observed coin
  pub earliest_coin: String,
  pub latest_coin: String,
  pub volume_24h_usd: Option<u64>,
  pub market_cap_usd: Option<u64>,
  pub asic_count: Option<u32>,
  pub earliest_asic_announcement_date: Option<NaiveDate>,
  pub earliest_asic_launch_date: Option<NaiveDate>,
  pub earliest_asic_created_at: Option<NaiveDate>,
  pub latest_asic_created_at: Option<NaiveDate>,
  pub reported_aliases_json: String,
  pub coin_names_json: String,
}

impl GoldAlgorithm {
  /// Decode `reported_aliases_json`; malformed JSON decodes to an empty list
  pub fn reported_aliases(&self) -> Vec<String> {
    decode_string_list(&self.reported_aliases_json)
  }

  pub fn source_sites(&self) -> Vec<String> {
    decode_string_list(&self.source_sites_json)
  }

  pub fn coin_names(&self) -> Vec<String> {
    decode_string_list(&self.coin_names_json)
  }
}

fn decode_string_list(json: &str) -> Vec<String> {
  serde_json::from_str(json).unwrap_or_default()
}

fn reported_aliases_not_empty(row: &GoldAlgorithm) -> bool {
  !row.reported_aliases().is_empty()
}

static GOLD_RULES: [RowRule<GoldAlgorithm>; 1] =
  [RowRule { name: "reported_aliases_json_is_not_empty_list", check: reported_aliases_not_empty }];

impl TableRecord for GoldAlgorithm {
  const TABLE: TableId = TableId::GoldAlgorithms;

  fn cells(&self) -> Vec<Cell> {
    vec![
      Cell::from(self.algo_name.as_str()),
      Cell::from(self.source_sites_json.as_str()),
      Cell::from(self.source_tables_json.as_str()),
      Cell::from(self.coin_count),
      Cell::from(self.earliest_coin_created_at),
      Cell::from(self.latest_coin_created_at),
      Cell::from(self.earliest_coin.as_str()),
      Cell::from(self.latest_coin.as_str()),
      Cell::from(self.volume_24h_usd),
      Cell::from(self.market_cap_usd),
      Cell::from(self.asic_count),
      Cell::from(self.earliest_asic_announcement_date),
      Cell::from(self.earliest_asic_launch_date),
      Cell::from(self.earliest_asic_created_at),
      Cell::from(self.latest_asic_created_at),
      Cell::from(self.reported_aliases_json.as_str()),
      Cell::from(self.coin_names_json.as_str()),
    ]
  }

  fn rules() -> &'static [RowRule<Self>] {
    &GOLD_RULES
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use cps_core::validate_records;

  fn gold(aliases_json: &str) -> GoldAlgorithm {
    let day = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    GoldAlgorithm {
      algo_name: "SHA-256".to_string(),
      source_sites_json: r#"["crypto51"]"#.to_string(),
      source_tables_json: r#"["crypto51_coins"]"#.to_string(),
      coin_count: 1,
      earliest_coin_created_at: day,
      latest_coin_created_at: day,
      earliest_coin: "Bitcoin @ crypto51".to_string(),
      latest_coin: "Bitcoin @ crypto51".to_string(),
      volume_24h_usd: None,
      market_cap_usd: None,
      asic_count: None,
      earliest_asic_announcement_date: None,
      earliest_asic_launch_date: None,
      earliest_asic_created_at: None,
      latest_asic_created_at: None,
      reported_aliases_json: aliases_json.to_string(),
      coin_names_json: r#"["Bitcoin"]"#.to_string(),
    }
  }

  #[test]
  fn test_valid_gold_row() {
    let row = gold(r#"["SHA256"]"#);
    assert_eq!(row.reported_aliases(), vec!["SHA256"]);
    assert!(validate_records(&[row]).is_valid());
  }

  #[test]
  fn test_empty_alias_list_breaks_rule() {
    let report = validate_records(&[gold("[]")]);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].column, "reported_aliases_json_is_not_empty_list");
  }

  #[test]
  fn test_malformed_alias_json_breaks_rule() {
    let report = validate_records(&[gold("SHA256")]);
    assert!(report.violations.iter().any(|v| v.column == "reported_aliases_json_is_not_empty_list"));
  }
}
