//! Common types used across cps-* crates

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// External website/API a raw table was scraped from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSite {
  Crypto51,
  Cryptodelver,
  Cryptoslate,
  Minerstat,
  Miningnow,
  Whattomine,
  Wheretomine,
}

impl SourceSite {
  pub const ALL: [SourceSite; 7] = [
    SourceSite::Crypto51,
    SourceSite::Cryptodelver,
    SourceSite::Cryptoslate,
    SourceSite::Minerstat,
    SourceSite::Miningnow,
    SourceSite::Whattomine,
    SourceSite::Wheretomine,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      SourceSite::Crypto51 => "crypto51",
      SourceSite::Cryptodelver => "cryptodelver",
      SourceSite::Cryptoslate => "cryptoslate",
      SourceSite::Minerstat => "minerstat",
      SourceSite::Miningnow => "miningnow",
      SourceSite::Whattomine => "whattomine",
      SourceSite::Wheretomine => "wheretomine",
    }
  }
}

impl std::fmt::Display for SourceSite {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for SourceSite {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    SourceSite::ALL
      .into_iter()
      .find(|site| site.as_str().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| Error::UnknownVariant { kind: "source site", value: s.to_string() })
  }
}

/// Mining hardware class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MinerType {
  ASIC,
  GPU,
}

impl MinerType {
  pub const LABELS: [&'static str; 2] = ["ASIC", "GPU"];

  pub fn as_str(&self) -> &'static str {
    match self {
      MinerType::ASIC => "ASIC",
      MinerType::GPU => "GPU",
    }
  }
}

impl std::fmt::Display for MinerType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for MinerType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_uppercase().as_str() {
      "ASIC" => Ok(MinerType::ASIC),
      "GPU" => Ok(MinerType::GPU),
      _ => Err(Error::UnknownVariant { kind: "miner type", value: s.to_string() }),
    }
  }
}

/// Hash rate unit suffix as reported by hardware listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashrateUnit {
  KiloHash,
  MegaHash,
  GigaHash,
  TeraHash,
  KiloSol,
  MegaSol,
  GigaSol,
}

impl HashrateUnit {
  pub const ALL: [HashrateUnit; 7] = [
    HashrateUnit::KiloHash,
    HashrateUnit::MegaHash,
    HashrateUnit::GigaHash,
    HashrateUnit::TeraHash,
    HashrateUnit::KiloSol,
    HashrateUnit::MegaSol,
    HashrateUnit::GigaSol,
  ];

  /// Parse a unit label such as `TH/s`. Labels are matched exactly.
  pub fn from_label(label: &str) -> Option<Self> {
    HashrateUnit::ALL.into_iter().find(|unit| unit.label() == label.trim())
  }

  pub fn label(&self) -> &'static str {
    match self {
      HashrateUnit::KiloHash => "kH/s",
      HashrateUnit::MegaHash => "MH/s",
      HashrateUnit::GigaHash => "GH/s",
      HashrateUnit::TeraHash => "TH/s",
      HashrateUnit::KiloSol => "kSol/s",
      HashrateUnit::MegaSol => "MSol/s",
      HashrateUnit::GigaSol => "GSol/s",
    }
  }

  /// Factor converting a value in this unit to hashes (or solutions) per second
  pub fn multiplier(&self) -> f64 {
    match self {
      HashrateUnit::KiloHash | HashrateUnit::KiloSol => 1e3,
      HashrateUnit::MegaHash | HashrateUnit::MegaSol => 1e6,
      HashrateUnit::GigaHash | HashrateUnit::GigaSol => 1e9,
      HashrateUnit::TeraHash => 1e12,
    }
  }
}

impl std::fmt::Display for HashrateUnit {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.label())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_source_site_round_trip_names() {
    for site in SourceSite::ALL {
      assert_eq!(site.as_str().parse::<SourceSite>().unwrap(), site);
    }
    assert_eq!("CryptoSlate".parse::<SourceSite>().unwrap(), SourceSite::Cryptoslate);
    assert!("coinzilla".parse::<SourceSite>().is_err());
  }

  #[test]
  fn test_source_site_serde_lowercase() {
    let json = serde_json::to_string(&SourceSite::Whattomine).unwrap();
    assert_eq!(json, "\"whattomine\"");
  }

  #[test]
  fn test_miner_type_parse() {
    assert_eq!("asic".parse::<MinerType>().unwrap(), MinerType::ASIC);
    assert_eq!("GPU".parse::<MinerType>().unwrap(), MinerType::GPU);
    assert!("FPGA".parse::<MinerType>().is_err());
  }

  #[test]
  fn test_hashrate_unit_multipliers() {
    assert_eq!(HashrateUnit::from_label("kH/s").unwrap().multiplier(), 1e3);
    assert_eq!(HashrateUnit::from_label("MH/s").unwrap().multiplier(), 1e6);
    assert_eq!(HashrateUnit::from_label("GH/s").unwrap().multiplier(), 1e9);
    assert_eq!(HashrateUnit::from_label("TH/s").unwrap().multiplier(), 1e12);
    assert_eq!(HashrateUnit::from_label("kSol/s").unwrap().multiplier(), 1e3);
    assert_eq!(HashrateUnit::from_label("MSol/s").unwrap().multiplier(), 1e6);
    assert_eq!(HashrateUnit::from_label("GSol/s").unwrap().multiplier(), 1e9);
  }

  #[test]
  fn test_hashrate_unit_unknown_label() {
    assert!(HashrateUnit::from_label("PH/s").is_none());
    assert!(HashrateUnit::from_label("th/s").is_none());
    assert!(HashrateUnit::from_label("").is_none());
  }
}
