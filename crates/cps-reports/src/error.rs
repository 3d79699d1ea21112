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

use cps_core::TableId;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ReportError {
  #[error("IO error: {0}")]
  Io(String),

  #[error("CSV error: {0}")]
  Csv(String),

  #[error("Serialization error: {0}")]
  Serialization(String),

  #[error("Schema validation failed for {table}: {violation_count} violation(s), first: {first}")]
  SchemaValidation { table: TableId, violation_count: usize, first: String },

  #[error("Internal consistency error: {0}")]
  InternalConsistency(String),

  #[error("Alias '{alias}' maps to both '{first}' and '{second}'")]
  AliasCollision { alias: String, first: String, second: String },

  #[error("Unknown hashrate unit '{unit}' for miner '{miner}'")]
  UnknownHashrateUnit { miner: String, unit: String },

  #[error("Invalid record in {table}: {message}")]
  InvalidRecord { table: TableId, message: String },

  #[error("Table sink error: {0}")]
  Sink(String),

  #[error("Notification error: {0}")]
  Notification(String),

  #[error("Configuration error: {0}")]
  Configuration(String),

  #[error("Regex error: {0}")]
  Regex(String),
}

impl From<csv::Error> for ReportError {
  fn from(err: csv::Error) -> Self {
    ReportError::Csv(err.to_string())
  }
}

impl From<std::io::Error> for ReportError {
  fn from(err: std::io::Error) -> Self {
    ReportError::Io(err.to_string())
  }
}

impl From<serde_json::Error> for ReportError {
  fn from(err: serde_json::Error) -> Self {
    ReportError::Serialization(err.to_string())
  }
}

impl From<cps_core::Error> for ReportError {
  fn from(err: cps_core::Error) -> Self {
    ReportError::Configuration(err.to_string())
  }
}

impl From<reqwest::Error> for ReportError {
  fn from(err: reqwest::Error) -> Self {
    ReportError::Notification(err.to_string())
  }
}

impl From<regex::Error> for ReportError {
  fn from(err: regex::Error) -> Self {
    ReportError::Regex(err.to_string())
  }
}

pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_schema_validation_display() {
    let err = ReportError::SchemaValidation {
      table: TableId::GoldAlgorithms,
      violation_count: 3,
      first: "row 0 [algo_name]: null in non-nullable column".to_string(),
    };
    assert_eq!(
      err.to_string(),
      "Schema validation failed for gold_algorithms: 3 violation(s), first: row 0 [algo_name]: null in non-nullable column"
    );
  }

  #[test]
  fn test_alias_collision_display() {
    let err = ReportError::AliasCollision {
      alias: "SHA256".to_string(),
      first: "SHA-256".to_string(),
      second: "SHA256DT".to_string(),
    };
    assert_eq!(err.to_string(), "Alias 'SHA256' maps to both 'SHA-256' and 'SHA256DT'");
  }

  #[test]
  fn test_unknown_unit_display() {
    let err =
      ReportError::UnknownHashrateUnit { miner: "Antminer S21".to_string(), unit: "PH/s".to_string() };
    assert_eq!(err.to_string(), "Unknown hashrate unit 'PH/s' for miner 'Antminer S21'");
  }

  #[test]
  fn test_from_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = ReportError::from(io_err);
    assert!(matches!(err, ReportError::Io(_)));
    assert!(err.to_string().contains("file missing"));
  }

  #[test]
  fn test_from_serde_json_error() {
    let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
    assert!(matches!(ReportError::from(json_err), ReportError::Serialization(_)));
  }

  #[test]
  fn test_from_core_error() {
    let core_err = cps_core::Error::Config("bad batch size".to_string());
    let err = ReportError::from(core_err);
    assert!(matches!(err, ReportError::Configuration(_)));
    assert!(err.to_string().contains("bad batch size"));
  }
}
