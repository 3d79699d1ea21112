//! Bookkeeping of algorithms that were already announced.

use cps_core::{Cell, TableId, TableRecord};
use serde::{Deserialize, Serialize};

/// Row of `notify_log_new_algorithms`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotifyLogEntry {
  pub algo_name: String,
}

impl NotifyLogEntry {
  pub fn new(algo_name: impl Into<String>) -> Self {
    NotifyLogEntry { algo_name: algo_name.into() }
  }
}

impl TableRecord for NotifyLogEntry {
  const TABLE: TableId = TableId::NotifyLogNewAlgorithms;

  fn cells(&self) -> Vec<Cell> {
    vec![Cell::from(self.algo_name.as_str())]
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use cps_core::validate_records;

  #[test]
  fn test_duplicate_log_entries_rejected() {
    let report = validate_records(&[NotifyLogEntry::new("Ethash"), NotifyLogEntry::new("Ethash")]);
    assert_eq!(report.invalid_rows.len(), 1);
  }
}
