//! Automatic canonicalization of coin names.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::{ReportError, ReportResult};
use crate::normalize::boring_form;

/// Raw reported coin name -> canonical coin name
pub type CoinNameMap = BTreeMap<String, String>;

/// Group every reported name by its [`boring_form`] and map each member of a
/// group to the group's lexicographically smallest spelling (byte order, so
/// upper case sorts before lower case). A group whose smallest spelling is
/// empty maps each member to itself.
///
/// The result has exactly one key per distinct input name; anything else is an
/// internal consistency error.
pub fn build_coin_name_map<'a>(
  all_reported_names: impl IntoIterator<Item = &'a str>,
) -> ReportResult<CoinNameMap> {
  let unique: BTreeSet<&str> = all_reported_names.into_iter().collect();

  let mut groups: BTreeMap<String, Vec<&str>> = BTreeMap::new();
  for name in &unique {
    groups.entry(boring_form(name)).or_default().push(*name);
  }

  let mut map = CoinNameMap::new();
  let mut merged_groups = 0usize;
  for members in groups.values() {
    // Members arrive in set order, so the first is the smallest.
    let canonical = members.first().copied().unwrap_or_default();
    if members.len() > 1 {
      merged_groups += 1;
    }

    for name in members {
      let target = if canonical.is_empty() { *name } else { canonical };
      if let Some(previous) = map.insert(name.to_string(), target.to_string()) {
        return Err(ReportError::InternalConsistency(format!(
          "coin name '{}' mapped twice: '{}' vs '{}'",
          name, previous, target
        )));
      }
    }
  }

  if map.len() != unique.len() || unique.iter().any(|name| !map.contains_key(*name)) {
    return Err(ReportError::InternalConsistency(format!(
      "coin name map has {} keys for {} distinct names",
      map.len(),
      unique.len()
    )));
  }

  debug!("Built coin name map: {} names, {} merged groups", map.len(), merged_groups);
  Ok(map)
}
