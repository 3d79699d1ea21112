//! Curated algorithm alias table.

use std::collections::BTreeMap;

use crate::error::{ReportError, ReportResult};

/// Version tag of [`BUILTIN_ALIASES`]. Bump whenever an entry changes.
pub const BUILTIN_ALIASES_VERSION: &str = "2025.09.1";

/// Canonical algorithm name followed by the raw spellings observed for it.
///
/// SHA-256 and SHA-256D are deliberately merged: the sources do not
/// distinguish them reliably. SHA256DT is a different algorithm.
pub const BUILTIN_ALIASES: &[(&str, &[&str])] = &[
  ("Blake2B", &["Blake2b", "Blake (2b)"]),
  ("Blake2B-Sia", &["Blake2b-Sia", "Blake (2b)-Sia", "Blake (2b-Sia)"]),
  ("CryptoNight-Heavy", &["Cryptonight Heavy"]),
  ("CryptoNight-Lite", &["Cryptonight Lite", "CryptoNight-lite"]),
  ("CryptoNight-V7", &["Cryptonight V7", "CryptoNight V7", "CryptoNightV7"]),
  ("CuckooCycle", &["Cuckoo Cycle"]),
  ("Equihash(144,5)", &["Equihash 144,5", "Equihash1445", "Equihash 144_5"]),
  ("Equihash(192,7)", &["Equihash 192,7", "Equihash1927", "Equihash 192_7"]),
  ("Equihash(210,9)", &["Equihash210,9"]),
  ("FiroPoW", &["Firo Pow", "FiroPoW", "FiroPow"]),
  ("Handshake", &["HandShake"]),
  ("KawPow", &["Kaw Pow", "KawPow", "KAWPOW"]),
  ("Keccak", &["KECCAK"]),
  ("KHeavyHash", &["kHeavyHash"]),
  ("LPoS", &["LPos", "LPoS", "LPOS"]),
  ("Lyra2Z", &["Lyra2z"]),
  ("M7M", &["m7m"]),
  ("NexaPoW", &["Nexa Pow", "NexaPow", "NEXAPOW"]),
  ("PoD", &["POD"]),
  ("Quark", &["QUARK", "quark"]),
  ("QuBit", &["Qubit", "QUbit", "qubit"]),
  ("SHA-256", &["SHA-256D", "SHA256", "SHA256D", "SHA 256"]),
  ("SHA256DT", &["SHA256dT", "SHA-256dT"]),
  ("VerusHash", &["Verus hash", "VerusHash", "Verushash"]),
  ("XEVAN", &["Xevan"]),
  ("yescrypt", &["Yescript", "YesCript", "yescript", "Yescrypt"]),
  ("XelisHash-V2", &["Xelishashv2"]),
];

/// Exact-match lookup from raw spelling to canonical algorithm name.
///
/// Built explicitly and handed to the normalizer, so tests can swap in their
/// own sets. Construction fails if one alias would map to two canonical names.
#[derive(Debug, Clone)]
pub struct AliasTable {
  version: String,
  mappings: BTreeMap<String, String>,
}

impl AliasTable {
  pub fn new<C, A>(
    version: impl Into<String>,
    groups: impl IntoIterator<Item = (C, Vec<A>)>,
  ) -> ReportResult<Self>
  where
    C: Into<String>,
    A: Into<String>,
  {
    let mut mappings: BTreeMap<String, String> = BTreeMap::new();

    for (canonical, aliases) in groups {
      let canonical = canonical.into();
      for alias in aliases {
        let alias = alias.into();
        match mappings.get(&alias) {
          Some(existing) if *existing != canonical => {
            return Err(ReportError::AliasCollision {
              alias,
              first: existing.clone(),
              second: canonical,
            });
          }
          Some(_) => {}
          None => {
            mappings.insert(alias, canonical.clone());
          }
        }
      }
    }

    Ok(Self { version: version.into(), mappings })
  }

  /// The curated production table
  pub fn builtin() -> ReportResult<Self> {
    AliasTable::new(
      BUILTIN_ALIASES_VERSION,
      BUILTIN_ALIASES.iter().map(|(canonical, aliases)| (*canonical, aliases.to_vec())),
    )
  }

  pub fn lookup(&self, raw: &str) -> Option<&str> {
    self.mappings.get(raw).map(String::as_str)
  }

  pub fn version(&self) -> &str {
    &self.version
  }

  /// `(alias, canonical)` pairs ordered by alias
  pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
    self.mappings.iter().map(|(a, c)| (a.as_str(), c.as_str()))
  }

  pub fn len(&self) -> usize {
    self.mappings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.mappings.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_builtin_table_has_no_collisions() {
    let table = AliasTable::builtin().unwrap();
    let expected: usize = BUILTIN_ALIASES.iter().map(|(_, aliases)| aliases.len()).sum();
    assert_eq!(table.len(), expected);
    assert_eq!(table.version(), BUILTIN_ALIASES_VERSION);
  }

  #[test]
  fn test_collision_is_rejected() {
    let err = AliasTable::new(
      "test",
      vec![("SHA-256", vec!["SHA256"]), ("SHA256DT", vec!["SHA256"])],
    )
    .unwrap_err();
    match err {
      ReportError::AliasCollision { alias, first, second } => {
        assert_eq!(alias, "SHA256");
        assert_eq!(first, "SHA-256");
        assert_eq!(second, "SHA256DT");
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn test_repeated_alias_for_same_canonical_is_fine() {
    let table =
      AliasTable::new("test", vec![("NexaPoW", vec!["NexaPow", "NexaPow"])]).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.lookup("NexaPow"), Some("NexaPoW"));
  }

  #[test]
  fn test_lookup_is_exact() {
    let table = AliasTable::builtin().unwrap();
    assert_eq!(table.lookup("SHA256D"), Some("SHA-256"));
    assert_eq!(table.lookup("sha256d"), None);
    assert_eq!(table.lookup("SHA-256"), None);
  }
}
