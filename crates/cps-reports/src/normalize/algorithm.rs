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

//! Algorithm name normalization: structural rewrites, alias lookup, post hook.

use regex::{Captures, Regex};

use crate::error::ReportResult;
use crate::normalize::aliases::AliasTable;

/// Hook applied after alias substitution
pub type PostHook = fn(String) -> String;

/// One structural rewrite of the pre-pass
#[derive(Debug, Clone)]
struct Rewrite {
  pattern: Regex,
  replacement: fn(&Captures<'_>) -> String,
}

impl Rewrite {
  fn new(pattern: &str, replacement: fn(&Captures<'_>) -> String) -> ReportResult<Self> {
    Ok(Self { pattern: Regex::new(pattern)?, replacement })
  }

  fn apply(&self, input: &str) -> String {
    self.pattern.replace_all(input, |caps: &Captures<'_>| (self.replacement)(caps)).into_owned()
  }
}

fn cryptonight(caps: &Captures<'_>) -> String {
  match caps.get(1).map(|m| m.as_str().trim()).filter(|s| !s.is_empty()) {
    Some(suffix) => format!("CryptoNight-{}", suffix),
    None => "CryptoNight".to_string(),
  }
}

fn equihash(caps: &Captures<'_>) -> String {
  format!("Equihash({},{})", &caps[1], &caps[2])
}

fn cuckatoo(_: &Captures<'_>) -> String {
  "Cuckatoo".to_string()
}

fn sha2(_: &Captures<'_>) -> String {
  "SHA-2".to_string()
}

fn sha3(_: &Captures<'_>) -> String {
  "SHA3".to_string()
}

fn identity(name: String) -> String {
  name
}

/// Maps raw algorithm spellings to canonical names.
///
/// Total and deterministic: input that matches neither a rewrite nor an alias
/// comes back trimmed but otherwise untouched.
#[derive(Debug, Clone)]
pub struct AlgorithmNormalizer {
  aliases: AliasTable,
  rewrites: Vec<Rewrite>,
  post_hook: PostHook,
}

impl AlgorithmNormalizer {
  pub fn new(aliases: AliasTable) -> ReportResult<Self> {
    // Order matters: each rewrite sees the output of the previous one.
    let rewrites = vec![
      Rewrite::new(r"(?i)^crypto[\s_-]?night(?:[\s_-]*(.+))?$", cryptonight)?,
      Rewrite::new(
        r"(?i)^equi\s*hash[\s_]*\(?\s*(\d{2,3})\s*[,_]?\s*(\d{1,2})\s*\)?$",
        equihash,
      )?,
      Rewrite::new(r"(?i)^cuckatoo", cuckatoo)?,
      Rewrite::new(r"(?i)\bsha[\s_]2\b", sha2)?,
      Rewrite::new(r"(?i)\bsha3\b", sha3)?,
    ];

    Ok(Self { aliases, rewrites, post_hook: identity })
  }

  /// Normalizer over the curated [`AliasTable::builtin`] set
  pub fn builtin() -> ReportResult<Self> {
    AlgorithmNormalizer::new(AliasTable::builtin()?)
  }

  /// Replace the (identity) post-alias hook
  pub fn with_post_hook(mut self, hook: PostHook) -> Self {
    self.post_hook = hook;
    self
  }

  pub fn aliases(&self) -> &AliasTable {
    &self.aliases
  }

  pub fn normalize(&self, raw: &str) -> String {
    let mut name = raw.trim().to_string();
    for rewrite in &self.rewrites {
      name = rewrite.apply(&name);
    }

    if let Some(canonical) = self.aliases.lookup(&name) {
      name = canonical.to_string();
    }

    (self.post_hook)(name)
  }

  /// Null stays null
  pub fn normalize_opt(&self, raw: Option<&str>) -> Option<String> {
    raw.map(|r| self.normalize(r))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::normalize::aliases::BUILTIN_ALIASES;

  fn normalizer() -> AlgorithmNormalizer {
    AlgorithmNormalizer::builtin().unwrap()
  }

  #[test]
  fn test_every_alias_reaches_its_canonical_name() {
    let n = normalizer();
    for (canonical, aliases) in BUILTIN_ALIASES {
      for alias in *aliases {
        assert_eq!(n.normalize(alias), *canonical, "alias {alias:?}");
      }
    }
  }

  #[test]
  fn test_canonical_names_are_fixed_points() {
    let n = normalizer();
    for (canonical, _) in BUILTIN_ALIASES {
      assert_eq!(n.normalize(canonical), *canonical);
    }
  }

  #[test]
  fn test_cryptonight_variants() {
    let n = normalizer();
    assert_eq!(n.normalize("Cryptonight V7"), "CryptoNight-V7");
    assert_eq!(n.normalize("CryptoNight Heavy"), "CryptoNight-Heavy");
    assert_eq!(n.normalize("crypto night"), "CryptoNight");
    assert_eq!(n.normalize("crypto_night_GPU"), "CryptoNight-GPU");
    assert_eq!(n.normalize("CryptonightR"), "CryptoNight-R");
  }

  #[test]
  fn test_equihash_parameter_forms() {
    let n = normalizer();
    assert_eq!(n.normalize("EquiHash 96,5"), "Equihash(96,5)");
    assert_eq!(n.normalize("Equihash (125,4)"), "Equihash(125,4)");
    assert_eq!(n.normalize("equihash 200_9"), "Equihash(200,9)");
    assert_eq!(n.normalize("Equihash2009"), "Equihash(200,9)");
    assert_eq!(n.normalize("Equihash965"), "Equihash(96,5)");
    assert_eq!(n.normalize("Equihash 150, 5"), "Equihash(150,5)");
    assert_eq!(n.normalize("Equihash"), "Equihash");
  }

  #[test]
  fn test_cuckatoo_and_sha_families() {
    let n = normalizer();
    assert_eq!(n.normalize("cuckatoo31"), "Cuckatoo31");
    assert_eq!(n.normalize("CUCKATOO32+"), "Cuckatoo32+");
    assert_eq!(n.normalize("sha 2"), "SHA-2");
    assert_eq!(n.normalize("sha3"), "SHA3");
    assert_eq!(n.normalize("Sha3-256"), "SHA3-256");
    assert_eq!(n.normalize("SHA256D"), "SHA-256");
    assert_eq!(n.normalize("SHA 256"), "SHA-256");
  }

  #[test]
  fn test_unmapped_names_pass_through() {
    let n = normalizer();
    assert_eq!(n.normalize("  Scrypt "), "Scrypt");
    assert_eq!(n.normalize("RandomX"), "RandomX");
    assert_eq!(n.normalize_opt(None), None);
    assert_eq!(n.normalize_opt(Some("Xevan")), Some("XEVAN".to_string()));
  }

  #[test]
  fn test_injected_alias_table_and_post_hook() {
    let table = AliasTable::new("test", vec![("Ethash", vec!["EtHash", "ethash"])]).unwrap();
    let n = AlgorithmNormalizer::new(table).unwrap().with_post_hook(|s| s.to_uppercase());
    assert_eq!(n.normalize("ethash"), "ETHASH");
    // Builtin aliases are not consulted.
    assert_eq!(n.normalize("SHA256D"), "SHA256D");
  }
}
