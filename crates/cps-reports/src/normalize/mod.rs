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

//! Canonicalization of algorithm and coin names reported by the sources.
//!
//! Algorithm names go through a structural regex pass and a curated
//! [`AliasTable`]. Coin names are too numerous to curate, so they are grouped
//! automatically by their [`boring_form`].

pub mod aliases;
pub mod algorithm;
pub mod coin_name;

pub use aliases::{AliasTable, BUILTIN_ALIASES, BUILTIN_ALIASES_VERSION};
pub use algorithm::AlgorithmNormalizer;
pub use coin_name::{CoinNameMap, build_coin_name_map};

/// Grouping key for names: lowercase with every non-alphanumeric character removed
pub fn boring_form(name: &str) -> String {
  name.to_lowercase().chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_boring_form() {
    assert_eq!(boring_form("Bitcoin Cash"), "bitcoincash");
    assert_eq!(boring_form("bitcoin-cash"), "bitcoincash");
    assert_eq!(boring_form("SHA-256"), "sha256");
    assert_eq!(boring_form("Équilibre"), "quilibre");
    assert_eq!(boring_form("---"), "");
  }
}
