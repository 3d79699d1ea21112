use anyhow::{Context, Result};
use cps_reports::AlgorithmNormalizer;

/// Print the builtin alias table. Building it fails on colliding aliases.
pub fn execute() -> Result<()> {
  let normalizer = AlgorithmNormalizer::builtin().context("Builtin alias table is inconsistent")?;
  let aliases = normalizer.aliases();

  println!("🧠 Algorithm aliases (version {})", aliases.version());
  println!("================================");
  for (alias, canonical) in aliases.pairs() {
    println!("{:<24} -> {}", alias, canonical);
  }
  println!("{} aliases, no collisions", aliases.len());
  Ok(())
}
