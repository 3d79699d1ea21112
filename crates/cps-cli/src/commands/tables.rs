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

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use cps_core::{Config, TableId};

use super::build_pipeline;

#[derive(Args, Debug)]
pub struct TablesCommand {
  #[command(subcommand)]
  command: TablesSubcommands,
}

#[derive(Subcommand, Debug)]
enum TablesSubcommands {
  /// List registered tables with their snapshot paths and primary keys
  List,

  /// Validate a CSV export with the table's schema and push it to the store
  Import {
    /// Registered table name, e.g. `crypto51_coins`
    table: TableId,

    /// CSV file with a header row
    csv: PathBuf,
  },
}

pub async fn execute(cmd: TablesCommand, config: Config) -> Result<()> {
  match cmd.command {
    TablesSubcommands::List => {
      list(&config);
      Ok(())
    }
    TablesSubcommands::Import { table, csv } => {
      let pipeline = build_pipeline(config)?;
      let stats = pipeline
        .import_csv(table, &csv)
        .await
        .with_context(|| format!("Failed to import {} into {}", csv.display(), table))?;
      println!(
        "✅ {}: {} inserted, {} updated, {} unchanged{}",
        table,
        stats.inserted,
        stats.updated,
        stats.unchanged,
        if stats.dry_run { " (dry run)" } else { "" }
      );
      Ok(())
    }
  }
}

fn list(config: &Config) {
  println!("{:<28} {:<8} {:<45} primary key", "table", "layer", "snapshot");
  println!("{}", "-".repeat(100));
  for table in TableId::ALL {
    println!(
      "{:<28} {:<8} {:<45} {}",
      table.name(),
      format!("{:?}", table.layer()).to_lowercase(),
      table.artifact_path(&config.data_dir).display(),
      table.schema().primary_key_names().join(", ")
    );
  }
}
