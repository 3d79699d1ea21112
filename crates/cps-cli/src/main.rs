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

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

mod commands;
use commands::{
  notify::NotifyArgs,
  reports::StepArgs,
  tables::TablesCommand,
};

mod config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "cps")]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Never push to the table store or send notifications
  #[arg(long, global = true)]
  dry_run: bool,

  /// Snapshot folder, overrides CPS_DATA_DIR
  #[arg(long, global = true)]
  data_dir: Option<PathBuf>,

  /// Table store folder, overrides CPS_STORE_DIR
  #[arg(long, global = true)]
  store_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Run the full reports pipeline: sources, silver tables, gold table
  Run,

  /// Run a single pipeline step
  Step(StepArgs),

  /// Announce newly discovered algorithms
  Notify(NotifyArgs),

  /// Inspect the table registry or import source tables
  Tables(TablesCommand),

  /// Print the algorithm alias table
  Aliases,
}

#[tokio::main]
async fn main() -> Result<()> {
  // Load environment variables
  dotenv().ok();

  // Parse CLI arguments
  let cli = Cli::parse();

  // Initialize logging
  tracing_subscriber::fmt().with_env_filter(log_filter(cli.verbose)).init();

  // Load configuration
  let config = config::load(config::Overrides {
    data_dir: cli.data_dir,
    store_dir: cli.store_dir,
    dry_run: cli.dry_run,
  })?;

  // Execute command
  match cli.command {
    Commands::Run => commands::reports::run(config).await?,
    Commands::Step(args) => commands::reports::step(args, config).await?,
    Commands::Notify(args) => commands::notify::execute(args, config).await?,
    Commands::Tables(cmd) => commands::tables::execute(cmd, config).await?,
    Commands::Aliases => commands::aliases::execute()?,
  }

  Ok(())
}

/// `RUST_LOG` wins over the `--verbose` default
fn log_filter(verbose: bool) -> EnvFilter {
  let log_level = if verbose { "debug" } else { "info" };
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::CommandFactory;
  use serial_test::serial;
  use commands::reports::Step;

  #[test]
  fn test_cli_is_well_formed() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_step() {
    let cli = Cli::try_parse_from(["cps", "--dry-run", "step", "gold-algorithms"]).unwrap();
    assert!(cli.dry_run);
    match cli.command {
      Commands::Step(args) => assert_eq!(args.step, Step::GoldAlgorithms),
      other => panic!("unexpected command: {:?}", other),
    }
  }

  #[test]
  fn test_parse_notify_daemon() {
    let cli = Cli::try_parse_from(["cps", "notify", "--daemon", "--interval-secs", "60"]).unwrap();
    match cli.command {
      Commands::Notify(args) => {
        assert!(args.daemon);
        assert_eq!(args.interval_secs, 60);
      }
      other => panic!("unexpected command: {:?}", other),
    }
  }

  #[test]
  fn test_import_rejects_unknown_table() {
    assert!(Cli::try_parse_from(["cps", "tables", "import", "bogus_table", "x.csv"]).is_err());
    assert!(Cli::try_parse_from(["cps", "tables", "import", "crypto51_coins", "x.csv"]).is_ok());
  }

  #[test]
  #[serial]
  fn test_log_filter_honours_rust_log() {
    std::env::set_var("RUST_LOG", "warn");
    assert_eq!(log_filter(true).to_string(), "warn");

    std::env::remove_var("RUST_LOG");
    assert_eq!(log_filter(true).to_string(), "debug");
    assert_eq!(log_filter(false).to_string(), "info");
  }
}
