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

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use cps_core::Config;
use tracing::info;

use super::build_pipeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Step {
  /// Fetch sources and build `silver_stacked_coins`
  SilverCoins,
  /// Fetch sources and build `silver_stacked_miners`
  SilverMiners,
  /// Build `gold_algorithms` from the stored silver tables
  GoldAlgorithms,
}

#[derive(Args, Debug)]
pub struct StepArgs {
  /// Pipeline step to run
  #[arg(value_enum)]
  pub step: Step,
}

pub async fn run(config: Config) -> Result<()> {
  let pipeline = build_pipeline(config)?;
  let summary = pipeline.run().await.context("Reports pipeline failed")?;

  println!("📊 Reports run");
  println!("==============");
  println!("Source tables:   {}", summary.source_tables);
  println!("Silver coins:    {}", summary.silver_coins);
  println!("Silver miners:   {}", summary.silver_miners);
  println!("Gold algorithms: {}", summary.gold_algorithms);
  Ok(())
}

pub async fn step(args: StepArgs, config: Config) -> Result<()> {
  let pipeline = build_pipeline(config)?;

  match args.step {
    Step::SilverCoins => {
      pipeline.fetch_source_tables().await.context("Failed to fetch source tables")?;
      let coins = pipeline.run_silver_coins().context("silver_stacked_coins failed")?;
      pipeline.push_records(&coins).await.context("Failed to push silver_stacked_coins")?;
      info!("silver_stacked_coins: {} rows", coins.len());
    }
    Step::SilverMiners => {
      pipeline.fetch_source_tables().await.context("Failed to fetch source tables")?;
      let miners = pipeline.run_silver_miners().context("silver_stacked_miners failed")?;
      pipeline.push_records(&miners).await.context("Failed to push silver_stacked_miners")?;
      info!("silver_stacked_miners: {} rows", miners.len());
    }
    Step::GoldAlgorithms => {
      let gold = pipeline.run_gold_algorithms().await.context("gold_algorithms failed")?;
      info!("gold_algorithms: {} rows", gold.len());
    }
  }
  Ok(())
}
