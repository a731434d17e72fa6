/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
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

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

mod commands;
use commands::{dashboard::DashboardArgs, extract::ExtractArgs};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "ma")]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Verbose output
  #[arg(short, long, global = true)]
  verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Extract filtered WRDS tables into the bronze schema
  Extract(ExtractArgs),

  /// Join deals, acquirers and financials into the silver schema
  Silver,

  /// Derive valuation metrics into the gold schema and Parquet snapshot
  Gold,

  /// Run extract, silver and gold in order
  Run(ExtractArgs),

  /// Summarize the gold snapshot in the terminal
  Dashboard(DashboardArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
  // Load environment variables
  dotenv().ok();

  // Parse CLI arguments
  let cli = Cli::parse();

  // Initialize logging
  let log_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt().with_env_filter(log_level).init();

  // The dashboard only reads a file; everything else needs the warehouse
  match cli.command {
    Commands::Dashboard(args) => commands::dashboard::execute(args)?,
    Commands::Extract(args) => commands::extract::execute(args, load_config()?).await?,
    Commands::Silver => commands::silver::execute(load_config()?).await?,
    Commands::Gold => commands::gold::execute(load_config()?).await?,
    Commands::Run(args) => commands::run::execute(args, load_config()?).await?,
  }

  Ok(())
}

fn load_config() -> Result<ma_core::Config> {
  Ok(ma_core::Config::from_env()?)
}
