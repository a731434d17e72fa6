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

use anyhow::{Context, Result};
use clap::Args;
use ma_client::WrdsClient;
use ma_core::{Config, WrdsConfig};
use ma_database_postgres::DatabaseContext;
use ma_loaders::{
  BronzeLoader, DataLoader, ExtractionFilter, ExtractionReport, LoaderConfig, ProcessTracker,
  TableOutcome,
};
use prettytable::{row, Table};
use std::sync::Arc;
use tracing::info;

use super::{connect_warehouse, loader_context, print_timeline};

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
  /// Identifiers per query for ticker, gvkey and link lookups
  #[arg(long, default_value = "1000")]
  pub chunk_size: usize,

  /// Identifiers per query for daily prices
  #[arg(long, default_value = "200")]
  pub price_chunk_size: usize,

  /// Acquirer industry sectors to extract financials for (comma separated)
  #[arg(long, value_delimiter = ',', default_value = "Information Technology,Financial Services")]
  pub sectors: Vec<String>,

  /// Extract financials for every company regardless of sector
  #[arg(long, conflicts_with = "sectors")]
  pub all_sectors: bool,

  /// Hide progress bars
  #[arg(long)]
  pub no_progress: bool,
}

impl ExtractArgs {
  pub fn loader_config(&self) -> LoaderConfig {
    LoaderConfig {
      show_progress: !self.no_progress,
      chunk_size: self.chunk_size,
      price_chunk_size: self.price_chunk_size,
      ..LoaderConfig::default()
    }
  }

  pub fn filter(&self) -> ExtractionFilter {
    let target_sectors = if self.all_sectors {
      Vec::new()
    } else {
      self.sectors.iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
    };
    ExtractionFilter { target_sectors, ..ExtractionFilter::default() }
  }
}

/// Read WRDS credentials, failing before any connection is attempted
pub fn wrds_credentials() -> Result<WrdsConfig> {
  WrdsConfig::from_env().context("WRDS credentials are required")
}

/// Run the bronze stage into `warehouse` and write its report. Per-table
/// failures are in the report; only connection and configuration problems
/// are errors.
pub async fn extract(
  args: &ExtractArgs,
  config: &Config,
  wrds_config: &WrdsConfig,
  warehouse: &DatabaseContext,
  tracker: &ProcessTracker,
) -> Result<ExtractionReport> {
  let client = WrdsClient::connect(wrds_config).context("Failed to connect to WRDS")?;

  let loader = BronzeLoader::new(Arc::new(client), Arc::new(warehouse.bronze_repository()));
  let context = loader_context(args.loader_config(), tracker);
  let report = loader.load(&context, args.filter()).await.context("Extraction failed")?;

  report.write_json(&config.extraction_report_path).with_context(|| {
    format!("Failed to write extraction report to {}", config.extraction_report_path.display())
  })?;
  Ok(report)
}

pub fn print_report(report: &ExtractionReport) {
  let mut table = Table::new();
  table.set_titles(row!["Table", "Status", "Rows", "Detail"]);
  for entry in &report.tables {
    match &entry.outcome {
      TableOutcome::Loaded { rows, failed_batches } => {
        let detail = if *failed_batches > 0 {
          format!("{} batches failed", failed_batches)
        } else {
          String::new()
        };
        table.add_row(row![entry.table, "loaded", r->rows, detail]);
      }
      TableOutcome::Skipped { reason } => {
        table.add_row(row![entry.table, "skipped", r->"-", reason]);
      }
    }
  }
  table.printstd();
  println!(
    "Target tickers: {}  gvkeys: {}  permcos: {}",
    report.target_tickers, report.gvkeys, report.permcos
  );
}

pub async fn execute(args: ExtractArgs, config: Config) -> Result<()> {
  info!("Starting bronze extraction");
  let tracker = ProcessTracker::new();
  let wrds_config = wrds_credentials()?;
  let warehouse = connect_warehouse(&config).await?;
  let report = extract(&args, &config, &wrds_config, &warehouse, &tracker).await?;

  print_report(&report);
  print_timeline(&tracker).await;
  Ok(())
}
