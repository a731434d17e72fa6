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

pub mod dashboard;
pub mod extract;
pub mod gold;
pub mod run;
pub mod silver;

use anyhow::{Context, Result};
use ma_core::Config;
use ma_database_postgres::DatabaseContext;
use ma_loaders::{LoaderConfig, LoaderContext, ProcessTracker};
use prettytable::{row, Table};
use tracing::info;

/// Connect to the warehouse and bring its schemas up to date
pub async fn connect_warehouse(config: &Config) -> Result<DatabaseContext> {
  let url = config.postgres.database_url()?;
  let context = DatabaseContext::new(&url).with_context(|| {
    format!("Failed to connect to warehouse at {}:{}", config.postgres.host, config.postgres.port)
  })?;
  let applied = context.migrate().await.context("Failed to run warehouse migrations")?;
  if applied > 0 {
    info!("Applied {} warehouse migrations", applied);
  }
  Ok(context)
}

/// Loader context that records each stage on `tracker`
pub fn loader_context(config: LoaderConfig, tracker: &ProcessTracker) -> LoaderContext {
  LoaderContext::new(config).with_process_tracker(tracker.clone())
}

/// Print the stages recorded on `tracker`
pub async fn print_timeline(tracker: &ProcessTracker) {
  let processes = tracker.get_all().await;
  if processes.is_empty() {
    return;
  }

  let mut table = Table::new();
  table.set_titles(row!["Stage", "State", "Records", "Elapsed (s)"]);
  for process in &processes {
    let records = process.records_processed.map(|r| r.to_string()).unwrap_or_default();
    let elapsed = process
      .elapsed()
      .map(|d| format!("{:.1}", d.num_milliseconds() as f64 / 1000.0))
      .unwrap_or_default();
    table.add_row(row![process.process_name, format!("{:?}", process.state), r->records, r->elapsed]);
  }
  table.printstd();
}
