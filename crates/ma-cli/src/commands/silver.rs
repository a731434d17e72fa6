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
use ma_core::Config;
use ma_database_postgres::DatabaseContext;
use ma_loaders::{DataLoader, LoaderConfig, ProcessTracker, SilverLoader, SilverOutput};
use std::sync::Arc;

use super::{connect_warehouse, loader_context, print_timeline};

pub async fn transform(warehouse: &DatabaseContext, tracker: &ProcessTracker) -> Result<SilverOutput> {
  let loader = SilverLoader::new(
    Arc::new(warehouse.bronze_repository()),
    Arc::new(warehouse.silver_repository()),
  );
  let context = loader_context(LoaderConfig::default(), tracker);
  loader.load(&context, ()).await.context("Silver stage failed")
}

pub fn print_summary(output: &SilverOutput) {
  println!("Silver layer");
  println!("============");
  println!("Deals with size:        {}", output.deals_read);
  println!("Joined to acquirers:    {}", output.joined_rows);
  println!("Dropped (missing data): {}", output.dropped_incomplete);
  println!("Rows written:           {}", output.rows_written);
}

pub async fn execute(config: Config) -> Result<()> {
  let warehouse = connect_warehouse(&config).await?;
  let tracker = ProcessTracker::new();

  let output = transform(&warehouse, &tracker).await?;

  print_summary(&output);
  print_timeline(&tracker).await;
  Ok(())
}
