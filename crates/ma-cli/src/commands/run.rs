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
use ma_core::Config;
use ma_loaders::ProcessTracker;
use tracing::{info, warn};

use super::extract::{self, ExtractArgs};
use super::{connect_warehouse, gold, print_timeline, silver};

/// Extract, transform and publish in order. Tables that fail to extract are
/// reported and the later stages run on whatever bronze holds.
pub async fn execute(args: ExtractArgs, config: Config) -> Result<()> {
  let tracker = ProcessTracker::new();
  let wrds_config = extract::wrds_credentials()?;
  let warehouse = connect_warehouse(&config).await?;

  info!("Stage 1/3: bronze extraction");
  let report = extract::extract(&args, &config, &wrds_config, &warehouse, &tracker).await?;
  extract::print_report(&report);
  if report.skipped_count() > 0 {
    warn!(
      "{} tables were skipped; see {}",
      report.skipped_count(),
      config.extraction_report_path.display()
    );
  }

  info!("Stage 2/3: silver transform");
  let silver_output = silver::transform(&warehouse, &tracker).await?;
  silver::print_summary(&silver_output);

  info!("Stage 3/3: gold metrics");
  let gold_output = gold::publish(&warehouse, &config.gold_parquet_path, &tracker).await?;
  gold::print_summary(&gold_output);

  print_timeline(&tracker).await;
  Ok(())
}
