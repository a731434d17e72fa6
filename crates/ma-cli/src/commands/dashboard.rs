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
use ma_loaders::DashboardSummary;
use prettytable::{row, Table};
use std::path::PathBuf;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct DashboardArgs {
  /// Only include these industries (repeatable). Deals without a sector are "Unknown".
  #[arg(long)]
  pub industry: Vec<String>,

  /// Gold Parquet snapshot to read
  #[arg(long, env = "GOLD_PARQUET_PATH", default_value = ma_core::DEFAULT_GOLD_PARQUET_PATH)]
  pub path: PathBuf,
}

fn pct(value: Option<f64>) -> String {
  value.map(|v| format!("{:.2}%", v * 100.0)).unwrap_or_else(|| "n/a".to_string())
}

pub fn render(summary: &DashboardSummary) {
  println!("M&A Impact Dashboard");
  println!("====================");
  println!("Avg ΔEV%:     {}", pct(summary.avg_delta_ev_pct));
  println!("Avg ΔMargin%: {}", pct(summary.avg_margin_delta));
  println!("Deals:        {}", summary.deal_count);

  if summary.by_industry.is_empty() {
    return;
  }

  println!("\nΔEV% by Industry");
  let mut industries = Table::new();
  industries.set_titles(row!["Industry", "Mean ΔEV%", "Deals"]);
  for entry in &summary.by_industry {
    industries.add_row(row![entry.industry, r->pct(Some(entry.mean_delta_ev_pct)), r->entry.deals]);
  }
  industries.printstd();

  println!("\nΔEV% vs Deal Size Ratio");
  let mut points = Table::new();
  points.set_titles(row!["Deal Size Ratio", "ΔEV%"]);
  let mut sorted = summary.points.clone();
  sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
  for (ratio, delta) in sorted {
    points.add_row(row![r->format!("{:.4}", ratio), r->pct(Some(delta))]);
  }
  points.printstd();
}

pub fn execute(args: DashboardArgs) -> Result<()> {
  let (summary, available) = DashboardSummary::load(&args.path, &args.industry)
    .with_context(|| format!("Failed to load gold snapshot {}", args.path.display()))?;

  for name in args.industry.iter().filter(|name| !available.contains(name)) {
    warn!("Industry '{}' not present in snapshot; available: {}", name, available.join(", "));
  }

  render(&summary);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_pct_formatting() {
    assert_eq!(pct(Some(0.1796)), "17.96%");
    assert_eq!(pct(Some(-0.05)), "-5.00%");
    assert_eq!(pct(None), "n/a");
  }

  #[test]
  fn test_missing_snapshot_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let args = DashboardArgs { industry: Vec::new(), path: dir.path().join("gold_data.parquet") };
    let err = execute(args).unwrap_err();
    assert!(err.to_string().contains("Failed to load gold snapshot"));
  }
}
