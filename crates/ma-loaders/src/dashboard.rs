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

//! Headline figures for the terminal dashboard
//!
//! EBITDA growth stands in for margin growth since the gold table carries no
//! revenue.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use ma_database_postgres::models::GoldRecord;

use crate::snapshot::read_gold_parquet;
use crate::LoaderResult;

/// Label for deals whose acquirer has no industry sector
pub const UNKNOWN_INDUSTRY: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustrySummary {
  pub industry: String,
  pub mean_delta_ev_pct: f64,
  pub deals: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
  /// `None` when no deal passes the filter
  pub avg_delta_ev_pct: Option<f64>,
  pub avg_margin_delta: Option<f64>,
  pub deal_count: usize,
  /// Sorted by industry name
  pub by_industry: Vec<IndustrySummary>,
  /// (deal_size_ratio, delta_ev_pct) per deal
  pub points: Vec<(f64, f64)>,
}

pub fn industry_of(record: &GoldRecord) -> &str {
  record.primaryindustrysector.as_deref().unwrap_or(UNKNOWN_INDUSTRY)
}

/// Distinct industries present in `records`, sorted
pub fn industries(records: &[GoldRecord]) -> Vec<String> {
  let mut names: Vec<String> = records.iter().map(|r| industry_of(r).to_string()).collect();
  names.sort();
  names.dedup();
  names
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
  let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
  (count > 0).then(|| sum / count as f64)
}

impl DashboardSummary {
  /// Summarize `records`, keeping only the listed industries when
  /// `selected` is non-empty
  pub fn from_records(records: &[GoldRecord], selected: &[String]) -> Self {
    let kept: Vec<&GoldRecord> = records
      .iter()
      .filter(|r| selected.is_empty() || selected.iter().any(|s| s == industry_of(r)))
      .collect();

    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in &kept {
      groups.entry(industry_of(record)).or_default().push(record.delta_ev_pct);
    }

    let by_industry = groups
      .into_iter()
      .filter_map(|(industry, values)| {
        Some(IndustrySummary {
          industry: industry.to_string(),
          deals: values.len(),
          mean_delta_ev_pct: mean(values.into_iter())?,
        })
      })
      .collect();

    Self {
      avg_delta_ev_pct: mean(kept.iter().map(|r| r.delta_ev_pct)),
      avg_margin_delta: mean(kept.iter().map(|r| r.delta_ebitda_pct)),
      deal_count: kept.len(),
      by_industry,
      points: kept.iter().map(|r| (r.deal_size_ratio, r.delta_ev_pct)).collect(),
    }
  }

  /// Read the gold snapshot at `path` and summarize it
  pub fn load(path: &Path, selected: &[String]) -> LoaderResult<(Self, Vec<String>)> {
    let records = read_gold_parquet(path)?;
    Ok((Self::from_records(&records, selected), industries(&records)))
  }
}
