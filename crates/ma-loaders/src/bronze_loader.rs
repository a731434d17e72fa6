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

//! Bronze stage: extract filtered WRDS tables into the `bronze` schema
//!
//! The four PitchBook tables are independent: a failure on one is recorded
//! and extraction moves on. The Compustat/CRSP tables are narrowed by
//! identifiers derived from earlier steps (ticker -> gvkey -> permco), so a
//! missing prerequisite marks every dependent table as skipped.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

use ma_client::queries::{self, CompanyCriteria, DealCriteria};
use ma_client::WrdsSource;
use ma_database_postgres::models::{Company, IndustryRelation};
use ma_database_postgres::{BronzeRepository, RepositoryResult};

use crate::batch_processor::{BatchConfig, BatchResult, ChunkedFetcher};
use crate::{DataLoader, LoaderContext, LoaderError, LoaderResult, ProcessState};

pub const DEALS_TABLE: &str = "ot_glb_deal";
pub const COMPANIES_TABLE: &str = "ot_glb_company";
pub const BUYSIDE_TABLE: &str = "ot_glb_companybuysiderelation";
pub const INDUSTRY_TABLE: &str = "ot_glb_companyindustryrelation";
pub const LINKS_TABLE: &str = "ccmxpf_lnkhist";
pub const FUNDAMENTALS_TABLE: &str = "fundq";
pub const DAILY_PRICES_TABLE: &str = "dsf";

/// What to pull from WRDS
#[derive(Debug, Clone)]
pub struct ExtractionFilter {
  pub deals: DealCriteria,
  pub companies: CompanyCriteria,
  /// Acquirer industry sectors to keep. Empty keeps every extracted company.
  pub target_sectors: Vec<String>,
  /// Earliest period end / trading date fetched for fundamentals and prices
  pub history_start: NaiveDate,
}

impl Default for ExtractionFilter {
  fn default() -> Self {
    Self {
      deals: DealCriteria::default(),
      companies: CompanyCriteria::default(),
      target_sectors: vec!["Information Technology".to_string(), "Financial Services".to_string()],
      history_start: NaiveDate::from_ymd_opt(1999, 1, 1).unwrap_or_default(),
    }
  }
}

/// Result of extracting one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableOutcome {
  Loaded { rows: usize, failed_batches: usize },
  Skipped { reason: String },
}

impl TableOutcome {
  pub fn is_loaded(&self) -> bool {
    matches!(self, TableOutcome::Loaded { .. })
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableReport {
  pub table: String,
  #[serde(flatten)]
  pub outcome: TableOutcome,
}

/// Per-run record of what reached the bronze schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
  pub started_at: DateTime<Utc>,
  pub finished_at: Option<DateTime<Utc>>,
  pub target_tickers: usize,
  pub gvkeys: usize,
  pub permcos: usize,
  pub tables: Vec<TableReport>,
}

impl Default for ExtractionReport {
  fn default() -> Self {
    Self::new()
  }
}

impl ExtractionReport {
  pub fn new() -> Self {
    Self {
      started_at: Utc::now(),
      finished_at: None,
      target_tickers: 0,
      gvkeys: 0,
      permcos: 0,
      tables: Vec::new(),
    }
  }

  pub fn record(&mut self, table: &str, outcome: TableOutcome) {
    match &outcome {
      TableOutcome::Loaded { rows, failed_batches: 0 } => {
        info!("Loaded {} rows into bronze.{}", rows, table)
      }
      TableOutcome::Loaded { rows, failed_batches } => {
        warn!("Loaded {} rows into bronze.{} ({} batches failed)", rows, table, failed_batches)
      }
      TableOutcome::Skipped { reason } => warn!("Skipped bronze.{}: {}", table, reason),
    }
    self.tables.push(TableReport { table: table.to_string(), outcome });
  }

  fn skip_all(&mut self, tables: &[&str], reason: &str) {
    for table in tables {
      self.record(table, TableOutcome::Skipped { reason: reason.to_string() });
    }
  }

  pub fn outcome(&self, table: &str) -> Option<&TableOutcome> {
    self.tables.iter().find(|t| t.table == table).map(|t| &t.outcome)
  }

  pub fn loaded_count(&self) -> usize {
    self.tables.iter().filter(|t| t.outcome.is_loaded()).count()
  }

  pub fn skipped_count(&self) -> usize {
    self.tables.len() - self.loaded_count()
  }

  pub fn total_rows(&self) -> usize {
    self
      .tables
      .iter()
      .map(|t| match t.outcome {
        TableOutcome::Loaded { rows, .. } => rows,
        TableOutcome::Skipped { .. } => 0,
      })
      .sum()
  }

  pub fn log_summary(&self) {
    info!(
      "Extraction finished: {} tables loaded, {} skipped, {} rows",
      self.loaded_count(),
      self.skipped_count(),
      self.total_rows()
    );
  }

  /// Write the report as pretty JSON, creating parent directories
  pub fn write_json(&self, path: &Path) -> LoaderResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(self)?;
    fs::write(path, json)?;
    info!("Extraction report written to {}", path.display());
    Ok(())
  }
}

/// Tickers of companies whose industry relation falls in `sectors`,
/// deduplicated and sorted. An empty `sectors` keeps every company.
pub fn target_tickers(
  companies: &[Company],
  industries: &[IndustryRelation],
  sectors: &[String],
) -> Vec<String> {
  let in_sector: Option<HashSet<&str>> = if sectors.is_empty() {
    None
  } else {
    Some(
      industries
        .iter()
        .filter(|r| r.industrysector.as_ref().is_some_and(|s| sectors.contains(s)))
        .map(|r| r.companyid.as_str())
        .collect(),
    )
  };

  companies
    .iter()
    .filter(|c| in_sector.as_ref().map_or(true, |ids| ids.contains(c.companyid.as_str())))
    .filter_map(|c| c.ticker.as_deref().map(str::trim).filter(|t| !t.is_empty()))
    .map(str::to_string)
    .collect::<BTreeSet<_>>()
    .into_iter()
    .collect()
}

pub struct BronzeLoader {
  source: Arc<dyn WrdsSource>,
  repository: Arc<dyn BronzeRepository>,
}

impl BronzeLoader {
  pub fn new(source: Arc<dyn WrdsSource>, repository: Arc<dyn BronzeRepository>) -> Self {
    Self { source, repository }
  }

  fn fetcher(context: &LoaderContext, batch_size: usize) -> ChunkedFetcher {
    ChunkedFetcher::new(BatchConfig { batch_size, show_progress: context.config.show_progress })
  }
}

/// Replace `table` with `rows` and record the outcome. Returns whether the write succeeded.
async fn persist<T, F, Fut>(
  report: &mut ExtractionReport,
  table: &str,
  rows: Vec<T>,
  failed_batches: usize,
  replace: F,
) -> bool
where
  F: FnOnce(Vec<T>) -> Fut,
  Fut: Future<Output = RepositoryResult<usize>>,
{
  match replace(rows).await {
    Ok(written) => {
      report.record(table, TableOutcome::Loaded { rows: written, failed_batches });
      true
    }
    Err(e) => {
      error!("Failed to write bronze.{}: {}", table, e);
      report.record(table, TableOutcome::Skipped { reason: format!("write failed: {}", e) });
      false
    }
  }
}

/// Skip reason for an empty chunked fetch, naming failed batches if any
fn empty_reason<T>(what: &str, result: &BatchResult<T>) -> String {
  if result.failure_count() > 0 {
    format!("{} ({} of {} batches failed)", what, result.failure_count(), result.total_processed)
  } else {
    what.to_string()
  }
}

/// Persist a chunked result unless it came back empty
async fn persist_chunked<T, F, Fut>(
  report: &mut ExtractionReport,
  table: &str,
  result: BatchResult<T>,
  replace: F,
) where
  F: FnOnce(Vec<T>) -> Fut,
  Fut: Future<Output = RepositoryResult<usize>>,
{
  if result.is_empty() {
    let reason = empty_reason("no rows returned", &result);
    report.record(table, TableOutcome::Skipped { reason });
    return;
  }
  let failed = result.failure_count();
  persist(report, table, result.success, failed, replace).await;
}

#[async_trait]
impl DataLoader for BronzeLoader {
  type Input = ExtractionFilter;
  type Output = ExtractionReport;

  async fn validate_input(&self, input: &ExtractionFilter) -> LoaderResult<()> {
    if input.deals.announced_from > input.deals.announced_to {
      return Err(LoaderError::InvalidData(format!(
        "announcement window is empty: {} > {}",
        input.deals.announced_from, input.deals.announced_to
      )));
    }
    Ok(())
  }

  async fn load(
    &self,
    context: &LoaderContext,
    filter: ExtractionFilter,
  ) -> LoaderResult<ExtractionReport> {
    self.validate_input(&filter).await?;
    context.track_start(self.name()).await?;

    match self.extract(context, filter).await {
      Ok(report) => Ok(report),
      Err(e) => {
        error!("Bronze extraction aborted: {}", e);
        context.track_complete(ProcessState::Failed, 0).await?;
        Err(e)
      }
    }
  }

  fn name(&self) -> &'static str {
    "bronze"
  }
}

impl BronzeLoader {
  /// Tables that fail are recorded and skipped; only configuration errors abort
  async fn extract(
    &self,
    context: &LoaderContext,
    filter: ExtractionFilter,
  ) -> LoaderResult<ExtractionReport> {
    let mut report = ExtractionReport::new();
    let repo = &self.repository;

    info!("Extracting filtered {}", DEALS_TABLE);
    match self.source.deals(&queries::deals_query(&filter.deals)).await {
      Ok(rows) => {
        persist(&mut report, DEALS_TABLE, rows, 0, |r| repo.replace_deals(r)).await;
      }
      Err(e) => {
        error!("Failed to process {}: {}", DEALS_TABLE, e);
        report.record(DEALS_TABLE, TableOutcome::Skipped { reason: e.to_string() });
      }
    }

    info!("Extracting filtered {}", COMPANIES_TABLE);
    let companies = match self.source.companies(&queries::companies_query(&filter.companies)).await
    {
      Ok(rows) => {
        persist(&mut report, COMPANIES_TABLE, rows.clone(), 0, |r| repo.replace_companies(r)).await;
        Some(rows)
      }
      Err(e) => {
        error!("Failed to process {}: {}", COMPANIES_TABLE, e);
        report.record(COMPANIES_TABLE, TableOutcome::Skipped { reason: e.to_string() });
        None
      }
    };

    info!("Extracting {}", BUYSIDE_TABLE);
    match self.source.buyside_relations(queries::BUYSIDE_RELATIONS_QUERY).await {
      Ok(rows) => {
        persist(&mut report, BUYSIDE_TABLE, rows, 0, |r| repo.replace_buyside_relations(r)).await;
      }
      Err(e) => {
        error!("Failed to process {}: {}", BUYSIDE_TABLE, e);
        report.record(BUYSIDE_TABLE, TableOutcome::Skipped { reason: e.to_string() });
      }
    }

    info!("Extracting {}", INDUSTRY_TABLE);
    let industries = match self.source.industry_relations(queries::INDUSTRY_RELATIONS_QUERY).await {
      Ok(rows) => {
        persist(&mut report, INDUSTRY_TABLE, rows.clone(), 0, |r| {
          repo.replace_industry_relations(r)
        })
        .await;
        Some(rows)
      }
      Err(e) => {
        error!("Failed to process {}: {}", INDUSTRY_TABLE, e);
        report.record(INDUSTRY_TABLE, TableOutcome::Skipped { reason: e.to_string() });
        None
      }
    };

    let dependents = [LINKS_TABLE, FUNDAMENTALS_TABLE, DAILY_PRICES_TABLE];

    let (companies, industries) = match (companies, industries) {
      (Some(c), Some(i)) => (c, i),
      (None, _) => {
        report.skip_all(&dependents, &format!("prerequisite {} unavailable", COMPANIES_TABLE));
        return self.finish(context, report).await;
      }
      (_, None) => {
        report.skip_all(&dependents, &format!("prerequisite {} unavailable", INDUSTRY_TABLE));
        return self.finish(context, report).await;
      }
    };

    let tickers = target_tickers(&companies, &industries, &filter.target_sectors);
    report.target_tickers = tickers.len();
    info!("Found {} unique tickers for target acquirers", tickers.len());
    if tickers.is_empty() {
      report.skip_all(&dependents, "no target tickers");
      return self.finish(context, report).await;
    }

    info!("Mapping tickers to gvkeys");
    let source = Arc::clone(&self.source);
    let mapped = Self::fetcher(context, context.config.chunk_size)
      .fetch("ticker_gvkey", queries::TICKER_GVKEY_TEMPLATE, &tickers, |sql| {
        let source = Arc::clone(&source);
        async move { source.ticker_gvkeys(&sql).await }
      })
      .await?;
    let gvkeys: Vec<String> =
      mapped.success.iter().map(|m| m.gvkey.clone()).collect::<BTreeSet<_>>().into_iter().collect();
    report.gvkeys = gvkeys.len();
    info!("Mapped {} tickers to {} unique gvkeys", tickers.len(), gvkeys.len());
    if gvkeys.is_empty() {
      report.skip_all(&dependents, &empty_reason("no tickers mapped to gvkeys", &mapped));
      return self.finish(context, report).await;
    }

    info!("Extracting {} by gvkey", LINKS_TABLE);
    let links = Self::fetcher(context, context.config.chunk_size)
      .fetch(LINKS_TABLE, queries::CCM_LINKS_TEMPLATE, &gvkeys, |sql| {
        let source = Arc::clone(&source);
        async move { source.ccm_links(&sql).await }
      })
      .await?;
    let permcos: Vec<String> = links
      .success
      .iter()
      .filter_map(|l| l.lpermco)
      .collect::<BTreeSet<_>>()
      .into_iter()
      .map(|p| p.to_string())
      .collect();
    report.permcos = permcos.len();
    persist_chunked(&mut report, LINKS_TABLE, links, |r| repo.replace_ccm_links(r)).await;

    info!("Extracting {} by gvkey", FUNDAMENTALS_TABLE);
    let fundq = Self::fetcher(context, context.config.chunk_size)
      .fetch(
        FUNDAMENTALS_TABLE,
        &queries::fundamentals_template(filter.history_start),
        &gvkeys,
        |sql| {
          let source = Arc::clone(&source);
          async move { source.fundamentals(&sql).await }
        },
      )
      .await?;
    persist_chunked(&mut report, FUNDAMENTALS_TABLE, fundq, |r| repo.replace_financials(r)).await;

    if permcos.is_empty() {
      report.record(
        DAILY_PRICES_TABLE,
        TableOutcome::Skipped { reason: "no permcos in link history".to_string() },
      );
    } else {
      info!("Extracting {} for {} permcos", DAILY_PRICES_TABLE, permcos.len());
      let dsf = Self::fetcher(context, context.config.price_chunk_size)
        .fetch(
          DAILY_PRICES_TABLE,
          &queries::daily_prices_template(filter.history_start),
          &permcos,
          |sql| {
            let source = Arc::clone(&source);
            async move { source.daily_prices(&sql).await }
          },
        )
        .await?;
      persist_chunked(&mut report, DAILY_PRICES_TABLE, dsf, |r| repo.replace_daily_prices(r)).await;
    }

    self.finish(context, report).await
  }

  async fn finish(
    &self,
    context: &LoaderContext,
    mut report: ExtractionReport,
  ) -> LoaderResult<ExtractionReport> {
    report.finished_at = Some(Utc::now());
    report.log_summary();

    let partial = report
      .tables
      .iter()
      .any(|t| matches!(t.outcome, TableOutcome::Loaded { failed_batches, .. } if failed_batches > 0));
    let state = if report.skipped_count() == 0 && !partial {
      ProcessState::Success
    } else {
      ProcessState::CompletedWithErrors
    };
    context.track_complete(state, report.total_rows()).await?;
    Ok(report)
  }
}
