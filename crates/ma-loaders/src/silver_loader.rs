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

//! Silver stage: link deals to acquirers and their surrounding financials
//!
//! Structural joins first (deal -> buy-side relation -> acquirer company),
//! then two point-in-time lookups on the acquirer ticker: the last quarterly
//! record at or before the announcement and the first at or after it. Rows
//! without a complete set of price, shares, long-term debt and cash on both
//! sides are dropped.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};

use ma_database_postgres::models::{BuySideRelation, Company, Deal, FinancialRecord, LinkedDeal};
use ma_database_postgres::{BronzeRepository, CompanyFilter, SilverRepository};

use crate::asof::AsofIndex;
use crate::{DataLoader, LoaderContext, LoaderResult, ProcessState};

/// Deal joined to one acquirer, before the financial lookups
#[derive(Debug, Clone)]
struct DealAcquirer<'a> {
  deal: &'a Deal,
  acquirer: &'a Company,
}

/// Outcome of linking bronze rows
#[derive(Debug, Clone, Default)]
pub struct LinkResult {
  pub rows: Vec<LinkedDeal>,
  /// (deal, acquirer) pairs after the structural joins
  pub joined: usize,
  /// Pairs dropped for missing critical financials
  pub dropped: usize,
}

/// Join deals to acquirers and attach pre/post financials
pub fn link_deals(
  deals: &[Deal],
  relations: &[BuySideRelation],
  companies: &[Company],
  financials: &[FinancialRecord],
) -> LinkResult {
  let mut relations_by_target: HashMap<(&str, NaiveDate), Vec<&BuySideRelation>> = HashMap::new();
  for rel in relations {
    if let (Some(name), Some(date)) = (rel.targetcompanyname.as_deref(), rel.dealdate) {
      relations_by_target.entry((name, date)).or_default().push(rel);
    }
  }

  let mut companies_by_id: HashMap<&str, Vec<&Company>> = HashMap::new();
  for company in companies {
    companies_by_id.entry(company.companyid.as_str()).or_default().push(company);
  }

  let mut joined: Vec<DealAcquirer<'_>> = Vec::new();
  for deal in deals {
    let (Some(name), Some(date)) = (deal.companyname.as_deref(), deal.dealdate) else {
      continue;
    };
    for rel in relations_by_target.get(&(name, date)).into_iter().flatten() {
      for acquirer in companies_by_id.get(rel.companyid.as_str()).into_iter().flatten() {
        joined.push(DealAcquirer { deal, acquirer: *acquirer });
      }
    }
  }
  joined.sort_by_key(|row| row.deal.announceddate);

  let index = AsofIndex::build(financials, |f| f.tic.as_deref(), |f| f.apdedateq);
  debug!("Financials indexed for {} tickers", index.key_count());

  let total = joined.len();
  let rows: Vec<LinkedDeal> = joined
    .into_iter()
    .filter_map(|row| {
      let ticker = row.acquirer.ticker.as_deref()?;
      let announced = row.deal.announceddate?;
      let pre = index.backward(ticker, announced)?;
      let post = index.forward(ticker, announced)?;
      complete_row(&row, ticker, announced, pre, post)
    })
    .collect();

  LinkResult { dropped: total - rows.len(), joined: total, rows }
}

/// Build the silver row when every critical field is present
fn complete_row(
  row: &DealAcquirer<'_>,
  ticker: &str,
  announced: NaiveDate,
  pre: &FinancialRecord,
  post: &FinancialRecord,
) -> Option<LinkedDeal> {
  Some(LinkedDeal {
    dealid: row.deal.dealid.clone(),
    announceddate: announced,
    dealstatus: row.deal.dealstatus.clone(),
    dealsize: row.deal.dealsize?,
    target_company_name: row.deal.companyname.clone()?,
    acquirer_name: row.acquirer.companyname.clone(),
    acquirer_ticker: ticker.to_string(),
    primaryindustrysector: row.acquirer.primaryindustrysector.clone(),

    period_end_pre: pre.apdedateq?,
    stock_price_pre: pre.prccq?,
    shares_outstanding_pre: pre.cshoq?,
    long_term_debt_pre: pre.dlttq?,
    current_debt_pre: pre.dlcq,
    cash_pre: pre.cheq?,
    ebitda_pre: pre.oibdpq,

    period_end_post: post.apdedateq?,
    stock_price_post: post.prccq?,
    shares_outstanding_post: post.cshoq?,
    long_term_debt_post: post.dlttq?,
    current_debt_post: post.dlcq,
    cash_post: post.cheq?,
    ebitda_post: post.oibdpq,
  })
}

/// Silver stage output
#[derive(Debug, Clone, Default)]
pub struct SilverOutput {
  pub deals_read: usize,
  pub joined_rows: usize,
  pub dropped_incomplete: usize,
  pub rows_written: usize,
}

pub struct SilverLoader {
  bronze: Arc<dyn BronzeRepository>,
  silver: Arc<dyn SilverRepository>,
  company_filter: CompanyFilter,
}

impl SilverLoader {
  pub fn new(bronze: Arc<dyn BronzeRepository>, silver: Arc<dyn SilverRepository>) -> Self {
    Self { bronze, silver, company_filter: CompanyFilter::default() }
  }

  pub fn with_company_filter(mut self, filter: CompanyFilter) -> Self {
    self.company_filter = filter;
    self
  }
}

#[async_trait]
impl DataLoader for SilverLoader {
  type Input = ();
  type Output = SilverOutput;

  async fn load(&self, context: &LoaderContext, _input: ()) -> LoaderResult<SilverOutput> {
    context.track_start(self.name()).await?;

    match self.transform().await {
      Ok(output) => {
        context.track_complete(ProcessState::Success, output.rows_written).await?;
        Ok(output)
      }
      Err(e) => {
        error!("Silver transformation failed: {}", e);
        context.track_complete(ProcessState::Failed, 0).await?;
        Err(e)
      }
    }
  }

  fn name(&self) -> &'static str {
    "silver"
  }
}

impl SilverLoader {
  async fn transform(&self) -> LoaderResult<SilverOutput> {
    info!("Reading tables from bronze layer");
    let deals = self.bronze.load_deals_with_size().await?;
    let relations = self.bronze.load_buyside_relations().await?;
    let companies = self.bronze.load_companies(&self.company_filter).await?;
    let financials = self.bronze.load_financials().await?;
    info!(
      "Loaded: deals({}), relations({}), companies({}), financials({})",
      deals.len(),
      relations.len(),
      companies.len(),
      financials.len()
    );

    let linked = link_deals(&deals, &relations, &companies, &financials);
    info!(
      "Dropped {} rows due to missing data. Final count: {}",
      linked.dropped,
      linked.rows.len()
    );

    let rows_written = self.silver.replace_linked_deals(linked.rows).await?;
    info!("Wrote {} rows to silver.deal_financials_linked", rows_written);

    Ok(SilverOutput {
      deals_read: deals.len(),
      joined_rows: linked.joined,
      dropped_incomplete: linked.dropped,
      rows_written,
    })
  }
}
