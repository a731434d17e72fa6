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

//! In-memory repositories, a scripted WRDS source and row builders for tests

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Mutex;

use ma_client::{WrdsError, WrdsSource};
use ma_database_postgres::models::{
  BuySideRelation, CcmLink, Company, DailyStockRecord, Deal, FinancialRecord, GoldRecord,
  IndustryRelation, LinkedDeal, TickerGvkey,
};
use ma_database_postgres::{
  BronzeRepository, CompanyFilter, GoldRepository, RepositoryError, RepositoryResult,
  SilverRepository,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn deal(id: &str, target: &str, dealdate: NaiveDate, announced: NaiveDate, size: f64) -> Deal {
  Deal {
    dealid: id.to_string(),
    companyid: Some(format!("{}-co", id)),
    companyname: Some(target.to_string()),
    dealdate: Some(dealdate),
    announceddate: Some(announced),
    dealsize: Some(size),
    dealstatus: Some("Completed".to_string()),
    dealtype: Some("Merger/Acquisition".to_string()),
    percentacquired: Some(100.0),
    nativecurrencyofdeal: Some("US Dollars (USD)".to_string()),
  }
}

pub fn company(id: &str, name: &str, ticker: &str, sector: &str) -> Company {
  Company {
    companyid: id.to_string(),
    companyname: Some(name.to_string()),
    ticker: Some(ticker.to_string()),
    hqglobalsubregion: Some("North America".to_string()),
    ownershipstatus: Some("Publicly Held".to_string()),
    primaryindustrysector: Some(sector.to_string()),
  }
}

pub fn relation(acquirer: &str, target: &str, dealdate: NaiveDate) -> BuySideRelation {
  BuySideRelation {
    companyid: acquirer.to_string(),
    targetcompanyid: None,
    targetcompanyname: Some(target.to_string()),
    dealdate: Some(dealdate),
  }
}

pub fn industry(companyid: &str, sector: &str) -> IndustryRelation {
  IndustryRelation { companyid: companyid.to_string(), industrysector: Some(sector.to_string()) }
}

#[allow(clippy::too_many_arguments)]
pub fn financial(
  tic: &str,
  period_end: NaiveDate,
  price: f64,
  shares: f64,
  long_term_debt: f64,
  current_debt: Option<f64>,
  cash: f64,
  ebitda: Option<f64>,
) -> FinancialRecord {
  FinancialRecord {
    gvkey: format!("gv-{}", tic),
    tic: Some(tic.to_string()),
    datadate: Some(period_end),
    apdedateq: Some(period_end),
    fyearq: None,
    fqtr: None,
    dlttq: Some(long_term_debt),
    dlcq: current_debt,
    cheq: Some(cash),
    prccq: Some(price),
    cshoq: Some(shares),
    oibdpq: ebitda,
  }
}

/// Silver row from (price, shares, long-term debt, cash) on each side
pub fn linked(
  dealid: &str,
  ticker: &str,
  pre: (f64, f64, f64, f64),
  post: (f64, f64, f64, f64),
) -> LinkedDeal {
  LinkedDeal {
    dealid: dealid.to_string(),
    announceddate: date(2015, 6, 15),
    dealstatus: Some("Completed".to_string()),
    dealsize: 500.0,
    target_company_name: "Target Co".to_string(),
    acquirer_name: Some(format!("{} Inc", ticker)),
    acquirer_ticker: ticker.to_string(),
    primaryindustrysector: Some("Information Technology".to_string()),
    period_end_pre: date(2015, 3, 31),
    stock_price_pre: pre.0,
    shares_outstanding_pre: pre.1,
    long_term_debt_pre: pre.2,
    current_debt_pre: None,
    cash_pre: pre.3,
    ebitda_pre: Some(50.0),
    period_end_post: date(2015, 9, 30),
    stock_price_post: post.0,
    shares_outstanding_post: post.1,
    long_term_debt_post: post.2,
    current_debt_post: None,
    cash_post: post.3,
    ebitda_post: Some(60.0),
  }
}

pub fn gold(dealid: &str, sector: Option<&str>, delta_ev: f64, delta_ebitda: f64) -> GoldRecord {
  GoldRecord {
    dealid: dealid.to_string(),
    acquirer_ticker: format!("T{}", dealid),
    primaryindustrysector: sector.map(str::to_string),
    dealsize: 100.0,
    market_cap_pre: 1000.0,
    ev_pre: 1030.0,
    ebitda_pre: 50.0,
    market_cap_post: 1200.0,
    ev_post: 1215.0,
    ebitda_post: 60.0,
    delta_ev_pct: delta_ev,
    delta_mkt_cap_pct: 0.2,
    delta_ebitda_pct: delta_ebitda,
    deal_size_ratio: 0.1,
  }
}

#[derive(Default)]
pub struct BronzeTables {
  pub deals: Vec<Deal>,
  pub companies: Vec<Company>,
  pub buyside_relations: Vec<BuySideRelation>,
  pub industry_relations: Vec<IndustryRelation>,
  pub ccm_links: Vec<CcmLink>,
  pub financials: Vec<FinancialRecord>,
  pub daily_prices: Vec<DailyStockRecord>,
  /// Tables replaced, in call order
  pub replaced: Vec<&'static str>,
}

#[derive(Default)]
pub struct FakeBronze {
  pub tables: Mutex<BronzeTables>,
}

impl FakeBronze {
  pub fn seed(
    &self,
    deals: Vec<Deal>,
    relations: Vec<BuySideRelation>,
    companies: Vec<Company>,
    financials: Vec<FinancialRecord>,
  ) {
    let mut tables = self.tables.lock().unwrap();
    tables.deals = deals;
    tables.buyside_relations = relations;
    tables.companies = companies;
    tables.financials = financials;
  }

  pub fn replaced(&self) -> Vec<&'static str> {
    self.tables.lock().unwrap().replaced.clone()
  }
}

#[async_trait]
impl BronzeRepository for FakeBronze {
  async fn replace_deals(&self, rows: Vec<Deal>) -> RepositoryResult<usize> {
    let mut t = self.tables.lock().unwrap();
    t.replaced.push("ot_glb_deal");
    t.deals = rows;
    Ok(t.deals.len())
  }

  async fn replace_companies(&self, rows: Vec<Company>) -> RepositoryResult<usize> {
    let mut t = self.tables.lock().unwrap();
    t.replaced.push("ot_glb_company");
    t.companies = rows;
    Ok(t.companies.len())
  }

  async fn replace_buyside_relations(
    &self,
    rows: Vec<BuySideRelation>,
  ) -> RepositoryResult<usize> {
    let mut t = self.tables.lock().unwrap();
    t.replaced.push("ot_glb_companybuysiderelation");
    t.buyside_relations = rows;
    Ok(t.buyside_relations.len())
  }

  async fn replace_industry_relations(
    &self,
    rows: Vec<IndustryRelation>,
  ) -> RepositoryResult<usize> {
    let mut t = self.tables.lock().unwrap();
    t.replaced.push("ot_glb_companyindustryrelation");
    t.industry_relations = rows;
    Ok(t.industry_relations.len())
  }

  async fn replace_ccm_links(&self, rows: Vec<CcmLink>) -> RepositoryResult<usize> {
    let mut t = self.tables.lock().unwrap();
    t.replaced.push("ccmxpf_lnkhist");
    t.ccm_links = rows;
    Ok(t.ccm_links.len())
  }

  async fn replace_financials(&self, rows: Vec<FinancialRecord>) -> RepositoryResult<usize> {
    let mut t = self.tables.lock().unwrap();
    t.replaced.push("fundq");
    t.financials = rows;
    Ok(t.financials.len())
  }

  async fn replace_daily_prices(&self, rows: Vec<DailyStockRecord>) -> RepositoryResult<usize> {
    let mut t = self.tables.lock().unwrap();
    t.replaced.push("dsf");
    t.daily_prices = rows;
    Ok(t.daily_prices.len())
  }

  async fn load_deals_with_size(&self) -> RepositoryResult<Vec<Deal>> {
    let t = self.tables.lock().unwrap();
    Ok(t.deals.iter().filter(|d| d.dealsize.is_some()).cloned().collect())
  }

  async fn load_buyside_relations(&self) -> RepositoryResult<Vec<BuySideRelation>> {
    Ok(self.tables.lock().unwrap().buyside_relations.clone())
  }

  async fn load_companies(&self, filter: &CompanyFilter) -> RepositoryResult<Vec<Company>> {
    let t = self.tables.lock().unwrap();
    Ok(
      t.companies
        .iter()
        .filter(|c| {
          filter.hqglobalsubregion.is_none() || c.hqglobalsubregion == filter.hqglobalsubregion
        })
        .filter(|c| filter.ownershipstatus.is_none() || c.ownershipstatus == filter.ownershipstatus)
        .cloned()
        .collect(),
    )
  }

  async fn load_financials(&self) -> RepositoryResult<Vec<FinancialRecord>> {
    let t = self.tables.lock().unwrap();
    Ok(t.financials.iter().filter(|f| f.apdedateq.is_some()).cloned().collect())
  }
}

fn disk_full() -> RepositoryError {
  RepositoryError::QueryError("could not extend file: disk full".to_string())
}

#[derive(Default)]
pub struct FakeSilver {
  rows: Mutex<Vec<LinkedDeal>>,
  fail_writes: bool,
}

impl FakeSilver {
  pub fn with_rows(rows: Vec<LinkedDeal>) -> Self {
    Self { rows: Mutex::new(rows), fail_writes: false }
  }

  /// Reads succeed, every replace fails
  pub fn failing_writes(rows: Vec<LinkedDeal>) -> Self {
    Self { rows: Mutex::new(rows), fail_writes: true }
  }

  pub fn rows(&self) -> Vec<LinkedDeal> {
    self.rows.lock().unwrap().clone()
  }
}

#[async_trait]
impl SilverRepository for FakeSilver {
  async fn replace_linked_deals(&self, rows: Vec<LinkedDeal>) -> RepositoryResult<usize> {
    if self.fail_writes {
      return Err(disk_full());
    }
    let mut stored = self.rows.lock().unwrap();
    *stored = rows;
    Ok(stored.len())
  }

  async fn load_linked_deals(&self) -> RepositoryResult<Vec<LinkedDeal>> {
    Ok(self.rows())
  }
}

#[derive(Default)]
pub struct FakeGold {
  rows: Mutex<Vec<GoldRecord>>,
  fail_writes: bool,
}

impl FakeGold {
  pub fn failing_writes() -> Self {
    Self { rows: Mutex::new(Vec::new()), fail_writes: true }
  }

  pub fn rows(&self) -> Vec<GoldRecord> {
    self.rows.lock().unwrap().clone()
  }
}

#[async_trait]
impl GoldRepository for FakeGold {
  async fn replace_final_data(&self, rows: Vec<GoldRecord>) -> RepositoryResult<usize> {
    if self.fail_writes {
      return Err(disk_full());
    }
    let mut stored = self.rows.lock().unwrap();
    *stored = rows;
    Ok(stored.len())
  }
}

/// WRDS stand-in that answers from fixed tables
///
/// Chunked queries are answered by reading the quoted `IN (...)` list back
/// out of the SQL. Datasets named in `failing` return an error, as does any
/// chunked query whose list holds an identifier in `failing_ids`.
#[derive(Default)]
pub struct FakeSource {
  pub deals: Vec<Deal>,
  pub companies: Vec<Company>,
  pub buyside_relations: Vec<BuySideRelation>,
  pub industry_relations: Vec<IndustryRelation>,
  pub ticker_gvkeys: Vec<TickerGvkey>,
  pub ccm_links: Vec<CcmLink>,
  pub financials: Vec<FinancialRecord>,
  pub daily_prices: Vec<DailyStockRecord>,
  pub failing: HashSet<&'static str>,
  pub failing_ids: HashSet<String>,
  pub queries: Mutex<Vec<String>>,
}

impl FakeSource {
  fn record(&self, dataset: &'static str, sql: &str) -> Result<(), WrdsError> {
    self.queries.lock().unwrap().push(sql.to_string());
    if self.failing.contains(dataset) {
      return Err(WrdsError::Query(format!("{} is unavailable", dataset)));
    }
    if in_list(sql).iter().any(|id| self.failing_ids.contains(id)) {
      return Err(WrdsError::Query(format!("{}: canceling statement due to timeout", dataset)));
    }
    Ok(())
  }

  pub fn query_count(&self) -> usize {
    self.queries.lock().unwrap().len()
  }
}

/// Identifiers in the first `IN (...)` list of `sql`
pub fn in_list(sql: &str) -> HashSet<String> {
  let Some(start) = sql.find("IN (") else {
    return HashSet::new();
  };
  let rest = &sql[start + 4..];
  let end = rest.find(')').unwrap();
  rest[..end].split(", ").map(|s| s.trim_matches('\'').replace("''", "'")).collect()
}

#[async_trait]
impl WrdsSource for FakeSource {
  async fn deals(&self, sql: &str) -> ma_client::Result<Vec<Deal>> {
    self.record("deals", sql)?;
    Ok(self.deals.clone())
  }

  async fn companies(&self, sql: &str) -> ma_client::Result<Vec<Company>> {
    self.record("companies", sql)?;
    Ok(self.companies.clone())
  }

  async fn buyside_relations(&self, sql: &str) -> ma_client::Result<Vec<BuySideRelation>> {
    self.record("buyside_relations", sql)?;
    Ok(self.buyside_relations.clone())
  }

  async fn industry_relations(&self, sql: &str) -> ma_client::Result<Vec<IndustryRelation>> {
    self.record("industry_relations", sql)?;
    Ok(self.industry_relations.clone())
  }

  async fn ticker_gvkeys(&self, sql: &str) -> ma_client::Result<Vec<TickerGvkey>> {
    self.record("ticker_gvkeys", sql)?;
    let ids = in_list(sql);
    Ok(self.ticker_gvkeys.iter().filter(|m| ids.contains(&m.tic)).cloned().collect())
  }

  async fn ccm_links(&self, sql: &str) -> ma_client::Result<Vec<CcmLink>> {
    self.record("ccm_links", sql)?;
    let ids = in_list(sql);
    Ok(self.ccm_links.iter().filter(|l| ids.contains(&l.gvkey)).cloned().collect())
  }

  async fn fundamentals(&self, sql: &str) -> ma_client::Result<Vec<FinancialRecord>> {
    self.record("fundamentals", sql)?;
    let ids = in_list(sql);
    Ok(self.financials.iter().filter(|f| ids.contains(&f.gvkey)).cloned().collect())
  }

  async fn daily_prices(&self, sql: &str) -> ma_client::Result<Vec<DailyStockRecord>> {
    self.record("daily_prices", sql)?;
    let ids = in_list(sql);
    Ok(
      self
        .daily_prices
        .iter()
        .filter(|p| p.permco.map(|c| ids.contains(&c.to_string())).unwrap_or(false))
        .cloned()
        .collect(),
    )
  }
}
