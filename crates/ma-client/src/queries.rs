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

//! SQL issued against WRDS
//!
//! Every SELECT names its columns and casts them to the types of the bronze
//! tables, so a renamed or retyped source column fails the query instead of
//! silently loading nulls. Chunked templates carry a single [`ID_SLOT`] that
//! the batch fetcher replaces with a quoted literal list.

use chrono::NaiveDate;

/// Placeholder for the identifier list in chunked templates
pub const ID_SLOT: &str = "{ids}";

/// PitchBook library on WRDS
pub const PITCHBOOK_LIBRARY: &str = "pitchbk_other_row";

const DEAL_COLUMNS: &str = "dealid::text AS dealid, companyid::text AS companyid, \
   companyname::text AS companyname, dealdate::date AS dealdate, \
   announceddate::date AS announceddate, dealsize::float8 AS dealsize, \
   dealstatus::text AS dealstatus, dealtype::text AS dealtype, \
   percentacquired::float8 AS percentacquired, \
   nativecurrencyofdeal::text AS nativecurrencyofdeal";

const COMPANY_COLUMNS: &str = "companyid::text AS companyid, companyname::text AS companyname, \
   ticker::text AS ticker, hqglobalsubregion::text AS hqglobalsubregion, \
   ownershipstatus::text AS ownershipstatus, \
   primaryindustrysector::text AS primaryindustrysector";

/// Full buy-side relation table
pub const BUYSIDE_RELATIONS_QUERY: &str = "SELECT companyid::text AS companyid, \
   targetcompanyid::text AS targetcompanyid, targetcompanyname::text AS targetcompanyname, \
   dealdate::date AS dealdate \
   FROM pitchbk_other_row.ot_glb_companybuysiderelation \
   WHERE companyid IS NOT NULL";

/// Full industry relation table
pub const INDUSTRY_RELATIONS_QUERY: &str = "SELECT companyid::text AS companyid, \
   industrysector::text AS industrysector \
   FROM pitchbk_other_row.ot_glb_companyindustryrelation \
   WHERE companyid IS NOT NULL";

/// Compustat ticker to gvkey map, chunked by ticker
pub const TICKER_GVKEY_TEMPLATE: &str = "SELECT DISTINCT tic::text AS tic, gvkey::text AS gvkey \
   FROM comp_na_daily_all.company \
   WHERE tic IN ({ids}) AND gvkey IS NOT NULL \
   ORDER BY tic, gvkey";

/// CRSP/Compustat link history, chunked by gvkey
pub const CCM_LINKS_TEMPLATE: &str = "SELECT gvkey::text AS gvkey, lpermno::int8 AS lpermno, \
   lpermco::int8 AS lpermco, linktype::text AS linktype, linkprim::text AS linkprim, \
   linkdt::date AS linkdt, linkenddt::date AS linkenddt \
   FROM crsp_a_ccm.ccmxpf_lnkhist \
   WHERE gvkey IN ({ids}) \
   ORDER BY gvkey, linkdt";

/// Deal selection criteria
#[derive(Debug, Clone, PartialEq)]
pub struct DealCriteria {
  pub announced_from: NaiveDate,
  pub announced_to: NaiveDate,
  pub status: String,
  pub deal_type: String,
  /// Deals must acquire strictly more than this percentage
  pub min_percent_acquired: f64,
  pub currency: String,
}

impl Default for DealCriteria {
  fn default() -> Self {
    Self {
      announced_from: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default(),
      announced_to: NaiveDate::from_ymd_opt(2024, 11, 30).unwrap_or_default(),
      status: "Completed".to_string(),
      deal_type: "Merger/Acquisition".to_string(),
      min_percent_acquired: 50.0,
      currency: "US Dollars (USD)".to_string(),
    }
  }
}

/// Company selection criteria
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyCriteria {
  pub region: String,
  pub ownership_status: String,
}

impl Default for CompanyCriteria {
  fn default() -> Self {
    Self {
      region: "North America".to_string(),
      ownership_status: "Publicly Held".to_string(),
    }
  }
}

/// Quote a value as a SQL string literal, doubling embedded single quotes
pub fn quote_literal(value: &str) -> String {
  format!("'{}'", value.replace('\'', "''"))
}

/// Render identifiers as a comma separated list of quoted literals
pub fn literal_list<S: AsRef<str>>(ids: &[S]) -> String {
  ids.iter().map(|id| quote_literal(id.as_ref())).collect::<Vec<_>>().join(", ")
}

pub fn deals_query(criteria: &DealCriteria) -> String {
  format!(
    "SELECT {} FROM {}.ot_glb_deal \
     WHERE dealid IS NOT NULL \
     AND announceddate >= {} AND announceddate <= {} \
     AND dealstatus = {} \
     AND dealtype = {} \
     AND percentacquired > {} \
     AND nativecurrencyofdeal = {}",
    DEAL_COLUMNS,
    PITCHBOOK_LIBRARY,
    quote_literal(&criteria.announced_from.to_string()),
    quote_literal(&criteria.announced_to.to_string()),
    quote_literal(&criteria.status),
    quote_literal(&criteria.deal_type),
    criteria.min_percent_acquired,
    quote_literal(&criteria.currency),
  )
}

pub fn companies_query(criteria: &CompanyCriteria) -> String {
  format!(
    "SELECT {} FROM {}.ot_glb_company \
     WHERE companyid IS NOT NULL \
     AND hqglobalsubregion = {} \
     AND ownershipstatus = {}",
    COMPANY_COLUMNS,
    PITCHBOOK_LIBRARY,
    quote_literal(&criteria.region),
    quote_literal(&criteria.ownership_status),
  )
}

/// Quarterly fundamentals by gvkey with period end on or after `since`
pub fn fundamentals_template(since: NaiveDate) -> String {
  format!(
    "SELECT gvkey::text AS gvkey, tic::text AS tic, datadate::date AS datadate, \
     apdedateq::date AS apdedateq, fyearq::int4 AS fyearq, fqtr::int4 AS fqtr, \
     dlttq::float8 AS dlttq, dlcq::float8 AS dlcq, cheq::float8 AS cheq, \
     prccq::float8 AS prccq, cshoq::float8 AS cshoq, oibdpq::float8 AS oibdpq \
     FROM comp_na_daily_all.fundq \
     WHERE gvkey IN ({}) AND apdedateq >= {} \
     ORDER BY gvkey, datadate",
    ID_SLOT,
    quote_literal(&since.to_string()),
  )
}

/// CRSP daily stock file by permco with trading date on or after `since`
pub fn daily_prices_template(since: NaiveDate) -> String {
  format!(
    "SELECT permno::int8 AS permno, permco::int8 AS permco, date::date AS date, \
     prc::float8 AS prc, vol::float8 AS vol, ret::float8 AS ret, \
     shrout::float8 AS shrout, cfacpr::float8 AS cfacpr \
     FROM crsp_a_stock.dsf \
     WHERE permco IN ({}) AND date >= {} AND permno IS NOT NULL \
     ORDER BY permno, date",
    ID_SLOT,
    quote_literal(&since.to_string()),
  )
}
