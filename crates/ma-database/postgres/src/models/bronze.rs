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

//! Bronze rows: source columns kept under their WRDS names
//!
//! The same structs are loaded from WRDS with `sql_query` (by column name)
//! and written to / read from the `bronze` schema.

use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::bronze::{
  ccmxpf_lnkhist, dsf, fundq, ot_glb_company, ot_glb_companybuysiderelation,
  ot_glb_companyindustryrelation, ot_glb_deal,
};

/// A PitchBook deal. `companyid`/`companyname` identify the target.
#[derive(
  Queryable, Selectable, QueryableByName, Insertable, Debug, Clone, PartialEq, Serialize, Deserialize,
)]
#[diesel(table_name = ot_glb_deal)]
pub struct Deal {
  pub dealid: String,
  pub companyid: Option<String>,
  pub companyname: Option<String>,
  pub dealdate: Option<NaiveDate>,
  pub announceddate: Option<NaiveDate>,
  pub dealsize: Option<f64>,
  pub dealstatus: Option<String>,
  pub dealtype: Option<String>,
  pub percentacquired: Option<f64>,
  pub nativecurrencyofdeal: Option<String>,
}

#[derive(
  Queryable, Selectable, QueryableByName, Insertable, Debug, Clone, PartialEq, Serialize, Deserialize,
)]
#[diesel(table_name = ot_glb_company)]
pub struct Company {
  pub companyid: String,
  pub companyname: Option<String>,
  pub ticker: Option<String>,
  pub hqglobalsubregion: Option<String>,
  pub ownershipstatus: Option<String>,
  pub primaryindustrysector: Option<String>,
}

/// Links an acquiring company (`companyid`) to a target for a deal date
#[derive(
  Queryable, Selectable, QueryableByName, Insertable, Debug, Clone, PartialEq, Serialize, Deserialize,
)]
#[diesel(table_name = ot_glb_companybuysiderelation)]
pub struct BuySideRelation {
  pub companyid: String,
  pub targetcompanyid: Option<String>,
  pub targetcompanyname: Option<String>,
  pub dealdate: Option<NaiveDate>,
}

#[derive(
  Queryable, Selectable, QueryableByName, Insertable, Debug, Clone, PartialEq, Serialize, Deserialize,
)]
#[diesel(table_name = ot_glb_companyindustryrelation)]
pub struct IndustryRelation {
  pub companyid: String,
  pub industrysector: Option<String>,
}

/// Compustat ticker to gvkey mapping. Only held in memory during extraction.
#[derive(QueryableByName, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TickerGvkey {
  #[diesel(sql_type = diesel::sql_types::Text)]
  pub tic: String,
  #[diesel(sql_type = diesel::sql_types::Text)]
  pub gvkey: String,
}

/// CRSP/Compustat merged link history row
#[derive(
  Queryable, Selectable, QueryableByName, Insertable, Debug, Clone, PartialEq, Serialize, Deserialize,
)]
#[diesel(table_name = ccmxpf_lnkhist)]
pub struct CcmLink {
  pub gvkey: String,
  pub lpermno: Option<i64>,
  pub lpermco: Option<i64>,
  pub linktype: Option<String>,
  pub linkprim: Option<String>,
  pub linkdt: Option<NaiveDate>,
  pub linkenddt: Option<NaiveDate>,
}

/// Quarterly Compustat fundamentals for one fiscal period
///
/// `apdedateq` is the actual period end date used by the point-in-time join.
#[derive(
  Queryable, Selectable, QueryableByName, Insertable, Debug, Clone, PartialEq, Serialize, Deserialize,
)]
#[diesel(table_name = fundq)]
pub struct FinancialRecord {
  pub gvkey: String,
  pub tic: Option<String>,
  pub datadate: Option<NaiveDate>,
  pub apdedateq: Option<NaiveDate>,
  pub fyearq: Option<i32>,
  pub fqtr: Option<i32>,
  /// Long-term debt
  pub dlttq: Option<f64>,
  /// Debt in current liabilities
  pub dlcq: Option<f64>,
  /// Cash and short-term investments
  pub cheq: Option<f64>,
  /// Closing price for the quarter
  pub prccq: Option<f64>,
  /// Common shares outstanding
  pub cshoq: Option<f64>,
  /// Operating income before depreciation
  pub oibdpq: Option<f64>,
}

/// CRSP daily stock file row
#[derive(
  Queryable, Selectable, QueryableByName, Insertable, Debug, Clone, PartialEq, Serialize, Deserialize,
)]
#[diesel(table_name = dsf)]
pub struct DailyStockRecord {
  pub permno: i64,
  pub permco: Option<i64>,
  pub date: NaiveDate,
  pub prc: Option<f64>,
  pub vol: Option<f64>,
  pub ret: Option<f64>,
  pub shrout: Option<f64>,
  pub cfacpr: Option<f64>,
}
