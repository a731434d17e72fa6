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

use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::silver::deal_financials_linked;

/// One deal/acquirer pair with the acquirer's financials either side of the
/// announcement.
///
/// `period_end_pre <= announceddate <= period_end_post` always holds; the
/// table carries a CHECK constraint for it.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = deal_financials_linked)]
pub struct LinkedDeal {
  pub dealid: String,
  pub announceddate: NaiveDate,
  pub dealstatus: Option<String>,
  pub dealsize: f64,
  pub target_company_name: String,
  pub acquirer_name: Option<String>,
  pub acquirer_ticker: String,
  pub primaryindustrysector: Option<String>,

  pub period_end_pre: NaiveDate,
  pub stock_price_pre: f64,
  pub shares_outstanding_pre: f64,
  pub long_term_debt_pre: f64,
  pub current_debt_pre: Option<f64>,
  pub cash_pre: f64,
  pub ebitda_pre: Option<f64>,

  pub period_end_post: NaiveDate,
  pub stock_price_post: f64,
  pub shares_outstanding_post: f64,
  pub long_term_debt_post: f64,
  pub current_debt_post: Option<f64>,
  pub cash_post: f64,
  pub ebitda_post: Option<f64>,
}
