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

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::gold::final_data;

/// Analysis-ready row. Field order is the column order of the Parquet snapshot.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = final_data)]
pub struct GoldRecord {
  pub dealid: String,
  pub acquirer_ticker: String,
  pub primaryindustrysector: Option<String>,
  pub dealsize: f64,
  pub market_cap_pre: f64,
  pub ev_pre: f64,
  pub ebitda_pre: f64,
  pub market_cap_post: f64,
  pub ev_post: f64,
  pub ebitda_post: f64,
  pub delta_ev_pct: f64,
  pub delta_mkt_cap_pct: f64,
  pub delta_ebitda_pct: f64,
  pub deal_size_ratio: f64,
}

impl GoldRecord {
  /// Column names in snapshot order
  pub const COLUMNS: [&'static str; 14] = [
    "dealid",
    "acquirer_ticker",
    "primaryindustrysector",
    "dealsize",
    "market_cap_pre",
    "ev_pre",
    "ebitda_pre",
    "market_cap_post",
    "ev_post",
    "ebitda_post",
    "delta_ev_pct",
    "delta_mkt_cap_pct",
    "delta_ebitda_pct",
    "deal_size_ratio",
  ];
}
