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

//! Valuation metrics derived from a linked deal
//!
//! `market_cap = price * shares`, `total_debt = long_term + current` and
//! `enterprise_value = market_cap + total_debt - cash`. Growth rates are
//! `(post - pre) / pre`; a rate that is not finite is reported as `None`.

use ma_database_postgres::models::{GoldRecord, LinkedDeal};

/// Metrics for one side (pre or post) of a deal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Valuation {
  pub market_cap: f64,
  pub total_debt: f64,
  pub enterprise_value: f64,
  pub ebitda: Option<f64>,
}

impl Valuation {
  pub fn new(
    price: f64,
    shares: f64,
    long_term_debt: f64,
    current_debt: Option<f64>,
    cash: f64,
    ebitda: Option<f64>,
  ) -> Self {
    let market_cap = price * shares;
    let total_debt = long_term_debt + current_debt.unwrap_or(0.0);
    Self { market_cap, total_debt, enterprise_value: market_cap + total_debt - cash, ebitda }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DealMetrics {
  pub pre: Valuation,
  pub post: Valuation,
  pub delta_ev_pct: Option<f64>,
  pub delta_mkt_cap_pct: Option<f64>,
  pub delta_ebitda_pct: Option<f64>,
  pub deal_size_ratio: Option<f64>,
}

impl DealMetrics {
  pub fn compute(row: &LinkedDeal) -> Self {
    let pre = Valuation::new(
      row.stock_price_pre,
      row.shares_outstanding_pre,
      row.long_term_debt_pre,
      row.current_debt_pre,
      row.cash_pre,
      row.ebitda_pre,
    );
    let post = Valuation::new(
      row.stock_price_post,
      row.shares_outstanding_post,
      row.long_term_debt_post,
      row.current_debt_post,
      row.cash_post,
      row.ebitda_post,
    );

    let delta_ebitda_pct = match (pre.ebitda, post.ebitda) {
      (Some(before), Some(after)) => pct_change(before, after),
      _ => None,
    };

    Self {
      delta_ev_pct: pct_change(pre.enterprise_value, post.enterprise_value),
      delta_mkt_cap_pct: pct_change(pre.market_cap, post.market_cap),
      delta_ebitda_pct,
      deal_size_ratio: finite(row.dealsize / pre.market_cap),
      pre,
      post,
    }
  }

  /// Analysis row, or `None` when the pre-deal EV is zero or any derived
  /// ratio is missing or not finite
  pub fn into_gold(self, row: &LinkedDeal) -> Option<GoldRecord> {
    if self.pre.enterprise_value == 0.0
      || !self.pre.enterprise_value.is_finite()
      || !self.post.enterprise_value.is_finite()
    {
      return None;
    }

    Some(GoldRecord {
      dealid: row.dealid.clone(),
      acquirer_ticker: row.acquirer_ticker.clone(),
      primaryindustrysector: row.primaryindustrysector.clone(),
      dealsize: row.dealsize,
      market_cap_pre: self.pre.market_cap,
      ev_pre: self.pre.enterprise_value,
      ebitda_pre: self.pre.ebitda?,
      market_cap_post: self.post.market_cap,
      ev_post: self.post.enterprise_value,
      ebitda_post: self.post.ebitda?,
      delta_ev_pct: self.delta_ev_pct?,
      delta_mkt_cap_pct: self.delta_mkt_cap_pct?,
      delta_ebitda_pct: self.delta_ebitda_pct?,
      deal_size_ratio: self.deal_size_ratio?,
    })
  }
}

/// Derive gold rows, keeping input order and dropping invalid rows
pub fn derive_gold(rows: &[LinkedDeal]) -> Vec<GoldRecord> {
  rows.iter().filter_map(|row| DealMetrics::compute(row).into_gold(row)).collect()
}

fn pct_change(before: f64, after: f64) -> Option<f64> {
  finite((after - before) / before)
}

fn finite(value: f64) -> Option<f64> {
  value.is_finite().then_some(value)
}
