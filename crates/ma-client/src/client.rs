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

use async_trait::async_trait;
use diesel::RunQueryDsl;
use std::time::Instant;
use tracing::{debug, info};

use ma_core::WrdsConfig;
use ma_database_postgres::models::{
  BuySideRelation, CcmLink, Company, DailyStockRecord, Deal, FinancialRecord, IndustryRelation,
  TickerGvkey,
};
use ma_database_postgres::DatabaseContext;

use crate::error::{Result, WrdsError};

/// Source of raw WRDS result sets
///
/// One method per dataset; each takes the complete SQL text to run so that
/// chunked fetches can render their own `IN (...)` lists.
#[async_trait]
pub trait WrdsSource: Send + Sync {
  async fn deals(&self, sql: &str) -> Result<Vec<Deal>>;
  async fn companies(&self, sql: &str) -> Result<Vec<Company>>;
  async fn buyside_relations(&self, sql: &str) -> Result<Vec<BuySideRelation>>;
  async fn industry_relations(&self, sql: &str) -> Result<Vec<IndustryRelation>>;
  async fn ticker_gvkeys(&self, sql: &str) -> Result<Vec<TickerGvkey>>;
  async fn ccm_links(&self, sql: &str) -> Result<Vec<CcmLink>>;
  async fn fundamentals(&self, sql: &str) -> Result<Vec<FinancialRecord>>;
  async fn daily_prices(&self, sql: &str) -> Result<Vec<DailyStockRecord>>;
}

/// WRDS client over a single pooled Postgres connection
///
/// WRDS limits concurrent sessions per account, and every query is awaited
/// before the next one is issued, so the pool holds exactly one connection.
#[derive(Clone)]
pub struct WrdsClient {
  context: DatabaseContext,
}

/// Run `$sql` on the pooled connection and load rows of type `$row`
macro_rules! load_rows {
  ($self:ident, $sql:expr, $row:ty) => {{
    let sql = $sql.to_string();
    let started = Instant::now();
    let rows = $self
      .context
      .run(move |conn| Ok(diesel::sql_query(sql).load::<$row>(conn)?))
      .await
      .map_err(WrdsError::from)?;
    debug!("Loaded {} {} rows in {:?}", rows.len(), stringify!($row), started.elapsed());
    Ok(rows)
  }};
}

impl WrdsClient {
  /// Connect to WRDS. Credentials are validated by [`WrdsConfig`] before this is reached.
  pub fn connect(config: &WrdsConfig) -> Result<Self> {
    let url = config.database_url()?;
    info!("Connecting to WRDS at {}:{} as {}", config.host, config.port, config.username);

    let context = DatabaseContext::with_pool_config(&url, 1, 0).map_err(|e| {
      WrdsError::Connection(format!("{}:{}: {}", config.host, config.port, e))
    })?;

    Ok(Self { context })
  }
}

#[async_trait]
impl WrdsSource for WrdsClient {
  async fn deals(&self, sql: &str) -> Result<Vec<Deal>> {
    load_rows!(self, sql, Deal)
  }

  async fn companies(&self, sql: &str) -> Result<Vec<Company>> {
    load_rows!(self, sql, Company)
  }

  async fn buyside_relations(&self, sql: &str) -> Result<Vec<BuySideRelation>> {
    load_rows!(self, sql, BuySideRelation)
  }

  async fn industry_relations(&self, sql: &str) -> Result<Vec<IndustryRelation>> {
    load_rows!(self, sql, IndustryRelation)
  }

  async fn ticker_gvkeys(&self, sql: &str) -> Result<Vec<TickerGvkey>> {
    load_rows!(self, sql, TickerGvkey)
  }

  async fn ccm_links(&self, sql: &str) -> Result<Vec<CcmLink>> {
    load_rows!(self, sql, CcmLink)
  }

  async fn fundamentals(&self, sql: &str) -> Result<Vec<FinancialRecord>> {
    load_rows!(self, sql, FinancialRecord)
  }

  async fn daily_prices(&self, sql: &str) -> Result<Vec<DailyStockRecord>> {
    load_rows!(self, sql, DailyStockRecord)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::queries;

  #[tokio::test]
  #[ignore] // Requires WRDS credentials and network access
  async fn test_industry_relations_from_wrds() {
    let config = WrdsConfig::from_env().unwrap();
    let client = WrdsClient::connect(&config).unwrap();
    let sql = format!("{} LIMIT 10", queries::INDUSTRY_RELATIONS_QUERY);
    let rows = client.industry_relations(&sql).await.unwrap();
    assert!(rows.len() <= 10);
  }

  #[test]
  fn test_source_is_object_safe() {
    fn assert_dyn(_: Option<&dyn WrdsSource>) {}
    assert_dyn(None);
  }
}
