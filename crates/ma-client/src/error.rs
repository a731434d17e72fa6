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

use ma_database_postgres::RepositoryError;
use thiserror::Error;

/// Errors raised while talking to WRDS
#[derive(Error, Debug)]
pub enum WrdsError {
  #[error("Configuration error: {0}")]
  Config(#[from] ma_core::Error),

  #[error("Connection failed: {0}")]
  Connection(String),

  #[error("Query failed: {0}")]
  Query(String),
}

impl From<RepositoryError> for WrdsError {
  fn from(err: RepositoryError) -> Self {
    match err {
      RepositoryError::PoolError(msg) => WrdsError::Connection(msg),
      other => WrdsError::Query(other.to_string()),
    }
  }
}

pub type Result<T> = std::result::Result<T, WrdsError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_pool_error_is_connection_error() {
    let err: WrdsError = RepositoryError::PoolError("timed out".to_string()).into();
    assert!(matches!(err, WrdsError::Connection(_)));
    assert_eq!(err.to_string(), "Connection failed: timed out");
  }

  #[test]
  fn test_query_error_keeps_context() {
    let err: WrdsError = RepositoryError::QueryError("relation does not exist".to_string()).into();
    assert!(matches!(err, WrdsError::Query(_)));
    assert!(err.to_string().contains("relation does not exist"));
  }

  #[test]
  fn test_config_error_conversion() {
    let err: WrdsError = ma_core::Error::Credentials("WRDS_USERNAME is not set".to_string()).into();
    assert!(err.to_string().contains("WRDS_USERNAME"));
  }
}
