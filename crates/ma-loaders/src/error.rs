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

use ma_client::WrdsError;
use ma_database_postgres::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum LoaderError {
  #[error("Source error: {0}")]
  SourceError(String),

  #[error("IO error: {0}")]
  IoError(String),

  #[error("Serialization error: {0}")]
  SerializationError(String),

  #[error("Database error: {0}")]
  DatabaseError(String),

  #[error("Snapshot error: {0}")]
  SnapshotError(String),

  #[error("Invalid data: {0}")]
  InvalidData(String),

  #[error("Configuration error: {0}")]
  ConfigurationError(String),
}

// Implement conversions manually
impl From<std::io::Error> for LoaderError {
  fn from(err: std::io::Error) -> Self {
    LoaderError::IoError(err.to_string())
  }
}

impl From<serde_json::Error> for LoaderError {
  fn from(err: serde_json::Error) -> Self {
    LoaderError::SerializationError(err.to_string())
  }
}

impl From<ma_core::Error> for LoaderError {
  fn from(err: ma_core::Error) -> Self {
    LoaderError::ConfigurationError(err.to_string())
  }
}

impl From<WrdsError> for LoaderError {
  fn from(err: WrdsError) -> Self {
    LoaderError::SourceError(err.to_string())
  }
}

impl From<RepositoryError> for LoaderError {
  fn from(err: RepositoryError) -> Self {
    LoaderError::DatabaseError(err.to_string())
  }
}

impl From<polars::prelude::PolarsError> for LoaderError {
  fn from(err: polars::prelude::PolarsError) -> Self {
    LoaderError::SnapshotError(err.to_string())
  }
}

pub type LoaderResult<T> = Result<T, LoaderError>;
