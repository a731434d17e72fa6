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

pub mod config;
pub mod error;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{Config, PostgresConfig, WrdsConfig};
pub use error::{Error, Result};

/// WRDS PostgreSQL endpoint
pub const WRDS_HOST: &str = "wrds-pgdata.wharton.upenn.edu";
pub const WRDS_PORT: u16 = 9737;
pub const WRDS_DATABASE: &str = "wrds";

/// Warehouse defaults. The host is the compose service name, not localhost.
pub const DEFAULT_POSTGRES_HOST: &str = "postgres_db";
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;

/// Default output locations
pub const DEFAULT_GOLD_PARQUET_PATH: &str = "data/gold_data.parquet";
pub const DEFAULT_EXTRACTION_REPORT_PATH: &str = "data/extraction_report.json";
