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

//! Stage loaders for the M&A impact pipeline
//!
//! Data moves through three materialized layers:
//!
//! - [`BronzeLoader`] pulls filtered and chunked result sets from WRDS into
//!   the `bronze` schema and reports an outcome per table.
//! - [`SilverLoader`] joins deals to acquirers and attaches the acquirer's
//!   financials either side of the announcement date.
//! - [`GoldLoader`] derives valuation deltas, writes `gold.final_data` and
//!   the Parquet snapshot read by the dashboard.

pub mod asof;
pub mod batch_processor;
pub mod bronze_loader;
pub mod dashboard;
pub mod error;
pub mod gold_loader;
pub mod loader;
pub mod metrics;
pub mod process_tracker;
pub mod silver_loader;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod testing;

pub use batch_processor::{BatchConfig, BatchResult, ChunkedFetcher};
pub use bronze_loader::{BronzeLoader, ExtractionFilter, ExtractionReport, TableOutcome};
pub use dashboard::{DashboardSummary, IndustrySummary};
pub use error::{LoaderError, LoaderResult};
pub use gold_loader::{GoldLoader, GoldOutput};
pub use loader::{DataLoader, LoaderConfig, LoaderContext};
pub use metrics::DealMetrics;
pub use process_tracker::{ProcessState, ProcessTracker};
pub use silver_loader::{SilverLoader, SilverOutput};
