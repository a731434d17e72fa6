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

//! Chunked bulk fetches against the source database
//!
//! Large identifier lists are split into contiguous batches and rendered into
//! an `IN (...)` list, one query per batch. Batches run strictly one after
//! another; a failing batch is logged with its range and skipped.

use indicatif::{ProgressBar, ProgressStyle};
use ma_client::queries::{literal_list, ID_SLOT};
use std::future::Future;
use tracing::{debug, error, info};

use crate::{LoaderError, LoaderResult};

/// Configuration for batch processing
#[derive(Debug, Clone)]
pub struct BatchConfig {
  /// Maximum number of identifiers in a single batch
  pub batch_size: usize,

  /// Draw a progress bar while batches run
  pub show_progress: bool,
}

impl Default for BatchConfig {
  fn default() -> Self {
    Self { batch_size: 1000, show_progress: false }
  }
}

/// Result of a chunked fetch
#[derive(Debug, Clone)]
pub struct BatchResult<T> {
  /// Rows returned by the successful batches, in batch order
  pub success: Vec<T>,

  /// Failed batches by index, with their errors
  pub failures: Vec<(usize, LoaderError)>,

  /// Number of batches issued
  pub total_processed: usize,
}

impl<T> Default for BatchResult<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> BatchResult<T> {
  pub fn new() -> Self {
    Self { success: Vec::new(), failures: Vec::new(), total_processed: 0 }
  }

  pub fn success_count(&self) -> usize {
    self.success.len()
  }

  pub fn failure_count(&self) -> usize {
    self.failures.len()
  }

  pub fn is_empty(&self) -> bool {
    self.success.is_empty()
  }
}

/// Runs a query template once per batch of identifiers
#[derive(Debug, Clone)]
pub struct ChunkedFetcher {
  config: BatchConfig,
}

impl ChunkedFetcher {
  pub fn new(config: BatchConfig) -> Self {
    Self { config }
  }

  /// Substitute the quoted identifier list into the template's single slot
  pub fn render(template: &str, ids: &[String]) -> LoaderResult<String> {
    validate_template(template)?;
    Ok(template.replacen(ID_SLOT, &literal_list(ids), 1))
  }

  /// Fetch `ids` in batches with `fetch`, concatenating the rows of every
  /// batch that succeeds.
  ///
  /// Returns a configuration error without issuing any query when the
  /// template does not hold exactly one slot or the batch size is zero.
  pub async fn fetch<T, E, F, Fut>(
    &self,
    label: &str,
    template: &str,
    ids: &[String],
    mut fetch: F,
  ) -> LoaderResult<BatchResult<T>>
  where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
    E: Into<LoaderError>,
  {
    if self.config.batch_size == 0 {
      return Err(LoaderError::ConfigurationError(format!(
        "{}: batch size must be greater than zero",
        label
      )));
    }
    validate_template(template)?;

    let mut result = BatchResult::new();
    if ids.is_empty() {
      debug!("{}: no identifiers, nothing to fetch", label);
      return Ok(result);
    }

    let batches = create_batches(ids.iter().cloned(), self.config.batch_size);
    info!(
      "{}: fetching {} identifiers in {} batches of up to {}",
      label,
      ids.len(),
      batches.len(),
      self.config.batch_size
    );

    let progress = if self.config.show_progress {
      let bar = ProgressBar::new(batches.len() as u64);
      if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>4}/{len:4} {msg}")
      {
        bar.set_style(style.progress_chars("##-"));
      }
      bar.set_message(label.to_string());
      Some(bar)
    } else {
      None
    };

    for (batch_idx, batch) in batches.iter().enumerate() {
      let start = batch_idx * self.config.batch_size;
      let end = start + batch.len();
      let query = Self::render(template, batch)?;

      result.total_processed += 1;
      match fetch(query).await {
        Ok(rows) => {
          debug!("{}: batch {}-{} returned {} rows", label, start, end, rows.len());
          result.success.extend(rows);
        }
        Err(e) => {
          let err: LoaderError = e.into();
          error!("{}: error querying batch {}-{}: {}", label, start, end, err);
          result.failures.push((batch_idx, err));
        }
      }

      if let Some(ref bar) = progress {
        bar.inc(1);
      }
    }

    if let Some(bar) = progress {
      bar.finish_with_message(format!("{}: {} rows", label, result.success_count()));
    }

    info!(
      "{}: {} rows from {} batches ({} failed)",
      label,
      result.success_count(),
      result.total_processed,
      result.failure_count()
    );

    Ok(result)
  }
}

fn validate_template(template: &str) -> LoaderResult<()> {
  let slots = template.matches(ID_SLOT).count();
  if slots != 1 {
    return Err(LoaderError::ConfigurationError(format!(
      "query template must contain exactly one {} slot, found {}",
      ID_SLOT, slots
    )));
  }
  Ok(())
}

/// Helper function to create batches from an iterator
pub fn create_batches<T>(items: impl Iterator<Item = T>, batch_size: usize) -> Vec<Vec<T>> {
  let mut batches = Vec::new();
  let mut current_batch = Vec::with_capacity(batch_size);

  for item in items {
    current_batch.push(item);
    if current_batch.len() >= batch_size {
      batches.push(std::mem::replace(&mut current_batch, Vec::with_capacity(batch_size)));
    }
  }

  if !current_batch.is_empty() {
    batches.push(current_batch);
  }

  batches
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::cell::RefCell;

  const TEMPLATE: &str = "SELECT * FROM t WHERE id IN ({ids})";

  fn ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("id{}", i)).collect()
  }

  fn fetcher(batch_size: usize) -> ChunkedFetcher {
    ChunkedFetcher::new(BatchConfig { batch_size, show_progress: false })
  }

  /// Parse the quoted identifiers back out of a rendered query
  fn ids_in(query: &str) -> Vec<String> {
    let start = query.find('(').unwrap() + 1;
    let end = query.rfind(')').unwrap();
    query[start..end]
      .split(", ")
      .map(|s| s.trim_matches('\'').replace("''", "'"))
      .collect()
  }

  #[test]
  fn test_batch_config_default() {
    let config = BatchConfig::default();
    assert_eq!(config.batch_size, 1000);
    assert!(!config.show_progress);
  }

  #[test]
  fn test_batch_result_counts() {
    let mut result: BatchResult<i32> = BatchResult::new();
    assert!(result.is_empty());

    result.success = vec![1, 2, 3];
    result.failures.push((3, LoaderError::InvalidData("test".to_string())));
    result.total_processed = 4;
    assert_eq!(result.success_count(), 3);
    assert_eq!(result.failure_count(), 1);
  }

  // create_batches tests
  #[test]
  fn test_create_batches_empty() {
    let items: Vec<i32> = vec![];
    let batches = create_batches(items.into_iter(), 10);
    assert!(batches.is_empty());
  }

  #[test]
  fn test_create_batches_with_remainder() {
    let items = vec![1, 2, 3, 4, 5, 6, 7];
    let batches = create_batches(items.into_iter(), 3);
    assert_eq!(batches.len(), 3);
    assert_eq!(batches[0], vec![1, 2, 3]);
    assert_eq!(batches[1], vec![4, 5, 6]);
    assert_eq!(batches[2], vec![7]);
  }

  #[test]
  fn test_create_batches_partitions_every_size() {
    for n in 0..40 {
      for size in 1..12 {
        let items: Vec<usize> = (0..n).collect();
        let batches = create_batches(items.clone().into_iter(), size);
        assert!(batches.iter().all(|b| !b.is_empty() && b.len() <= size));
        let flattened: Vec<usize> = batches.into_iter().flatten().collect();
        assert_eq!(flattened, items);
      }
    }
  }

  #[test]
  fn test_render_escapes_quotes() {
    let query = ChunkedFetcher::render(TEMPLATE, &["O'Neil".to_string(), "AB".to_string()]).unwrap();
    assert_eq!(query, "SELECT * FROM t WHERE id IN ('O''Neil', 'AB')");
  }

  #[test]
  fn test_render_rejects_bad_templates() {
    let ids = ids(2);
    assert!(matches!(
      ChunkedFetcher::render("SELECT 1", &ids),
      Err(LoaderError::ConfigurationError(_))
    ));
    assert!(matches!(
      ChunkedFetcher::render("{ids} {ids}", &ids),
      Err(LoaderError::ConfigurationError(_))
    ));
  }

  #[tokio::test]
  async fn test_fetch_covers_every_id_once() {
    let input = ids(2_345);
    let seen = RefCell::new(Vec::new());

    let result = fetcher(1000)
      .fetch("test", TEMPLATE, &input, |query| {
        let batch = ids_in(&query);
        assert!(batch.len() <= 1000);
        seen.borrow_mut().extend(batch.clone());
        async move { Ok::<_, LoaderError>(batch) }
      })
      .await
      .unwrap();

    assert_eq!(result.total_processed, 3);
    assert_eq!(result.failure_count(), 0);
    assert_eq!(result.success, input);
    assert_eq!(seen.into_inner(), input);
  }

  #[tokio::test]
  async fn test_fetch_skips_failed_batch() {
    let input = ids(5);
    let mut call = 0;

    let result = fetcher(2)
      .fetch("test", TEMPLATE, &input, |query| {
        call += 1;
        let fail = call == 2;
        async move {
          if fail {
            Err(LoaderError::SourceError("statement timeout".to_string()))
          } else {
            Ok(ids_in(&query))
          }
        }
      })
      .await
      .unwrap();

    assert_eq!(result.total_processed, 3);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].0, 1);
    assert_eq!(result.success, vec!["id0", "id1", "id4"]);
  }

  #[tokio::test]
  async fn test_fetch_all_failures_is_empty() {
    let result = fetcher(2)
      .fetch("test", TEMPLATE, &ids(4), |_query| async {
        Err::<Vec<String>, _>(LoaderError::SourceError("down".to_string()))
      })
      .await
      .unwrap();

    assert!(result.is_empty());
    assert_eq!(result.failure_count(), 2);
    assert_eq!(result.total_processed, 2);
  }

  #[tokio::test]
  async fn test_fetch_rejects_zero_batch_size() {
    let mut called = false;
    let result = fetcher(0)
      .fetch("test", TEMPLATE, &ids(3), |_query| {
        called = true;
        async { Ok::<Vec<String>, LoaderError>(vec![]) }
      })
      .await;

    assert!(matches!(result, Err(LoaderError::ConfigurationError(_))));
    assert!(!called);
  }

  #[tokio::test]
  async fn test_fetch_rejects_template_without_slot() {
    let result = fetcher(10)
      .fetch("test", "SELECT * FROM t", &ids(3), |_query| async {
        Ok::<Vec<String>, LoaderError>(vec![])
      })
      .await;

    assert!(matches!(result, Err(LoaderError::ConfigurationError(_))));
  }

  #[tokio::test]
  async fn test_fetch_empty_ids_issues_no_query() {
    let mut calls = 0;
    let result = fetcher(10)
      .fetch("test", TEMPLATE, &[], |_query| {
        calls += 1;
        async { Ok::<Vec<String>, LoaderError>(vec![]) }
      })
      .await
      .unwrap();

    assert_eq!(calls, 0);
    assert_eq!(result.total_processed, 0);
  }
}
