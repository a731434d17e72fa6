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

//! Base traits and types for stage loaders

use crate::{LoaderResult, ProcessState, ProcessTracker};
use async_trait::async_trait;

/// Configuration for stage loaders
#[derive(Debug, Clone)]
pub struct LoaderConfig {
  /// Show progress bars for chunked fetches
  pub show_progress: bool,

  /// Enable process state tracking
  pub track_process: bool,

  /// Identifiers per query for ticker, gvkey and link lookups
  pub chunk_size: usize,

  /// Identifiers per query for daily prices, which return far more rows per id
  pub price_chunk_size: usize,
}

impl Default for LoaderConfig {
  fn default() -> Self {
    Self { show_progress: true, track_process: true, chunk_size: 1000, price_chunk_size: 200 }
  }
}

/// Shared context for all loaders
pub struct LoaderContext {
  pub config: LoaderConfig,
  pub process_tracker: Option<ProcessTracker>,
}

impl LoaderContext {
  pub fn new(config: LoaderConfig) -> Self {
    Self { config, process_tracker: None }
  }

  pub fn with_process_tracker(mut self, tracker: ProcessTracker) -> Self {
    self.process_tracker = Some(tracker);
    self
  }

  /// Record the start of a stage when tracking is enabled
  pub async fn track_start(&self, name: &str) -> LoaderResult<()> {
    match &self.process_tracker {
      Some(tracker) if self.config.track_process => tracker.start(name).await,
      _ => Ok(()),
    }
  }

  /// Record the end of the most recent stage when tracking is enabled
  pub async fn track_complete(&self, state: ProcessState, records: usize) -> LoaderResult<()> {
    match &self.process_tracker {
      Some(tracker) if self.config.track_process => tracker.complete(state, Some(records)).await,
      _ => Ok(()),
    }
  }
}

impl Default for LoaderContext {
  fn default() -> Self {
    Self::new(LoaderConfig::default())
  }
}

/// Base trait for all stage loaders
#[async_trait]
pub trait DataLoader: Send + Sync {
  /// The type of data this loader processes
  type Input;

  /// The result type after loading
  type Output;

  /// Load data from the given input
  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output>;

  /// Validate input before loading
  async fn validate_input(&self, _input: &Self::Input) -> LoaderResult<()> {
    Ok(())
  }

  /// Get loader name for logging/tracking
  fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_loader_config_default() {
    let config = LoaderConfig::default();
    assert!(config.show_progress);
    assert!(config.track_process);
    assert_eq!(config.chunk_size, 1000);
    assert_eq!(config.price_chunk_size, 200);
  }

  #[test]
  fn test_loader_config_debug() {
    let config = LoaderConfig::default();
    let debug_str = format!("{:?}", config);
    assert!(debug_str.contains("LoaderConfig"));
    assert!(debug_str.contains("price_chunk_size"));
  }

  #[test]
  fn test_loader_context_new() {
    let context = LoaderContext::new(LoaderConfig::default());
    assert!(context.process_tracker.is_none());
    assert_eq!(context.config.chunk_size, 1000);
  }

  #[tokio::test]
  async fn test_loader_context_tracks_when_enabled() {
    let context = LoaderContext::default().with_process_tracker(ProcessTracker::new());

    context.track_start("silver").await.unwrap();
    context.track_complete(ProcessState::Success, 12).await.unwrap();

    let processes = context.process_tracker.as_ref().unwrap().get_all().await;
    assert_eq!(processes.len(), 1);
    assert_eq!(processes[0].process_name, "silver");
    assert_eq!(processes[0].state, ProcessState::Success);
    assert_eq!(processes[0].records_processed, Some(12));
  }

  #[tokio::test]
  async fn test_loader_context_tracking_disabled() {
    let config = LoaderConfig { track_process: false, ..LoaderConfig::default() };
    let context = LoaderContext::new(config).with_process_tracker(ProcessTracker::new());

    context.track_start("gold").await.unwrap();

    let processes = context.process_tracker.as_ref().unwrap().get_all().await;
    assert!(processes.is_empty());
  }
}
