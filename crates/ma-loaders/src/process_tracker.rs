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

//! Process tracking for pipeline stages
//! In-memory only; the CLI prints the timeline at the end of a run.

use crate::LoaderResult;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
  Running,
  Success,
  Failed,
  CompletedWithErrors,
}

#[derive(Debug, Clone)]
pub struct ProcessInfo {
  pub process_name: String,
  pub start_time: DateTime<Utc>,
  pub end_time: Option<DateTime<Utc>>,
  pub state: ProcessState,
  pub records_processed: Option<usize>,
}

impl ProcessInfo {
  /// Wall-clock time of a finished process
  pub fn elapsed(&self) -> Option<chrono::Duration> {
    self.end_time.map(|end| end - self.start_time)
  }
}

/// In-memory process tracker
#[derive(Clone, Default)]
pub struct ProcessTracker {
  processes: Arc<Mutex<Vec<ProcessInfo>>>,
}

impl ProcessTracker {
  pub fn new() -> Self {
    Self::default()
  }

  pub async fn start(&self, process_name: &str) -> LoaderResult<()> {
    let mut processes = self.processes.lock().await;
    processes.push(ProcessInfo {
      process_name: process_name.to_string(),
      start_time: Utc::now(),
      end_time: None,
      state: ProcessState::Running,
      records_processed: None,
    });
    Ok(())
  }

  pub async fn complete(&self, state: ProcessState, records: Option<usize>) -> LoaderResult<()> {
    let mut processes = self.processes.lock().await;
    if let Some(last) = processes.last_mut() {
      last.state = state;
      last.end_time = Some(Utc::now());
      last.records_processed = records;
    }
    Ok(())
  }

  pub async fn get_all(&self) -> Vec<ProcessInfo> {
    self.processes.lock().await.clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_start_then_complete() {
    let tracker = ProcessTracker::new();
    tracker.start("bronze").await.unwrap();

    let running = tracker.get_all().await;
    assert_eq!(running[0].state, ProcessState::Running);
    assert!(running[0].elapsed().is_none());

    tracker.complete(ProcessState::CompletedWithErrors, Some(3)).await.unwrap();
    let done = tracker.get_all().await;
    assert_eq!(done[0].state, ProcessState::CompletedWithErrors);
    assert_eq!(done[0].records_processed, Some(3));
    assert!(done[0].elapsed().is_some());
  }

  #[tokio::test]
  async fn test_complete_updates_latest_only() {
    let tracker = ProcessTracker::new();
    tracker.start("silver").await.unwrap();
    tracker.complete(ProcessState::Success, Some(10)).await.unwrap();
    tracker.start("gold").await.unwrap();
    tracker.complete(ProcessState::Failed, None).await.unwrap();

    let all = tracker.get_all().await;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].state, ProcessState::Success);
    assert_eq!(all[1].state, ProcessState::Failed);
  }

  #[tokio::test]
  async fn test_complete_without_start_is_noop() {
    let tracker = ProcessTracker::new();
    tracker.complete(ProcessState::Success, None).await.unwrap();
    assert!(tracker.get_all().await.is_empty());
  }
}
