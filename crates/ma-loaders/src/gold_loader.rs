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

//! Gold stage: derive valuation metrics from silver rows and publish them
//! to `gold.final_data` and the Parquet snapshot

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use ma_database_postgres::{GoldRepository, SilverRepository};

use crate::metrics::derive_gold;
use crate::snapshot::write_gold_parquet;
use crate::{DataLoader, LoaderContext, LoaderError, LoaderResult, ProcessState};

#[derive(Debug, Clone)]
pub struct GoldOutput {
  pub rows_read: usize,
  pub rows_written: usize,
  pub dropped: usize,
  pub parquet_path: PathBuf,
}

pub struct GoldLoader {
  silver: Arc<dyn SilverRepository>,
  gold: Arc<dyn GoldRepository>,
  parquet_path: PathBuf,
}

impl GoldLoader {
  pub fn new(
    silver: Arc<dyn SilverRepository>,
    gold: Arc<dyn GoldRepository>,
    parquet_path: impl Into<PathBuf>,
  ) -> Self {
    Self { silver, gold, parquet_path: parquet_path.into() }
  }
}

#[async_trait]
impl DataLoader for GoldLoader {
  type Input = ();
  type Output = GoldOutput;

  async fn load(&self, context: &LoaderContext, _input: ()) -> LoaderResult<GoldOutput> {
    context.track_start(self.name()).await?;

    match self.publish().await {
      Ok(output) => {
        context.track_complete(ProcessState::Success, output.rows_written).await?;
        Ok(output)
      }
      Err(e) => {
        error!("Gold publication failed: {}", e);
        context.track_complete(ProcessState::Failed, 0).await?;
        Err(e)
      }
    }
  }

  fn name(&self) -> &'static str {
    "gold"
  }
}

impl GoldLoader {
  /// The snapshot is written first, so a failed table write leaves the new
  /// snapshot next to the previous table contents
  async fn publish(&self) -> LoaderResult<GoldOutput> {
    info!("Reading silver.deal_financials_linked");
    let rows = self.silver.load_linked_deals().await?;
    let gold = derive_gold(&rows);
    let dropped = rows.len() - gold.len();
    info!("Data Cleaning: {} -> {} rows (Dropped {})", rows.len(), gold.len(), dropped);

    let snapshot = gold.clone();
    let path = self.parquet_path.clone();
    tokio::task::spawn_blocking(move || write_gold_parquet(&path, &snapshot))
      .await
      .map_err(|e| LoaderError::SnapshotError(format!("snapshot task failed: {}", e)))??;

    let rows_written = self.gold.replace_final_data(gold).await?;
    info!("Wrote {} rows to gold.final_data", rows_written);

    Ok(GoldOutput {
      rows_read: rows.len(),
      rows_written,
      dropped,
      parquet_path: self.parquet_path.clone(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::snapshot::read_gold_parquet;
  use crate::testing::*;
  use crate::{LoaderConfig, ProcessTracker};

  fn silver_rows() -> Vec<ma_database_postgres::models::LinkedDeal> {
    vec![
      linked("D1", "ABC", (10.0, 100.0, 50.0, 20.0), (12.0, 100.0, 40.0, 25.0)),
      linked("D2", "ZERO", (1.0, 10.0, 0.0, 10.0), (2.0, 10.0, 0.0, 5.0)),
      linked("D3", "XYZ", (4.0, 250.0, 10.0, 5.0), (5.0, 240.0, 12.0, 8.0)),
    ]
  }

  #[tokio::test]
  async fn test_gold_stage_writes_table_and_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("gold_data.parquet");
    let gold = Arc::new(FakeGold::default());
    let loader =
      GoldLoader::new(Arc::new(FakeSilver::with_rows(silver_rows())), gold.clone(), &path);

    let output = loader.load(&LoaderContext::default(), ()).await.unwrap();

    assert_eq!(output.rows_read, 3);
    assert_eq!(output.rows_written, 2);
    assert_eq!(output.dropped, 1);

    let table = gold.rows();
    assert!(table.iter().all(|r| r.dealid != "D2"));
    assert!(table.iter().all(|r| r.ev_pre != 0.0 && r.delta_ev_pct.is_finite()));
    assert_eq!(read_gold_parquet(&path).unwrap(), table);
  }

  #[tokio::test]
  async fn test_rerun_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gold_data.parquet");
    let gold = Arc::new(FakeGold::default());
    let loader =
      GoldLoader::new(Arc::new(FakeSilver::with_rows(silver_rows())), gold.clone(), &path);

    loader.load(&LoaderContext::default(), ()).await.unwrap();
    let first_table = gold.rows();
    let first_snapshot = read_gold_parquet(&path).unwrap();

    loader.load(&LoaderContext::default(), ()).await.unwrap();
    assert_eq!(gold.rows(), first_table);
    assert_eq!(read_gold_parquet(&path).unwrap(), first_snapshot);
  }

  #[tokio::test]
  async fn test_empty_silver_writes_empty_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gold_data.parquet");
    let gold = Arc::new(FakeGold::default());
    let loader = GoldLoader::new(Arc::new(FakeSilver::default()), gold.clone(), &path);

    let output = loader.load(&LoaderContext::default(), ()).await.unwrap();

    assert_eq!(output.rows_written, 0);
    assert!(gold.rows().is_empty());
    assert!(read_gold_parquet(&path).unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_table_write_failure_is_returned_and_tracked() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gold_data.parquet");
    let tracker = ProcessTracker::new();
    let context = LoaderContext::new(LoaderConfig::default()).with_process_tracker(tracker.clone());
    let loader = GoldLoader::new(
      Arc::new(FakeSilver::with_rows(silver_rows())),
      Arc::new(FakeGold::failing_writes()),
      &path,
    );

    match loader.load(&context, ()).await {
      Err(LoaderError::DatabaseError(msg)) => assert!(msg.contains("disk full")),
      other => panic!("expected database error, got {:?}", other),
    }

    let processes = tracker.get_all().await;
    assert_eq!(processes[0].state, ProcessState::Failed);
    assert!(processes[0].end_time.is_some());

    // snapshot already holds the new rows even though the table write failed
    let snapshot = read_gold_parquet(&path).unwrap();
    let ids: Vec<&str> = snapshot.iter().map(|r| r.dealid.as_str()).collect();
    assert_eq!(ids, vec!["D1", "D3"]);
  }

  #[tokio::test]
  async fn test_unwritable_snapshot_leaves_table_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, b"").unwrap();
    let gold = Arc::new(FakeGold::default());
    let loader = GoldLoader::new(
      Arc::new(FakeSilver::with_rows(silver_rows())),
      gold.clone(),
      blocker.join("gold_data.parquet"),
    );

    assert!(loader.load(&LoaderContext::default(), ()).await.is_err());
    assert!(gold.rows().is_empty());
  }

  #[tokio::test]
  async fn test_progress_is_tracked() {
    let dir = tempfile::tempdir().unwrap();
    let tracker = ProcessTracker::new();
    let context = LoaderContext::new(LoaderConfig::default()).with_process_tracker(tracker.clone());
    let loader = GoldLoader::new(
      Arc::new(FakeSilver::with_rows(silver_rows())),
      Arc::new(FakeGold::default()),
      dir.path().join("gold_data.parquet"),
    );

    loader.load(&context, ()).await.unwrap();

    let processes = tracker.get_all().await;
    assert_eq!(processes.len(), 1);
    assert_eq!(processes[0].process_name, "gold");
    assert_eq!(processes[0].state, ProcessState::Success);
    assert_eq!(processes[0].records_processed, Some(2));
  }
}
