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

//! Parquet snapshot of the gold table
//!
//! The file carries the `gold.final_data` columns in table order. Writes go
//! to a `.tmp` sibling first and are renamed into place, so a reader never
//! sees a half-written snapshot.

use polars::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use ma_database_postgres::models::GoldRecord;

use crate::{LoaderError, LoaderResult};

fn to_dataframe(rows: &[GoldRecord]) -> LoaderResult<DataFrame> {
  let f64_column = |name: &str, get: fn(&GoldRecord) -> f64| {
    Column::new(name.into(), rows.iter().map(get).collect::<Vec<f64>>())
  };

  let df = DataFrame::new(vec![
    Column::new("dealid".into(), rows.iter().map(|r| r.dealid.clone()).collect::<Vec<_>>()),
    Column::new(
      "acquirer_ticker".into(),
      rows.iter().map(|r| r.acquirer_ticker.clone()).collect::<Vec<_>>(),
    ),
    Column::new(
      "primaryindustrysector".into(),
      rows.iter().map(|r| r.primaryindustrysector.clone()).collect::<Vec<Option<String>>>(),
    ),
    f64_column("dealsize", |r| r.dealsize),
    f64_column("market_cap_pre", |r| r.market_cap_pre),
    f64_column("ev_pre", |r| r.ev_pre),
    f64_column("ebitda_pre", |r| r.ebitda_pre),
    f64_column("market_cap_post", |r| r.market_cap_post),
    f64_column("ev_post", |r| r.ev_post),
    f64_column("ebitda_post", |r| r.ebitda_post),
    f64_column("delta_ev_pct", |r| r.delta_ev_pct),
    f64_column("delta_mkt_cap_pct", |r| r.delta_mkt_cap_pct),
    f64_column("delta_ebitda_pct", |r| r.delta_ebitda_pct),
    f64_column("deal_size_ratio", |r| r.deal_size_ratio),
  ])?;
  Ok(df)
}

/// Write `rows` to `path`, replacing any previous snapshot
pub fn write_gold_parquet(path: &Path, rows: &[GoldRecord]) -> LoaderResult<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }

  let mut df = to_dataframe(rows)?;
  let tmp_path = path.with_extension("parquet.tmp");
  let file = fs::File::create(&tmp_path)?;
  ParquetWriter::new(file).finish(&mut df)?;

  fs::rename(&tmp_path, path).map_err(|e| {
    let _ = fs::remove_file(&tmp_path);
    LoaderError::SnapshotError(format!("rename into {} failed: {}", path.display(), e))
  })?;

  info!("Saved {} rows to {}", rows.len(), path.display());
  Ok(())
}

/// Read a snapshot written by [`write_gold_parquet`]
pub fn read_gold_parquet(path: &Path) -> LoaderResult<Vec<GoldRecord>> {
  if !path.exists() {
    return Err(LoaderError::SnapshotError(format!("{} not found", path.display())));
  }

  let file = fs::File::open(path)?;
  let df = ParquetReader::new(file).finish()?;

  for name in GoldRecord::COLUMNS {
    if df.column(name).is_err() {
      return Err(LoaderError::SnapshotError(format!("missing column '{}'", name)));
    }
  }
  debug!("Read {} rows from {}", df.height(), path.display());

  let text = |name: &str| -> LoaderResult<StringChunked> { Ok(df.column(name)?.str()?.clone()) };
  let number = |name: &str| -> LoaderResult<Float64Chunked> { Ok(df.column(name)?.f64()?.clone()) };

  let dealid = text("dealid")?;
  let ticker = text("acquirer_ticker")?;
  let sector = text("primaryindustrysector")?;
  let dealsize = number("dealsize")?;
  let market_cap_pre = number("market_cap_pre")?;
  let ev_pre = number("ev_pre")?;
  let ebitda_pre = number("ebitda_pre")?;
  let market_cap_post = number("market_cap_post")?;
  let ev_post = number("ev_post")?;
  let ebitda_post = number("ebitda_post")?;
  let delta_ev_pct = number("delta_ev_pct")?;
  let delta_mkt_cap_pct = number("delta_mkt_cap_pct")?;
  let delta_ebitda_pct = number("delta_ebitda_pct")?;
  let deal_size_ratio = number("deal_size_ratio")?;

  let required = |value: Option<f64>, name: &str, i: usize| {
    value.ok_or_else(|| LoaderError::SnapshotError(format!("null {} at row {}", name, i)))
  };

  (0..df.height())
    .map(|i| {
      Ok(GoldRecord {
        dealid: dealid
          .get(i)
          .ok_or_else(|| LoaderError::SnapshotError(format!("null dealid at row {}", i)))?
          .to_string(),
        acquirer_ticker: ticker.get(i).unwrap_or_default().to_string(),
        primaryindustrysector: sector.get(i).map(str::to_string),
        dealsize: required(dealsize.get(i), "dealsize", i)?,
        market_cap_pre: required(market_cap_pre.get(i), "market_cap_pre", i)?,
        ev_pre: required(ev_pre.get(i), "ev_pre", i)?,
        ebitda_pre: required(ebitda_pre.get(i), "ebitda_pre", i)?,
        market_cap_post: required(market_cap_post.get(i), "market_cap_post", i)?,
        ev_post: required(ev_post.get(i), "ev_post", i)?,
        ebitda_post: required(ebitda_post.get(i), "ebitda_post", i)?,
        delta_ev_pct: required(delta_ev_pct.get(i), "delta_ev_pct", i)?,
        delta_mkt_cap_pct: required(delta_mkt_cap_pct.get(i), "delta_mkt_cap_pct", i)?,
        delta_ebitda_pct: required(delta_ebitda_pct.get(i), "delta_ebitda_pct", i)?,
        deal_size_ratio: required(deal_size_ratio.get(i), "deal_size_ratio", i)?,
      })
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::gold;

  #[test]
  fn test_snapshot_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("gold_data.parquet");
    let rows =
      vec![gold("D1", Some("Information Technology"), 0.18, 0.2), gold("D2", None, -0.05, 0.1)];

    write_gold_parquet(&path, &rows).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("parquet.tmp").exists());

    assert_eq!(read_gold_parquet(&path).unwrap(), rows);
  }

  #[test]
  fn test_snapshot_columns_in_table_order() {
    let df = to_dataframe(&[gold("D1", None, 0.1, 0.1)]).unwrap();
    let names: Vec<&str> = df.get_column_names().into_iter().map(|n| n.as_str()).collect();
    assert_eq!(names, GoldRecord::COLUMNS.to_vec());
  }

  #[test]
  fn test_rewrite_replaces_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gold_data.parquet");

    write_gold_parquet(&path, &[gold("D1", None, 0.1, 0.1), gold("D2", None, 0.2, 0.2)]).unwrap();
    write_gold_parquet(&path, &[gold("D3", None, 0.3, 0.3)]).unwrap();

    let rows = read_gold_parquet(&path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].dealid, "D3");
  }

  #[test]
  fn test_empty_snapshot_is_readable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gold_data.parquet");

    write_gold_parquet(&path, &[]).unwrap();
    assert!(read_gold_parquet(&path).unwrap().is_empty());
  }

  #[test]
  fn test_missing_file_is_snapshot_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_gold_parquet(&dir.path().join("absent.parquet"));
    assert!(matches!(result, Err(LoaderError::SnapshotError(_))));
  }

  #[test]
  fn test_missing_column_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.parquet");
    let mut df = DataFrame::new(vec![Column::new("dealid".into(), vec!["D1".to_string()])]).unwrap();
    ParquetWriter::new(fs::File::create(&path).unwrap()).finish(&mut df).unwrap();

    match read_gold_parquet(&path) {
      Err(LoaderError::SnapshotError(msg)) => assert!(msg.contains("acquirer_ticker")),
      other => panic!("expected snapshot error, got {:?}", other),
    }
  }
}
