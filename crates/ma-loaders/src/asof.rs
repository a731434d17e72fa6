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

//! Point-in-time lookups keyed by ticker and date
//!
//! Records are grouped per key and sorted by date once; each lookup is a
//! binary search within one group. Ties on date keep their input order, so a
//! backward lookup lands on the last of equal-dated records and a forward
//! lookup on the first.

use chrono::NaiveDate;
use std::collections::HashMap;

pub struct AsofIndex<'a, T> {
  groups: HashMap<&'a str, Vec<(NaiveDate, &'a T)>>,
}

impl<'a, T> AsofIndex<'a, T> {
  /// Index `records` by `key` and `date`. Records missing either are left out.
  pub fn build<I, K, D>(records: I, key: K, date: D) -> Self
  where
    I: IntoIterator<Item = &'a T>,
    K: Fn(&'a T) -> Option<&'a str>,
    D: Fn(&'a T) -> Option<NaiveDate>,
  {
    let mut groups: HashMap<&'a str, Vec<(NaiveDate, &'a T)>> = HashMap::new();
    for record in records {
      if let (Some(k), Some(d)) = (key(record), date(record)) {
        groups.entry(k).or_default().push((d, record));
      }
    }
    for group in groups.values_mut() {
      group.sort_by_key(|(d, _)| *d);
    }
    Self { groups }
  }

  /// Last record for `key` dated on or before `on`
  pub fn backward(&self, key: &str, on: NaiveDate) -> Option<&'a T> {
    let group = self.groups.get(key)?;
    let idx = group.partition_point(|(d, _)| *d <= on);
    idx.checked_sub(1).map(|i| group[i].1)
  }

  /// First record for `key` dated on or after `on`
  pub fn forward(&self, key: &str, on: NaiveDate) -> Option<&'a T> {
    let group = self.groups.get(key)?;
    let idx = group.partition_point(|(d, _)| *d < on);
    group.get(idx).map(|(_, record)| *record)
  }

  pub fn key_count(&self) -> usize {
    self.groups.len()
  }
}
