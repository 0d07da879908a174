// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::hash::DEFAULT_UPDATE_SEED;
use crate::hash::double_hash_offsets;
use crate::hash::murmur3_x64_128;

/// Count-Min sketch with conservative updates over raw byte items.
///
/// The sketch is a `num_hashes × num_buckets` matrix of `u64` counters. Each
/// item maps to one cell per row; its estimate is the minimum across those
/// cells. Estimates never undercount the true frequency and only overcount
/// when items collide in every row.
///
/// Updates are conservative: only cells strictly below the new estimate are
/// raised, which keeps collision error lower than incrementing every row.
#[derive(Debug, Clone, PartialEq)]
pub struct CountMinSketch {
    num_hashes: u8,
    num_buckets: u32,
    seed: u32,
    total_weight: u64,
    /// Row-major `num_hashes * num_buckets` cells.
    counts: Vec<u64>,
}

impl CountMinSketch {
    /// Creates a new Count-Min sketch with the default seed.
    ///
    /// # Panics
    ///
    /// Panics if `num_hashes` or `num_buckets` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pct::countmin::CountMinSketch;
    /// let sketch = CountMinSketch::new(4, 2048);
    /// assert_eq!(sketch.num_hashes(), 4);
    /// assert_eq!(sketch.num_buckets(), 2048);
    /// assert!(sketch.is_empty());
    /// ```
    pub fn new(num_hashes: u8, num_buckets: u32) -> Self {
        Self::with_seed(num_hashes, num_buckets, DEFAULT_UPDATE_SEED)
    }

    /// Creates a new Count-Min sketch with the provided seed.
    ///
    /// # Panics
    ///
    /// Panics if `num_hashes` or `num_buckets` is zero.
    pub fn with_seed(num_hashes: u8, num_buckets: u32, seed: u32) -> Self {
        assert!(num_hashes >= 1, "num_hashes must be at least 1");
        assert!(num_buckets >= 1, "num_buckets must be at least 1");
        let cells = num_hashes as usize * num_buckets as usize;
        Self {
            num_hashes,
            num_buckets,
            seed,
            total_weight: 0,
            counts: vec![0; cells],
        }
    }

    /// Returns the number of hash functions (rows) used by the sketch.
    pub fn num_hashes(&self) -> u8 {
        self.num_hashes
    }

    /// Returns the number of buckets per row.
    pub fn num_buckets(&self) -> u32 {
        self.num_buckets
    }

    /// Returns the seed used by the sketch.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Returns the number of updates applied to the sketch.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Returns true if the sketch has not seen any updates.
    pub fn is_empty(&self) -> bool {
        self.total_weight == 0
    }

    /// Returns the relative error (epsilon) for this sketch.
    ///
    /// Collisions add at most `relative_error() * total_weight()` to an estimate
    /// with the confidence given by the number of rows.
    pub fn relative_error(&self) -> f64 {
        std::f64::consts::E / self.num_buckets as f64
    }

    /// Suggests the number of buckets per row for a target relative error.
    ///
    /// # Panics
    ///
    /// Panics if `relative_error` is not positive, or if it is so small that the
    /// bucket count does not fit in a `u32`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pct::countmin::CountMinSketch;
    /// assert_eq!(CountMinSketch::suggest_num_buckets(0.01), 272);
    /// ```
    pub fn suggest_num_buckets(relative_error: f64) -> u32 {
        let num_buckets = Self::num_buckets_for_error(relative_error);
        assert!(
            num_buckets <= u32::MAX as u64,
            "relative_error {relative_error} needs {num_buckets} buckets, more than {}",
            u32::MAX
        );
        num_buckets as u32
    }

    /// Bucket count for `relative_error` without the `u32` bound, saturating at
    /// `u64::MAX`.
    pub(crate) fn num_buckets_for_error(relative_error: f64) -> u64 {
        assert!(relative_error > 0.0, "relative_error must be positive");
        (std::f64::consts::E / relative_error).ceil() as u64
    }

    /// Suggests the number of hash functions for a target confidence.
    ///
    /// # Panics
    ///
    /// Panics if `confidence` is not in (0.0, 1.0).
    ///
    /// # Examples
    ///
    /// ```
    /// # use pct::countmin::CountMinSketch;
    /// assert_eq!(CountMinSketch::suggest_num_hashes(0.99), 5);
    /// ```
    pub fn suggest_num_hashes(confidence: f64) -> u8 {
        assert!(
            confidence > 0.0 && confidence < 1.0,
            "confidence must be between 0.0 and 1.0 (exclusive)"
        );
        let hashes = (1.0 / (1.0 - confidence)).ln().ceil();
        hashes.clamp(1.0, u8::MAX as f64) as u8
    }

    /// Records one occurrence of `item` and returns its refreshed estimate.
    ///
    /// The returned value is one more than the minimum over the item's cells
    /// before the update, which is the tightest upper bound on the item's
    /// cumulative count including this occurrence. `item` is neither modified
    /// nor retained.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pct::countmin::CountMinSketch;
    /// let mut sketch = CountMinSketch::new(4, 1024);
    /// assert_eq!(sketch.update(b"apple"), 1);
    /// assert_eq!(sketch.update(b"apple"), 2);
    /// assert!(sketch.update(b"banana") >= 1);
    /// ```
    pub fn update(&mut self, item: &[u8]) -> u64 {
        let (h1, h2) = murmur3_x64_128(item, self.seed);
        let num_hashes = self.num_hashes as usize;
        let num_buckets = self.num_buckets as usize;

        let current = cell_indexes(h1, h2, num_hashes, num_buckets)
            .map(|index| self.counts[index])
            .min()
            .unwrap_or(0);
        let candidate = current.saturating_add(1);

        for index in cell_indexes(h1, h2, num_hashes, num_buckets) {
            if self.counts[index] < candidate {
                self.counts[index] = candidate;
            }
        }

        self.total_weight = self.total_weight.saturating_add(1);
        candidate
    }

    /// Returns the current estimate for `item` without recording it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pct::countmin::CountMinSketch;
    /// let mut sketch = CountMinSketch::new(4, 1024);
    /// assert_eq!(sketch.estimate(b"apple"), 0);
    /// sketch.update(b"apple");
    /// assert_eq!(sketch.estimate(b"apple"), 1);
    /// ```
    pub fn estimate(&self, item: &[u8]) -> u64 {
        let (h1, h2) = murmur3_x64_128(item, self.seed);
        cell_indexes(h1, h2, self.num_hashes as usize, self.num_buckets as usize)
            .map(|index| self.counts[index])
            .min()
            .unwrap_or(0)
    }
}

/// Flat indexes of the cells an item maps to, one per row.
fn cell_indexes(
    h1: u64,
    h2: u64,
    num_hashes: usize,
    num_buckets: usize,
) -> impl Iterator<Item = usize> {
    double_hash_offsets(h1, h2, num_buckets as u64)
        .take(num_hashes)
        .enumerate()
        .map(move |(row, offset)| row * num_buckets + offset)
}
