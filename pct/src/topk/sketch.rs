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

use crate::countmin::CountMinSketch;
use crate::error::Error;
use crate::recorder::ItemCount;
use crate::recorder::Recorder;
use crate::topk::TopKBuilder;
use crate::topk::TopSet;

/// Approximate top-K recorder.
///
/// Every recorded item refreshes its estimate in a [`CountMinSketch`] and the
/// estimate is then offered to a [`TopSet`] of fixed capacity. Only the items
/// in the top set are stored; everything else lives on as sketch counters.
///
/// Snapshots can only be taken at the configured capacity, and the recorder
/// cannot list every item it has seen.
///
/// Use [`TopKBuilder`] or [`TopK::new`] to construct instances.
#[derive(Debug, Clone, PartialEq)]
pub struct TopK {
    sketch: CountMinSketch,
    top: TopSet,
}

impl TopK {
    /// Creates a recorder tracking the top `capacity` items with a sketch of
    /// `num_hashes` rows of `num_buckets` counters each.
    ///
    /// # Panics
    ///
    /// Panics if any argument is zero. Use [`TopKBuilder`] to get an error
    /// instead.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pct::topk::TopK;
    /// let mut top = TopK::new(2, 4, 1024);
    /// for line in ["a", "b", "a", "c", "a", "b"] {
    ///     top.record(line.as_bytes());
    /// }
    /// let ranked = top.top(2).unwrap();
    /// assert_eq!(ranked[0].item(), b"a");
    /// assert_eq!(ranked[0].count(), 3);
    /// ```
    pub fn new(capacity: usize, num_hashes: u8, num_buckets: u32) -> Self {
        Self::from_parts(
            CountMinSketch::new(num_hashes, num_buckets),
            TopSet::new(capacity),
        )
    }

    /// Returns a builder for creating a recorder with validated configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pct::topk::TopK;
    /// let top = TopK::builder(10, 5, 4096).seed(7).build().unwrap();
    /// assert_eq!(top.capacity(), 10);
    /// ```
    pub fn builder(capacity: usize, num_hashes: u8, num_buckets: u32) -> TopKBuilder {
        TopKBuilder::with_size(capacity, num_hashes, num_buckets)
    }

    pub(crate) fn from_parts(sketch: CountMinSketch, top: TopSet) -> Self {
        log::debug!(
            "created top-k recorder: capacity={}, num_hashes={}, num_buckets={}, seed={}",
            top.capacity(),
            sketch.num_hashes(),
            sketch.num_buckets(),
            sketch.seed(),
        );
        Self { sketch, top }
    }

    /// Records one occurrence of `item`.
    ///
    /// `item` is not retained unless it enters the top set, in which case it is
    /// copied. Reusing a line buffer between calls is fine.
    pub fn record(&mut self, item: &[u8]) {
        let estimate = self.sketch.update(item);
        self.top.consider(item, estimate);
    }

    /// Returns all tracked entries ranked by count descending, then item
    /// ascending.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// unless `n` equals [`capacity`](Self::capacity).
    pub fn top(&self, n: usize) -> Result<Vec<ItemCount>, Error> {
        self.top.top(n)
    }

    /// Always fails: the recorder does not retain items outside its top set.
    ///
    /// # Errors
    ///
    /// Always returns [`ErrorKind::Unsupported`](crate::error::ErrorKind::Unsupported).
    pub fn all(&self) -> Result<Vec<ItemCount>, Error> {
        Err(Error::unsupported("top-k recorder cannot list all entries")
            .with_context("capacity", self.capacity()))
    }

    /// Returns the sketch estimate for `item` without recording it.
    pub fn estimate(&self, item: &[u8]) -> u64 {
        self.sketch.estimate(item)
    }

    /// Returns the number of entries a snapshot holds.
    pub fn capacity(&self) -> usize {
        self.top.capacity()
    }

    /// Returns the number of items recorded so far.
    pub fn total_weight(&self) -> u64 {
        self.sketch.total_weight()
    }

    /// Returns the underlying sketch.
    pub fn sketch(&self) -> &CountMinSketch {
        &self.sketch
    }

    /// Returns the underlying top set.
    pub fn top_set(&self) -> &TopSet {
        &self.top
    }
}

impl Recorder for TopK {
    fn record(&mut self, item: &[u8]) {
        TopK::record(self, item)
    }

    fn top(&self, n: usize) -> Result<Vec<ItemCount>, Error> {
        TopK::top(self, n)
    }

    fn all(&self) -> Result<Vec<ItemCount>, Error> {
        TopK::all(self)
    }
}
