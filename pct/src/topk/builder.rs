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
use crate::hash::DEFAULT_UPDATE_SEED;
use crate::topk::TopK;
use crate::topk::TopSet;

/// Builder for creating [`TopK`] recorders.
///
/// Provides two construction modes:
/// - [`with_size()`](Self::with_size): Specify the sketch dimensions directly
/// - [`with_accuracy()`](Self::with_accuracy): Derive them from a target error and
///   confidence
///
/// Configuration is validated by [`build()`](Self::build).
#[derive(Debug, Clone)]
pub struct TopKBuilder {
    capacity: usize,
    num_hashes: u8,
    /// Unbounded so that accuracy targets beyond `u32` buckets fail in `build`.
    num_buckets: u64,
    seed: u32,
}

impl TopKBuilder {
    /// Creates a builder with explicit sketch dimensions.
    ///
    /// # Arguments
    ///
    /// - `capacity`: Number of top entries to track (k)
    /// - `num_hashes`: Number of sketch rows (d), typically 4 to 8
    /// - `num_buckets`: Counters per row (w), typically in the thousands
    ///
    /// # Examples
    ///
    /// ```
    /// # use pct::topk::TopKBuilder;
    /// let top = TopKBuilder::with_size(20, 5, 8192).build().unwrap();
    /// assert_eq!(top.sketch().num_buckets(), 8192);
    /// ```
    pub fn with_size(capacity: usize, num_hashes: u8, num_buckets: u32) -> Self {
        TopKBuilder {
            capacity,
            num_hashes,
            num_buckets: u64::from(num_buckets),
            seed: DEFAULT_UPDATE_SEED,
        }
    }

    /// Creates a builder whose sketch meets a target accuracy.
    ///
    /// # Arguments
    ///
    /// - `capacity`: Number of top entries to track (k)
    /// - `relative_error`: Overcount bound as a fraction of the stream length
    /// - `confidence`: Probability that an estimate stays within that bound
    ///
    /// # Panics
    ///
    /// Panics if `relative_error` is not positive or `confidence` is not in
    /// (0.0, 1.0).
    ///
    /// # Examples
    ///
    /// ```
    /// # use pct::topk::TopKBuilder;
    /// let top = TopKBuilder::with_accuracy(10, 0.001, 0.99).build().unwrap();
    /// assert_eq!(top.sketch().num_hashes(), 5);
    /// assert_eq!(top.sketch().num_buckets(), 2719);
    /// ```
    pub fn with_accuracy(capacity: usize, relative_error: f64, confidence: f64) -> Self {
        TopKBuilder {
            capacity,
            num_hashes: CountMinSketch::suggest_num_hashes(confidence),
            num_buckets: CountMinSketch::num_buckets_for_error(relative_error),
            seed: DEFAULT_UPDATE_SEED,
        }
    }

    /// Sets a custom hash seed (default: 9001).
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the recorder.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// if the capacity, the number of hashes or the number of buckets is zero, or
    /// if the accuracy target needs more than `u32::MAX` buckets per row.
    pub fn build(self) -> Result<TopK, Error> {
        if self.capacity == 0 {
            return Err(Error::config_invalid("capacity must be at least 1")
                .with_context("capacity", self.capacity));
        }
        if self.num_hashes == 0 {
            return Err(Error::config_invalid("num_hashes must be at least 1")
                .with_context("num_hashes", self.num_hashes));
        }
        if self.num_buckets == 0 {
            return Err(Error::config_invalid("num_buckets must be at least 1")
                .with_context("num_buckets", self.num_buckets));
        }
        let Ok(num_buckets) = u32::try_from(self.num_buckets) else {
            return Err(Error::config_invalid("num_buckets must fit in u32")
                .with_context("num_buckets", self.num_buckets));
        };

        let sketch = CountMinSketch::with_seed(self.num_hashes, num_buckets, self.seed);
        Ok(TopK::from_parts(sketch, TopSet::new(self.capacity)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_builder_with_size() {
        let top = TopKBuilder::with_size(3, 4, 100).seed(42).build().unwrap();
        assert_eq!(top.capacity(), 3);
        assert_eq!(top.sketch().num_hashes(), 4);
        assert_eq!(top.sketch().num_buckets(), 100);
        assert_eq!(top.sketch().seed(), 42);
    }

    #[test]
    fn test_builder_default_seed() {
        let top = TopKBuilder::with_size(1, 1, 1).build().unwrap();
        assert_eq!(top.sketch().seed(), DEFAULT_UPDATE_SEED);
    }

    #[test]
    fn test_builder_rejects_zero_sizes() {
        for (capacity, num_hashes, num_buckets, field) in [
            (0, 4, 100, "capacity"),
            (3, 0, 100, "num_hashes"),
            (3, 4, 0, "num_buckets"),
        ] {
            let err = TopKBuilder::with_size(capacity, num_hashes, num_buckets)
                .build()
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
            assert!(err.message().starts_with(field), "{err}");
        }
    }

    #[test]
    fn test_builder_rejects_oversized_accuracy() {
        let err = TopKBuilder::with_accuracy(3, 1e-12, 0.99)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.message(), "num_buckets must fit in u32");
        assert!(err.to_string().contains("num_buckets: 27182818284"), "{err}");
    }

    #[test]
    #[should_panic(expected = "confidence must be between 0.0 and 1.0")]
    fn test_with_accuracy_rejects_confidence() {
        TopKBuilder::with_accuracy(3, 0.01, 1.0);
    }
}
