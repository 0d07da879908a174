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

//! The recording contract shared by exact and approximate frequency recorders.
//!
//! A recorder is fed items one at a time and asked for a ranked snapshot of
//! the most frequent ones. Callers pick an implementation when they configure
//! the pipeline and drive it through this trait, typically as a
//! `Box<dyn Recorder>`.

use std::cmp::Ordering;

use crate::error::Error;

/// An item paired with its (possibly approximate) count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ItemCount {
    pub(crate) item: Vec<u8>,
    pub(crate) count: u64,
}

impl ItemCount {
    /// Creates a row for `item` with `count`.
    pub fn new(item: impl Into<Vec<u8>>, count: u64) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }

    /// Returns the raw item bytes.
    pub fn item(&self) -> &[u8] {
        &self.item
    }

    /// Returns the item as UTF-8, if it is valid UTF-8.
    pub fn item_utf8(&self) -> Option<&str> {
        std::str::from_utf8(&self.item).ok()
    }

    /// Returns the recorded count.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Orders by count descending, then by item bytes ascending.
    pub(crate) fn rank(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.item.cmp(&other.item))
    }
}

/// Records a stream of items and reports the most frequent ones.
pub trait Recorder {
    /// Records one occurrence of `item`.
    ///
    /// The bytes are copied if they need to be kept, so callers may reuse
    /// their buffer between calls.
    fn record(&mut self, item: &[u8]);

    /// Returns the top `n` items ranked by count descending, ties broken by item
    /// bytes ascending.
    fn top(&self, n: usize) -> Result<Vec<ItemCount>, Error>;

    /// Returns every recorded item with the same ranking as [`top`](Self::top).
    fn all(&self) -> Result<Vec<ItemCount>, Error>;
}
