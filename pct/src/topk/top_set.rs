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

use crate::error::Error;
use crate::recorder::ItemCount;

/// Fixed-capacity min-heap of the best known `(item, count)` pairs.
///
/// The set always holds exactly `capacity` slots. Slots start out as
/// placeholders with an empty item and a zero count, and the root slot always
/// holds the smallest count. Real entries have a count of at least one and an
/// item occupies at most one real slot.
///
/// Counts are the estimates supplied at admission time and are not refreshed
/// while an item is not being recorded, so an entry can be evicted even though
/// its true frequency has grown since.
#[derive(Debug, Clone, PartialEq)]
pub struct TopSet {
    slots: Vec<ItemCount>,
}

impl TopSet {
    /// Creates a set tracking `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "capacity must be at least 1");
        Self {
            slots: vec![ItemCount::default(); capacity],
        }
    }

    /// Returns the number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of slots holding a real item.
    pub fn num_tracked(&self) -> usize {
        self.slots.iter().filter(|slot| slot.count > 0).count()
    }

    /// Returns the smallest count in the set, which an estimate must reach to
    /// be admitted.
    pub fn min_count(&self) -> u64 {
        self.slots[0].count
    }

    /// Returns the count tracked for `item`, if it currently holds a slot.
    pub fn get(&self, item: &[u8]) -> Option<u64> {
        self.position(item).map(|i| self.slots[i].count)
    }

    /// Iterates over all slots in heap order, placeholders included.
    pub fn iter(&self) -> impl Iterator<Item = &ItemCount> {
        self.slots.iter()
    }

    /// Offers `item` with its latest `estimate`.
    ///
    /// Estimates below [`min_count`](Self::min_count) are ignored. If the item
    /// already holds a slot its count is replaced by `estimate`; otherwise it
    /// takes over the root slot, evicting the current minimum.
    ///
    /// # Panics
    ///
    /// Panics if `estimate` is zero. Estimates count the occurrence being
    /// offered, as returned by
    /// [`CountMinSketch::update`](crate::countmin::CountMinSketch::update).
    pub fn consider(&mut self, item: &[u8], estimate: u64) {
        assert!(estimate >= 1, "estimate must be at least 1");
        if estimate < self.min_count() {
            return;
        }

        if let Some(i) = self.position(item) {
            self.slots[i].count = estimate;
            self.fix(i);
            return;
        }

        let admitted = ItemCount {
            item: item.to_vec(),
            count: estimate,
        };
        let evicted = std::mem::replace(&mut self.slots[0], admitted);
        if evicted.count > 0 {
            log::trace!(
                "evicted {:?} (count {}) for {:?} (count {estimate})",
                String::from_utf8_lossy(&evicted.item),
                evicted.count,
                String::from_utf8_lossy(item),
            );
        }
        self.fix(0);
    }

    /// Returns a ranked copy of every slot.
    ///
    /// Entries are sorted by count descending and then by item ascending;
    /// placeholder slots sort last with a zero count.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// unless `n` equals the capacity.
    pub fn top(&self, n: usize) -> Result<Vec<ItemCount>, Error> {
        if n != self.capacity() {
            return Err(Error::config_invalid(
                "can only retrieve as many entries as requested up front",
            )
            .with_context("requested", n)
            .with_context("capacity", self.capacity()));
        }
        let mut ranked = self.slots.clone();
        ranked.sort_by(ItemCount::rank);
        Ok(ranked)
    }

    fn position(&self, item: &[u8]) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.count > 0 && slot.item.as_slice() == item)
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.slots[i].count < self.slots[j].count
    }

    /// Re-establishes heap order after the slot at `i` changed.
    fn fix(&mut self, i: usize) {
        if !self.sift_down(i) {
            self.sift_up(i);
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.slots.swap(i, parent);
            i = parent;
        }
    }

    /// Returns whether the slot moved.
    fn sift_down(&mut self, start: usize) -> bool {
        let len = self.slots.len();
        let mut i = start;
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < len && self.less(right, left) {
                child = right;
            }
            if !self.less(child, i) {
                break;
            }
            self.slots.swap(i, child);
            i = child;
        }
        i > start
    }
}
