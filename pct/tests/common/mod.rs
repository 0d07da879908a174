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

#![allow(dead_code)]

use std::collections::HashMap;

use pct::error::Error;
use pct::recorder::ItemCount;
use pct::recorder::Recorder;

/// Exact reference tally used to check the approximate recorder.
#[derive(Debug, Default)]
pub struct ExactTally {
    counts: HashMap<Vec<u8>, u64>,
}

impl ExactTally {
    pub fn count(&self, item: &[u8]) -> u64 {
        self.counts.get(item).copied().unwrap_or(0)
    }
}

impl Recorder for ExactTally {
    fn record(&mut self, item: &[u8]) {
        *self.counts.entry(item.to_vec()).or_default() += 1;
    }

    fn top(&self, n: usize) -> Result<Vec<ItemCount>, Error> {
        let mut ranked = self.all()?;
        ranked.truncate(n);
        Ok(ranked)
    }

    fn all(&self) -> Result<Vec<ItemCount>, Error> {
        let mut ranked: Vec<ItemCount> = self
            .counts
            .iter()
            .map(|(item, count)| ItemCount::new(item.clone(), *count))
            .collect();
        ranked.sort_by(|a, b| {
            b.count()
                .cmp(&a.count())
                .then_with(|| a.item().cmp(b.item()))
        });
        Ok(ranked)
    }
}
