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

//! Approximate top-K frequent items over a stream.
//!
//! [`TopK`] pairs a conservative-update Count-Min sketch with a fixed-capacity
//! min-heap ([`TopSet`]) of the best known items. Each recorded item refreshes
//! its estimate in the sketch, and that estimate decides whether the item enters
//! or stays in the top set. Memory is bounded by the sketch dimensions and the
//! capacity, regardless of how many distinct items the stream holds.
//!
//! Counts may overestimate but never underestimate. An item that drops out of
//! the top set keeps its sketch counters, so when it comes back it re-enters
//! with its accumulated estimate rather than starting from zero.
//!
//! # Usage
//!
//! ```rust
//! # use pct::topk::TopK;
//! let mut top = TopK::new(3, 4, 2048);
//! for line in "b\na\nb\nc\nb\na\nd".lines() {
//!     top.record(line.as_bytes());
//! }
//!
//! let ranked = top.top(3).unwrap();
//! assert_eq!(ranked[0].item_utf8(), Some("b"));
//! assert_eq!(ranked[0].count(), 3);
//! assert_eq!(ranked[1].item_utf8(), Some("a"));
//!
//! // snapshots are only available at the configured capacity
//! assert!(top.top(2).is_err());
//! assert!(top.all().is_err());
//! ```
//!
//! # Configuration
//!
//! ```rust
//! # use pct::topk::TopKBuilder;
//! let top = TopKBuilder::with_accuracy(25, 0.0005, 0.99)
//!     .seed(17)
//!     .build()
//!     .unwrap();
//! assert_eq!(top.capacity(), 25);
//! ```

mod builder;
mod sketch;
mod top_set;

pub use self::builder::TopKBuilder;
pub use self::sketch::TopK;
pub use self::top_set::TopSet;
