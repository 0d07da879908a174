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

//! Count-Min sketch with conservative updates for frequency estimation.
//!
//! The sketch provides approximate, never-underestimating frequency counts for
//! streaming data in memory proportional to `num_hashes * num_buckets`,
//! independent of the number of distinct items.
//!
//! # Usage
//!
//! ```rust
//! use pct::countmin::CountMinSketch;
//!
//! let mut sketch = CountMinSketch::new(4, 2048);
//!
//! sketch.update(b"apple");
//! let banana = sketch.update(b"banana");
//! assert!(banana >= 1);
//! assert!(sketch.estimate(b"apple") >= 1);
//! ```
//!
//! # Configuration Helpers
//!
//! ```rust
//! use pct::countmin::CountMinSketch;
//!
//! let num_buckets = CountMinSketch::suggest_num_buckets(0.001);
//! let num_hashes = CountMinSketch::suggest_num_hashes(0.99);
//!
//! let _sketch = CountMinSketch::new(num_hashes, num_buckets);
//! ```

mod sketch;
pub use self::sketch::CountMinSketch;
