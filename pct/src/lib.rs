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

//! # pct
//!
//! Frequency estimation for line-oriented streams.
//!
//! The crate estimates how often each distinct item (typically a line of text)
//! occurs in a one-pass stream and keeps the K most frequent ones, using memory
//! that does not grow with the number of distinct items.
//!
//! - [`countmin`]: Count-Min sketch with conservative updates.
//! - [`topk`]: Top-K recorder built on the sketch.
//! - [`recorder`]: The [`Recorder`](recorder::Recorder) contract the recorders
//!   implement.
//!
//! Errors are reported through [`error::Error`]. The crate logs through the
//! [`log`] facade and never installs a logger itself.

pub mod countmin;
pub mod error;
pub mod recorder;
pub mod topk;

mod hash;

pub use self::hash::DEFAULT_UPDATE_SEED;
