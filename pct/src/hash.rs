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

//! Hashing of raw item bytes.

/// Seed used by sketches unless one is supplied explicitly.
pub const DEFAULT_UPDATE_SEED: u32 = 9001;

/// Hashes `bytes` with MurmurHash3 (x64, 128-bit) and returns both 64-bit halves.
///
/// The bytes are hashed as-is, without any length prefix or terminator, so two
/// items hash equally exactly when their bytes are equal.
#[inline]
pub(crate) fn murmur3_x64_128(bytes: &[u8], seed: u32) -> (u64, u64) {
    mur3::murmurhash3_x64_128(bytes, seed)
}

/// Yields bucket offsets for successive sketch rows by double hashing:
/// `offset[i] = (h1 + i * h2) mod num_buckets`.
///
/// Arithmetic wraps at 64 bits before the reduction. The iterator is unbounded;
/// callers take one offset per row.
#[inline]
pub(crate) fn double_hash_offsets(
    h1: u64,
    h2: u64,
    num_buckets: u64,
) -> impl Iterator<Item = usize> {
    (0u64..).map(move |i| (h1.wrapping_add(i.wrapping_mul(h2)) % num_buckets) as usize)
}
