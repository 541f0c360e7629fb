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

//! Key hashing used to route keys to partitions and error buckets.
//!
//! The sketch treats the hash as an opaque, uniformly distributed 64-bit value.
//! [`MurmurHash3`] is the default; any [`KeyHasher`] may be injected through
//! [`TopKSketch::with_hasher`](crate::topk::TopKSketch::with_hasher).

mod murmurhash;

pub use self::murmurhash::DEFAULT_SEED;
pub use self::murmurhash::MurmurHash3;

/// A 64-bit hash function over key bytes.
///
/// Sketches that are merged with each other, or decoded from each other's
/// bytes, must use hashers that produce identical values for identical keys.
pub trait KeyHasher {
    /// Returns the 64-bit hash of `key`.
    fn hash64(&self, key: &[u8]) -> u64;
}
