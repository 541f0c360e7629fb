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

//! Routing of a key hash to its partition and error bucket.

use super::NUM_PARTITIONS;

/// Partition and error bucket derived from a single key hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Assignment {
    pub partition: usize,
    pub bucket: usize,
}

impl Assignment {
    #[inline]
    pub fn from_hash(hash: u64, num_buckets: usize) -> Self {
        Self {
            partition: (hash % NUM_PARTITIONS as u64) as usize,
            bucket: reduce(hash, num_buckets),
        }
    }
}

/// Maps the high 32 bits of `hash` into `[0, n)` with a multiply-shift.
#[inline]
fn reduce(hash: u64, n: usize) -> usize {
    (((hash >> 32) * n as u64) >> 32) as usize
}
