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

use super::KeyHasher;

/// Default seed, shared with the other datasketches hash families.
pub const DEFAULT_SEED: u32 = 9001;

/// MurmurHash3 x64/128, truncated to its first 64-bit half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MurmurHash3 {
    seed: u32,
}

impl MurmurHash3 {
    pub fn with_seed(seed: u32) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for MurmurHash3 {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl KeyHasher for MurmurHash3 {
    #[inline]
    fn hash64(&self, key: &[u8]) -> u64 {
        let (h1, _) = mur3::murmurhash3_x64_128(key, self.seed);
        h1
    }
}
