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

/// Xorshift generator so corpora are identical on every run.
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn seeded(seed: u64) -> Self {
        let state = if seed == 0 { 0x9e3779b97f4a7c15 } else { seed };
        Self { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

pub const NUM_HOT: usize = 8;

/// A shuffled stream of 8 heavy hitters well above a tail of warm keys and
/// single-occurrence noise.
///
/// `hot-i` occurs `3000 - 250 * i` times, each `warm-i` 30 times and each
/// `noise-i` once.
pub fn skewed_corpus(seed: u64) -> Vec<String> {
    let mut words = Vec::new();
    for i in 0..NUM_HOT {
        let key = format!("hot-{i}");
        words.extend(std::iter::repeat_n(key, 3000 - 250 * i));
    }
    for i in 0..40 {
        let key = format!("warm-{i}");
        words.extend(std::iter::repeat_n(key, 30));
    }
    for i in 0..4000 {
        words.push(format!("noise-{i}"));
    }

    let mut rng = XorShift64::seeded(seed);
    for i in (1..words.len()).rev() {
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        words.swap(i, j);
    }
    words
}

pub fn hot_keys() -> Vec<String> {
    (0..NUM_HOT).map(|i| format!("hot-{i}")).collect()
}

pub fn exact_counts(words: &[String]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for word in words {
        *counts.entry(word.clone()).or_insert(0) += 1;
    }
    counts
}

/// Splits `words` into `splits` contiguous slices, the last taking the remainder.
pub fn split(words: &[String], splits: usize) -> Vec<&[String]> {
    let step = words.len() / splits;
    (0..splits)
        .map(|i| {
            if i == splits - 1 {
                &words[i * step..]
            } else {
                &words[i * step..(i + 1) * step]
            }
        })
        .collect()
}
