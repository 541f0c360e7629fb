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

//! Filtered Space-Saving top-k sketch.

use tracing::debug;
use tracing::trace;

use super::NUM_PARTITIONS;
use super::assign::Assignment;
use super::element::Element;
use super::element::by_count_descending;
use super::partition::BoundedPartition;
use crate::error::Error;
use crate::hash::KeyHasher;
use crate::hash::MurmurHash3;

/// Sketch estimating the `n` most frequent keys of a stream.
///
/// See the [topk module level documentation](crate::topk) for more.
///
/// A sketch is not synchronized. Build one sketch per worker and combine them
/// with [`merge`](Self::merge).
#[derive(Debug, Clone, PartialEq)]
pub struct TopKSketch<H = MurmurHash3> {
    pub(super) n: usize,
    pub(super) partitions: [BoundedPartition; NUM_PARTITIONS],
    pub(super) alphas: Vec<u64>,
    pub(super) hasher: H,
}

impl TopKSketch {
    /// Creates a sketch estimating the top `n` keys, hashing with [`MurmurHash3`].
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn new(n: usize) -> Self {
        Self::with_hasher(n, MurmurHash3::default())
    }
}

impl<H: KeyHasher> TopKSketch<H> {
    /// Creates a sketch estimating the top `n` keys with a custom hasher.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn with_hasher(n: usize, hasher: H) -> Self {
        assert!(n > 0, "n must be positive");
        let num_buckets = n
            .checked_mul(NUM_PARTITIONS)
            .unwrap_or_else(|| panic!("n is too large: {n}"));
        Self {
            n,
            partitions: empty_partitions(partition_capacity(n)),
            alphas: vec![0; num_buckets],
            hasher,
        }
    }

    pub(super) fn from_parts(
        n: usize,
        partitions: [BoundedPartition; NUM_PARTITIONS],
        alphas: Vec<u64>,
        hasher: H,
    ) -> Self {
        debug_assert_eq!(alphas.len(), n * NUM_PARTITIONS);
        Self {
            n,
            partitions,
            alphas,
            hasher,
        }
    }

    /// Returns the number of top keys this sketch reports.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the maximum number of keys each partition tracks.
    pub fn partition_capacity(&self) -> usize {
        partition_capacity(self.n)
    }

    /// Returns the number of error floor buckets.
    pub fn num_buckets(&self) -> usize {
        self.alphas.len()
    }

    /// Returns the number of keys currently tracked across all partitions.
    pub fn len(&self) -> usize {
        self.partitions.iter().map(BoundedPartition::len).sum()
    }

    /// Returns true if no key is tracked.
    pub fn is_empty(&self) -> bool {
        self.partitions.iter().all(|p| p.len() == 0)
    }

    /// Returns the hasher keys are routed with.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Resets the sketch to an empty state.
    pub fn reset(&mut self) {
        self.partitions = empty_partitions(self.partition_capacity());
        self.alphas.fill(0);
    }

    /// Adds `count` observations of `key`, returning the updated estimate for it.
    ///
    /// A new key that cannot beat the minimum of its full partition is not
    /// tracked; its bucket floor absorbs the count and the returned element is
    /// the untracked estimate.
    pub fn insert(&mut self, key: &str, count: u64) -> Element {
        let Assignment { partition, bucket } = self.assign(key);
        let part = &mut self.partitions[partition];

        if let Some(slot) = part.lookup(key) {
            return part.increment(slot, count);
        }

        let Some(min) = part.root().filter(|_| part.is_full()) else {
            let element = Element::new(key, count, 0);
            part.admit(element.clone());
            return element;
        };

        let floor = self.alphas[bucket];
        let raised = floor.saturating_add(count);
        if raised < min.count() {
            self.alphas[bucket] = raised;
            return Element::new(key, raised, floor);
        }

        let victim = bucket_of(&self.hasher, min.key(), self.alphas.len());
        self.alphas[victim] = self.alphas[victim].max(min.count());

        let element = Element::new(key, raised, floor);
        let evicted = part.replace_min(element.clone());
        trace!(
            evicted = evicted.key(),
            evicted_count = evicted.count(),
            admitted = key,
            partition,
            "evicted partition minimum"
        );
        element
    }

    /// Returns the current estimate for `key`.
    ///
    /// An untracked key reports its bucket floor as both count and error.
    pub fn estimate(&self, key: &str) -> Element {
        let Assignment { partition, bucket } = self.assign(key);
        let part = &self.partitions[partition];
        match part.lookup(key) {
            Some(slot) => part.get(slot).clone(),
            None => {
                let floor = self.alphas[bucket];
                Element::new(key, floor, floor)
            }
        }
    }

    /// Returns up to `n` tracked elements, ordered by descending count and then
    /// ascending key.
    pub fn keys(&self) -> Vec<Element> {
        let mut elements = Vec::with_capacity(self.len());
        for part in &self.partitions {
            elements.extend_from_slice(part.elements());
        }
        elements.sort_by(by_count_descending);
        elements.truncate(self.n);
        elements
    }

    /// Merges `other` into this sketch.
    ///
    /// Fails without modifying either sketch if the two were built with
    /// different `n`. Both sketches must route keys with equivalent hashers.
    ///
    /// A key tracked on only one side is topped up with the bucket floor of
    /// `other` for that key, whichever side tracked it.
    pub fn merge(&mut self, other: &TopKSketch<H>) -> Result<(), Error> {
        if self.n != other.n {
            return Err(Error::size_mismatch(self.n, other.n));
        }

        let capacity = self.partition_capacity();
        let num_buckets = self.alphas.len();
        let hasher = &self.hasher;
        for (mine, theirs) in self.partitions.iter_mut().zip(&other.partitions) {
            let mut combined = Vec::with_capacity(mine.len() + theirs.len());
            for e1 in mine.elements() {
                let element = match theirs.lookup(e1.key()) {
                    Some(slot) => {
                        let e2 = theirs.get(slot);
                        Element::new(
                            e1.key(),
                            e1.count().saturating_add(e2.count()),
                            e1.error().saturating_add(e2.error()),
                        )
                    }
                    None => {
                        let floor = other.alphas[bucket_of(hasher, e1.key(), num_buckets)];
                        Element::new(
                            e1.key(),
                            e1.count().saturating_add(floor),
                            e1.error().saturating_add(floor),
                        )
                    }
                };
                combined.push(element);
            }
            for e2 in theirs.elements() {
                if mine.lookup(e2.key()).is_some() {
                    continue;
                }
                let floor = other.alphas[bucket_of(hasher, e2.key(), num_buckets)];
                combined.push(Element::new(
                    e2.key(),
                    e2.count().saturating_add(floor),
                    e2.error().saturating_add(floor),
                ));
            }

            combined.sort_by(by_count_descending);
            combined.truncate(capacity);
            let mut rebuilt = BoundedPartition::new(capacity);
            for element in combined {
                rebuilt.admit(element);
            }
            *mine = rebuilt;
        }

        for (alpha, floor) in self.alphas.iter_mut().zip(&other.alphas) {
            *alpha = alpha.saturating_add(*floor);
        }

        debug!(n = self.n, tracked = self.len(), "merged top-k sketch");
        Ok(())
    }

    fn assign(&self, key: &str) -> Assignment {
        Assignment::from_hash(self.hasher.hash64(key.as_bytes()), self.alphas.len())
    }
}

pub(super) fn partition_capacity(n: usize) -> usize {
    n.div_ceil(NUM_PARTITIONS)
}

fn empty_partitions(capacity: usize) -> [BoundedPartition; NUM_PARTITIONS] {
    std::array::from_fn(|_| BoundedPartition::new(capacity))
}

fn bucket_of<H: KeyHasher>(hasher: &H, key: &str, num_buckets: usize) -> usize {
    Assignment::from_hash(hasher.hash64(key.as_bytes()), num_buckets).bucket
}
