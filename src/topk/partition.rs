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

//! Fixed-capacity indexed min-heap of tracked elements.

use std::collections::HashMap;

use super::element::Element;

/// A bounded min-heap of [`Element`]s with a key to slot index.
///
/// `slots` mirrors the position of every element in `elements`; each swap
/// performed while repairing the heap updates both before returning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct BoundedPartition {
    capacity: usize,
    slots: HashMap<String, usize>,
    elements: Vec<Element>,
}

impl BoundedPartition {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: HashMap::with_capacity(capacity),
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Rebuilds a partition from decoded parts, which must already agree with each other.
    pub fn from_parts(
        capacity: usize,
        slots: HashMap<String, usize>,
        elements: Vec<Element>,
    ) -> Self {
        debug_assert_eq!(slots.len(), elements.len());
        Self {
            capacity,
            slots,
            elements,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_full(&self) -> bool {
        self.elements.len() >= self.capacity
    }

    /// Elements in heap-array order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn lookup(&self, key: &str) -> Option<usize> {
        self.slots.get(key).copied()
    }

    pub fn get(&self, slot: usize) -> &Element {
        &self.elements[slot]
    }

    /// The minimum element, if any.
    pub fn root(&self) -> Option<&Element> {
        self.elements.first()
    }

    /// Adds `delta` to the element at `slot` and returns its updated state.
    pub fn increment(&mut self, slot: usize, delta: u64) -> Element {
        self.elements[slot].add_count(delta);
        let updated = self.elements[slot].clone();
        self.fix(slot);
        updated
    }

    /// Appends a new element; the partition must not be full.
    pub fn admit(&mut self, element: Element) {
        debug_assert!(!self.is_full(), "admit on a full partition");
        debug_assert!(!self.slots.contains_key(element.key()));
        let slot = self.elements.len();
        self.slots.insert(element.key().to_string(), slot);
        self.elements.push(element);
        self.sift_up(slot);
    }

    /// Replaces the minimum with `element` and returns the evicted minimum.
    pub fn replace_min(&mut self, element: Element) -> Element {
        debug_assert!(!self.elements.is_empty(), "replace_min on an empty partition");
        let key = element.key().to_string();
        let evicted = std::mem::replace(&mut self.elements[0], element);
        self.slots.remove(evicted.key());
        self.slots.insert(key, 0);
        self.sift_down(0);
        evicted
    }

    fn fix(&mut self, slot: usize) {
        if !self.sift_down(slot) {
            self.sift_up(slot);
        }
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.elements[i].evicts_before(&self.elements[j])
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.elements.swap(i, j);
        if let Some(slot) = self.slots.get_mut(self.elements[i].key()) {
            *slot = i;
        }
        if let Some(slot) = self.slots.get_mut(self.elements[j].key()) {
            *slot = j;
        }
    }

    fn sift_up(&mut self, mut j: usize) {
        while j > 0 {
            let parent = (j - 1) / 2;
            if !self.less(j, parent) {
                break;
            }
            self.swap(parent, j);
            j = parent;
        }
    }

    /// Returns whether the element moved.
    fn sift_down(&mut self, start: usize) -> bool {
        let n = self.elements.len();
        let mut i = start;
        loop {
            let left = 2 * i + 1;
            if left >= n {
                break;
            }
            let mut child = left;
            let right = left + 1;
            if right < n && self.less(right, left) {
                child = right;
            }
            if !self.less(child, i) {
                break;
            }
            self.swap(i, child);
            i = child;
        }
        i > start
    }
}
