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

use std::cmp::Ordering;

/// Current knowledge about one key.
///
/// `count` is an upper bound on the key's true frequency and
/// `count - error` is a lower bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    key: String,
    count: u64,
    error: u64,
}

impl Element {
    /// Creates an element.
    ///
    /// # Panics
    ///
    /// Panics if `error` exceeds `count`.
    pub fn new(key: impl Into<String>, count: u64, error: u64) -> Self {
        assert!(
            error <= count,
            "error may not exceed count, got error {error} and count {count}"
        );
        Self {
            key: key.into(),
            count,
            error,
        }
    }

    /// Returns the key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the estimated count, an upper bound on the true frequency.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the maximum overcount included in [`count`](Self::count).
    pub fn error(&self) -> u64 {
        self.error
    }

    /// Returns the upper bound for the frequency.
    pub fn upper_bound(&self) -> u64 {
        self.count
    }

    /// Returns the lower bound for the frequency.
    pub fn lower_bound(&self) -> u64 {
        self.count - self.error
    }

    /// Counts saturate at `u64::MAX`.
    pub(super) fn add_count(&mut self, delta: u64) {
        self.count = self.count.saturating_add(delta);
    }

    /// Heap order: smaller count first, larger error first among equal counts.
    #[inline]
    pub(super) fn evicts_before(&self, other: &Element) -> bool {
        self.count < other.count || (self.count == other.count && self.error > other.error)
    }
}

/// Report order: descending count, ties ascending by key.
pub(super) fn by_count_descending(a: &Element, b: &Element) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let element = Element::new("k", 10, 4);
        assert_eq!(element.upper_bound(), 10);
        assert_eq!(element.lower_bound(), 6);
    }

    #[test]
    #[should_panic(expected = "error may not exceed count")]
    fn test_error_above_count_panics() {
        Element::new("k", 3, 4);
    }

    #[test]
    fn test_add_count_saturates() {
        let mut element = Element::new("k", u64::MAX - 1, 0);
        element.add_count(5);
        assert_eq!(element.count(), u64::MAX);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let element = Element::new("hot", 42, 7);
        let json = serde_json::to_string(&element).unwrap();
        assert_eq!(json, r#"{"key":"hot","count":42,"error":7}"#);
        let decoded: Element = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, element);
    }
}
