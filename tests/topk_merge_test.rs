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

mod common;

use common::exact_counts;
use common::hot_keys;
use common::skewed_corpus;
use common::split;
use googletest::assert_that;
use googletest::prelude::contains_substring;
use googletest::prelude::ge;
use googletest::prelude::le;
use topk_sketch::error::ErrorKind;
use topk_sketch::topk::Element;
use topk_sketch::topk::TopKSketch;

fn build(n: usize, words: &[String]) -> TopKSketch {
    let mut sketch = TopKSketch::new(n);
    for word in words {
        sketch.insert(word, 1);
    }
    sketch
}

#[test]
fn test_merge_size_mismatch() {
    let mut left = build(20, &skewed_corpus(3)[..1000]);
    let right = build(10, &skewed_corpus(4)[..1000]);
    let left_before = left.clone();
    let right_before = right.clone();

    let err = left.merge(&right).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert_that!(err.message(), contains_substring("expected sketch of size n 20, got 10"));
    assert_eq!(left, left_before);
    assert_eq!(right, right_before);
}

#[test]
fn test_merge_leaves_other_untouched() {
    let words = skewed_corpus(5);
    let (head, tail) = words.split_at(words.len() / 2);
    let mut left = build(20, head);
    let right = build(20, tail);
    let right_before = right.clone();

    left.merge(&right).unwrap();
    assert_eq!(right, right_before);
}

#[test]
fn test_merge_into_empty_sketch() {
    let mut merged = TopKSketch::new(4);
    let mut other = TopKSketch::new(4);
    other.insert("a", 3);
    other.insert("b", 2);

    merged.merge(&other).unwrap();
    assert_eq!(merged.keys(), other.keys());
    assert_eq!(merged, other);
}

#[test]
fn test_merge_disjoint_keys() {
    let mut left = TopKSketch::new(60);
    let mut right = TopKSketch::new(60);
    left.insert("left-only", 5);
    right.insert("right-only", 7);
    left.insert("shared", 1);
    right.insert("shared", 2);

    left.merge(&right).unwrap();
    assert_eq!(
        left.keys(),
        vec![
            Element::new("right-only", 7, 0),
            Element::new("left-only", 5, 0),
            Element::new("shared", 3, 0),
        ]
    );
}

fn assert_merged_top_matches(splits: usize) {
    let words = skewed_corpus(42);
    let exact = exact_counts(&words);
    let single = build(20, &words);

    let mut sketches = split(&words, splits)
        .into_iter()
        .map(|slice| build(20, slice));
    let mut merged = sketches.next().unwrap();
    for sketch in sketches {
        merged.merge(&sketch).unwrap();
    }

    let single_top: Vec<String> = single.keys()[..8].iter().map(|e| e.key().to_string()).collect();
    let merged_top: Vec<String> = merged.keys()[..8].iter().map(|e| e.key().to_string()).collect();
    assert_eq!(single_top, hot_keys());
    assert_eq!(merged_top, single_top, "splits {splits}");

    for element in &merged.keys()[..8] {
        let count = exact[element.key()];
        assert_that!(element.upper_bound(), ge(count));
        assert_that!(element.lower_bound(), le(count));
    }
}

#[test]
fn test_merge_matches_single_sketch_one_split() {
    assert_merged_top_matches(1);
}

#[test]
fn test_merge_matches_single_sketch_two_splits() {
    assert_merged_top_matches(2);
}

#[test]
fn test_merge_matches_single_sketch_three_splits() {
    assert_merged_top_matches(3);
}

#[test]
fn test_merge_matches_single_sketch_hundred_splits() {
    assert_merged_top_matches(100);
}
