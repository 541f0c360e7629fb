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

//! Top-k heavy hitters over a stream, using bounded memory.
//!
//! This module implements the Filtered Space-Saving variant of the Space-Saving
//! algorithm. Keys are sharded by hash into a fixed number of partitions, each a
//! bounded min-heap of candidate keys. A table of per-bucket error floors bounds
//! the count of every key that is not currently tracked, and lets low-frequency
//! noise raise a floor instead of evicting a tracked key.
//!
//! Every reported [`Element`] satisfies `count - error <= true count <= count`.
//!
//! For background, see:
//! - Space-Saving: <https://icmi.cs.ucsb.edu/research/tech_reports/reports/2005-23.pdf>
//! - Filtered Space-Saving: <http://www.l2f.inesc-id.pt/~fmmb/wiki/uploads/Work/misnis.ref0a.pdf>
//!
//! # Usage
//!
//! ```rust
//! # use topk_sketch::topk::Element;
//! # use topk_sketch::topk::TopKSketch;
//! let mut sketch = TopKSketch::new(2);
//! assert_eq!(sketch.insert("a", 5), Element::new("a", 5, 0));
//! assert_eq!(sketch.insert("b", 3), Element::new("b", 3, 0));
//! assert_eq!(sketch.estimate("a"), Element::new("a", 5, 0));
//! assert_eq!(
//!     sketch.keys(),
//!     vec![Element::new("a", 5, 0), Element::new("b", 3, 0)]
//! );
//! ```
//!
//! # Merging
//!
//! Sketches built with the same `n` over disjoint parts of a stream can be
//! merged into an approximation of the whole stream.
//!
//! ```rust
//! # use topk_sketch::topk::TopKSketch;
//! let mut left = TopKSketch::new(10);
//! let mut right = TopKSketch::new(10);
//! left.insert("apple", 3);
//! right.insert("apple", 4);
//! left.merge(&right).unwrap();
//! assert_eq!(left.estimate("apple").count(), 7);
//!
//! assert!(left.merge(&TopKSketch::new(20)).is_err());
//! ```
//!
//! # Serialization
//!
//! ```rust
//! # use topk_sketch::topk::TopKSketch;
//! let mut sketch = TopKSketch::new(10);
//! sketch.insert("apple", 2);
//!
//! let bytes = sketch.serialize().unwrap();
//! let decoded = TopKSketch::deserialize(&bytes).unwrap();
//! assert_eq!(decoded, sketch);
//! ```

mod assign;
mod element;
mod partition;
mod serialization;
mod sketch;

pub use self::element::Element;
pub use self::sketch::TopKSketch;

/// Number of partitions a sketch shards its keys into.
pub const NUM_PARTITIONS: usize = 6;
