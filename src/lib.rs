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

//! A Filtered Space-Saving sketch for finding the heavy hitters of a stream.
//!
//! [`topk::TopKSketch`] tracks the `n` most frequent keys of an unbounded stream in
//! bounded memory. Each estimate carries an upper bound and an error so that a
//! lower bound on the true frequency is known as well. Sketches built on
//! separate workers merge into one, and encode to a compact binary form.

mod codec;
pub mod error;
pub mod hash;
pub mod topk;
