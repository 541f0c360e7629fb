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

//! Binary encoding of a [`TopKSketch`].
//!
//! All integers are little endian. There is no version tag; only bytes from a
//! compatible encoder may be decoded.
//!
//! | Field | Encoding |
//! |-------|----------|
//! | n | u64 |
//! | alphas | u32 length (= n * 6), then one u64 per bucket in index order |
//! | partitions | 6 × partition, in partition order |
//!
//! Each partition is a u32-prefixed slot map of `(key, u32 slot)` entries
//! followed by a u32-prefixed list of `(key, u64 count, u64 error)` in heap
//! array order. Keys are a u32 byte length followed by UTF-8 bytes. Map entries
//! are written in slot order.

use std::collections::HashMap;
use std::io::Read;
use std::io::Write;

use tracing::debug;

use super::NUM_PARTITIONS;
use super::element::Element;
use super::partition::BoundedPartition;
use super::sketch::TopKSketch;
use super::sketch::partition_capacity;
use crate::codec::SketchReader;
use crate::codec::SketchWriter;
use crate::error::Error;
use crate::hash::KeyHasher;
use crate::hash::MurmurHash3;

const N_BYTES: usize = 8;
const LEN_BYTES: usize = 4;
const COUNT_BYTES: usize = 8;

impl TopKSketch {
    /// Decodes a sketch hashing with the default [`MurmurHash3`].
    pub fn decode<R: Read>(reader: R) -> Result<Self, Error> {
        Self::decode_with_hasher(reader, MurmurHash3::default())
    }

    /// Deserializes a sketch hashing with the default [`MurmurHash3`].
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        Self::decode(bytes)
    }
}

impl<H: KeyHasher> TopKSketch<H> {
    /// Returns the number of bytes [`encode`](Self::encode) writes.
    pub fn serialized_size(&self) -> usize {
        let mut size = N_BYTES + LEN_BYTES + self.alphas.len() * COUNT_BYTES;
        for part in &self.partitions {
            size += 2 * LEN_BYTES;
            for element in part.elements() {
                let key = LEN_BYTES + element.key().len();
                size += (key + LEN_BYTES) + (key + 2 * COUNT_BYTES);
            }
        }
        size
    }

    /// Encodes the full sketch state to `writer`.
    pub fn encode<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut writer = SketchWriter::new(writer);
        writer.write_u64_le(self.n as u64, "n")?;
        writer.write_len(self.alphas.len(), "alphas length")?;
        for alpha in &self.alphas {
            writer.write_u64_le(*alpha, "alphas")?;
        }
        for part in &self.partitions {
            encode_partition(&mut writer, part)?;
        }
        writer.flush()?;
        debug!(n = self.n, bytes = writer.written(), "encoded top-k sketch");
        Ok(())
    }

    /// Serializes the sketch into a byte vector.
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::with_capacity(self.serialized_size());
        self.encode(&mut bytes)?;
        Ok(bytes)
    }

    /// Decodes a sketch from `reader`, routing keys with `hasher`.
    ///
    /// `hasher` must be equivalent to the one the encoded sketch was built with.
    pub fn decode_with_hasher<R: Read>(reader: R, hasher: H) -> Result<Self, Error> {
        let mut reader = SketchReader::new(reader);

        let n = reader.read_u64_le("n")?;
        if n == 0 {
            return Err(Error::deserial("n must be positive"));
        }
        let n = usize::try_from(n).map_err(|_| Error::deserial(format!("n out of range: {n}")))?;
        let num_buckets = n
            .checked_mul(NUM_PARTITIONS)
            .ok_or_else(|| Error::deserial(format!("n out of range: {n}")))?;

        let num_alphas = reader.read_len("alphas length")?;
        if num_alphas != num_buckets {
            return Err(Error::deserial(format!(
                "expected {num_buckets} alphas for n {n}, got {num_alphas}"
            )));
        }
        // grown as read; the header alone is not trusted for allocation
        let mut alphas = Vec::new();
        for _ in 0..num_alphas {
            alphas.push(reader.read_u64_le("alphas")?);
        }

        let capacity = partition_capacity(n);
        let mut partitions = Vec::with_capacity(NUM_PARTITIONS);
        for _ in 0..NUM_PARTITIONS {
            partitions.push(decode_partition(&mut reader, capacity)?);
        }
        let partitions: [BoundedPartition; NUM_PARTITIONS] = partitions
            .try_into()
            .map_err(|_| Error::deserial("partition count mismatch"))?;

        let sketch = Self::from_parts(n, partitions, alphas, hasher);
        debug!(n, tracked = sketch.len(), "decoded top-k sketch");
        Ok(sketch)
    }

    /// Deserializes a sketch from bytes, routing keys with `hasher`.
    pub fn deserialize_with_hasher(bytes: &[u8], hasher: H) -> Result<Self, Error> {
        Self::decode_with_hasher(bytes, hasher)
    }
}

fn encode_partition<W: Write>(
    writer: &mut SketchWriter<W>,
    part: &BoundedPartition,
) -> Result<(), Error> {
    let elements = part.elements();
    writer.write_len(elements.len(), "slot map length")?;
    for (slot, element) in elements.iter().enumerate() {
        writer.write_str(element.key(), "slot map key")?;
        writer.write_u32_le(slot as u32, "slot map slot")?;
    }
    writer.write_len(elements.len(), "elements length")?;
    for element in elements {
        writer.write_str(element.key(), "element key")?;
        writer.write_u64_le(element.count(), "element count")?;
        writer.write_u64_le(element.error(), "element error")?;
    }
    Ok(())
}

fn decode_partition<R: Read>(
    reader: &mut SketchReader<R>,
    capacity: usize,
) -> Result<BoundedPartition, Error> {
    let num_slots = reader.read_len("slot map length")?;
    if num_slots > capacity {
        return Err(Error::deserial(format!(
            "slot map holds {num_slots} keys, partition capacity is {capacity}"
        )));
    }
    let mut slots = HashMap::with_capacity(num_slots);
    for _ in 0..num_slots {
        let key = reader.read_string("slot map key")?;
        let slot = reader.read_u32_le("slot map slot")? as usize;
        if slots.insert(key, slot).is_some() {
            return Err(Error::deserial("duplicate key in slot map"));
        }
    }

    let num_elements = reader.read_len("elements length")?;
    if num_elements != num_slots {
        return Err(Error::deserial(format!(
            "partition has {num_elements} elements but {num_slots} slot map entries"
        )));
    }
    let mut elements = Vec::with_capacity(num_elements);
    for _ in 0..num_elements {
        let key = reader.read_string("element key")?;
        let count = reader.read_u64_le("element count")?;
        let error = reader.read_u64_le("element error")?;
        if error > count {
            return Err(Error::deserial(format!(
                "element error {error} exceeds count {count}"
            )));
        }
        elements.push(Element::new(key, count, error));
    }

    for (key, &slot) in &slots {
        if elements.get(slot).is_none_or(|e| e.key() != key) {
            return Err(Error::deserial(format!(
                "slot map entry {key:?} -> {slot} does not match elements"
            )));
        }
    }
    for slot in 1..elements.len() {
        if elements[slot].evicts_before(&elements[(slot - 1) / 2]) {
            return Err(Error::deserial(format!("heap order violated at slot {slot}")));
        }
    }

    Ok(BoundedPartition::from_parts(capacity, slots, elements))
}
