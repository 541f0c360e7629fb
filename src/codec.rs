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

//! Framed little-endian primitives shared by sketch encoders and decoders.

use std::io;
use std::io::Read;
use std::io::Write;

use byteorder::LittleEndian;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;

use crate::error::Error;
use crate::error::ErrorKind;

pub(crate) struct SketchWriter<W> {
    inner: W,
    written: usize,
}

impl<W: Write> SketchWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Number of bytes written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn write_u32_le(&mut self, n: u32, tag: &'static str) -> Result<(), Error> {
        self.inner
            .write_u32::<LittleEndian>(n)
            .map_err(|err| Error::io(tag, err))?;
        self.written += 4;
        Ok(())
    }

    pub fn write_u64_le(&mut self, n: u64, tag: &'static str) -> Result<(), Error> {
        self.inner
            .write_u64::<LittleEndian>(n)
            .map_err(|err| Error::io(tag, err))?;
        self.written += 8;
        Ok(())
    }

    /// Writes a `u32` length header.
    pub fn write_len(&mut self, len: usize, tag: &'static str) -> Result<(), Error> {
        let len = u32::try_from(len)
            .map_err(|_| Error::new(ErrorKind::Io, format!("{tag} too long: {len}")))?;
        self.write_u32_le(len, tag)
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn write_str(&mut self, s: &str, tag: &'static str) -> Result<(), Error> {
        self.write_len(s.len(), tag)?;
        self.inner
            .write_all(s.as_bytes())
            .map_err(|err| Error::io(tag, err))?;
        self.written += s.len();
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.inner.flush().map_err(|err| Error::io("flush", err))
    }
}

pub(crate) struct SketchReader<R> {
    inner: R,
}

impl<R: Read> SketchReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn read_u32_le(&mut self, tag: &'static str) -> Result<u32, Error> {
        self.inner
            .read_u32::<LittleEndian>()
            .map_err(|err| Error::io(tag, err))
    }

    pub fn read_u64_le(&mut self, tag: &'static str) -> Result<u64, Error> {
        self.inner
            .read_u64::<LittleEndian>()
            .map_err(|err| Error::io(tag, err))
    }

    /// Reads a `u32` length header.
    pub fn read_len(&mut self, tag: &'static str) -> Result<usize, Error> {
        self.read_u32_le(tag).map(|len| len as usize)
    }

    /// Reads a length-prefixed UTF-8 string.
    ///
    /// The payload is pulled through `take` so that a corrupt length header
    /// fails on the short read instead of allocating up front.
    pub fn read_string(&mut self, tag: &'static str) -> Result<String, Error> {
        let len = self.read_len(tag)?;
        let mut buf = Vec::new();
        (&mut self.inner)
            .take(len as u64)
            .read_to_end(&mut buf)
            .map_err(|err| Error::io(tag, err))?;
        if buf.len() != len {
            return Err(Error::insufficient_data(tag)
                .set_source(io::Error::from(io::ErrorKind::UnexpectedEof)));
        }
        String::from_utf8(buf).map_err(|_| Error::deserial(format!("invalid utf-8 in {tag}")))
    }
}
