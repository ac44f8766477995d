// Copyright 2024 gridex
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{
    fmt::{Debug, Display, Formatter},
    io::{Read, Seek, SeekFrom},
};

use bytes::Bytes;
use gridex_common::{cal_chunk_idx, cal_chunk_offset, ChunkSize};
use snafu::{ensure, OptionExt};
use tracing::{debug, trace};

use crate::{
    err::{AlreadyClosedSnafu, EndOfInputSnafu, InvalidArgumentSnafu, Result},
    primitive::FixedWidth,
    variant::Chunks,
    view,
};

/// A seekable, sliceable input over a file stored as an ordered array of
/// fixed-size chunks.
///
/// All reads are served from the chunks handed over at construction. Slices
/// and clones share the chunk bytes but own their cursor, so they can be
/// moved to other threads and read independently. Closing an input does not
/// affect the slices and clones taken from it.
pub struct ChunkedInput {
    description: String,
    length:      u64,
    chunk_size:  ChunkSize,
    // None once closed.
    chunks:      Option<Chunks>,
}

impl ChunkedInput {
    /// Create an input over `length` bytes held by `chunks`.
    ///
    /// Every chunk inside the logical extent except the last must hold exactly
    /// `chunk_size` bytes, and the chunks together must cover `length`. Bytes
    /// past `length` are never exposed.
    pub fn new(
        description: impl Into<String>,
        chunks: Vec<Bytes>,
        length: u64,
        chunk_size: ChunkSize,
    ) -> Result<Self> {
        let description = description.into();
        ensure!(
            chunk_size > 0,
            InvalidArgumentSnafu {
                reason:   "chunk size must be positive",
                resource: &description,
            }
        );

        let full = cal_chunk_idx(length, chunk_size);
        let tail = cal_chunk_offset(length, chunk_size);
        for (idx, chunk) in chunks.iter().enumerate().take(full) {
            ensure!(
                chunk.len() == chunk_size as usize,
                InvalidArgumentSnafu {
                    reason:   format!(
                        "chunk {idx} holds {} bytes, expected {chunk_size}",
                        chunk.len()
                    ),
                    resource: &description,
                }
            );
        }
        let covered = chunks.len() > full && chunks[full].len() >= tail;
        ensure!(
            covered || (chunks.len() == full && tail == 0),
            InvalidArgumentSnafu {
                reason:   format!(
                    "{} chunks of {chunk_size} bytes cannot hold {length} bytes",
                    chunks.len()
                ),
                resource: &description,
            }
        );

        let chunks = view::build(&chunks, chunk_size, 0, length);
        debug!(
            "open {description}: length {length}, chunk size {chunk_size}, single chunk: {}",
            chunks.is_single()
        );
        Ok(Self {
            description,
            length,
            chunk_size,
            chunks: Some(chunks),
        })
    }

    pub fn description(&self) -> &str { &self.description }

    /// The logical length. Still answers after close.
    pub fn len(&self) -> u64 { self.length }

    pub fn is_empty(&self) -> bool { self.length == 0 }

    pub fn chunk_size(&self) -> ChunkSize { self.chunk_size }

    pub fn is_closed(&self) -> bool { self.chunks.is_none() }

    fn open_chunks(&self) -> Result<&Chunks> {
        self.chunks.as_ref().context(AlreadyClosedSnafu {
            resource: &self.description,
        })
    }

    /// Current cursor position.
    pub fn tell(&self) -> Result<u64> { Ok(self.open_chunks()?.tell()) }

    /// Move the cursor to `pos`, which may equal the length. On failure the
    /// cursor stays where it was.
    pub fn seek(&mut self, pos: u64) -> Result<()> {
        let chunks = self.chunks.as_mut().context(AlreadyClosedSnafu {
            resource: &self.description,
        })?;
        chunks.seek(pos).context(EndOfInputSnafu {
            action:   "seek",
            pos,
            length:   self.length,
            resource: &self.description,
        })
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        let chunks = self.chunks.as_mut().context(AlreadyClosedSnafu {
            resource: &self.description,
        })?;
        chunks.read_byte().with_context(|| EndOfInputSnafu {
            action:   "read",
            pos:      chunks.tell(),
            length:   self.length,
            resource: &self.description,
        })
    }

    /// Fill `dst` from the cursor. Either all of `dst` is read or the cursor
    /// does not move.
    pub fn read_bytes(&mut self, dst: &mut [u8]) -> Result<()> {
        let chunks = self.chunks.as_mut().context(AlreadyClosedSnafu {
            resource: &self.description,
        })?;
        chunks.read_bytes(dst).with_context(|| EndOfInputSnafu {
            action:   "read",
            pos:      chunks.tell() + dst.len() as u64,
            length:   self.length,
            resource: &self.description,
        })
    }

    fn read_fixed<T: FixedWidth>(&mut self) -> Result<T> {
        let chunks = self.chunks.as_mut().context(AlreadyClosedSnafu {
            resource: &self.description,
        })?;
        chunks.read_fixed::<T>().with_context(|| EndOfInputSnafu {
            action:   "read",
            pos:      chunks.tell() + T::WIDTH as u64,
            length:   self.length,
            resource: &self.description,
        })
    }

    /// Big-endian `i16` at the cursor.
    pub fn read_short(&mut self) -> Result<i16> { self.read_fixed() }

    /// Big-endian `i32` at the cursor.
    pub fn read_int(&mut self) -> Result<i32> { self.read_fixed() }

    /// Big-endian `i64` at the cursor.
    pub fn read_long(&mut self) -> Result<i64> { self.read_fixed() }

    /// The byte at `pos`. Does not move the cursor.
    pub fn read_byte_at(&self, pos: u64) -> Result<u8> {
        self.open_chunks()?
            .read_byte_at(pos)
            .context(EndOfInputSnafu {
                action:   "read",
                pos,
                length:   self.length,
                resource: &self.description,
            })
    }

    fn read_fixed_at<T: FixedWidth>(&self, pos: u64) -> Result<T> {
        self.open_chunks()?
            .read_fixed_at::<T>(pos)
            .context(EndOfInputSnafu {
                action:   "read",
                pos:      pos.saturating_add(T::WIDTH as u64),
                length:   self.length,
                resource: &self.description,
            })
    }

    pub fn read_short_at(&self, pos: u64) -> Result<i16> { self.read_fixed_at(pos) }

    pub fn read_int_at(&self, pos: u64) -> Result<i32> { self.read_fixed_at(pos) }

    pub fn read_long_at(&self, pos: u64) -> Result<i64> { self.read_fixed_at(pos) }

    /// A new input over `offset..offset + length`, with its cursor at 0.
    pub fn slice(&self, name: &str, offset: u64, length: u64) -> Result<ChunkedInput> {
        let chunks = self.open_chunks()?;
        let in_bounds = offset
            .checked_add(length)
            .is_some_and(|end| end <= self.length);
        ensure!(
            in_bounds,
            InvalidArgumentSnafu {
                reason:   format!(
                    "slice {name} out of bounds: offset={offset}, length={length}, file length={}",
                    self.length
                ),
                resource: &self.description,
            }
        );

        let description = format!("{} [slice={name}]", self.description);
        trace!("slice {description}: offset {offset}, length {length}");
        Ok(ChunkedInput {
            description,
            length,
            chunk_size: self.chunk_size,
            chunks: Some(chunks.slice(self.chunk_size, offset, length)),
        })
    }

    /// A full-range view positioned where this input's cursor is.
    pub fn try_clone(&self) -> Result<ChunkedInput> {
        let chunks = self.open_chunks()?;
        let pos = chunks.tell();
        let mut clone = ChunkedInput {
            description: self.description.clone(),
            length:      self.length,
            chunk_size:  self.chunk_size,
            chunks:      Some(chunks.slice(self.chunk_size, 0, self.length)),
        };
        if let Err(e) = clone.seek(pos) {
            panic!("clone of {} cannot seek to {pos}: {e}", self.description);
        }
        Ok(clone)
    }

    /// Drop the chunks. Only the first call has an effect; afterwards every
    /// operation but [`len`](Self::len) fails with `AlreadyClosed`.
    pub fn close(&mut self) {
        if self.chunks.take().is_some() {
            debug!("close {}", self.description);
        }
    }

    #[cfg(test)]
    pub(crate) fn is_single_chunk(&self) -> bool {
        self.chunks.as_ref().is_some_and(|c| c.is_single())
    }
}

impl Display for ChunkedInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str(&self.description) }
}

impl Debug for ChunkedInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkedInput")
            .field("description", &self.description)
            .field("length", &self.length)
            .field("chunk_size", &self.chunk_size)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Read for ChunkedInput {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let remaining = self.length - self.tell()?;
        let n = usize::try_from(remaining).map_or(buf.len(), |r| r.min(buf.len()));
        self.read_bytes(&mut buf[..n])?;
        Ok(n)
    }
}

impl Seek for ChunkedInput {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        let (from, delta) = match pos {
            SeekFrom::Start(n) => (n, 0),
            SeekFrom::End(n) => (self.length, n),
            SeekFrom::Current(n) => (self.tell()?, n),
        };
        self.open_chunks()?;
        let target = from.checked_add_signed(delta).context(InvalidArgumentSnafu {
            reason:   format!("seek to a negative or overflowing position: {from} {delta:+}"),
            resource: &self.description,
        })?;
        ChunkedInput::seek(self, target)?;
        Ok(target)
    }
}
