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

use bytes::Bytes;
use gridex_common::{cal_chunk_idx, cal_chunk_offset, ChunkIndex, ChunkOffset, ChunkSize};

/// The read position inside an array of chunk views.
///
/// The offset may equal the length of its view: the next read then has to
/// move on to the following view first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub(crate) chunk:  ChunkIndex,
    pub(crate) offset: ChunkOffset,
}

impl Cursor {
    pub(crate) fn new(chunk: ChunkIndex, offset: ChunkOffset) -> Self { Self { chunk, offset } }

    pub(crate) fn locate(pos: u64, chunk_size: ChunkSize) -> Self {
        Self::new(cal_chunk_idx(pos, chunk_size), cal_chunk_offset(pos, chunk_size))
    }

    /// Position in the coordinate space of the view array.
    pub(crate) fn absolute(&self, chunk_size: ChunkSize) -> u64 {
        self.chunk as u64 * chunk_size as u64 + self.offset as u64
    }
}

/// Fill `dst` starting at `from`, crossing into the following views as often
/// as needed. Empty views are stepped over.
///
/// Returns the cursor just past the last copied byte, or `None` when the
/// views run out first. `dst` may be partially written in that case.
pub(crate) fn copy_across(views: &[Bytes], from: Cursor, dst: &mut [u8]) -> Option<Cursor> {
    let mut at = from;
    let mut dst = dst;
    loop {
        let avail = views.get(at.chunk)?.get(at.offset..)?;
        let n = avail.len().min(dst.len());
        let (head, tail) = std::mem::take(&mut dst).split_at_mut(n);
        head.copy_from_slice(&avail[..n]);
        at.offset += n;
        dst = tail;
        if dst.is_empty() {
            return Some(at);
        }
        at = Cursor::new(at.chunk + 1, 0);
    }
}
