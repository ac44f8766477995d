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
use gridex_common::ChunkSize;

use crate::{
    cursor::{copy_across, Cursor},
    primitive::{FixedWidth, MAX_WIDTH},
};

/// Views over several chunks.
///
/// The first view starts on a chunk boundary; `base` is where the logical
/// extent begins inside it. Every local position is translated by `base`
/// before it is mapped onto a view, which lets a slice of a slice address the
/// shared views directly.
pub(crate) struct MultiChunk {
    views:      Vec<Bytes>,
    chunk_size: ChunkSize,
    base:       u64,
    // base + logical length
    end:        u64,
    cursor:     Cursor,
}

impl MultiChunk {
    pub(crate) fn new(views: Vec<Bytes>, chunk_size: ChunkSize, base: u64, length: u64) -> Self {
        Self {
            views,
            chunk_size,
            base,
            end: base + length,
            cursor: Cursor::locate(base, chunk_size),
        }
    }

    pub(crate) fn views(&self) -> &[Bytes] { &self.views }

    pub(crate) fn base(&self) -> u64 { self.base }

    pub(crate) fn tell(&self) -> u64 { self.cursor.absolute(self.chunk_size) - self.base }

    fn remaining(&self) -> u64 { self.end - self.cursor.absolute(self.chunk_size) }

    pub(crate) fn seek(&mut self, pos: u64) -> Option<()> {
        let target = pos.checked_add(self.base).filter(|t| *t <= self.end)?;
        let at = Cursor::locate(target, self.chunk_size);
        if at.chunk == self.cursor.chunk {
            self.cursor.offset = at.offset;
            return Some(());
        }
        let view = self.views.get(at.chunk)?;
        if at.offset > view.len() {
            return None;
        }
        self.cursor = at;
        Some(())
    }

    pub(crate) fn read_byte(&mut self) -> Option<u8> {
        let Cursor { chunk, offset } = self.cursor;
        if let Some(&b) = self.views.get(chunk).and_then(|v| v.get(offset)) {
            self.cursor.offset += 1;
            return Some(b);
        }
        let mut next = chunk + 1;
        loop {
            if let Some(&b) = self.views.get(next)?.first() {
                self.cursor = Cursor::new(next, 1);
                return Some(b);
            }
            next += 1;
        }
    }

    pub(crate) fn read_bytes(&mut self, dst: &mut [u8]) -> Option<()> {
        if dst.len() as u64 > self.remaining() {
            return None;
        }
        self.cursor = copy_across(&self.views, self.cursor, dst)?;
        Some(())
    }

    pub(crate) fn read_fixed<T: FixedWidth>(&mut self) -> Option<T> {
        let Cursor { chunk, offset } = self.cursor;
        if let Some(raw) = self
            .views
            .get(chunk)
            .and_then(|v| v.get(offset..offset + T::WIDTH))
        {
            self.cursor.offset += T::WIDTH;
            return Some(T::decode(raw));
        }
        let mut scratch = [0u8; MAX_WIDTH];
        let buf = &mut scratch[..T::WIDTH];
        self.read_bytes(buf)?;
        Some(T::decode(buf))
    }

    pub(crate) fn read_byte_at(&self, pos: u64) -> Option<u8> {
        let target = pos.checked_add(self.base).filter(|t| *t < self.end)?;
        let at = Cursor::locate(target, self.chunk_size);
        self.views.get(at.chunk)?.get(at.offset).copied()
    }

    pub(crate) fn read_fixed_at<T: FixedWidth>(&self, pos: u64) -> Option<T> {
        let target = pos.checked_add(self.base)?;
        let at = Cursor::locate(target, self.chunk_size);
        if let Some(raw) = self
            .views
            .get(at.chunk)
            .and_then(|v| v.get(at.offset..at.offset + T::WIDTH))
        {
            return Some(T::decode(raw));
        }
        // Either the value straddles a chunk boundary or it runs past the end.
        if target.checked_add(T::WIDTH as u64)? > self.end {
            return None;
        }
        let mut scratch = [0u8; MAX_WIDTH];
        let buf = &mut scratch[..T::WIDTH];
        copy_across(&self.views, at, buf)?;
        Some(T::decode(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // length=10, chunk_size=4: [0,1,2,3] [4,5,6,7] [8,9]
    fn multi() -> MultiChunk {
        let views = vec![
            Bytes::from_static(&[0, 1, 2, 3]),
            Bytes::from_static(&[4, 5, 6, 7]),
            Bytes::from_static(&[8, 9]),
        ];
        MultiChunk::new(views, 4, 0, 10)
    }

    #[test]
    fn read_byte_crosses_chunks() {
        let mut m = multi();
        let bytes: Vec<u8> = std::iter::from_fn(|| m.read_byte()).collect();
        assert_eq!(bytes, (0..10).collect::<Vec<u8>>());
        assert_eq!(m.tell(), 10);
        assert_eq!(m.read_byte(), None);
        assert_eq!(m.tell(), 10);
    }

    #[test]
    fn straddling_int() {
        let mut m = multi();
        assert_eq!(m.read_fixed_at::<i32>(2), Some(0x02030405));
        assert_eq!(m.tell(), 0);
        m.seek(2).unwrap();
        assert_eq!(m.read_fixed::<i32>(), Some(0x02030405));
        assert_eq!(m.tell(), 6);
    }

    #[test]
    fn long_spanning_three_chunks() {
        let mut m = multi();
        assert_eq!(m.read_fixed_at::<i64>(1), Some(0x0102030405060708));
        assert_eq!(m.read_fixed_at::<i64>(3), None);
        m.seek(3).unwrap();
        assert_eq!(m.read_fixed::<i64>(), None);
        assert_eq!(m.tell(), 3);
    }

    #[test]
    fn seek_bounds() {
        let mut m = multi();
        m.seek(6).unwrap();
        assert!(m.seek(11).is_none());
        assert_eq!(m.tell(), 6);
        m.seek(10).unwrap();
        assert_eq!(m.tell(), 10);
        m.seek(8).unwrap();
        assert_eq!(m.read_byte(), Some(8));
    }

    #[test]
    fn base_offset() {
        // views of chunk 0 and 1, extent starts at 3 and spans 4 bytes
        let views = vec![Bytes::from_static(&[0, 1, 2, 3]), Bytes::from_static(&[4, 5, 6])];
        let mut m = MultiChunk::new(views, 4, 3, 4);
        assert_eq!(m.tell(), 0);
        assert_eq!(m.read_byte(), Some(3));
        assert_eq!(m.read_byte_at(3), Some(6));
        assert_eq!(m.read_byte_at(4), None);
        assert_eq!(m.read_fixed_at::<i16>(0), Some(0x0304));
        assert_eq!(m.read_fixed_at::<i32>(1), None);
        m.seek(4).unwrap();
        assert_eq!(m.tell(), 4);
        assert!(m.seek(5).is_none());
    }

    #[test]
    fn read_bytes_is_all_or_nothing() {
        let mut m = multi();
        m.seek(7).unwrap();
        let mut dst = [0u8; 4];
        assert!(m.read_bytes(&mut dst).is_none());
        assert_eq!(m.tell(), 7);
        let mut dst = [0u8; 3];
        m.read_bytes(&mut dst).unwrap();
        assert_eq!(dst, [7, 8, 9]);
    }
}
