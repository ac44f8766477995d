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

use crate::primitive::FixedWidth;

/// A view over a single chunk. The view spans exactly the logical extent, so
/// positions are plain offsets into it.
pub(crate) struct SingleChunk {
    data: Bytes,
    pos:  usize,
}

impl SingleChunk {
    pub(crate) fn new(data: Bytes) -> Self { Self { data, pos: 0 } }

    pub(crate) fn tell(&self) -> u64 { self.pos as u64 }

    pub(crate) fn seek(&mut self, pos: u64) -> Option<()> {
        let pos = usize::try_from(pos).ok().filter(|p| *p <= self.data.len())?;
        self.pos = pos;
        Some(())
    }

    pub(crate) fn read_byte(&mut self) -> Option<u8> {
        let b = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }

    pub(crate) fn read_bytes(&mut self, dst: &mut [u8]) -> Option<()> {
        let end = self.pos.checked_add(dst.len())?;
        dst.copy_from_slice(self.data.get(self.pos..end)?);
        self.pos = end;
        Some(())
    }

    pub(crate) fn read_fixed<T: FixedWidth>(&mut self) -> Option<T> {
        let end = self.pos.checked_add(T::WIDTH)?;
        let v = T::decode(self.data.get(self.pos..end)?);
        self.pos = end;
        Some(v)
    }

    pub(crate) fn read_byte_at(&self, pos: u64) -> Option<u8> {
        self.data.get(usize::try_from(pos).ok()?).copied()
    }

    pub(crate) fn read_fixed_at<T: FixedWidth>(&self, pos: u64) -> Option<T> {
        let start = usize::try_from(pos).ok()?;
        let end = start.checked_add(T::WIDTH)?;
        Some(T::decode(self.data.get(start..end)?))
    }

    /// The bounds must already be checked against the view length.
    pub(crate) fn slice(&self, offset: u64, length: u64) -> SingleChunk {
        let start = offset as usize;
        SingleChunk::new(self.data.slice(start..start + length as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk() -> SingleChunk { SingleChunk::new(Bytes::from_static(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9])) }

    #[test]
    fn sequential() {
        let mut c = chunk();
        assert_eq!(c.read_byte(), Some(0));
        assert_eq!(c.read_fixed::<i16>(), Some(0x0102));
        let mut dst = [0u8; 3];
        c.read_bytes(&mut dst).unwrap();
        assert_eq!(dst, [3, 4, 5]);
        assert_eq!(c.read_fixed::<i32>(), Some(0x06070809));
        assert_eq!(c.tell(), 10);
        assert_eq!(c.read_byte(), None);
    }

    #[test]
    fn failed_reads_keep_position() {
        let mut c = chunk();
        c.seek(7).unwrap();
        assert_eq!(c.read_fixed::<i32>(), None);
        assert!(c.read_bytes(&mut [0u8; 4]).is_none());
        assert_eq!(c.tell(), 7);
        assert!(c.seek(11).is_none());
        assert_eq!(c.tell(), 7);
        assert!(c.seek(10).is_some());
    }

    #[test]
    fn positional() {
        let c = chunk();
        assert_eq!(c.read_byte_at(9), Some(9));
        assert_eq!(c.read_byte_at(10), None);
        assert_eq!(c.read_fixed_at::<i64>(2), Some(0x0203040506070809));
        assert_eq!(c.read_fixed_at::<i64>(3), None);
        assert_eq!(c.read_fixed_at::<i16>(u64::MAX), None);
        assert_eq!(c.tell(), 0);
    }

    #[test]
    fn slice_is_rebased() {
        let mut s = chunk().slice(4, 3);
        assert_eq!(s.read_byte_at(0), Some(4));
        assert_eq!(s.read_byte_at(3), None);
        assert!(s.seek(3).is_some());
        assert_eq!(s.read_byte(), None);
    }
}
