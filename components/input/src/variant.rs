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

use crate::{multi::MultiChunk, primitive::FixedWidth, single::SingleChunk};

/// The two layouts an input can take. Picked once, when the views are built.
pub(crate) enum Chunks {
    Single(SingleChunk),
    Multi(MultiChunk),
}

impl Chunks {
    /// `views` must start on a chunk boundary, `base` is the offset of the
    /// logical extent inside the first view.
    pub(crate) fn select(
        mut views: Vec<Bytes>,
        chunk_size: ChunkSize,
        base: u64,
        length: u64,
    ) -> Chunks {
        if views.len() == 1 {
            let view = views.swap_remove(0);
            debug_assert!(base as usize + length as usize <= view.len());
            Chunks::Single(SingleChunk::new(view.slice(base as usize..)))
        } else {
            Chunks::Multi(MultiChunk::new(views, chunk_size, base, length))
        }
    }

    pub(crate) fn is_single(&self) -> bool { matches!(self, Chunks::Single(_)) }

    pub(crate) fn tell(&self) -> u64 {
        match self {
            Chunks::Single(s) => s.tell(),
            Chunks::Multi(m) => m.tell(),
        }
    }

    pub(crate) fn seek(&mut self, pos: u64) -> Option<()> {
        match self {
            Chunks::Single(s) => s.seek(pos),
            Chunks::Multi(m) => m.seek(pos),
        }
    }

    pub(crate) fn read_byte(&mut self) -> Option<u8> {
        match self {
            Chunks::Single(s) => s.read_byte(),
            Chunks::Multi(m) => m.read_byte(),
        }
    }

    pub(crate) fn read_bytes(&mut self, dst: &mut [u8]) -> Option<()> {
        match self {
            Chunks::Single(s) => s.read_bytes(dst),
            Chunks::Multi(m) => m.read_bytes(dst),
        }
    }

    pub(crate) fn read_fixed<T: FixedWidth>(&mut self) -> Option<T> {
        match self {
            Chunks::Single(s) => s.read_fixed(),
            Chunks::Multi(m) => m.read_fixed(),
        }
    }

    pub(crate) fn read_byte_at(&self, pos: u64) -> Option<u8> {
        match self {
            Chunks::Single(s) => s.read_byte_at(pos),
            Chunks::Multi(m) => m.read_byte_at(pos),
        }
    }

    pub(crate) fn read_fixed_at<T: FixedWidth>(&self, pos: u64) -> Option<T> {
        match self {
            Chunks::Single(s) => s.read_fixed_at(pos),
            Chunks::Multi(m) => m.read_fixed_at(pos),
        }
    }

    /// Sub-view of `offset..offset + length` in local coordinates. The bounds
    /// must already be checked against the logical length.
    pub(crate) fn slice(&self, chunk_size: ChunkSize, offset: u64, length: u64) -> Chunks {
        match self {
            Chunks::Single(s) => Chunks::Single(s.slice(offset, length)),
            Chunks::Multi(m) => {
                crate::view::build(m.views(), chunk_size, m.base() + offset, length)
            }
        }
    }
}
