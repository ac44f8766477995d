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

pub const GRIDEX: &str = "gridex";

/// GridFS cuts files into 255 KiB chunks unless told otherwise.
pub const DEFAULT_CHUNK_SIZE: u32 = 255 << 10; // 255 KiB

pub const MIN_CHUNK_SIZE: u32 = 1;

pub const MAX_CHUNK_SIZE: u32 = 16 << 20; // 16 MiB

pub const DEFAULT_PREFIX: &str = "index";

/// Separates the directory prefix from the file name in a stored name.
pub const PATH_SEPARATOR: char = '/';

pub type ChunkIndex = usize;
pub type ChunkOffset = usize;
pub type ChunkSize = u32;
pub type FileOffset = u64;

/// The chunk holding the byte at `offset`.
///
/// The result is not range checked; callers must compare it with the number
/// of chunks they hold before indexing.
pub fn cal_chunk_idx(offset: FileOffset, chunk_size: ChunkSize) -> ChunkIndex {
    (offset / chunk_size as u64) as ChunkIndex
}

pub fn cal_chunk_offset(offset: FileOffset, chunk_size: ChunkSize) -> ChunkOffset {
    (offset % chunk_size as u64) as ChunkOffset
}

/// Number of chunks a file of `length` bytes occupies.
pub fn cal_chunk_count(length: u64, chunk_size: ChunkSize) -> usize {
    length.div_ceil(chunk_size as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_arithmetic() {
        assert_eq!(cal_chunk_idx(0, 4), 0);
        assert_eq!(cal_chunk_idx(3, 4), 0);
        assert_eq!(cal_chunk_idx(4, 4), 1);
        assert_eq!(cal_chunk_offset(9, 4), 1);
        assert_eq!(cal_chunk_offset(8, 4), 0);

        let far = (u32::MAX as u64) * 3 + 7;
        assert_eq!(cal_chunk_idx(far, u32::MAX), 3);
        assert_eq!(cal_chunk_offset(far, u32::MAX), 7);
    }

    #[test]
    fn chunk_count() {
        assert_eq!(cal_chunk_count(0, 4), 0);
        assert_eq!(cal_chunk_count(1, 4), 1);
        assert_eq!(cal_chunk_count(8, 4), 2);
        assert_eq!(cal_chunk_count(10, 4), 3);
        assert_eq!(cal_chunk_count(DEFAULT_CHUNK_SIZE as u64 + 1, DEFAULT_CHUNK_SIZE), 2);
    }
}
