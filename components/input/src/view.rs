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
use gridex_common::{cal_chunk_idx, cal_chunk_offset, ChunkSize};

use crate::variant::Chunks;

/// Build the views covering `start..start + length` of `chunks`, whose first
/// element sits on a chunk boundary.
///
/// The views share the chunk bytes. One more view than strictly needed is
/// always allocated: when the range ends exactly on a chunk boundary the last
/// view is empty (and may lie past the last chunk). The last view is cut down
/// to the end of the range.
pub(crate) fn build(chunks: &[Bytes], chunk_size: ChunkSize, start: u64, length: u64) -> Chunks {
    let end = start + length;
    let start_idx = cal_chunk_idx(start, chunk_size);
    let end_idx = cal_chunk_idx(end, chunk_size);

    let mut views: Vec<Bytes> = (start_idx..=end_idx)
        .map(|i| chunks.get(i).cloned().unwrap_or_default())
        .collect();
    if let Some(last) = views.last_mut() {
        last.truncate(cal_chunk_offset(end, chunk_size));
    }

    let base = cal_chunk_offset(start, chunk_size) as u64;
    Chunks::select(views, chunk_size, base, length)
}
