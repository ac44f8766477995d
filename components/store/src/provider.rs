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

use std::sync::Arc;

use bytes::Bytes;
use gridex_common::ChunkSize;

use crate::err::Result;

/// A stored file as handed out by a [`ChunkStore`].
#[derive(Debug, Clone)]
pub struct ChunkedFile {
    /// Chunks in ascending sequence order.
    pub chunks:     Vec<Bytes>,
    pub length:     u64,
    pub chunk_size: ChunkSize,
}

pub type ChunkStoreRef = Arc<dyn ChunkStore>;

/// Where index files live. Names are full names, the directory prefix
/// included.
pub trait ChunkStore: Send + Sync + 'static {
    /// Fetch every chunk of `name`.
    fn open_chunks(&self, name: &str) -> Result<ChunkedFile>;

    fn file_length(&self, name: &str) -> Result<u64>;

    /// Full names starting with `prefix`, sorted.
    fn list(&self, prefix: &str) -> Result<Vec<String>>;

    fn delete(&self, name: &str) -> Result<()>;

    /// Fails with `FileExists` if `to` is already stored.
    fn rename(&self, from: &str, to: &str) -> Result<()>;
}
