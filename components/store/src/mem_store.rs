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
use dashmap::DashMap;
use gridex_common::{cal_chunk_count, ChunkSize};
use snafu::{ensure, OptionExt};
use tracing::debug;

use crate::{
    err::{FileExistsSnafu, FileNotFoundSnafu, Result},
    provider::{ChunkStore, ChunkedFile},
};

#[derive(Debug)]
struct StoredFile {
    length:     u64,
    chunk_size: ChunkSize,
    /// `(sequence number, data)`, in no particular order.
    chunks:     Vec<(u32, Bytes)>,
}

/// Keeps every file in memory, cut into chunks the way GridFS stores them.
#[derive(Debug)]
pub struct MemChunkStore {
    chunk_size: ChunkSize,
    files:      DashMap<String, StoredFile>,
}

impl MemChunkStore {
    pub fn new(chunk_size: ChunkSize) -> Self {
        assert!(chunk_size > 0, "chunk size must be positive");
        Self {
            chunk_size,
            files: DashMap::new(),
        }
    }

    pub fn chunk_size(&self) -> ChunkSize { self.chunk_size }

    /// Store `data` under `name`, replacing any previous file.
    pub fn put(&self, name: &str, data: impl Into<Bytes>) {
        let data = data.into();
        let cs = self.chunk_size as usize;
        let count = cal_chunk_count(data.len() as u64, self.chunk_size);
        // Chunks are inserted last-first so readers can't rely on storage order.
        let chunks = (0..count)
            .rev()
            .map(|n| {
                let start = n * cs;
                let end = usize::min(start + cs, data.len());
                (n as u32, data.slice(start..end))
            })
            .collect();
        debug!(name, length = data.len(), chunks = count, "put file");
        self.files.insert(
            name.to_string(),
            StoredFile {
                length: data.len() as u64,
                chunk_size: self.chunk_size,
                chunks,
            },
        );
    }

    pub fn contains(&self, name: &str) -> bool { self.files.contains_key(name) }
}

impl ChunkStore for MemChunkStore {
    fn open_chunks(&self, name: &str) -> Result<ChunkedFile> {
        let file = self.files.get(name).context(FileNotFoundSnafu { name })?;
        let mut numbered = file.chunks.clone();
        numbered.sort_unstable_by_key(|(n, _)| *n);
        Ok(ChunkedFile {
            chunks:     numbered.into_iter().map(|(_, data)| data).collect(),
            length:     file.length,
            chunk_size: file.chunk_size,
        })
    }

    fn file_length(&self, name: &str) -> Result<u64> {
        let file = self.files.get(name).context(FileNotFoundSnafu { name })?;
        Ok(file.length)
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .files
            .iter()
            .filter(|e| e.key().starts_with(prefix))
            .map(|e| e.key().clone())
            .collect();
        names.sort();
        Ok(names)
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.files.remove(name).context(FileNotFoundSnafu { name })?;
        debug!(name, "deleted file");
        Ok(())
    }

    fn rename(&self, from: &str, to: &str) -> Result<()> {
        if from == to {
            ensure!(self.files.contains_key(from), FileNotFoundSnafu { name: from });
            return Ok(());
        }
        ensure!(!self.files.contains_key(to), FileExistsSnafu { name: to });
        let (_, file) = self.files.remove(from).context(FileNotFoundSnafu { name: from })?;
        self.files.insert(to.to_string(), file);
        debug!(from, to, "renamed file");
        Ok(())
    }
}
