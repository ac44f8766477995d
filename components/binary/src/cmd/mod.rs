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

pub mod dump;
pub mod stat;

use std::{path::PathBuf, sync::Arc};

use clap::Args;
use gridex_common::{DEFAULT_CHUNK_SIZE, DEFAULT_PREFIX, MAX_CHUNK_SIZE};
use gridex_input::ChunkedInput;
use gridex_store::{IndexDirectory, MemChunkStore, MemLockService, StoreConfig};
use snafu::{OptionExt, ResultExt, Whatever};
use tracing::debug;

const SOURCE_OPTIONS_HEADER: &str = "Source options";

/// Where the inspected file comes from and how it is chunked.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    #[arg(help = "Local file to load", value_name = "FILE")]
    pub file: PathBuf,

    #[arg(
        long,
        help = "Size in bytes of the chunks the file is cut into",
        help_heading = SOURCE_OPTIONS_HEADER,
        default_value_t = DEFAULT_CHUNK_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=MAX_CHUNK_SIZE as i64),
    )]
    pub chunk_size: u32,

    #[arg(
        long,
        help = "Directory prefix the file is stored under",
        help_heading = SOURCE_OPTIONS_HEADER,
        default_value = DEFAULT_PREFIX,
    )]
    pub prefix: String,
}

impl SourceArgs {
    /// Load the file into an in-memory store and open it through a directory.
    pub fn open(&self) -> Result<ChunkedInput, Whatever> {
        let config = StoreConfig {
            prefix:     self.prefix.clone(),
            chunk_size: self.chunk_size,
        };
        let name = self
            .file
            .file_name()
            .and_then(|n| n.to_str())
            .whatever_context(format!("{} has no usable file name", self.file.display()))?;
        let data = std::fs::read(&self.file)
            .with_whatever_context(|_| format!("failed to read {}", self.file.display()))?;

        let store = Arc::new(MemChunkStore::new(config.chunk_size));
        let locks = Arc::new(MemLockService::new());
        let dir = IndexDirectory::new(&config, store.clone(), locks)
            .whatever_context("invalid source options")?;
        store.put(&format!("{}/{name}", dir.prefix()), data);
        debug!("loaded {} into {dir}", self.file.display());

        dir.open_input(name)
            .with_whatever_context(|_| format!("failed to open {name}"))
    }
}
