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
    fmt::{Display, Formatter},
    sync::atomic::{AtomicBool, Ordering},
};

use gridex_common::PATH_SEPARATOR;
use gridex_input::ChunkedInput;
use snafu::{ensure, ResultExt};
use tracing::{debug, info};

use crate::{
    config::StoreConfig,
    err::{DirectoryClosedSnafu, OpenInputSnafu, Result},
    lock::{LockHandle, LockServiceRef},
    provider::ChunkStoreRef,
};

/// A flat namespace of index files stored under one prefix.
pub struct IndexDirectory {
    prefix: String,
    store:  ChunkStoreRef,
    locks:  LockServiceRef,
    closed: AtomicBool,
}

impl IndexDirectory {
    pub fn new(config: &StoreConfig, store: ChunkStoreRef, locks: LockServiceRef) -> Result<Self> {
        config.validate()?;
        info!(prefix = %config.prefix, "open index directory");
        Ok(Self {
            prefix: config.prefix.clone(),
            store,
            locks,
            closed: AtomicBool::new(false),
        })
    }

    pub fn prefix(&self) -> &str { &self.prefix }

    fn full_name(&self, name: &str) -> String { format!("{}{PATH_SEPARATOR}{name}", self.prefix) }

    pub fn is_closed(&self) -> bool { self.closed.load(Ordering::Acquire) }

    pub fn ensure_open(&self) -> Result<()> {
        ensure!(
            !self.is_closed(),
            DirectoryClosedSnafu {
                prefix: &self.prefix,
            }
        );
        Ok(())
    }

    /// Names of every file in this directory, without the prefix.
    pub fn list_all(&self) -> Result<Vec<String>> {
        self.ensure_open()?;
        let dir = format!("{}{PATH_SEPARATOR}", self.prefix);
        let names = self
            .store
            .list(&dir)?
            .into_iter()
            .filter_map(|full| full.strip_prefix(&dir).map(str::to_string))
            .collect();
        Ok(names)
    }

    pub fn file_length(&self, name: &str) -> Result<u64> {
        self.ensure_open()?;
        self.store.file_length(&self.full_name(name))
    }

    pub fn delete_file(&self, name: &str) -> Result<()> {
        self.ensure_open()?;
        self.store.delete(&self.full_name(name))
    }

    pub fn rename_file(&self, from: &str, to: &str) -> Result<()> {
        self.ensure_open()?;
        self.store
            .rename(&self.full_name(from), &self.full_name(to))
    }

    pub fn open_input(&self, name: &str) -> Result<ChunkedInput> {
        self.ensure_open()?;
        let full = self.full_name(name);
        let file = self.store.open_chunks(&full)?;
        let description = format!("ChunkedInput(file=\"{full}\")");
        ChunkedInput::new(description, file.chunks, file.length, file.chunk_size)
            .context(OpenInputSnafu { name: full })
    }

    pub fn obtain_lock(&self, name: &str) -> Result<Box<dyn LockHandle>> {
        self.ensure_open()?;
        self.locks.acquire(&self.full_name(name))
    }

    /// Later calls are no-ops. Inputs and locks handed out before stay usable.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            debug!(prefix = %self.prefix, "closed index directory");
        }
    }
}

impl Display for IndexDirectory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "IndexDirectory(prefix=\"{}\")", self.prefix)
    }
}
