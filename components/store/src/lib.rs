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

//! Where index files come from: chunk stores, lock services and the
//! [`IndexDirectory`] tying them to [`gridex_input::ChunkedInput`].

mod config;
mod directory;
pub mod err;
mod lock;
mod mem_store;
mod provider;

pub use config::StoreConfig;
pub use directory::IndexDirectory;
pub use err::{Error, Result};
pub use lock::{ensure_valid, LockHandle, LockService, LockServiceRef, MemLockService};
pub use mem_store::MemChunkStore;
pub use provider::{ChunkStore, ChunkStoreRef, ChunkedFile};
