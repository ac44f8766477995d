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
    fmt::Debug,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
};

use dashmap::{mapref::entry::Entry, DashMap};
use snafu::{ensure, OptionExt};
use tracing::{debug, warn};

use crate::err::{LockHeldSnafu, LockReleaseFailedSnafu, Result};

pub type LockServiceRef = Arc<dyn LockService>;

/// Hands out named, exclusive locks.
pub trait LockService: Send + Sync + 'static {
    /// Fails with `LockHeld` while another handle holds `name`.
    fn acquire(&self, name: &str) -> Result<Box<dyn LockHandle>>;
}

pub trait LockHandle: Send + Sync + Debug {
    fn name(&self) -> &str;

    /// False once released, or once the lock record vanished underneath us.
    fn is_valid(&self) -> bool;

    /// Remove the lock record. Only the first call does anything; it fails
    /// with `LockReleaseFailed` if the record was already gone.
    fn release(&self) -> Result<()>;
}

/// Lock records kept in memory. Each record remembers the token of the
/// handle that created it, so a handle never mistakes a re-acquired lock
/// for its own.
#[derive(Debug, Default)]
pub struct MemLockService {
    records:    Arc<DashMap<String, u64>>,
    next_token: AtomicU64,
}

impl MemLockService {
    pub fn new() -> Self { Self::default() }

    pub fn is_held(&self, name: &str) -> bool { self.records.contains_key(name) }

    /// Drop the record for `name` regardless of who holds it. Returns whether
    /// there was one.
    pub fn break_lock(&self, name: &str) -> bool {
        let broken = self.records.remove(name).is_some();
        if broken {
            warn!(name, "lock broken");
        }
        broken
    }
}

impl LockService for MemLockService {
    fn acquire(&self, name: &str) -> Result<Box<dyn LockHandle>> {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        match self.records.entry(name.to_string()) {
            Entry::Occupied(_) => return LockHeldSnafu { name }.fail(),
            Entry::Vacant(v) => {
                v.insert(token);
            }
        }
        debug!(name, token, "lock acquired");
        Ok(Box::new(MemLock {
            name: name.to_string(),
            token,
            records: self.records.clone(),
            released: AtomicBool::new(false),
        }))
    }
}

#[derive(Debug)]
struct MemLock {
    name:     String,
    token:    u64,
    records:  Arc<DashMap<String, u64>>,
    released: AtomicBool,
}

impl LockHandle for MemLock {
    fn name(&self) -> &str { &self.name }

    fn is_valid(&self) -> bool {
        !self.released.load(Ordering::Acquire)
            && self
                .records
                .get(&self.name)
                .is_some_and(|token| *token == self.token)
    }

    fn release(&self) -> Result<()> {
        if self.released.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        let removed = self
            .records
            .remove_if(&self.name, |_, token| *token == self.token);
        removed.context(LockReleaseFailedSnafu {
            name:   &self.name,
            reason: "lock record already removed",
        })?;
        debug!(name = %self.name, token = self.token, "lock released");
        Ok(())
    }
}

impl Drop for MemLock {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!("dropping lock: {e}");
        }
    }
}

/// Fails unless `lock` is still valid.
pub fn ensure_valid(lock: &dyn LockHandle) -> Result<()> {
    ensure!(
        lock.is_valid(),
        LockReleaseFailedSnafu {
            name:   lock.name(),
            reason: "lock no longer valid",
        }
    );
    Ok(())
}
