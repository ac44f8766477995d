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

use gridex_common::{DEFAULT_CHUNK_SIZE, DEFAULT_PREFIX, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE, PATH_SEPARATOR};
use serde::{Deserialize, Serialize};
use snafu::ensure;

use crate::err::{InvalidConfigSnafu, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    /// Every file of the directory is stored as `<prefix>/<name>`.
    pub prefix:     String,
    /// The size files are cut into when they are stored. The last chunk of a
    /// file may be shorter.
    pub chunk_size: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            prefix:     DEFAULT_PREFIX.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE, // 255 KiB
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.prefix.is_empty(),
            InvalidConfigSnafu {
                reason: "prefix must not be empty",
            }
        );
        ensure!(
            !self.prefix.starts_with(PATH_SEPARATOR) && !self.prefix.ends_with(PATH_SEPARATOR),
            InvalidConfigSnafu {
                reason: format!("prefix {:?} must not start or end with {PATH_SEPARATOR:?}", self.prefix),
            }
        );
        ensure!(
            (MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&self.chunk_size),
            InvalidConfigSnafu {
                reason: format!(
                    "chunk size {} outside {MIN_CHUNK_SIZE}..={MAX_CHUNK_SIZE}",
                    self.chunk_size
                ),
            }
        );
        Ok(())
    }
}
