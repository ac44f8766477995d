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

use snafu::{Location, Snafu};

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("file {name} not found"))]
    FileNotFound {
        name:     String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("file {name} already exists"))]
    FileExists {
        name:     String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("lock held elsewhere: {name}"))]
    LockHeld {
        name:     String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("unable to release lock {name}: {reason}"))]
    LockReleaseFailed {
        name:     String,
        reason:   String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("directory {prefix} is closed"))]
    DirectoryClosed {
        prefix:   String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("invalid store config: {reason}"))]
    InvalidConfig {
        reason:   String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("failed to open input {name}"))]
    OpenInput {
        name:     String,
        #[snafu(implicit)]
        location: Location,
        source:   gridex_input::Error,
    },
}

impl Error {
    pub fn is_not_found(&self) -> bool { matches!(self, Error::FileNotFound { .. }) }

    pub fn is_lock_held(&self) -> bool { matches!(self, Error::LockHeld { .. }) }
}

pub type Result<T> = std::result::Result<T, Error>;
