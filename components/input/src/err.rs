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
    /// A read or seek reached past the logical length.
    #[snafu(display("{action} past EOF at {pos} (length {length}): {resource}"))]
    EndOfInput {
        action:   &'static str,
        pos:      u64,
        length:   u64,
        resource: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("already closed: {resource}"))]
    AlreadyClosed {
        resource: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("invalid argument, {reason}: {resource}"))]
    InvalidArgument {
        reason:   String,
        resource: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl Error {
    pub fn is_end_of_input(&self) -> bool { matches!(self, Error::EndOfInput { .. }) }

    pub fn is_already_closed(&self) -> bool { matches!(self, Error::AlreadyClosed { .. }) }

    pub fn is_invalid_argument(&self) -> bool { matches!(self, Error::InvalidArgument { .. }) }
}

impl From<Error> for std::io::Error {
    fn from(value: Error) -> Self {
        let kind = match value {
            Error::EndOfInput { .. } => std::io::ErrorKind::UnexpectedEof,
            Error::AlreadyClosed { .. } => std::io::ErrorKind::BrokenPipe,
            Error::InvalidArgument { .. } => std::io::ErrorKind::InvalidInput,
        };
        std::io::Error::new(kind, value)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
