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

//! Random-access input over a file that is stored as an ordered array of
//! fixed-size chunks.
//!
//! [`ChunkedInput`] maps a 64-bit logical position onto a chunk and an offset
//! inside it, bridges reads that straddle chunk boundaries, and hands out
//! slices and clones that share the chunk bytes without copying them.
//!
//! Positions are unsigned. The [`std::io::Seek`] adapter is the only way to
//! ask for a negative position, and it reports that as an invalid argument;
//! anything at or past the end is reported as end of input.

mod cursor;
pub mod err;
mod input;
mod multi;
mod primitive;
mod single;
mod variant;
mod view;

pub use err::{Error, Result};
pub use input::ChunkedInput;
