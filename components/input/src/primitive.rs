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

use byteorder::{BigEndian, ByteOrder};

/// A value stored as a fixed number of big-endian bytes.
pub(crate) trait FixedWidth: Sized {
    const WIDTH: usize;

    /// `buf` holds exactly `WIDTH` bytes.
    fn decode(buf: &[u8]) -> Self;
}

impl FixedWidth for i16 {
    const WIDTH: usize = 2;

    fn decode(buf: &[u8]) -> Self { BigEndian::read_i16(buf) }
}

impl FixedWidth for i32 {
    const WIDTH: usize = 4;

    fn decode(buf: &[u8]) -> Self { BigEndian::read_i32(buf) }
}

impl FixedWidth for i64 {
    const WIDTH: usize = 8;

    fn decode(buf: &[u8]) -> Self { BigEndian::read_i64(buf) }
}

/// Scratch space large enough for any [FixedWidth] value.
pub(crate) const MAX_WIDTH: usize = 8;
