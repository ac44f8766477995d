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

use std::io::Write;

use clap::Args;
use snafu::{ensure_whatever, ResultExt, Whatever};

use super::SourceArgs;

const RANGE_OPTIONS_HEADER: &str = "Range options";
const BYTES_PER_LINE: usize = 16;

#[derive(Debug, Clone, Args)]
#[command(long_about = r"

Print a hex dump of a byte range of FILE after loading it into an
in-memory chunk store. With --slice the range is read through a slice
of the input instead of the input itself.
")]
pub struct DumpArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(
        long,
        help = "First byte to dump",
        help_heading = RANGE_OPTIONS_HEADER,
        default_value_t = 0
    )]
    pub offset: u64,

    #[arg(
        long,
        help = "Number of bytes to dump [default: up to the end]",
        help_heading = RANGE_OPTIONS_HEADER
    )]
    pub length: Option<u64>,

    #[arg(long, help = "Read the range through a slice", help_heading = RANGE_OPTIONS_HEADER)]
    pub slice: bool,
}

impl DumpArgs {
    pub fn run(&self, out: &mut impl Write) -> Result<(), Whatever> {
        let input = self.source.open()?;
        let total = input.len();
        let length = match self.length {
            Some(length) => length,
            None => total.saturating_sub(self.offset),
        };
        ensure_whatever!(
            self.offset
                .checked_add(length)
                .is_some_and(|end| end <= total),
            "range {}+{length} is outside {} ({total} bytes)",
            self.offset,
            input.description()
        );

        let mut reader = if self.slice {
            input
                .slice("dump", self.offset, length)
                .whatever_context("failed to slice input")?
        } else {
            let mut input = input;
            input.seek(self.offset).whatever_context("failed to seek")?;
            input
        };

        let mut block = [0u8; BYTES_PER_LINE * 64];
        let mut done = 0u64;
        while done < length {
            let n = u64::min(block.len() as u64, length - done) as usize;
            reader
                .read_bytes(&mut block[..n])
                .whatever_context("failed to read input")?;
            write_hex(out, self.offset + done, &block[..n]).whatever_context("failed to write")?;
            done += n as u64;
        }
        reader.close();
        Ok(())
    }
}

/// `hexdump -C` style lines starting at address `addr`.
fn write_hex(out: &mut impl Write, addr: u64, bytes: &[u8]) -> std::io::Result<()> {
    for (i, line) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        write!(out, "{:08x} ", addr + (i * BYTES_PER_LINE) as u64)?;
        for j in 0..BYTES_PER_LINE {
            if j == BYTES_PER_LINE / 2 {
                write!(out, " ")?;
            }
            match line.get(j) {
                Some(b) => write!(out, " {b:02x}")?,
                None => write!(out, "   ")?,
            }
        }
        let ascii: String = line
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect();
        writeln!(out, "  |{ascii}|")?;
    }
    Ok(())
}
