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
use gridex_common::cal_chunk_count;
use snafu::{ResultExt, Whatever};

use super::SourceArgs;

/// Print how FILE is laid out in chunks.
#[derive(Debug, Clone, Args)]
pub struct StatArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

impl StatArgs {
    pub fn run(&self, out: &mut impl Write) -> Result<(), Whatever> {
        let mut input = self.source.open()?;
        let chunks = cal_chunk_count(input.len(), input.chunk_size());
        writeln!(
            out,
            "file:       {}\nlength:     {}\nchunk size: {}\nchunks:     {chunks}",
            input.description(),
            input.len(),
            input.chunk_size(),
        )
        .whatever_context("failed to write")?;
        input.close();
        Ok(())
    }
}
