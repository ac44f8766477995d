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

mod cmd;

use clap::{Parser, Subcommand};
use snafu::Whatever;

use crate::cmd::{dump::DumpArgs, stat::StatArgs};

#[derive(Debug, Parser)]
#[clap(
name = "gridex",
about = "inspect index files through chunked input",
version)]
struct Cli {
    #[command(subcommand)]
    commands: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Dump(DumpArgs),
    Stat(StatArgs),
}

fn main() -> Result<(), Whatever> {
    gridex_utils::logger::init_logging("warn")?;
    let cli = Cli::parse();
    let mut out = std::io::stdout().lock();
    match cli.commands {
        Commands::Dump(dump_args) => dump_args.run(&mut out),
        Commands::Stat(stat_args) => stat_args.run(&mut out),
    }
}
