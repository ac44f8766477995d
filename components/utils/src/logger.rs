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

use std::sync::Once;

use snafu::{ResultExt, Whatever};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Overrides the default filter directive when set.
pub const LOG_ENV: &str = "GRIDEX_LOG";

/// Initialize logging to stderr.
///
/// Logging is configured using either `default_filter` or the
/// [`LOG_ENV`] environment variable, falling back to `RUST_LOG`.
pub fn init_logging(default_filter: &str) -> Result<(), Whatever> {
    let env_filter = create_env_filter(default_filter);
    // Don't install a subscriber if we'll never emit any logs
    if env_filter.max_level_hint() == Some(LevelFilter::OFF) {
        return Ok(());
    }

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .whatever_context("failed to install the tracing subscriber")?;
    tracing::info!("logging started");
    Ok(())
}

static FMT_LOG: Once = Once::new();

/// Install a fmt subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call does anything.
pub fn install_fmt_log() {
    FMT_LOG.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(create_env_filter("debug"))
            .with_test_writer()
            .try_init();
    });
}

/// [EnvFilter] isn't [Clone], so build a fresh one whenever a layer needs it.
fn create_env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_filter))
}
