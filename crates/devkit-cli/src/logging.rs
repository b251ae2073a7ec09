//! Tracing subscriber set-up for the `devkit` binary.
//!
//! `devkit-core` and `devkit-adapters` only emit events; this module decides
//! what reaches stderr. `RUST_LOG` replaces the flag-derived filter when set.

use std::io::IsTerminal as _;

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

const LOG_TARGETS: [&str; 3] = ["devkit", "devkit_core", "devkit_adapters"];

/// Install the global subscriber. Fails when one is already registered.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(args.log_level())));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .without_time()
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

/// One directive per workspace crate, so dependencies stay quiet.
fn directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    LOG_TARGETS
        .map(|target| format!("{target}={level}"))
        .join(",")
}
