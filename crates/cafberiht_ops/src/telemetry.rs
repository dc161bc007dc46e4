//! Logging setup for the binaries.
//!
//! Events go to stderr so stdout carries only program output. The level is
//! fixed by the caller; nothing is read from the environment.

use anyhow::Result;
use tracing::Level;

pub fn init(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(anyhow::Error::msg)
}
