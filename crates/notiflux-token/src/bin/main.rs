//! notiflux-token binary.
//!
//! Prints one signed token on stdout. Diagnostics and logs go to stderr.

use std::io;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use notiflux_token::cli::Cli;
use notiflux_token::run;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.logging.init().context("invalid log filter")?;

    let config = cli.to_config();
    let mut stdout = io::stdout().lock();

    run(config, cli.scope, &cli.topic, Utc::now(), &mut stdout)
        .with_context(|| format!("failed to issue {} token for topic {:?}", cli.scope, cli.topic))?;

    Ok(())
}
