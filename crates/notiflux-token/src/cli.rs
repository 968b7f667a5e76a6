//! Command-line interface.
//!
//! ```text
//! notiflux-token <SCOPE> <TOPIC> [--private-key-path PATH] [--verbose]
//! ```
//!
//! Every option can also be set through the environment:
//! - `NOTIFLUX_PRIVATE_KEY_PATH` - key file (default `private_key.pem`)
//! - `NOTIFLUX_PRIVATE_KEY_B64` - base64 PEM key, wins over the path
//! - `NOTIFLUX_TOKEN_VALID_DAYS` - validity in days (default 36500)
//! - `NOTIFLUX_LOG_LEVEL` / `NOTIFLUX_LOG_FILTER` - stderr logging

use std::path::PathBuf;

use clap::{Args, Parser};
use notiflux_token_core::{Scope, DEFAULT_VALIDITY_DAYS};
use tracing_subscriber::filter::{LevelFilter, ParseError};
use tracing_subscriber::EnvFilter;

use crate::config::{IssuerConfig, KeySource, DEFAULT_PRIVATE_KEY_PATH};

/// Issue a signed notiflux token for one topic.
#[derive(Debug, Parser)]
#[command(name = "notiflux-token", author, version, about, long_about = None)]
pub struct Cli {
    /// What the token allows on the topic
    #[arg(value_enum)]
    pub scope: Scope,

    /// Topic the token applies to, used verbatim
    pub topic: String,

    /// Path to the PEM-encoded P-256 private key
    #[arg(long, env = "NOTIFLUX_PRIVATE_KEY_PATH", default_value = DEFAULT_PRIVATE_KEY_PATH)]
    pub private_key_path: PathBuf,

    /// Base64-encoded PEM private key; takes precedence over --private-key-path
    #[arg(long, env = "NOTIFLUX_PRIVATE_KEY_B64", hide_env_values = true)]
    pub private_key_b64: Option<String>,

    /// Print the claims before signing
    #[arg(long, overrides_with = "no_verbose")]
    pub verbose: bool,

    /// Do not print the claims (default)
    #[arg(long, overrides_with = "verbose")]
    pub no_verbose: bool,

    /// Days until the token expires
    #[arg(long, env = "NOTIFLUX_TOKEN_VALID_DAYS", default_value_t = DEFAULT_VALIDITY_DAYS)]
    pub valid_days: u32,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

impl Cli {
    /// The issuer configuration these arguments describe.
    pub fn to_config(&self) -> IssuerConfig {
        let key_source = match &self.private_key_b64 {
            Some(encoded) => KeySource::Base64(encoded.clone()),
            None => KeySource::Path(self.private_key_path.clone()),
        };

        IssuerConfig {
            key_source,
            verbose: self.verbose,
            validity_days: self.valid_days,
        }
    }
}

/// Logging options. Logs always go to stderr.
#[derive(Debug, Clone, Args)]
pub struct LoggingArgs {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", env = "NOTIFLUX_LOG_LEVEL", default_value = "warn")]
    pub log_level: LevelFilter,

    /// Log filter directives, e.g. `notiflux_token=debug`
    #[arg(long = "log-filter", env = "NOTIFLUX_LOG_FILTER", value_parser = parse_log_filter)]
    pub log_filter: Option<String>,
}

impl LoggingArgs {
    /// Build the filter: the level is the default directive, the filter adds to it.
    pub fn env_filter(&self) -> Result<EnvFilter, ParseError> {
        EnvFilter::builder()
            .with_default_directive(self.log_level.into())
            .parse(self.log_filter.as_deref().unwrap_or_default())
    }

    /// Install the global subscriber, writing to stderr.
    pub fn init(&self) -> Result<(), ParseError> {
        // A subscriber may already be installed when running under a test harness.
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(self.env_filter()?)
            .with_target(true)
            .try_init();
        Ok(())
    }
}

fn parse_log_filter(value: &str) -> Result<String, ParseError> {
    EnvFilter::builder().parse(value)?;
    Ok(value.to_owned())
}
