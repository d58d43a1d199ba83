//! Flags every gavocab command accepts

use crate::cli::{Cli, OutputFormat};

/// The global flags, detached from the parsed subcommand.
///
/// Flags and their `GAVOCAB_*` environment variables are resolved by clap;
/// values from the config file are layered on in `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub format: OutputFormat,

    /// Config file location (defaults to ~/.gavocab/config.yaml)
    pub config: Option<String>,

    /// Keep responses in memory only, for this invocation
    pub no_cache: bool,

    /// Host standing in for Google's endpoints
    pub api_host: Option<String>,
}

impl GlobalOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            no_cache: cli.no_cache,
            api_host: cli.api_host.clone(),
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }
}
