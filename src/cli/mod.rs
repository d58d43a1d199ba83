//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod accounts;
pub mod args;
pub mod cache;
pub mod context;
pub mod init;
pub mod revoke;
pub mod status;
pub mod vocab;

pub use args::OutputFormat;
pub use context::CommandContext;

/// gavocab - Google Analytics vocabularies for a site's analytics settings
#[derive(Parser, Debug)]
#[command(name = "gavocab")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "GAVOCAB_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "GAVOCAB_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "GAVOCAB_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Do not read or write the on-disk response cache
    #[arg(long, global = true, env = "GAVOCAB_NO_CACHE", hide_env = true)]
    pub no_cache: bool,

    /// Send API requests to this host instead of Google
    #[arg(long, global = true, env = "GAVOCAB_API_HOST", hide_env = true)]
    pub api_host: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set up service account credentials and tracking settings
    Init,

    /// Show credential and configuration status
    Status,

    /// List the Google Analytics accounts the service account can read
    Accounts,

    /// Print a vocabulary
    #[command(subcommand)]
    Vocab(VocabCommands),

    /// Revoke the last access token obtained from Google
    Revoke,

    /// Manage local response cache
    #[command(subcommand)]
    Cache(CacheCommands),
}

/// Vocabulary subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum VocabCommands {
    /// Report profiles (ga:NNNN) from Google Analytics
    Profiles,

    /// Web properties (UA-NNNN-N) from Google Analytics
    WebProperties,

    /// Reports registered on the site
    Reports {
        /// Only reports filed under this category
        #[arg(long, short = 'c')]
        category: Option<String>,
    },

    /// Reports filed under "Site Wide"
    SiteWideReports,

    /// Reports filed under "Portlet"
    PortletReports,

    /// Site roles that can be excluded from tracking
    Roles,

    /// Tracking plugins registered globally or on the site
    TrackingPlugins,

    /// Categories reports can be filed under
    ReportCategories,
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,

    /// Clear all cached responses
    Clear,

    /// Print cache directory path
    Path,
}
