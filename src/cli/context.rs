//! Command execution context
//!
//! Loads the config and wires up an [`AnalyticsGateway`] for it, so command
//! handlers only deal with their own output.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::{MemoryCache, PersistentCache, ResponseCache, SystemClock};
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{Endpoints, GoogleClientFactory};
use crate::config::Config;
use crate::error::Result;
use crate::gateway::AnalyticsGateway;
use crate::site::StaticSite;

/// Context for command execution containing config, gateway, and runtime options.
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// Where the configuration was loaded from
    pub config_path: PathBuf,
    /// Gateway over the configured site
    pub gateway: AnalyticsGateway,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load config and build the gateway.
    ///
    /// The API host comes from `--api-host` if given, else from the config.
    /// With `--no-cache` (or when the cache database cannot be opened)
    /// responses are only cached for the lifetime of this process.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let config = Config::load_from(&config_path)?;

        let api_host = opts
            .api_host_ref()
            .or(config.api_host.as_deref())
            .map(str::to_string);

        let site = Arc::new(StaticSite::new(
            config.settings.clone(),
            config.site.clone(),
        ));
        let endpoints = Endpoints::with_host(api_host.as_deref());
        let api_base = endpoints.api_base.clone();
        let factory = Arc::new(GoogleClientFactory::new(endpoints));

        let gateway = AnalyticsGateway::new(
            site,
            factory,
            response_cache(opts.no_cache),
            Arc::new(SystemClock),
        )
        .with_api_base(api_base)
        .with_token(config.token.clone());

        Ok(Self {
            config,
            config_path,
            gateway,
            format: opts.format,
        })
    }

    /// Write the gateway's current token back to the config if it changed.
    pub fn persist_token(&mut self) -> Result<()> {
        let token = self.gateway.token();
        if token == self.config.token {
            return Ok(());
        }

        log::debug!(
            "Saving access token state to {}",
            self.config_path.display()
        );
        self.config.token = token;
        self.config.save_to(&self.config_path)
    }
}

fn response_cache(no_cache: bool) -> Arc<dyn ResponseCache> {
    if no_cache {
        return Arc::new(MemoryCache::new());
    }

    match PersistentCache::open() {
        Ok(cache) => Arc::new(cache),
        Err(e) => {
            log::warn!("Response cache unavailable, using memory only: {}", e);
            Arc::new(MemoryCache::new())
        }
    }
}
