//! Init command implementation

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use dialoguer::{Input, Select, theme::ColorfulTheme};

use crate::cache::{MemoryCache, SystemClock};
use crate::cli::args::GlobalOptions;
use crate::client::{Endpoints, GoogleClientFactory, SCOPES, ServiceAccountCredentials};
use crate::config::Config;
use crate::error::Result;
use crate::gateway::AnalyticsGateway;
use crate::site::StaticSite;
use crate::vocabulary;

/// Run the init command
///
/// Existing site data in the config file is kept; only the analytics
/// settings asked about here are replaced.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let theme = ColorfulTheme::default();

    println!("{}", "Welcome to gavocab!".bold().green());
    println!("Let's set up your Google Analytics settings.\n");

    let key_path: String = Input::with_theme(&theme)
        .with_prompt("Path to the service account key file (JSON)")
        .interact_text()?;
    let key_path = PathBuf::from(key_path.trim());

    let blob = std::fs::read_to_string(&key_path)?;
    let credentials = ServiceAccountCredentials::from_json(Some(&blob))?;
    credentials.signer(SCOPES)?;
    println!(
        "{} Service account: {}",
        "✓".green(),
        credentials.client_email.bold()
    );

    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();
    if opts.api_host.is_some() {
        config.api_host = opts.api_host.clone();
    }
    config.settings.service_account = Some(blob);

    println!("\n{}", "Fetching your web properties...".cyan());
    config.settings.tracking_web_property = choose_web_property(&config, &theme).await?;

    config.settings.cache_interval = Input::with_theme(&theme)
        .with_prompt("Cache interval in minutes (0 disables caching)")
        .default(config.settings.cache_interval)
        .interact_text()?;

    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    if let Some(property) = &config.settings.tracking_web_property {
        println!("  Tracked web property: {}", property.bold());
    }

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "gavocab status".cyan());
    println!(
        "  {} - List web properties",
        "gavocab vocab web-properties".cyan()
    );

    Ok(())
}

/// Offer the web properties Google reports, or ask for one by hand
async fn choose_web_property(config: &Config, theme: &ColorfulTheme) -> Result<Option<String>> {
    let properties = vocabulary::web_properties(&probe_gateway(config)).await;
    let choices: Vec<_> = properties.iter().filter(|c| c.value.is_some()).collect();

    if choices.is_empty() {
        for message in properties.labels() {
            println!("{} {}", "⚠".yellow(), message);
        }

        let manual: String = Input::with_theme(theme)
            .with_prompt("Web property to track (e.g. UA-12345-1, blank for none)")
            .allow_empty(true)
            .interact_text()?;
        let manual = manual.trim();
        return Ok((!manual.is_empty()).then(|| manual.to_string()));
    }

    let labels: Vec<String> = choices
        .iter()
        .map(|c| format!("{} ({})", c.label, c.value.as_deref().unwrap_or_default()))
        .collect();

    let selection = Select::with_theme(theme)
        .with_prompt("Select the web property to track")
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(selection.and_then(|idx| choices[idx].value.clone()))
}

/// Throwaway gateway for the settings being written
fn probe_gateway(config: &Config) -> AnalyticsGateway {
    AnalyticsGateway::new(
        Arc::new(StaticSite::new(config.settings.clone(), config.site.clone())),
        Arc::new(GoogleClientFactory::new(Endpoints::with_host(
            config.api_host.as_deref(),
        ))),
        Arc::new(MemoryCache::new()),
        Arc::new(SystemClock),
    )
}
