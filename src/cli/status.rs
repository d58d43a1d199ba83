//! Status command implementation

use chrono::Utc;
use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::client::{SCOPES, ServiceAccountCredentials};
use crate::config::Config;
use crate::error::Result;
use crate::output::formatters::format_remaining;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "gavocab Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!();
            println!(
                "Run {} to create a configuration file.",
                "gavocab init".cyan()
            );
            println!();
            return Ok(());
        }
    };

    println!("Config file: {}", config_path.display().to_string().cyan());
    println!();

    let settings = &config.settings;

    // Credentials are only validated locally
    match ServiceAccountCredentials::from_json(settings.service_account.as_deref())
        .and_then(|creds| creds.signer(SCOPES).map(|_| creds))
    {
        Ok(creds) => println!(
            "{} Service account: {}",
            "✓".green(),
            creds.client_email.bold()
        ),
        Err(e) => {
            println!("{} Service account not usable: {}", "✗".red(), e);
            println!("  → Run 'gavocab init' to configure");
        }
    }

    match &config.token {
        Some(token) if token.expires_at > Utc::now() => println!(
            "{} Access token valid (expires in {})",
            "✓".green(),
            format_remaining(token.expires_at, Utc::now())
        ),
        Some(_) => println!("{} Access token expired", "⚠".yellow()),
        None => println!("{} No access token held", "○".dimmed()),
    }

    match &settings.tracking_web_property {
        Some(property) => println!("{} Tracked web property: {}", "✓".green(), property),
        None => println!("{} No web property tracked", "○".dimmed()),
    }

    if let Some(profile) = &settings.reports_profile {
        println!("{} Reports profile: {}", "✓".green(), profile);
    }

    if settings.cache_interval > 0 {
        println!("Cache interval: {} min", settings.cache_interval);
    } else {
        println!("Cache interval: {}", "disabled".dimmed());
    }

    println!(
        "Report categories: {}",
        settings.report_categories.join(", ")
    );

    if let Some(host) = opts.api_host_ref().or(config.api_host.as_deref()) {
        println!("{} Custom API host: {}", "○".dimmed(), host.cyan());
    }

    println!();
    Ok(())
}
