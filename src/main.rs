//! gavocab - Google Analytics vocabularies for a site's analytics settings

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod gateway;
mod models;
mod output;
mod site;
mod vocabulary;

use cli::args::GlobalOptions;
use cli::{CacheCommands, Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Warnings by default, debug with `--debug`; `RUST_LOG` wins when set
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Accounts => cli::accounts::run(&opts).await,
        Commands::Vocab(vocab_cmd) => cli::vocab::run(&opts, &vocab_cmd).await,
        Commands::Revoke => cli::revoke::run(&opts).await,
        Commands::Cache(cache_cmd) => match cache_cmd {
            CacheCommands::Status => cli::cache::status(opts.format),
            CacheCommands::Clear => cli::cache::clear(opts.format),
            CacheCommands::Path => cli::cache::path(),
        },
    }
}
