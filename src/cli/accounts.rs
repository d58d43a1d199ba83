//! Accounts command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::models::AccountDisplay;
use crate::output::{json, table};

/// List the accounts the service account can read
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;

    let accounts = ctx.gateway.list_accounts().await?;

    match (accounts, ctx.format) {
        (None, OutputFormat::Table) => {
            println!("{} No accounts available", "○".dimmed());
        }
        (None, OutputFormat::Json) => {
            let empty: Vec<AccountDisplay> = Vec::new();
            println!("{}", json::format_json_list(&empty)?);
        }
        (Some(list), OutputFormat::Table) => {
            let rows: Vec<AccountDisplay> = list.items.iter().map(AccountDisplay::from).collect();
            println!("{}", table::format_table(&rows));
        }
        (Some(list), OutputFormat::Json) => {
            println!("{}", json::format_json_list(&list.items)?);
        }
    }

    ctx.persist_token()
}
