//! Revoke command implementation

use colored::Colorize;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::error::Result;

/// Revoke the remembered access token and forget it
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    let had_token = ctx.gateway.token().is_some();

    let result = ctx.gateway.revoke_token().await;
    // The token is gone locally even when Google could not be told
    ctx.persist_token()?;
    result?;

    if had_token {
        println!("{} Access token revoked", "✓".green());
    } else {
        println!("{} No access token to revoke", "○".dimmed());
    }
    Ok(())
}
