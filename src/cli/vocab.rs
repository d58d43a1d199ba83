//! Vocabulary command implementations

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat, VocabCommands};
use crate::error::Result;
use crate::gateway::AnalyticsGateway;
use crate::models::ChoiceDisplay;
use crate::output::{json, table};
use crate::vocabulary::{self, Vocabulary};

/// Run a vocab subcommand
pub async fn run(opts: &GlobalOptions, command: &VocabCommands) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;

    let vocab = build(&ctx.gateway, command).await;
    print(&vocab, ctx.format)?;

    ctx.persist_token()
}

/// Build the vocabulary a subcommand names
pub async fn build(gateway: &AnalyticsGateway, command: &VocabCommands) -> Vocabulary {
    match command {
        VocabCommands::Profiles => vocabulary::profiles(gateway).await,
        VocabCommands::WebProperties => vocabulary::web_properties(gateway).await,
        VocabCommands::Reports { category } => vocabulary::reports(gateway, category.as_deref()),
        VocabCommands::SiteWideReports => vocabulary::site_wide_reports(gateway),
        VocabCommands::PortletReports => vocabulary::portlet_reports(gateway),
        VocabCommands::Roles => vocabulary::roles(gateway),
        VocabCommands::TrackingPlugins => vocabulary::tracking_plugin_names(gateway),
        VocabCommands::ReportCategories => vocabulary::report_categories(gateway),
    }
}

fn print(vocab: &Vocabulary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<ChoiceDisplay> = vocab.iter().map(ChoiceDisplay::from).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => {
            let choices: Vec<_> = vocab.iter().collect();
            println!("{}", json::format_json_list(&choices)?);
        }
    }
    Ok(())
}
