use super::{load_config, open_service, parse_format, FilterArgs};
use crate::analysis::ReportFormatter;
use crate::errors::AppResult;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct SummaryCommand {
    #[command(flatten)]
    filter: FilterArgs,

    /// Database path (overrides config.toml and env vars)
    #[arg(long)]
    database_path: Option<PathBuf>,

    /// Output format: console, json, html
    #[arg(long, default_value = "console")]
    format: String,
}

impl SummaryCommand {
    pub fn run(&self) -> AppResult<()> {
        let format = parse_format(&self.format)?;
        let config = load_config()?;
        let service = open_service(&self.database_path, &config)?;

        match service.summarize(&self.filter.to_raw_params())? {
            Some(summary) => {
                let output = ReportFormatter::format_summary(&summary, &config.currency, &format)?;
                print!("{}", output);
            }
            None => {
                println!("No origin or gateway filter given; nothing to total.");
            }
        }
        Ok(())
    }
}
