use super::{load_config, open_service, parse_format};
use crate::analysis::ReportFormatter;
use crate::errors::{AppError, AppResult};
use crate::types::FilterAttribute;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ValuesCommand {
    /// Attribute to list (origin, gateway, attribution_source, payment_gateway_title);
    /// all attributes when omitted
    #[arg(long)]
    attribute: Option<String>,

    /// Value to mark as selected
    #[arg(long)]
    selected: Option<String>,

    /// Database path (overrides config.toml and env vars)
    #[arg(long)]
    database_path: Option<PathBuf>,

    /// Output format: console, json, html
    #[arg(long, default_value = "console")]
    format: String,
}

impl ValuesCommand {
    pub fn run(&self) -> AppResult<()> {
        let format = parse_format(&self.format)?;
        let attributes = match &self.attribute {
            Some(name) => vec![name.parse::<FilterAttribute>().map_err(AppError::Config)?],
            None => FilterAttribute::ALL.to_vec(),
        };

        let config = load_config()?;
        let service = open_service(&self.database_path, &config)?;

        for attribute in attributes {
            let choices = service.filter_choices(attribute);
            let output =
                ReportFormatter::format_choices(&choices, self.selected.as_deref(), &format)?;
            print!("{}", output);
        }
        Ok(())
    }
}
