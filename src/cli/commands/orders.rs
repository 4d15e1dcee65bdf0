use super::{load_config, open_service, parse_format, FilterArgs};
use crate::analysis::ReportFormatter;
use crate::errors::AppResult;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct OrdersCommand {
    #[command(flatten)]
    filter: FilterArgs,

    /// Database path (overrides config.toml and env vars)
    #[arg(long)]
    database_path: Option<PathBuf>,

    /// Output format: console, json, html
    #[arg(long, default_value = "console")]
    format: String,
}

impl OrdersCommand {
    pub fn run(&self) -> AppResult<()> {
        let format = parse_format(&self.format)?;
        let config = load_config()?;
        let service = open_service(&self.database_path, &config)?;

        let filter = service.build_filter(&self.filter.to_raw_params())?;
        let orders = service.list_orders_for(&filter)?;
        let output =
            ReportFormatter::format_orders(&filter.label(), &orders, &config.currency, &format)?;
        print!("{}", output);
        Ok(())
    }
}
