//! Subcommand implementations and the helpers they share

pub mod import;
pub mod orders;
pub mod summary;
pub mod values;

use crate::analysis::{OutputFormat, SalesFilterService};
use crate::config::AppConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::filter::YEARMONTH_PARAM;
use crate::types::FilterAttribute;
use clap::Args;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

/// Filter flags shared by `summary` and `orders`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Attribution source (UTM origin) to filter by
    #[arg(long)]
    pub origin: Option<String>,

    /// Payment gateway title to filter by
    #[arg(long)]
    pub gateway: Option<String>,

    /// Month to filter by, as YYYYMM
    #[arg(long)]
    pub month: Option<String>,

    /// Raw request parameter, e.g. `--param order_origin=google` (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,
}

impl FilterArgs {
    /// Raw parameter map as the filter builder expects it
    ///
    /// Named flags override `--param` entries for the same key.
    pub fn to_raw_params(&self) -> HashMap<String, String> {
        let mut raw: HashMap<String, String> = self.params.iter().cloned().collect();
        let named = [
            (FilterAttribute::AttributionSource.key(), &self.origin),
            (FilterAttribute::PaymentGatewayTitle.key(), &self.gateway),
            (YEARMONTH_PARAM, &self.month),
        ];
        for (key, value) in named {
            if let Some(value) = value {
                raw.insert(key.to_string(), value.clone());
            }
        }
        raw
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if key.trim().is_empty() {
        return Err(format!("empty parameter name in '{}'", s));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

/// Load configuration from config.toml and the environment
pub fn load_config() -> AppResult<AppConfig> {
    match AppConfig::load() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            Ok(config)
        }
        Err(e) => {
            warn!("Failed to load configuration: {}", e);
            Err(AppError::Config(format!(
                "{}. Check config.toml and ORIGIN_FILTER_* environment variables",
                e
            )))
        }
    }
}

/// Database path from the CLI argument or configuration
pub fn resolve_database_path(cli_path: &Option<PathBuf>, config: &AppConfig) -> String {
    cli_path
        .as_ref()
        .unwrap_or(&config.database.default_path)
        .to_string_lossy()
        .to_string()
}

pub fn parse_format(format: &str) -> AppResult<OutputFormat> {
    format.parse().map_err(AppError::Config)
}

/// Open the configured store read-only and wrap it in a service
pub fn open_service(
    database_path: &Option<PathBuf>,
    config: &AppConfig,
) -> AppResult<SalesFilterService<Database>> {
    let path = resolve_database_path(database_path, config);
    let database = Database::open_read_only(&path, config.store.busy_timeout())?;
    SalesFilterService::from_config(database, config)
}
