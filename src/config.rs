use crate::errors::AppResult;
use crate::types::OrderStatus;
use crate::utils::time::parse_timezone;
use chrono_tz::Tz;
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub store: StoreConfig,
    pub cache: CacheConfig,
    pub filters: FiltersConfig,
    pub currency: CurrencyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub default_path: PathBuf,
}

/// Order store access settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// How long a query may wait on a busy/locked store before failing
    pub busy_timeout_ms: u64,
    /// IANA zone used to interpret year/month filters
    pub timezone: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
            timezone: "UTC".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    pub fn tz(&self) -> AppResult<Tz> {
        parse_timezone(&self.timezone)
    }
}

/// Distinct value cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 12 * 60 * 60,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

/// Filter and aggregation behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersConfig {
    /// Statuses whose orders count towards sales totals
    pub counted_statuses: Vec<String>,
    /// Reject malformed `yearmonth` values instead of ignoring them
    pub strict_yearmonth: bool,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            counted_statuses: OrderStatus::COUNTED
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            strict_yearmonth: false,
        }
    }
}

impl FiltersConfig {
    pub fn counted_statuses(&self) -> Vec<OrderStatus> {
        self.counted_statuses
            .iter()
            .map(|s| OrderStatus::from(s.as_str()))
            .collect()
    }
}

/// Display settings for monetary totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    pub symbol: String,
    pub decimals: u32,
    pub thousands_separator: String,
    pub decimal_separator: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            decimals: 2,
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                default_path: PathBuf::from("./orders.db"),
            },
            store: StoreConfig::default(),
            cache: CacheConfig::default(),
            filters: FiltersConfig::default(),
            currency: CurrencyConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();
        let config = Config::builder()
            // Start with default values
            .set_default(
                "database.default_path",
                defaults.database.default_path.to_string_lossy().to_string(),
            )?
            .set_default("store.busy_timeout_ms", defaults.store.busy_timeout_ms)?
            .set_default("store.timezone", defaults.store.timezone)?
            .set_default("cache.ttl_seconds", defaults.cache.ttl_seconds)?
            .set_default(
                "filters.counted_statuses",
                defaults.filters.counted_statuses,
            )?
            .set_default("filters.strict_yearmonth", defaults.filters.strict_yearmonth)?
            .set_default("currency.symbol", defaults.currency.symbol)?
            .set_default("currency.decimals", defaults.currency.decimals as i64)?
            .set_default(
                "currency.thousands_separator",
                defaults.currency.thousands_separator,
            )?
            .set_default(
                "currency.decimal_separator",
                defaults.currency.decimal_separator,
            )?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // ORIGIN_FILTER_CACHE__TTL_SECONDS style overrides for any key
            .add_source(
                config::Environment::with_prefix("ORIGIN_FILTER")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("filters.counted_statuses")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // Short name kept for scripts that only need to point at a database
        if let Ok(db_path) = env::var("ORIGIN_FILTER_DATABASE_PATH") {
            app_config.database.default_path = PathBuf::from(db_path);
        }

        app_config
            .store
            .tz()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Result<Self, ConfigError> {
        // Try to load config for defaults, but don't fail if not found
        match Self::load() {
            Ok(config) => Ok(config),
            Err(_) => Ok(Self::default()),
        }
    }
}
