//! CSV import into the order store
//!
//! Expected header: `id,status,total,created_at,attribution_source,payment_gateway_title`.
//! Lines starting with `#` are comments. Attribute columns may be missing or
//! blank; blank values are not recorded.

use crate::database::{stored_order_id, Database, OrderWriteOperations};
use crate::errors::{AppError, AppResult};
use crate::types::{FilterAttribute, Order, OrderStatus};
use crate::utils::text::sanitize_text_field;
use crate::utils::time::parse_order_timestamp;
use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use tracing::{info, warn};

/// Orders written per transaction
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// One CSV row, all fields still raw text
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub status: String,
    pub total: String,
    pub created_at: String,
    #[serde(default)]
    pub attribution_source: Option<String>,
    #[serde(default)]
    pub payment_gateway_title: Option<String>,
}

impl OrderRecord {
    /// Validate the row into an order
    pub fn to_order(&self) -> Result<Order, String> {
        let id: u64 = self
            .id
            .trim()
            .parse()
            .map_err(|_| format!("invalid order id '{}'", self.id))?;
        if id == 0 {
            return Err("order id must be positive".to_string());
        }
        if stored_order_id(id).is_err() {
            return Err(format!("order id {} exceeds {}", id, i64::MAX));
        }

        let status = self.status.trim();
        if status.is_empty() {
            return Err("missing status".to_string());
        }

        let total = Decimal::from_str(self.total.trim())
            .map_err(|e| format!("invalid total '{}': {}", self.total, e))?;
        if total < Decimal::ZERO {
            return Err(format!("negative total '{}'", self.total));
        }

        let created_at = parse_order_timestamp(&self.created_at)
            .ok_or_else(|| format!("invalid created_at '{}'", self.created_at))?;

        let mut attributes = BTreeMap::new();
        for (attribute, raw) in [
            (FilterAttribute::AttributionSource, &self.attribution_source),
            (FilterAttribute::PaymentGatewayTitle, &self.payment_gateway_title),
        ] {
            let value = raw.as_deref().map(sanitize_text_field).unwrap_or_default();
            if !value.is_empty() {
                attributes.insert(attribute.key().to_string(), value);
            }
        }

        Ok(Order {
            id,
            status: OrderStatus::from(status),
            total,
            attributes,
            created_at,
        })
    }
}

/// Counters for one import run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub total_records: usize,
    pub imported: usize,
    pub malformed_records: usize,
    pub batches_processed: usize,
}

/// Loads order CSV files into a `Database`
pub struct OrderCsvImporter {
    database: Database,
    batch_size: usize,
    strict: bool,
}

impl OrderCsvImporter {
    pub fn new(database: Database) -> Self {
        Self {
            database,
            batch_size: DEFAULT_BATCH_SIZE,
            strict: false,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Fail on the first malformed row instead of skipping it
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn into_database(self) -> Database {
        self.database
    }

    pub fn import_path(&mut self, path: &Path) -> AppResult<ImportStats> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "CSV file does not exist: {}",
                path.display()
            )));
        }
        info!("Importing orders from {}", path.display());
        let file = File::open(path)?;
        self.import_reader(BufReader::new(file))
    }

    pub fn import_reader<R: Read>(&mut self, reader: R) -> AppResult<ImportStats> {
        let started = Instant::now();
        let mut csv_reader = ReaderBuilder::new()
            .comment(Some(b'#'))
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut stats = ImportStats::default();
        let mut batch: Vec<Order> = Vec::with_capacity(self.batch_size);
        let mut record = StringRecord::new();

        while csv_reader.read_record(&mut record)? {
            let line = record.position().map_or(0, |p| p.line() as usize);
            stats.total_records += 1;

            let parsed = record
                .deserialize::<OrderRecord>(Some(&headers))
                .map_err(|e| e.to_string())
                .and_then(|row| row.to_order());

            match parsed {
                Ok(order) => batch.push(order),
                Err(reason) if self.strict => {
                    return Err(AppError::InvalidRecord { line, reason });
                }
                Err(reason) => {
                    warn!("Skipping line {}: {}", line, reason);
                    stats.malformed_records += 1;
                    continue;
                }
            }

            if batch.len() >= self.batch_size {
                stats.imported += self.database.insert_orders_batch(&batch)?;
                stats.batches_processed += 1;
                batch.clear();
            }
        }

        if !batch.is_empty() {
            stats.imported += self.database.insert_orders_batch(&batch)?;
            stats.batches_processed += 1;
        }

        info!(
            "Imported {} of {} records ({} malformed) in {:.2}s",
            stats.imported,
            stats.total_records,
            stats.malformed_records,
            started.elapsed().as_secs_f64()
        );
        Ok(stats)
    }
}
