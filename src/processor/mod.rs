//! Bulk loading of orders into the store

pub mod csv_importer;

pub use csv_importer::{ImportStats, OrderCsvImporter, OrderRecord, DEFAULT_BATCH_SIZE};
