use super::{load_config, resolve_database_path};
use crate::database::Database;
use crate::errors::AppResult;
use crate::processor::{OrderCsvImporter, DEFAULT_BATCH_SIZE};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct ImportCommand {
    /// Path to the orders CSV file
    #[arg(long)]
    csv: PathBuf,

    /// Database path (overrides config.toml and env vars)
    #[arg(long)]
    database_path: Option<PathBuf>,

    /// Orders written per transaction
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Abort on the first malformed row instead of skipping it
    #[arg(long)]
    strict: bool,
}

impl ImportCommand {
    pub fn run(&self) -> AppResult<()> {
        info!("=== Order Origin Filter - Import ===");
        let config = load_config()?;
        let db_path = resolve_database_path(&self.database_path, &config);

        let database = Database::open(&db_path, config.store.busy_timeout())?;
        let mut importer = OrderCsvImporter::new(database)
            .with_batch_size(self.batch_size)
            .strict(self.strict);
        let stats = importer.import_path(&self.csv)?;
        let stored = importer.database().order_count()?;

        println!("\n=== IMPORT COMPLETE ===");
        println!("Records read:      {}", stats.total_records);
        println!("Orders imported:   {}", stats.imported);
        println!("Malformed skipped: {}", stats.malformed_records);
        println!("Orders in store:   {}", stored);
        println!("Database:          {}", db_path);
        Ok(())
    }
}
