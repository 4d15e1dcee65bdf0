use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Order store could not be reached, timed out, or failed a query
    #[error("Order store unavailable: {0}")]
    StoreUnavailable(String),

    /// Malformed year/month filter (strict validation only)
    #[error("Invalid filter shape for {parameter}: {value:?}")]
    InvalidFilterShape { parameter: String, value: String },

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV processing
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Invalid order record during import
    #[error("Invalid order record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}

/// Order store error types
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing database could not be opened or reached
    #[error("Connection failed: {0}")]
    Unavailable(String),

    /// Store stayed busy or locked past the configured wait
    #[error("Store busy or locked: {0}")]
    Timeout(String),

    /// Query failed inside the store
    #[error("Query failed: {0}")]
    Query(String),

    /// A stored row could not be decoded into an order
    #[error("Corrupt order row: {0}")]
    CorruptRow(String),
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for order store operations
pub type StoreResult<T> = Result<T, StoreError>;

// Anything the store reports is surfaced to callers as unavailability
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::StoreUnavailable(err.to_string())
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        use rusqlite::ErrorCode;

        match err.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => {
                StoreError::Timeout(err.to_string())
            }
            Some(ErrorCode::CannotOpen) | Some(ErrorCode::NotADatabase) => {
                StoreError::Unavailable(err.to_string())
            }
            _ => StoreError::Query(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::from(err).into()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
