//! Filtering orders against the store

pub mod executor;

pub use executor::{order_matches, OrderQueryExecutor};
