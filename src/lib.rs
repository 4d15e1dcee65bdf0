//! Order Origin Filter
//!
//! Filters shop orders by attribution source, payment gateway and month,
//! and totals the sales of the matching orders.

pub mod analysis;
pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod filter;
pub mod processor;
pub mod query;
pub mod types;
pub mod utils;
