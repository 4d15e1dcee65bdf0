//! Unit tests exercising each component through its public API

pub mod aggregator;
pub mod filter;
pub mod query;
pub mod service;
