//! Integration Tests Module
//!
//! End-to-end tests covering CSV import, the SQLite store and report output.

pub mod import_pipeline;
