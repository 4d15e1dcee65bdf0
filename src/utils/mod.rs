//! Shared helpers: currency display, text neutralisation and month arithmetic

pub mod currency;
pub mod text;
pub mod time;
