//! In-memory job listing table loaded once from a delimited file, with
//! distinct-value listing and case-insensitive substring search.

pub mod config;
pub mod data;
pub mod state;

pub use config::{Config, ConfigError, LoadFailurePolicy};
pub use data::error::DataError;
pub use data::loader::SourceConfig;
pub use data::model::{Row, Table};
pub use state::JobData;
