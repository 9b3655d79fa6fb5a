//! Fund data pipeline: load, filter, select, rank and export

pub mod cache;
pub mod config;
pub mod error;
pub mod explorer;
pub mod export;
pub mod filter;
pub mod loader;
pub mod log;
pub mod ranking;
pub mod record;
pub mod selection;

// Re-export main types for cleaner imports
pub use error::FundError;
pub use explorer::Explorer;
pub use export::{Export, ExportEncoding, ExportFormat, ExportOptions};
pub use filter::{FilterChange, FilterState};
pub use ranking::{ChartPoint, RankedView, ReturnStats};
pub use record::{FundRecord, FundTable, Schema};
