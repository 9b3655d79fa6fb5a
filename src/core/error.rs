//! Error taxonomy for the selection and ranking pipeline.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FundError {
    /// The dataset could not be opened or parsed. Fatal for the session.
    #[error("fund data unavailable at {}: {source}", path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Required columns are missing after header normalization.
    #[error("dataset is missing required column(s): {}", missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },

    /// A 1-year return cell is not numeric and the policy rejects such rows.
    #[error("row {row} has a non-numeric 1-year return: {value:?}")]
    InvalidReturn { row: usize, value: String },

    #[error("unknown category: {0:?}")]
    InvalidCategory(String),

    #[error("AMC {amc_name:?} has no funds in category {category:?}")]
    InvalidAmc { category: String, amc_name: String },

    /// The export payload could not be produced in the requested encoding.
    #[error("export failed: {0}")]
    EncodingError(String),
}

pub type Result<T, E = FundError> = std::result::Result<T, E>;
