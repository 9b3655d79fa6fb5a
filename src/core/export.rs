//! Serializes ranked funds into a downloadable delimited-text payload.

use crate::core::error::{FundError, Result};
use crate::core::record::{FundRecord, Schema};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
        }
    }

    const fn delimiter(&self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportEncoding {
    #[default]
    Utf8,
    Ascii,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub encoding: ExportEncoding,
}

/// A serialized export ready to be written or offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// `<amc_name>_<category>_returns.<ext>`; the same filter always yields the
/// same name.
pub fn export_filename(amc_name: &str, category: &str, format: ExportFormat) -> String {
    format!("{amc_name}_{category}_returns.{}", format.extension())
}

/// Writes the header row and each record's raw cells, in the given order.
pub fn serialize(
    schema: &Schema,
    records: &[&FundRecord],
    category: &str,
    amc_name: &str,
    options: ExportOptions,
) -> Result<Export> {
    if options.encoding == ExportEncoding::Ascii {
        check_ascii(schema, records)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.format.delimiter())
        .from_writer(Vec::new());
    writer
        .write_record(&schema.columns)
        .map_err(|e| FundError::EncodingError(e.to_string()))?;
    for record in records {
        writer
            .write_record(record.cells())
            .map_err(|e| FundError::EncodingError(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| FundError::EncodingError(e.error().to_string()))?;

    let filename = export_filename(amc_name, category, options.format);
    debug!(
        "Serialized {} funds into {} bytes as {filename}",
        records.len(),
        bytes.len()
    );
    Ok(Export { bytes, filename })
}

fn check_ascii(schema: &Schema, records: &[&FundRecord]) -> Result<()> {
    if let Some(column) = schema.columns.iter().find(|c| !c.is_ascii()) {
        return Err(FundError::EncodingError(format!(
            "header {column:?} is not representable in ASCII"
        )));
    }
    for record in records {
        let offending = schema
            .columns
            .iter()
            .zip(record.cells())
            .find(|(_, value)| !value.is_ascii());
        if let Some((column, value)) = offending {
            return Err(FundError::EncodingError(format!(
                "value {value:?} in column {column:?} of row {} is not representable in ASCII",
                record.row + 1
            )));
        }
    }
    Ok(())
}
