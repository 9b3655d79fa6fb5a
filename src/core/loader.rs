//! Reads a delimited fund table from disk into an immutable [`FundTable`].

use crate::core::config::{ColumnConfig, MissingReturnPolicy};
use crate::core::error::{FundError, Result};
use crate::core::record::{FundRecord, FundTable, Schema, normalize_header};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Parsing knobs for the loader.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub delimiter: u8,
    pub columns: ColumnConfig,
    pub missing_returns: MissingReturnPolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            delimiter: b',',
            columns: ColumnConfig::default(),
            missing_returns: MissingReturnPolicy::default(),
        }
    }
}

/// Loads the fund table at `path`.
pub fn load(path: &Path, options: &LoadOptions) -> Result<FundTable> {
    debug!("Opening fund data at {}", path.display());
    let reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .from_path(path)
        .map_err(|source| FundError::DataUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
    read_table(reader, path, options)
}

/// Loads a fund table from any reader, e.g. an in-memory fixture.
pub fn load_from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<FundTable> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .from_reader(reader);
    read_table(reader, &PathBuf::from("<reader>"), options)
}

fn read_table<R: Read>(
    mut reader: csv::Reader<R>,
    origin: &Path,
    options: &LoadOptions,
) -> Result<FundTable> {
    let unavailable = |source: csv::Error| FundError::DataUnavailable {
        path: origin.to_path_buf(),
        source,
    };

    let columns: Vec<String> = reader
        .headers()
        .map_err(unavailable)?
        .iter()
        .map(normalize_header)
        .collect();
    let schema = resolve_schema(columns, &options.columns)?;
    debug!("Resolved schema: {:?}", schema);

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let raw = result.map_err(unavailable)?;
        let cells: Vec<String> = raw.iter().map(str::to_string).collect();
        let record = FundRecord::new(row, &schema, cells);

        if record.return_1yr.is_none() {
            let value = record.raw_return(&schema).to_string();
            match options.missing_returns {
                MissingReturnPolicy::Reject => {
                    return Err(FundError::InvalidReturn { row: row + 1, value });
                }
                MissingReturnPolicy::SortLast => {
                    warn!(row = row + 1, value = %value, "Fund has no numeric 1-year return");
                }
            }
        }
        records.push(record);
    }

    let table = FundTable::new(schema, records);
    info!("Loaded {} from {}", table, origin.display());
    Ok(table)
}

/// Maps the configured column identifiers onto header positions.
///
/// Duplicate headers resolve to their first occurrence.
fn resolve_schema(columns: Vec<String>, config: &ColumnConfig) -> Result<Schema> {
    let position = |wanted: &str| {
        let wanted = normalize_header(wanted);
        let mut hits = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == wanted)
            .map(|(i, _)| i);
        let first = hits.next();
        if first.is_some() && hits.next().is_some() {
            warn!(column = %wanted, "Duplicate column after normalization, using the first one");
        }
        first
    };

    let category_idx = position(&config.category);
    let amc_idx = position(&config.amc);
    let return_idx = position(&config.return_1yr);
    let name_idx = position(&config.name);
    if name_idx.is_none() {
        warn!(column = %config.name, "Fund name column not found, charts will use row numbers");
    }

    match (category_idx, amc_idx, return_idx) {
        (Some(category_idx), Some(amc_idx), Some(return_idx)) => Ok(Schema {
            columns,
            name_idx,
            category_idx,
            amc_idx,
            return_idx,
        }),
        _ => {
            let missing = [
                (category_idx, &config.category),
                (amc_idx, &config.amc),
                (return_idx, &config.return_1yr),
            ]
            .into_iter()
            .filter(|(idx, _)| idx.is_none())
            .map(|(_, name)| normalize_header(name))
            .collect();
            Err(FundError::SchemaMismatch { missing })
        }
    }
}
