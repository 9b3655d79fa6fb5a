//! Fund records and the immutable table they live in.

use std::fmt;

/// Strips every whitespace character (and a stray byte-order mark) from a
/// column header so lookups don't depend on the file's header spacing.
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{feff}')
        .collect()
}

/// Ordered, normalized column identifiers and the positions of the columns
/// the pipeline reasons about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub columns: Vec<String>,
    pub name_idx: Option<usize>,
    pub category_idx: usize,
    pub amc_idx: usize,
    pub return_idx: usize,
}

impl Schema {
    /// True for columns the pipeline does not interpret.
    pub fn is_passthrough(&self, idx: usize) -> bool {
        Some(idx) != self.name_idx
            && idx != self.category_idx
            && idx != self.amc_idx
            && idx != self.return_idx
    }
}

/// One row of the source dataset.
///
/// The key fields are parsed copies; `cells` keeps every raw value in column
/// order so full-record output stays lossless.
#[derive(Debug, Clone, PartialEq)]
pub struct FundRecord {
    /// Zero-based position in the source file and in [`FundTable::records`].
    pub row: usize,
    pub name: String,
    pub category: String,
    pub amc_name: String,
    /// `None` when the source cell is empty or not a number.
    pub return_1yr: Option<f64>,
    cells: Vec<String>,
}

impl FundRecord {
    pub(crate) fn new(row: usize, schema: &Schema, cells: Vec<String>) -> Self {
        let cell = |idx: usize| cells.get(idx).cloned().unwrap_or_default();
        FundRecord {
            row,
            name: schema.name_idx.map(cell).unwrap_or_default(),
            category: cell(schema.category_idx),
            amc_name: cell(schema.amc_idx),
            return_1yr: parse_return(&cell(schema.return_idx)),
            cells,
        }
    }

    /// Raw cell values in schema column order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Raw text of the 1-year return cell.
    pub fn raw_return<'a>(&'a self, schema: &Schema) -> &'a str {
        self.cells
            .get(schema.return_idx)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Columns the pipeline does not interpret, in their original order.
    pub fn passthrough<'a>(
        &'a self,
        schema: &'a Schema,
    ) -> impl Iterator<Item = (&'a str, &'a str)> {
        schema
            .columns
            .iter()
            .zip(&self.cells)
            .enumerate()
            .filter(|(idx, _)| schema.is_passthrough(*idx))
            .map(|(_, (column, value))| (column.as_str(), value.as_str()))
    }

    /// Label used for charts, falling back to the row number for unnamed funds.
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            format!("row {}", self.row + 1)
        } else {
            self.name.clone()
        }
    }
}

fn parse_return(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// The loaded dataset. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct FundTable {
    schema: Schema,
    records: Vec<FundRecord>,
}

impl FundTable {
    /// `records[i].row` must equal `i`.
    pub(crate) fn new(schema: Schema, records: Vec<FundRecord>) -> Self {
        FundTable { schema, records }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[FundRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl fmt::Display for FundTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} funds x {} columns",
            self.records.len(),
            self.schema.columns.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema {
            columns: vec![
                "MutualFundName".to_string(),
                "category".to_string(),
                "AMC_name".to_string(),
                "return_1yr".to_string(),
                "fund_size_cr".to_string(),
            ],
            name_idx: Some(0),
            category_idx: 1,
            amc_idx: 2,
            return_idx: 3,
        }
    }

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_normalize_header_strips_all_whitespace() {
        assert_eq!(normalize_header(" AMC name "), "AMCname");
        assert_eq!(normalize_header("return\t_1yr"), "return_1yr");
        assert_eq!(normalize_header("\u{feff}Mutual Fund Name"), "MutualFundName");
        assert_eq!(normalize_header("category"), "category");
    }

    #[test]
    fn test_record_parses_key_fields() {
        let schema = schema();
        let record = FundRecord::new(
            0,
            &schema,
            cells(&["Alpha Bluechip", "Equity", "Alpha", "-3.25", "1200"]),
        );

        assert_eq!(record.name, "Alpha Bluechip");
        assert_eq!(record.category, "Equity");
        assert_eq!(record.amc_name, "Alpha");
        assert_eq!(record.return_1yr, Some(-3.25));
        assert_eq!(record.raw_return(&schema), "-3.25");
    }

    #[test]
    fn test_record_missing_or_dirty_return_is_none() {
        let schema = schema();
        for raw in ["", "n/a", "NaN", "  "] {
            let record =
                FundRecord::new(0, &schema, cells(&["F", "Equity", "Alpha", raw, "1"]));
            assert_eq!(record.return_1yr, None, "raw value {raw:?}");
        }
        let padded =
            FundRecord::new(0, &schema, cells(&["F", "Equity", "Alpha", " 4.5 ", "1"]));
        assert_eq!(padded.return_1yr, Some(4.5));
    }

    #[test]
    fn test_passthrough_keeps_only_uninterpreted_columns() {
        let schema = schema();
        let record = FundRecord::new(0, &schema, cells(&["F", "Equity", "Alpha", "1.0", "1200"]));

        let extra: Vec<_> = record.passthrough(&schema).collect();
        assert_eq!(extra, vec![("fund_size_cr", "1200")]);
    }

    #[test]
    fn test_label_falls_back_to_row_number() {
        let mut schema = schema();
        schema.name_idx = None;
        let record =
            FundRecord::new(4, &schema, cells(&["ignored", "Equity", "Alpha", "1.0", "1"]));

        assert_eq!(record.name, "");
        assert_eq!(record.label(), "row 5");
    }
}
