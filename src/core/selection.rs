use crate::core::record::{FundRecord, FundTable};

/// Records whose category and AMC both match exactly, in dataset order.
///
/// An empty result is a valid "no matching funds" outcome, not an error.
pub fn select<'a>(table: &'a FundTable, category: &str, amc_name: &str) -> Vec<&'a FundRecord> {
    table
        .records()
        .iter()
        .filter(|r| r.category == category && r.amc_name == amc_name)
        .collect()
}
