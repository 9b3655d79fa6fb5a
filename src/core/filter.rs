//! Filter choices and the cascading category → AMC selection state.

use crate::core::error::{FundError, Result};
use crate::core::record::FundTable;
use std::collections::BTreeSet;
use tracing::debug;

/// Distinct categories in the table, sorted.
pub fn categories(table: &FundTable) -> Vec<String> {
    table
        .records()
        .iter()
        .map(|r| r.category.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Distinct AMCs offering funds in `category`, sorted.
pub fn amcs(table: &FundTable, category: &str) -> Result<Vec<String>> {
    let amcs: BTreeSet<&str> = table
        .records()
        .iter()
        .filter(|r| r.category == category)
        .map(|r| r.amc_name.as_str())
        .collect();

    if amcs.is_empty() {
        return Err(FundError::InvalidCategory(category.to_string()));
    }
    Ok(amcs.into_iter().map(String::from).collect())
}

/// A single user-driven change to the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Category(String),
    Amc(String),
}

/// The user's current category/AMC choice.
///
/// Only [`FilterState::apply`] mutates it, so the AMC is always one that
/// offers funds in the selected category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    category: Option<String>,
    amc_name: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the first category and its first AMC. Stays unset for an
    /// empty table.
    pub fn with_defaults(table: &FundTable) -> Result<Self> {
        let mut state = Self::new();
        if let Some(first) = categories(table).into_iter().next() {
            state.apply(table, FilterChange::Category(first))?;
        }
        Ok(state)
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn amc_name(&self) -> Option<&str> {
        self.amc_name.as_deref()
    }

    /// The `(category, amc_name)` pair once both are chosen.
    pub fn selection(&self) -> Option<(&str, &str)> {
        self.category().zip(self.amc_name())
    }

    pub fn is_complete(&self) -> bool {
        self.selection().is_some()
    }

    /// Applies `change`, recomputing the dependent AMC on category changes.
    ///
    /// A rejected change leaves the state untouched.
    pub fn apply(&mut self, table: &FundTable, change: FilterChange) -> Result<()> {
        match change {
            FilterChange::Category(category) => {
                let options = amcs(table, &category)?;
                let amc_name = match self.amc_name.take() {
                    Some(current) if options.contains(&current) => current,
                    previous => {
                        let first = options.into_iter().next();
                        debug!(
                            ?previous,
                            default = ?first,
                            "AMC not offered in category {category}, resetting"
                        );
                        first.unwrap_or_default()
                    }
                };
                self.category = Some(category);
                self.amc_name = Some(amc_name);
            }
            FilterChange::Amc(amc_name) => {
                let Some(category) = self.category.as_deref() else {
                    return Err(FundError::InvalidAmc {
                        category: String::new(),
                        amc_name,
                    });
                };
                if !amcs(table, category)?.contains(&amc_name) {
                    return Err(FundError::InvalidAmc {
                        category: category.to_string(),
                        amc_name,
                    });
                }
                self.amc_name = Some(amc_name);
            }
        }
        Ok(())
    }
}
