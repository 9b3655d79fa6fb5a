//! Composes the pipeline behind the operations a front end calls.

use crate::core::cache::DatasetCache;
use crate::core::error::{FundError, Result};
use crate::core::export::{Export, ExportOptions, serialize};
use crate::core::filter::{self, FilterState};
use crate::core::loader::LoadOptions;
use crate::core::ranking::RankedView;
use crate::core::record::FundTable;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

pub struct Explorer {
    dataset: DatasetCache,
}

impl Explorer {
    pub fn new(source: impl Into<PathBuf>, options: LoadOptions) -> Self {
        Self {
            dataset: DatasetCache::new(source, options),
        }
    }

    /// An explorer over an already loaded table.
    pub fn with_table(table: FundTable) -> Self {
        let explorer = Self::new(PathBuf::new(), LoadOptions::default());
        explorer.dataset.inject(table);
        explorer
    }

    pub fn dataset(&self) -> &DatasetCache {
        &self.dataset
    }

    pub fn table(&self) -> Result<Arc<FundTable>> {
        self.dataset.get_or_load()
    }

    pub fn categories(&self) -> Result<Vec<String>> {
        Ok(filter::categories(&*self.table()?))
    }

    pub fn amcs(&self, category: &str) -> Result<Vec<String>> {
        filter::amcs(&*self.table()?, category)
    }

    /// Ranked funds for a combination the resolver offers.
    pub fn view(&self, category: &str, amc_name: &str) -> Result<RankedView> {
        let table = self.table()?;
        if !filter::amcs(&table, category)?
            .iter()
            .any(|a| a == amc_name)
        {
            return Err(FundError::InvalidAmc {
                category: category.to_string(),
                amc_name: amc_name.to_string(),
            });
        }
        Ok(RankedView::new(table, category, amc_name))
    }

    /// Ranked funds for a complete filter, or `None` while it is incomplete.
    pub fn view_for(&self, state: &FilterState) -> Result<Option<RankedView>> {
        match state.selection() {
            Some((category, amc_name)) => self.view(category, amc_name).map(Some),
            None => {
                debug!("Filter incomplete: {state:?}");
                Ok(None)
            }
        }
    }

    pub fn export(&self, view: &RankedView, options: ExportOptions) -> Result<Export> {
        serialize(
            view.table().schema(),
            &view.rows(),
            view.category(),
            view.amc_name(),
            options,
        )
    }
}
