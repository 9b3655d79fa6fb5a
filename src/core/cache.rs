use crate::core::error::Result;
use crate::core::loader::{LoadOptions, load};
use crate::core::record::FundTable;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Load-once cell for the fund table at a fixed source path.
///
/// The first [`DatasetCache::get_or_load`] reads the file under the lock;
/// later calls share the same `Arc` without touching the disk.
pub struct DatasetCache {
    source: PathBuf,
    options: LoadOptions,
    inner: Mutex<Option<Arc<FundTable>>>,
}

impl DatasetCache {
    pub fn new(source: impl Into<PathBuf>, options: LoadOptions) -> Self {
        Self {
            source: source.into(),
            options,
            inner: Mutex::new(None),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn get_or_load(&self) -> Result<Arc<FundTable>> {
        let mut cached = self.lock();
        if let Some(table) = cached.as_ref() {
            debug!("Dataset cache HIT");
            return Ok(Arc::clone(table));
        }
        debug!("Dataset cache MISS, loading {}", self.source.display());
        let table = Arc::new(load(&self.source, &self.options)?);
        *cached = Some(Arc::clone(&table));
        Ok(table)
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().is_some()
    }

    /// Replaces the cached table, e.g. with a test fixture.
    pub fn inject(&self, table: FundTable) {
        debug!("Dataset cache PUT");
        *self.lock() = Some(Arc::new(table));
    }

    /// Drops the cached table; the next access reloads the source.
    pub fn reset(&self) {
        debug!("Dataset cache RESET");
        *self.lock() = None;
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<FundTable>>> {
        // The cell only ever holds a complete table, so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::FundError;
    use crate::core::loader::load_from_reader;
    use std::fs;
    use std::thread;

    const FUNDS: &str = "category,AMC_name,return_1yr\nEquity,Alpha,5.2\n";

    #[test]
    fn test_cache_loads_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("funds.csv");
        fs::write(&path, FUNDS).unwrap();

        let cache = DatasetCache::new(&path, LoadOptions::default());
        assert!(!cache.is_loaded());

        let first = cache.get_or_load().unwrap();
        // A changed file is not re-read while the table is cached
        fs::write(&path, "category,AMC_name,return_1yr\n").unwrap();
        let second = cache.get_or_load().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_cache_reset_reloads() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("funds.csv");
        fs::write(&path, FUNDS).unwrap();

        let cache = DatasetCache::new(&path, LoadOptions::default());
        assert_eq!(cache.get_or_load().unwrap().len(), 1);

        fs::write(&path, "category,AMC_name,return_1yr\n").unwrap();
        cache.reset();
        assert!(!cache.is_loaded());
        assert_eq!(cache.get_or_load().unwrap().len(), 0);
    }

    #[test]
    fn test_cache_inject_skips_source() {
        let cache = DatasetCache::new("/nonexistent/funds.csv", LoadOptions::default());
        let fixture = load_from_reader(FUNDS.as_bytes(), &LoadOptions::default()).unwrap();

        cache.inject(fixture);
        assert_eq!(cache.get_or_load().unwrap().len(), 1);

        cache.reset();
        let err = cache.get_or_load().unwrap_err();
        assert!(matches!(err, FundError::DataUnavailable { .. }));
    }

    #[test]
    fn test_concurrent_callers_share_one_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("funds.csv");
        fs::write(&path, FUNDS).unwrap();

        let cache = Arc::new(DatasetCache::new(&path, LoadOptions::default()));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get_or_load().unwrap())
            })
            .collect();
        let tables: Vec<Arc<FundTable>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(tables.iter().all(|t| Arc::ptr_eq(t, &tables[0])));
        assert!(Arc::ptr_eq(&tables[0], &cache.get_or_load().unwrap()));
        assert_eq!(tables[0].len(), 1);
    }
}
