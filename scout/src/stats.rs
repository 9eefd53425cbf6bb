//! Statistics tracking for the scout service
//!
//! Thread-safe atomic counters surfaced on the status endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

use crate::assets::AssetResultSet;

#[derive(Default)]
pub struct FetchStats {
    pub fetches_started: AtomicUsize,
    pub categories_fetched: AtomicUsize,
    pub categories_failed: AtomicUsize,
    pub records_collected: AtomicUsize,
    pub trends_requests: AtomicUsize,
    pub trends_failed: AtomicUsize,
    pub refreshes_completed: AtomicUsize,
}

impl FetchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one completed multi-category fetch
    pub fn record_fetch(&self, results: &AssetResultSet) {
        let failed = results.failures().len();
        let fetched = shared_stock_api::Category::ALL.len() - failed;
        self.fetches_started.fetch_add(1, Ordering::Relaxed);
        self.categories_fetched.fetch_add(fetched, Ordering::Relaxed);
        self.categories_failed.fetch_add(failed, Ordering::Relaxed);
        self.records_collected.fetch_add(results.len(), Ordering::Relaxed);
    }

    pub fn inc_trends_requests(&self) {
        self.trends_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_trends_failed(&self) {
        self.trends_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_refreshes(&self) {
        self.refreshes_completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current stats
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            fetches_started: self.fetches_started.load(Ordering::Relaxed),
            categories_fetched: self.categories_fetched.load(Ordering::Relaxed),
            categories_failed: self.categories_failed.load(Ordering::Relaxed),
            records_collected: self.records_collected.load(Ordering::Relaxed),
            trends_requests: self.trends_requests.load(Ordering::Relaxed),
            trends_failed: self.trends_failed.load(Ordering::Relaxed),
            refreshes_completed: self.refreshes_completed.load(Ordering::Relaxed),
        }
    }
}

/// Serializable snapshot of stats for the status endpoint
#[derive(Serialize, Clone)]
pub struct StatsSnapshot {
    pub fetches_started: usize,
    pub categories_fetched: usize,
    pub categories_failed: usize,
    pub records_collected: usize,
    pub trends_requests: usize,
    pub trends_failed: usize,
    pub refreshes_completed: usize,
}
