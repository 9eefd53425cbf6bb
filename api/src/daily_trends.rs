//! Daily global trends table
//!
//! A curated table, memoized with a TTL so repeated dashboard loads within
//! the hour serve the same rows without rebuilding.

use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use shared_stock_api::trends::{DailyTrend, TrendStatus};

pub const DAILY_TRENDS_TTL_SECS: u64 = 3600;

fn build_table() -> Vec<DailyTrend> {
    vec![
        DailyTrend::new(1, "AI Abstract Backgrounds", TrendStatus::Breakout),
        DailyTrend::new(2, "Solar Energy Solutions", TrendStatus::Rising),
        DailyTrend::new(3, "Mental Health Awareness", TrendStatus::Rising),
        DailyTrend::new(4, "Cryptocurrency 3D Icons", TrendStatus::Breakout),
        DailyTrend::new(5, "Organic Texture Patterns", TrendStatus::Stable),
    ]
}

/// TTL cache around the daily trends table
pub struct DailyTrendsCache {
    ttl: Duration,
    cached: RwLock<Option<(Instant, Vec<DailyTrend>)>>,
}

impl DailyTrendsCache {
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(DAILY_TRENDS_TTL_SECS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            cached: RwLock::new(None),
        }
    }

    pub async fn get(&self) -> Vec<DailyTrend> {
        // Fast path with read lock
        {
            let cached = self.cached.read().await;
            if let Some((built, rows)) = cached.as_ref() {
                if built.elapsed() < self.ttl {
                    return rows.clone();
                }
            }
        }

        // Expired or empty: rebuild with write lock
        let mut cached = self.cached.write().await;
        // Double-check after acquiring the write lock
        if let Some((built, rows)) = cached.as_ref() {
            if built.elapsed() < self.ttl {
                return rows.clone();
            }
        }
        let rows = build_table();
        *cached = Some((Instant::now(), rows.clone()));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_table_shape() {
        let cache = DailyTrendsCache::new();
        let rows = cache.get().await;

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].topic, "AI Abstract Backgrounds");
        assert_eq!(rows[4].status, TrendStatus::Stable);
        let ranks: Vec<u32> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_cache_serves_within_ttl() {
        let cache = DailyTrendsCache::with_ttl(Duration::from_secs(60));
        let first = cache.get().await;
        let second = cache.get().await;
        assert_eq!(first, second);
        assert!(cache.cached.read().await.is_some());
    }

    #[tokio::test]
    async fn test_cache_rebuilds_after_expiry() {
        let cache = DailyTrendsCache::with_ttl(Duration::from_millis(1));
        cache.get().await;
        let stamp_one = cache.cached.read().await.as_ref().unwrap().0;
        tokio::time::sleep(Duration::from_millis(5)).await;
        cache.get().await;
        let stamp_two = cache.cached.read().await.as_ref().unwrap().0;
        assert!(stamp_two > stamp_one);
    }
}
