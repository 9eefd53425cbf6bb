//! Background refresh of the default dashboard keyword.
//!
//! The fetcher itself is stateless and knows nothing about scheduling;
//! this loop is the collaborator that re-invokes it on a fixed interval
//! and keeps the latest snapshot around for the snapshot endpoint.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tokio::{sync::RwLock, task::JoinHandle, time::sleep};

use shared_stock_api::AssetRecord;

use crate::assets::AssetFetcher;
use crate::stats::FetchStats;

/// Default rebuild interval. Ten minutes keeps the upstream services from
/// blocking us.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 600;

pub struct RefreshSettings {
    pub interval: Duration,
    pub keyword: String,
}

impl RefreshSettings {
    pub fn new(keyword: impl Into<String>) -> Self {
        RefreshSettings {
            interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
            keyword: keyword.into(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Latest completed refresh, served while the next one is pending.
/// `refreshed_at` is unix seconds; zero means no refresh has finished yet.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetSnapshot {
    pub keyword: String,
    pub records: Vec<AssetRecord>,
    pub refreshed_at: i64,
}

/// Owns the background task. Dropping the loop stops it.
pub struct RefreshLoop {
    snapshot: Arc<RwLock<AssetSnapshot>>,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshLoop {
    pub fn new() -> Self {
        RefreshLoop {
            snapshot: Arc::new(RwLock::new(AssetSnapshot::default())),
            shutdown: Arc::new(AtomicBool::new(true)),
            handle: None,
        }
    }

    /// Shared handle to the latest snapshot, for the service state.
    pub fn snapshot_handle(&self) -> Arc<RwLock<AssetSnapshot>> {
        self.snapshot.clone()
    }

    /// Spawn the background task. It refreshes immediately, then sleeps
    /// the configured interval between rounds until `stop` is called.
    pub fn start(&mut self, fetcher: AssetFetcher, stats: Arc<FetchStats>, settings: RefreshSettings) {
        if self.handle.is_some() {
            // already started
            return;
        }

        let snapshot = self.snapshot.clone();
        let shutdown = self.shutdown.clone();

        let handle = tokio::spawn(async move {
            loop {
                if !shutdown.load(Ordering::SeqCst) {
                    tracing::info!("refresh loop shutting down");
                    break;
                }

                let results = fetcher.fetch_trending_assets(&settings.keyword).await;
                stats.record_fetch(&results);
                stats.inc_refreshes();
                tracing::info!(
                    "refreshed '{}': {} records, {} categories failed",
                    settings.keyword,
                    results.len(),
                    results.failures().len()
                );

                let refreshed_at = unix_now();
                {
                    let mut snap = snapshot.write().await;
                    *snap = AssetSnapshot {
                        keyword: settings.keyword.clone(),
                        records: results.into_records(),
                        refreshed_at,
                    };
                }

                sleep(settings.interval).await;
            }
        });

        self.handle = Some(handle);
    }

    /// Signal shutdown and abort the task so the process can exit promptly.
    pub fn stop(&mut self) {
        self.shutdown.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for RefreshLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;
    use url::Url;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_refresh_populates_snapshot() {
        let server = MockServer::start().await;
        let page = r#"<a class="js-search-result-link" href="/images/id/1"><img alt="hit"></a>"#;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page))
            .mount(&server)
            .await;

        let fetcher =
            AssetFetcher::with_base_url(Client::new(), Url::parse(&server.uri()).unwrap());
        let stats = Arc::new(FetchStats::new());
        let mut refresh = RefreshLoop::new();
        let snapshot = refresh.snapshot_handle();

        refresh.start(
            fetcher,
            stats.clone(),
            RefreshSettings::new("tech").with_interval(Duration::from_secs(60)),
        );

        // First round runs immediately; poll until it lands
        let mut refreshed = false;
        for _ in 0..50 {
            if snapshot.read().await.refreshed_at > 0 {
                refreshed = true;
                break;
            }
            sleep(Duration::from_millis(20)).await;
        }
        refresh.stop();

        assert!(refreshed);
        let snap = snapshot.read().await;
        assert_eq!(snap.keyword, "tech");
        // One record per category: the mock answers every path
        assert_eq!(snap.records.len(), 3);
        assert_eq!(stats.snapshot().refreshes_completed, 1);
    }
}
