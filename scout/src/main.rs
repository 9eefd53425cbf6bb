use std::env;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

mod assets;
mod extract;
mod fetch;
mod refresh_loop;
mod stats;
mod trends;

use assets::AssetFetcher;
use refresh_loop::{AssetSnapshot, RefreshLoop, RefreshSettings};
use shared_stock_api::{profile::DashboardProfile, AssetRecord};
use stats::FetchStats;
use trends::TrendsClient;

/// Outer bound on any upstream call; the per-request timeouts are tighter
const CLIENT_TIMEOUT_SECS: u64 = 30;

struct AppState {
    fetcher: AssetFetcher,
    trends: TrendsClient,
    stats: Arc<FetchStats>,
    snapshot: Arc<RwLock<AssetSnapshot>>,
}

#[derive(Debug, Deserialize)]
struct KeywordQuery {
    #[serde(default = "default_keyword")]
    k: String,
}

fn default_keyword() -> String {
    DashboardProfile::pro().default_keyword.to_string()
}

#[derive(Debug, Serialize)]
struct AssetsResponse {
    keyword: String,
    records: Vec<AssetRecord>,
    failed_categories: Vec<&'static str>,
    total: usize,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "message": "Scout service is running"
    }))
}

async fn get_assets(query: web::Query<KeywordQuery>, data: web::Data<AppState>) -> impl Responder {
    info!("Fetching live assets for keyword: {}", query.k);

    let results = data.fetcher.fetch_trending_assets(&query.k).await;
    data.stats.record_fetch(&results);

    let failed_categories: Vec<&'static str> = results
        .failures()
        .iter()
        .map(|f| f.category.label())
        .collect();
    let total = results.len();

    HttpResponse::Ok().json(AssetsResponse {
        keyword: query.k.clone(),
        records: results.into_records(),
        failed_categories,
        total,
    })
}

async fn get_snapshot(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(&*data.snapshot.read().await)
}

async fn trends_regions(
    query: web::Query<KeywordQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    data.stats.inc_trends_requests();
    match data.trends.interest_by_region(&query.k).await {
        Ok(regions) => HttpResponse::Ok().json(serde_json::json!({
            "keyword": query.k,
            "regions": regions,
        })),
        Err(e) => {
            data.stats.inc_trends_failed();
            HttpResponse::BadGateway().json(ErrorResponse {
                error: format!("Failed to query trends: {}", e),
            })
        }
    }
}

async fn trends_share(
    query: web::Query<KeywordQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    data.stats.inc_trends_requests();
    match data.trends.popularity_share(&query.k).await {
        Ok(share) => HttpResponse::Ok().json(serde_json::json!({
            "keyword": query.k,
            "share": share,
        })),
        Err(e) => {
            data.stats.inc_trends_failed();
            HttpResponse::BadGateway().json(ErrorResponse {
                error: format!("Failed to query trends: {}", e),
            })
        }
    }
}

async fn status(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.stats.snapshot())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8001".to_string());
    let bind_address = format!("{}:{}", host, port);
    let refresh_keyword = env::var("REFRESH_KEYWORD")
        .unwrap_or_else(|_| DashboardProfile::pro().default_keyword.to_string());
    let per_category_limit = env::var("RESULTS_PER_CATEGORY")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(assets::RESULTS_PER_CATEGORY);
    let refresh_interval = env::var("REFRESH_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(refresh_loop::DEFAULT_REFRESH_INTERVAL_SECS);

    // One HTTP client for every upstream; the trends endpoints want a
    // cookie jar
    let http_client = Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(CLIENT_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client");

    let stats = Arc::new(FetchStats::new());
    let fetcher = AssetFetcher::new(http_client.clone()).with_limit(per_category_limit);
    let trends = TrendsClient::new(http_client);

    let mut refresh = RefreshLoop::new();
    let snapshot = refresh.snapshot_handle();
    refresh.start(
        fetcher.clone(),
        stats.clone(),
        RefreshSettings::new(refresh_keyword.clone())
            .with_interval(Duration::from_secs(refresh_interval)),
    );

    println!("🚀 Starting Scout server on http://{}", bind_address);
    println!("📝 Routes:");
    println!("   GET  /health          - Health check");
    println!("   GET  /assets          - Live asset search");
    println!("   GET  /snapshot        - Latest background refresh");
    println!("   GET  /trends/regions  - Interest by region");
    println!("   GET  /trends/share    - Popularity share");
    println!("   GET  /status          - Fetch statistics");
    println!();
    println!(
        "🔄 Refreshing '{}' every {} seconds",
        refresh_keyword, refresh_interval
    );

    let app_state = web::Data::new(AppState {
        fetcher,
        trends,
        stats,
        snapshot,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .route("/health", web::get().to(health_check))
            .route("/assets", web::get().to(get_assets))
            .route("/snapshot", web::get().to(get_snapshot))
            .route("/trends/regions", web::get().to(trends_regions))
            .route("/trends/share", web::get().to(trends_share))
            .route("/status", web::get().to(status))
    })
    .bind(&bind_address)?
    .run()
    .await
}
