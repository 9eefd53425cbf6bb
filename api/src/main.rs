use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use serde::{Deserialize, Serialize};
use shared_stock_api::{
    AssetRecord,
    profile::DashboardProfile,
    trends::{CategoryShare, RegionInterest},
    util_fns::load_env,
};
use std::env;

mod daily_trends;
mod presentation;

use daily_trends::DailyTrendsCache;

struct AppState {
    http_client: reqwest::Client,
    scout_url: String,
    daily_trends: DailyTrendsCache,
}

#[derive(Debug, Deserialize)]
struct DashboardQuery {
    #[serde(default = "default_profile")]
    profile: String,
    k: Option<String>,
}

fn default_profile() -> String {
    "pro".to_string()
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

// Subsets of the scout responses this service cares about
#[derive(Debug, Deserialize)]
struct ScoutAssets {
    records: Vec<AssetRecord>,
}

#[derive(Debug, Deserialize)]
struct ScoutRegions {
    regions: Vec<RegionInterest>,
}

#[derive(Debug, Deserialize)]
struct ScoutShare {
    share: Vec<CategoryShare>,
}

#[derive(Debug, Deserialize)]
struct ScoutSnapshot {
    refreshed_at: i64,
}

async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "message": "Dashboard API is running"
    }))
}

async fn profiles() -> impl Responder {
    HttpResponse::Ok().json(DashboardProfile::builtin())
}

async fn dashboard(query: web::Query<DashboardQuery>, data: web::Data<AppState>) -> impl Responder {
    let profile = match DashboardProfile::by_name(&query.profile) {
        Some(profile) => profile,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: format!("Unknown profile: {}", query.profile),
            });
        }
    };
    let keyword = query
        .k
        .clone()
        .unwrap_or_else(|| profile.default_keyword.to_string());

    // Sections are gathered independently; a failed upstream empties its
    // section instead of failing the page.
    let daily_trends = data.daily_trends.get().await;
    let records = fetch_assets(&data, &keyword).await;
    let analytics = fetch_analytics(&data, &keyword).await;
    let last_update = fetch_last_update(&data).await;

    HttpResponse::Ok().json(presentation::assemble(
        profile,
        &keyword,
        last_update,
        daily_trends,
        records,
        analytics,
    ))
}

async fn fetch_assets(data: &web::Data<AppState>, keyword: &str) -> Vec<AssetRecord> {
    let url = format!("{}/assets", data.scout_url.trim_end_matches('/'));
    let response = match data
        .http_client
        .get(&url)
        .query(&[("k", keyword)])
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            eprintln!("Failed to reach scout for assets: {}", e);
            return Vec::new();
        }
    };

    match response.json::<ScoutAssets>().await {
        Ok(body) => body.records,
        Err(e) => {
            eprintln!("Invalid assets response from scout: {}", e);
            Vec::new()
        }
    }
}

/// Both analytics panels come from the same upstream; either one failing
/// drops the whole block, like the original page-level guard.
async fn fetch_analytics(
    data: &web::Data<AppState>,
    keyword: &str,
) -> Option<(Vec<RegionInterest>, Vec<CategoryShare>)> {
    let base = data.scout_url.trim_end_matches('/');

    let regions = data
        .http_client
        .get(format!("{}/trends/regions", base))
        .query(&[("k", keyword)])
        .send()
        .await
        .ok()?
        .json::<ScoutRegions>()
        .await
        .ok()?;

    let share = data
        .http_client
        .get(format!("{}/trends/share", base))
        .query(&[("k", keyword)])
        .send()
        .await
        .ok()?
        .json::<ScoutShare>()
        .await
        .ok()?;

    Some((regions.regions, share.share))
}

async fn fetch_last_update(data: &web::Data<AppState>) -> Option<i64> {
    let url = format!("{}/snapshot", data.scout_url.trim_end_matches('/'));
    let snapshot = data
        .http_client
        .get(&url)
        .send()
        .await
        .ok()?
        .json::<ScoutSnapshot>()
        .await
        .ok()?;

    (snapshot.refreshed_at > 0).then_some(snapshot.refreshed_at)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    load_env();

    let host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("API_PORT").unwrap_or_else(|_| "8000".to_string());
    let bind_address = format!("{}:{}", host, port);
    let scout_url = env::var("SCOUT_URL").unwrap_or_else(|_| "http://localhost:8001".to_string());
    let allowed_origins =
        env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string());

    println!("🔒 CORS allowed origins: {}", allowed_origins);

    println!("🚀 Starting Dashboard API server on http://{}", bind_address);
    println!("📝 Routes:");
    println!("   GET  /health         - Health check");
    println!("   GET  /profiles       - Built-in dashboard profiles");
    println!("   GET  /dashboard      - Full dashboard payload");
    println!();
    println!("🔗 Proxying scout at: {}", scout_url);

    let http_client = reqwest::Client::new();

    let app_state = web::Data::new(AppState {
        http_client,
        scout_url,
        daily_trends: DailyTrendsCache::new(),
    });

    HttpServer::new(move || {
        let cors = if allowed_origins.trim() == "*" {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600)
        } else {
            let mut cors = Cors::default()
                .allowed_methods(vec!["GET", "OPTIONS"])
                .allowed_headers(vec![
                    actix_web::http::header::CONTENT_TYPE,
                    actix_web::http::header::ACCEPT,
                ])
                .max_age(3600);

            for origin in allowed_origins.split(',').map(|s| s.trim()) {
                cors = cors.allowed_origin(origin);
            }

            cors
        };

        App::new()
            .wrap(cors)
            .app_data(app_state.clone())
            .route("/health", web::get().to(health_check))
            .route("/profiles", web::get().to(profiles))
            .route("/dashboard", web::get().to(dashboard))
    })
    .bind(&bind_address)?
    .run()
    .await
}
