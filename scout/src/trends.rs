//! Google Trends retrieval for the analytics panels.
//!
//! Speaks the unofficial widget API: one explore call to obtain widget
//! tokens, then one widgetdata call per panel. Every JSON body arrives
//! behind a `)]}'` guard prefix that must be stripped before parsing.

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;
use url::Url;

use shared_stock_api::trends::{CategoryShare, RegionInterest};

use crate::fetch::USER_AGENT;

pub const TRENDS_BASE_URL: &str = "https://trends.google.com";

/// Locale and timezone offset the dashboards request
const HL: &str = "en-US";
const TZ: i32 = 360;
/// Rolling window shown on the dashboard
const TIMEFRAME: &str = "now 7-d";
const REQUEST_TIMEOUT_SECS: u64 = 25;
/// Attempts per request; the trends endpoints shed load with transient errors
const MAX_ATTEMPTS: usize = 3;
const RETRY_DELAY_MS: u64 = 250;

/// Rows kept for the regions panel
const REGION_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum TrendsError {
    #[error("invalid trends url: {0}")]
    Url(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no {0} widget in explore response")]
    MissingWidget(&'static str),
    #[error("malformed response: {0}")]
    Malformed(&'static str),
}

/// Client for the two analytics feeds: interest by region and the
/// image/video/vector popularity share.
#[derive(Clone)]
pub struct TrendsClient {
    client: Client,
    base_url: String,
}

impl TrendsClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, TRENDS_BASE_URL)
    }

    /// Point the client at a different host (tests)
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Top regions searching for `keyword`, strongest first.
    pub async fn interest_by_region(&self, keyword: &str) -> Result<Vec<RegionInterest>, TrendsError> {
        let explore = self.explore(&[keyword.to_string()]).await?;
        let widget = find_widget(&explore, "GEO_MAP")?;
        let url = self.widget_url("trends/api/widgetdata/comparedgeo", &widget)?;
        let data = self.get_json(url).await?;
        Ok(parse_geo_response(&data))
    }

    /// Mean interest over the window for the three derived keywords
    /// `<kw> image`, `<kw> video`, `<kw> vector`.
    pub async fn popularity_share(&self, keyword: &str) -> Result<Vec<CategoryShare>, TrendsError> {
        let derived: Vec<String> = ["image", "video", "vector"]
            .iter()
            .map(|suffix| format!("{} {}", keyword, suffix))
            .collect();
        let explore = self.explore(&derived).await?;
        let widget = find_widget(&explore, "TIMESERIES")?;
        let url = self.widget_url("trends/api/widgetdata/multiline", &widget)?;
        let data = self.get_json(url).await?;
        parse_timeline_means(&data, &derived)
    }

    /// One explore round-trip: returns the widget list for the keywords.
    async fn explore(&self, keywords: &[String]) -> Result<Value, TrendsError> {
        let comparison: Vec<Value> = keywords
            .iter()
            .map(|kw| json!({ "keyword": kw, "time": TIMEFRAME, "geo": "" }))
            .collect();
        let req = json!({ "comparisonItem": comparison, "category": 0, "property": "" });

        let mut url = Url::parse(&self.base_url)?.join("trends/api/explore")?;
        url.query_pairs_mut()
            .append_pair("hl", HL)
            .append_pair("tz", &TZ.to_string())
            .append_pair("req", &req.to_string());
        self.get_json(url).await
    }

    fn widget_url(&self, endpoint: &str, widget: &Widget) -> Result<Url, TrendsError> {
        let mut url = Url::parse(&self.base_url)?.join(endpoint)?;
        url.query_pairs_mut()
            .append_pair("hl", HL)
            .append_pair("tz", &TZ.to_string())
            .append_pair("req", &widget.request.to_string())
            .append_pair("token", &widget.token);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value, TrendsError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_get_json(&url).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < MAX_ATTEMPTS => {
                    debug!("Trends request attempt {} failed: {}", attempt, e);
                    tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn try_get_json(&self, url: &Url) -> Result<Value, TrendsError> {
        let response = self
            .client
            .get(url.clone())
            .header("User-Agent", USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TrendsError::Status(response.status()));
        }

        parse_guarded_json(&response.text().await?)
    }
}

struct Widget {
    token: String,
    request: Value,
}

/// Strip the `)]}'` guard and parse what remains.
fn parse_guarded_json(body: &str) -> Result<Value, TrendsError> {
    let start = body
        .find('{')
        .ok_or(TrendsError::Malformed("no json object in body"))?;
    Ok(serde_json::from_str(&body[start..])?)
}

fn find_widget(explore: &Value, id: &'static str) -> Result<Widget, TrendsError> {
    let widgets = explore
        .get("widgets")
        .and_then(|w| w.as_array())
        .ok_or(TrendsError::Malformed("widgets"))?;

    for widget in widgets {
        if widget.get("id").and_then(|v| v.as_str()) != Some(id) {
            continue;
        }
        let token = widget
            .get("token")
            .and_then(|v| v.as_str())
            .ok_or(TrendsError::Malformed("widget token"))?;
        let request = widget
            .get("request")
            .cloned()
            .ok_or(TrendsError::Malformed("widget request"))?;
        return Ok(Widget {
            token: token.to_string(),
            request,
        });
    }

    Err(TrendsError::MissingWidget(id))
}

/// Expected shape: { default: { geoMapData: [ { geoName, value: [n] } ] } }
fn parse_geo_response(data: &Value) -> Vec<RegionInterest> {
    let mut regions = Vec::new();

    if let Some(items) = data
        .get("default")
        .and_then(|d| d.get("geoMapData"))
        .and_then(|g| g.as_array())
    {
        for item in items {
            let geo_name = item.get("geoName").and_then(|v| v.as_str());
            let value = item
                .get("value")
                .and_then(|v| v.as_array())
                .and_then(|a| a.first())
                .and_then(|v| v.as_u64());
            if let (Some(geo_name), Some(value)) = (geo_name, value) {
                regions.push(RegionInterest {
                    geo_name: geo_name.to_string(),
                    value: value as u32,
                });
            }
        }
    }

    regions.sort_by(|a, b| b.value.cmp(&a.value));
    regions.truncate(REGION_LIMIT);
    regions
}

/// Expected shape: { default: { timelineData: [ { value: [a, b, c] } ] } }
fn parse_timeline_means(data: &Value, labels: &[String]) -> Result<Vec<CategoryShare>, TrendsError> {
    let timeline = data
        .get("default")
        .and_then(|d| d.get("timelineData"))
        .and_then(|t| t.as_array())
        .ok_or(TrendsError::Malformed("timelineData"))?;

    let mut sums = vec![0.0_f64; labels.len()];
    let mut points = 0usize;
    for entry in timeline {
        if let Some(values) = entry.get("value").and_then(|v| v.as_array()) {
            for (i, value) in values.iter().take(labels.len()).enumerate() {
                sums[i] += value.as_f64().unwrap_or(0.0);
            }
            points += 1;
        }
    }
    if points == 0 {
        return Err(TrendsError::Malformed("empty timeline"));
    }

    Ok(labels
        .iter()
        .zip(sums)
        .map(|(label, sum)| CategoryShare {
            label: label.clone(),
            popularity: sum / points as f64,
        })
        .collect())
}
