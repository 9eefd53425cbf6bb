//! The live-asset fetcher: one keyword in, a normalized table of records
//! out. Categories are fetched sequentially and fail independently; a
//! category that errors is recorded and skipped, never fatal.

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use shared_stock_api::{AssetRecord, Category, STOCK_BASE_URL};

use crate::extract::extract_asset_records;
use crate::fetch::{fetch_page, FetchError};

/// Results kept per category. Deliberately low: the upstream is hit on
/// every dashboard refresh and two rows per category fill the table.
pub const RESULTS_PER_CATEGORY: usize = 2;

/// One category that contributed nothing, and why
#[derive(Debug)]
pub struct CategoryFailure {
    pub category: Category,
    pub error: FetchError,
}

/// Everything one invocation produced: flattened records in category
/// iteration order, plus the per-category failures recorded on the way.
#[derive(Debug, Default)]
pub struct AssetResultSet {
    records: Vec<AssetRecord>,
    failures: Vec<CategoryFailure>,
}

impl AssetResultSet {
    pub fn records(&self) -> &[AssetRecord] {
        &self.records
    }

    pub fn failures(&self) -> &[CategoryFailure] {
        &self.failures
    }

    pub fn into_records(self) -> Vec<AssetRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Stateless multi-category search client for the stock site.
#[derive(Clone)]
pub struct AssetFetcher {
    client: Client,
    base_url: Url,
    per_category_limit: usize,
}

impl AssetFetcher {
    pub fn new(client: Client) -> Self {
        let base_url = Url::parse(STOCK_BASE_URL).expect("valid stock base url");
        Self::with_base_url(client, base_url)
    }

    /// Point the fetcher at a different origin (tests, mirrors)
    pub fn with_base_url(client: Client, base_url: Url) -> Self {
        Self {
            client,
            base_url,
            per_category_limit: RESULTS_PER_CATEGORY,
        }
    }

    pub fn with_limit(mut self, per_category_limit: usize) -> Self {
        self.per_category_limit = per_category_limit;
        self
    }

    /// Search URL for one category. The query serializer form-encodes the
    /// keyword, so spaces come out as `+` and never raw.
    fn search_url(&self, category: Category, keyword: &str) -> Result<Url, FetchError> {
        let mut url = self
            .base_url
            .join(&format!("search/{}", category.path_segment()))?;
        url.query_pairs_mut()
            .append_pair("k", keyword)
            .append_pair("order", "relevance");
        Ok(url)
    }

    async fn fetch_category(
        &self,
        category: Category,
        keyword: &str,
    ) -> Result<Vec<AssetRecord>, FetchError> {
        let url = self.search_url(category, keyword)?;
        debug!("Fetching {} results from {}", category.label(), url);
        let html = fetch_page(&self.client, &url).await?;
        Ok(extract_asset_records(
            &html,
            &self.base_url,
            category,
            self.per_category_limit,
        ))
    }

    /// Query every category for `keyword` and collect whatever succeeds.
    ///
    /// Never returns an error and never panics past this boundary; the
    /// worst case is an empty result set with three recorded failures.
    /// No retries are attempted within an invocation.
    pub async fn fetch_trending_assets(&self, keyword: &str) -> AssetResultSet {
        let mut results = AssetResultSet::default();

        for category in Category::ALL {
            match self.fetch_category(category, keyword).await {
                Ok(records) => results.records.extend(records),
                Err(error) => {
                    warn!("Skipping category {}: {}", category.label(), error);
                    results.failures.push(CategoryFailure { category, error });
                }
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const IMAGES_PAGE: &str = r#"
        <html><body>
            <a class="js-search-result-link" href="/images/id/1">
                <img alt="Futuristic tech background">
            </a>
            <a class="js-search-result-link" href="/images/id/2">
                <img alt="Abstract tech grid">
            </a>
        </body></html>
    "#;

    fn fetcher_for(server: &MockServer) -> AssetFetcher {
        let base = Url::parse(&server.uri()).unwrap();
        AssetFetcher::with_base_url(Client::new(), base)
    }

    fn offline_fetcher() -> AssetFetcher {
        AssetFetcher::with_base_url(Client::new(), Url::parse("https://stock.adobe.com").unwrap())
    }

    #[test]
    fn test_search_url_escapes_spaces() {
        let url = offline_fetcher()
            .search_url(Category::PhotosImages, "solar energy")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://stock.adobe.com/search/images?k=solar+energy&order=relevance"
        );
        assert!(!url.as_str().contains(' '));
    }

    #[test]
    fn test_search_url_accepts_empty_keyword() {
        let url = offline_fetcher().search_url(Category::Videos, "").unwrap();
        assert_eq!(
            url.as_str(),
            "https://stock.adobe.com/search/video?k=&order=relevance"
        );
    }

    #[tokio::test]
    async fn test_end_to_end_partial_failure() {
        // images returns two hits, video errors, vectors has no matches
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/images"))
            .and(query_param("k", "tech"))
            .and(query_param("order", "relevance"))
            .respond_with(ResponseTemplate::new(200).set_body_string(IMAGES_PAGE))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search/video"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search/vectors"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
            .mount(&server)
            .await;

        let results = fetcher_for(&server).fetch_trending_assets("tech").await;

        assert_eq!(results.len(), 2);
        assert!(results
            .records()
            .iter()
            .all(|r| r.category == Category::PhotosImages));
        assert_eq!(results.records()[0].title, "Futuristic tech background");
        assert_eq!(results.records()[1].title, "Abstract tech grid");
        assert_eq!(results.failures().len(), 1);
        assert_eq!(results.failures()[0].category, Category::Videos);
    }

    #[tokio::test]
    async fn test_first_category_failure_does_not_stop_the_rest() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/images"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let video_page = r#"<a class="js-search-result-link" href="/video/id/9"><img alt="Drone clip"></a>"#;
        Mock::given(method("GET"))
            .and(path("/search/video"))
            .respond_with(ResponseTemplate::new(200).set_body_string(video_page))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search/vectors"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let results = fetcher_for(&server).fetch_trending_assets("city").await;

        assert_eq!(results.len(), 1);
        assert_eq!(results.records()[0].category, Category::Videos);
        assert_eq!(results.failures().len(), 1);
        assert_eq!(results.failures()[0].category, Category::PhotosImages);
    }

    #[tokio::test]
    async fn test_truncates_extra_results_per_category() {
        let server = MockServer::start().await;
        let three_hits = r#"
            <a class="js-search-result-link" href="/images/id/1"><img alt="one"></a>
            <a class="js-search-result-link" href="/images/id/2"><img alt="two"></a>
            <a class="js-search-result-link" href="/images/id/3"><img alt="three"></a>
        "#;
        Mock::given(method("GET"))
            .and(path("/search/images"))
            .respond_with(ResponseTemplate::new(200).set_body_string(three_hits))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let results = fetcher_for(&server).fetch_trending_assets("mesh").await;

        assert_eq!(results.len(), RESULTS_PER_CATEGORY);
        assert_eq!(results.records()[1].title, "two");
    }

    #[tokio::test]
    async fn test_unreachable_origin_yields_empty_set() {
        let base = Url::parse("http://127.0.0.1:1/").unwrap();
        let fetcher = AssetFetcher::with_base_url(Client::new(), base);

        let results = fetcher.fetch_trending_assets("tech").await;

        assert!(results.is_empty());
        assert_eq!(results.failures().len(), Category::ALL.len());
    }
}
