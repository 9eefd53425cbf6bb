use scraper::{Html, Selector};
use url::Url;

use shared_stock_api::{AssetRecord, Category, FALLBACK_TITLE};

/// CSS selector matching one result link on a search page
const RESULT_LINK_SELECTOR: &str = "a.js-search-result-link";

/// Pull up to `limit` asset records out of a search results page.
///
/// Candidates without an href are skipped rather than half-built; a
/// missing thumbnail or alt text falls back to the placeholder title.
pub fn extract_asset_records(
    html: &str,
    base: &Url,
    category: Category,
    limit: usize,
) -> Vec<AssetRecord> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse(RESULT_LINK_SELECTOR).unwrap();
    let img_selector = Selector::parse("img").unwrap();
    let mut records = Vec::new();

    for element in document.select(&link_selector).take(limit) {
        let href = match element.value().attr("href") {
            Some(href) => href,
            None => continue,
        };
        // Resolve against the site origin; hrefs on result pages are relative
        let link = match base.join(href) {
            Ok(absolute) => absolute.to_string(),
            Err(_) => continue,
        };

        let title = element
            .select(&img_selector)
            .next()
            .and_then(|img| img.value().attr("alt"))
            .map(|alt| alt.trim().to_string())
            .filter(|alt| !alt.is_empty())
            .unwrap_or_else(|| FALLBACK_TITLE.to_string());

        records.push(AssetRecord::new(category, title, link));
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://stock.adobe.com").unwrap()
    }

    #[test]
    fn test_extracts_title_and_absolute_link() {
        let html = r#"
            <html><body>
                <a class="js-search-result-link" href="/images/id/100">
                    <img alt="Solar farm at dusk">
                </a>
            </body></html>
        "#;
        let records = extract_asset_records(html, &base(), Category::PhotosImages, 2);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Solar farm at dusk");
        assert_eq!(records[0].link, "https://stock.adobe.com/images/id/100");
        assert_eq!(records[0].category, Category::PhotosImages);
    }

    #[test]
    fn test_no_matches_yields_no_records() {
        let html = "<html><body><a href=\"/images/id/1\">plain link</a></body></html>";
        let records = extract_asset_records(html, &base(), Category::Videos, 2);
        assert!(records.is_empty());
    }

    #[test]
    fn test_truncates_to_limit() {
        let html = r#"
            <a class="js-search-result-link" href="/v/1"><img alt="one"></a>
            <a class="js-search-result-link" href="/v/2"><img alt="two"></a>
            <a class="js-search-result-link" href="/v/3"><img alt="three"></a>
        "#;
        let records = extract_asset_records(html, &base(), Category::Videos, 2);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "one");
        assert_eq!(records[1].title, "two");

        // Exactly at the limit nothing is dropped
        let html_two = r#"
            <a class="js-search-result-link" href="/v/1"><img alt="one"></a>
            <a class="js-search-result-link" href="/v/2"><img alt="two"></a>
        "#;
        let records = extract_asset_records(html_two, &base(), Category::Videos, 2);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_missing_alt_falls_back() {
        let html = r#"<a class="js-search-result-link" href="/vec/5"><img></a>"#;
        let records = extract_asset_records(html, &base(), Category::Vectors, 2);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, FALLBACK_TITLE);
    }

    #[test]
    fn test_missing_img_falls_back() {
        let html = r#"<a class="js-search-result-link" href="/vec/6">bare</a>"#;
        let records = extract_asset_records(html, &base(), Category::Vectors, 2);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, FALLBACK_TITLE);
    }

    #[test]
    fn test_missing_href_is_skipped() {
        let html = r#"
            <a class="js-search-result-link"><img alt="no link"></a>
            <a class="js-search-result-link" href="/images/id/2"><img alt="kept"></a>
        "#;
        let records = extract_asset_records(html, &base(), Category::PhotosImages, 2);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "kept");
    }
}
