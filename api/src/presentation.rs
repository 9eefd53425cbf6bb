//! Dashboard payload assembly
//!
//! Turns profile configuration and the retrieved sections into the single
//! JSON document the presentation layer renders. Wording and palette
//! differences between the dashboard variants come exclusively from the
//! profile; the assembly path is shared.

use serde::Serialize;

use shared_stock_api::{
    profile::{DashboardProfile, Palette},
    trends::{creative_trends_2026, CategoryShare, CreativeTrendList, DailyTrend, RegionInterest},
    AssetRecord,
};

/// Qualitative swatches matching the charting palettes the dashboards use
const BOLD_SWATCHES: [&str; 5] = ["#7F3C8D", "#11A579", "#3969AC", "#F2B701", "#E73F74"];
const PASTEL_SWATCHES: [&str; 5] = ["#66C5CC", "#F6CF71", "#F89C74", "#DCB0F2", "#87C55F"];

pub fn palette_swatches(palette: Palette) -> &'static [&'static str] {
    match palette {
        Palette::Bold => &BOLD_SWATCHES,
        Palette::Pastel => &PASTEL_SWATCHES,
    }
}

/// Column headers for the asset table
#[derive(Debug, Serialize)]
pub struct AssetTableConfig {
    pub category_column: &'static str,
    pub title_column: &'static str,
    pub link_column: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AssetsSection {
    pub heading: String,
    pub table: AssetTableConfig,
    pub records: Vec<AssetRecord>,
    /// Shown instead of the table when no records came back
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsSection {
    pub regions: Vec<RegionInterest>,
    pub share: Vec<CategoryShare>,
    pub swatches: &'static [&'static str],
}

/// The whole dashboard in one document
#[derive(Debug, Serialize)]
pub struct DashboardPayload {
    pub profile: DashboardProfile,
    pub keyword: String,
    /// Unix seconds of the newest background refresh, if one has landed
    pub last_update: Option<i64>,
    pub creative_trends: Vec<CreativeTrendList>,
    pub daily_trends: Vec<DailyTrend>,
    pub assets: AssetsSection,
    /// Absent while the trends upstream is syncing
    pub analytics: Option<AnalyticsSection>,
    pub analytics_notice: Option<&'static str>,
}

pub fn assemble(
    profile: DashboardProfile,
    keyword: &str,
    last_update: Option<i64>,
    daily_trends: Vec<DailyTrend>,
    records: Vec<AssetRecord>,
    analytics: Option<(Vec<RegionInterest>, Vec<CategoryShare>)>,
) -> DashboardPayload {
    let heading = format!("🔍 Live Research: What's selling for '{}'?", keyword);
    let empty_message = if records.is_empty() {
        Some(profile.empty_assets_message)
    } else {
        None
    };

    let (analytics, analytics_notice) = match analytics {
        Some((regions, share)) => (
            Some(AnalyticsSection {
                regions,
                share,
                swatches: palette_swatches(profile.palette),
            }),
            None,
        ),
        None => (None, Some(profile.analytics_syncing_message)),
    };

    DashboardPayload {
        keyword: keyword.to_string(),
        last_update,
        creative_trends: creative_trends_2026(),
        daily_trends,
        assets: AssetsSection {
            heading,
            table: AssetTableConfig {
                category_column: profile.category_column_label,
                title_column: "Trending Title",
                link_column: profile.link_column_label,
            },
            records,
            empty_message,
        },
        analytics,
        analytics_notice,
        profile,
    }
}
