//! Dashboard profile configuration.
//!
//! The two dashboard variants differ only cosmetically; each difference
//! lives here as data so a single assembly path serves both.

use serde::Serialize;

/// Qualitative chart palette a profile renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    Bold,
    Pastel,
}

/// Everything that distinguishes one dashboard variant from the other.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardProfile {
    pub name: &'static str,
    pub page_title: &'static str,
    pub default_keyword: &'static str,
    /// Header of the asset-type column ("Asset Type" vs "Category")
    pub category_column_label: &'static str,
    /// Header of the rendered link column
    pub link_column_label: &'static str,
    pub palette: Palette,
    pub status_line: &'static str,
    /// Shown in place of the asset table while it has no rows
    pub empty_assets_message: &'static str,
    /// Shown when the analytics upstream is unavailable
    pub analytics_syncing_message: &'static str,
}

impl DashboardProfile {
    /// The "Intelligence Pro" variant
    pub fn pro() -> Self {
        Self {
            name: "pro",
            page_title: "Adobe Stock Intelligence Pro",
            default_keyword: "tech",
            category_column_label: "Asset Type",
            link_column_label: "View on Adobe Stock",
            palette: Palette::Bold,
            status_line: "Market Status: Live",
            empty_assets_message: "Loading live data from Adobe...",
            analytics_syncing_message:
                "Google Trends is syncing. Use the Tables above while charts load.",
        }
    }

    /// The "Intelligence 2026" variant
    pub fn intelligence_2026() -> Self {
        Self {
            name: "intelligence-2026",
            page_title: "Adobe Stock Intelligence 2026",
            default_keyword: "nature",
            category_column_label: "Category",
            link_column_label: "View on Adobe Stock",
            palette: Palette::Pastel,
            status_line: "Status: Live",
            empty_assets_message:
                "Loading live data from Adobe... Please enter a topic in the sidebar.",
            analytics_syncing_message:
                "Google Trends is resting. Charts will auto-load in next refresh.",
        }
    }

    pub fn builtin() -> Vec<DashboardProfile> {
        vec![Self::pro(), Self::intelligence_2026()]
    }

    pub fn by_name(name: &str) -> Option<DashboardProfile> {
        Self::builtin().into_iter().find(|p| p.name == name)
    }
}
