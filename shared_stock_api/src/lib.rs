use serde::{Deserialize, Serialize};

pub mod profile;
pub mod trends;
pub mod util_fns;

/// Origin every asset link is resolved against
pub const STOCK_BASE_URL: &str = "https://stock.adobe.com";

/// Field names for asset records on the wire
pub mod fields {
    pub const CATEGORY: &str = "category";
    pub const TITLE: &str = "title";
    pub const LINK: &str = "link";
}

/// Title used when a result carries no descriptive text
pub const FALLBACK_TITLE: &str = "View Asset";

/// The fixed set of searchable asset categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Photos/Images")]
    PhotosImages,
    #[serde(rename = "Videos")]
    Videos,
    #[serde(rename = "Vectors")]
    Vectors,
}

impl Category {
    /// Iteration order for multi-category fetches
    pub const ALL: [Category; 3] = [Category::PhotosImages, Category::Videos, Category::Vectors];

    /// Path segment on the search endpoint
    pub fn path_segment(&self) -> &'static str {
        match self {
            Category::PhotosImages => "images",
            Category::Videos => "video",
            Category::Vectors => "vectors",
        }
    }

    /// Label shown in the dashboard table
    pub fn label(&self) -> &'static str {
        match self {
            Category::PhotosImages => "Photos/Images",
            Category::Videos => "Videos",
            Category::Vectors => "Vectors",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Category::ALL.iter().copied().find(|c| c.label() == label)
    }
}

/// One scraped search result. Only ever built from a fully parsed
/// candidate; there is no partially populated state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub category: Category,
    pub title: String,
    pub link: String,
}

impl AssetRecord {
    pub fn new(category: Category, title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            category,
            title: title.into(),
            link: link.into(),
        }
    }

    /// Field names in table column order
    pub fn field_names() -> Vec<&'static str> {
        vec![fields::CATEGORY, fields::TITLE, fields::LINK]
    }

    /// Convert to a JSON object keyed by the shared field names
    pub fn to_properties_json(&self) -> serde_json::Value {
        serde_json::json!({
            fields::CATEGORY: self.category.label(),
            fields::TITLE: self.title,
            fields::LINK: self.link,
        })
    }

    /// Parse from a JSON object keyed by the shared field names.
    /// Returns None unless category and link are both present and valid.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let category = value
            .get(fields::CATEGORY)
            .and_then(|v| v.as_str())
            .and_then(Category::from_label)?;
        let link = value.get(fields::LINK).and_then(|v| v.as_str())?.to_string();
        let title = value
            .get(fields::TITLE)
            .and_then(|v| v.as_str())
            .unwrap_or(FALLBACK_TITLE)
            .to_string();

        Some(Self {
            category,
            title,
            link,
        })
    }
}
