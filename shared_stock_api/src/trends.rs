//! Trend vocabulary shared between the scout service and the dashboard API.

use serde::{Deserialize, Serialize};

/// Momentum bucket for a daily trend topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStatus {
    Breakout,
    Rising,
    Stable,
}

impl TrendStatus {
    /// Display string used in the dashboard table
    pub fn display(&self) -> &'static str {
        match self {
            TrendStatus::Breakout => "🔥 Breakout",
            TrendStatus::Rising => "📈 Rising",
            TrendStatus::Stable => "✅ Stable",
        }
    }
}

/// One row of the daily global trends table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTrend {
    pub rank: u32,
    pub topic: String,
    pub status: TrendStatus,
}

impl DailyTrend {
    pub fn new(rank: u32, topic: impl Into<String>, status: TrendStatus) -> Self {
        Self {
            rank,
            topic: topic.into(),
            status,
        }
    }
}

/// One entry of a curated creative-trend panel
#[derive(Debug, Clone, Serialize)]
pub struct CreativeTrend {
    pub name: &'static str,
    pub blurb: &'static str,
}

/// A curated panel of creative trends
#[derive(Debug, Clone, Serialize)]
pub struct CreativeTrendList {
    pub heading: &'static str,
    pub entries: Vec<CreativeTrend>,
}

/// The static "Creative Trends 2026" panels both dashboards display.
pub fn creative_trends_2026() -> Vec<CreativeTrendList> {
    vec![
        CreativeTrendList {
            heading: "🔥 High Demand (Hot Topics)",
            entries: vec![
                CreativeTrend {
                    name: "AI Hyper-Realism",
                    blurb: "Photorealistic textures.",
                },
                CreativeTrend {
                    name: "Eco-Minimalism",
                    blurb: "Sustainability visuals.",
                },
                CreativeTrend {
                    name: "Cyberpunk 2.0",
                    blurb: "Neon-drenched futuristic cityscapes.",
                },
            ],
        },
        CreativeTrendList {
            heading: "📈 Global Growth Keywords",
            entries: vec![
                CreativeTrend {
                    name: "Inclusivity & Diversity",
                    blurb: "Authentic emotions.",
                },
                CreativeTrend {
                    name: "3D Abstract Geometry",
                    blurb: "Clean isometric vectors.",
                },
                CreativeTrend {
                    name: "Retro-Futurism",
                    blurb: "80s style mixed with modern tech.",
                },
            ],
        },
    ]
}

/// Search interest for one region, on the usual 0-100 scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionInterest {
    pub geo_name: String,
    pub value: u32,
}

/// Mean interest for one derived keyword over the analytics window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryShare {
    pub label: String,
    pub popularity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(TrendStatus::Breakout.display(), "🔥 Breakout");
        assert_eq!(TrendStatus::Stable.display(), "✅ Stable");
    }

    #[test]
    fn test_creative_panels_shape() {
        let panels = creative_trends_2026();
        assert_eq!(panels.len(), 2);
        assert!(panels.iter().all(|p| p.entries.len() == 3));
    }
}
