use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a signal. Hosted rows use opaque strings, fixtures use small integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalId {
    Num(u64),
    Text(String),
}

impl SignalId {
    /// Parses user input: all-digit text becomes a numeric id.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<u64>() {
            Ok(n) => SignalId::Num(n),
            Err(_) => SignalId::Text(raw.to_string()),
        }
    }
}

impl From<u64> for SignalId {
    fn from(value: u64) -> Self {
        SignalId::Num(value)
    }
}

impl From<&str> for SignalId {
    fn from(value: &str) -> Self {
        SignalId::Text(value.to_string())
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalId::Num(n) => write!(f, "{n}"),
            SignalId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SignalCategory {
    Academic,
    Industrial,
    Pricing,
    Competitor,
    Regulation,
    /// Open category key from live data.
    Other(String),
}

impl SignalCategory {
    pub fn from_key(key: &str) -> Self {
        let key = key.trim();
        match key.to_ascii_lowercase().as_str() {
            "academic" => SignalCategory::Academic,
            "industrial" => SignalCategory::Industrial,
            "pricing" => SignalCategory::Pricing,
            "competitor" => SignalCategory::Competitor,
            "regulation" => SignalCategory::Regulation,
            _ => SignalCategory::Other(key.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            SignalCategory::Academic => "academic",
            SignalCategory::Industrial => "industrial",
            SignalCategory::Pricing => "pricing",
            SignalCategory::Competitor => "competitor",
            SignalCategory::Regulation => "regulation",
            SignalCategory::Other(key) => key,
        }
    }

    /// Human-readable label; this is what free-text search matches against.
    pub fn label(&self) -> &str {
        match self {
            SignalCategory::Academic => "Academic Research",
            SignalCategory::Industrial => "Competitive Move",
            SignalCategory::Pricing => "Pricing Update",
            SignalCategory::Competitor => "Competitor Intel",
            SignalCategory::Regulation => "Regulation Alert",
            SignalCategory::Other(key) => key,
        }
    }

    pub fn definition(&self) -> Option<&'static str> {
        match self {
            SignalCategory::Academic => Some(
                "Deep dives into the latest academic papers and research breakthroughs that characterize the bleeding edge of technology.",
            ),
            SignalCategory::Industrial => Some(
                "Strategic analysis of major market moves, mergers, acquisitions, and broad industrial shifts affecting the sector.",
            ),
            SignalCategory::Pricing => Some(
                "Detailed tracking of competitor pricing models, SKU changes, and discounting strategies across the vertical.",
            ),
            SignalCategory::Competitor => Some(
                "Real-time intelligence on competitor product launches, feature updates, and go-to-market strategy adjustments.",
            ),
            SignalCategory::Regulation => Some(
                "Alerts on new legislative frameworks, compliance deadlines, and regulatory risks affecting AI and data privacy.",
            ),
            SignalCategory::Other(_) => None,
        }
    }
}

impl From<String> for SignalCategory {
    fn from(value: String) -> Self {
        SignalCategory::from_key(&value)
    }
}

impl From<SignalCategory> for String {
    fn from(value: SignalCategory) -> Self {
        value.key().to_string()
    }
}

impl fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricTrend {
    Positive,
    Negative,
    #[default]
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub change: String,
    #[serde(default)]
    pub trend: MetricTrend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedSignal {
    pub id: SignalId,
    pub title: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
    #[serde(default)]
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMapPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChartPayload {
    Revenue {
        points: Vec<RevenuePoint>,
    },
    #[serde(rename_all = "camelCase")]
    Correlation {
        x_label: String,
        y_label: String,
        points: Vec<CorrelationPoint>,
    },
    /// Quadrants are ordered top-right, top-left, bottom-left, bottom-right.
    #[serde(rename_all = "camelCase")]
    MarketMap {
        x_label: String,
        y_label: String,
        quadrants: [String; 4],
        points: Vec<MarketMapPoint>,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignalAnnex {
    pub metrics: Vec<Metric>,
    pub sources: Vec<SourceCitation>,
    pub related: Vec<RelatedSignal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartPayload>,
}

/// Attribution shown when a record names no source.
pub const DEFAULT_SOURCE: &str = "SotA Intelligence";
/// Relevance score assumed when a record carries none.
pub const DEFAULT_SCORE: u32 = 95;

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_score() -> u32 {
    DEFAULT_SCORE
}

/// A single intelligence item. Immutable once handed to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub id: SignalId,
    #[serde(rename = "type")]
    pub category: SignalCategory,
    pub title: String,
    pub published_at: DateTime<Utc>,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_score")]
    pub score: u32,
    #[serde(default)]
    pub impact: Impact,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub full_analysis: String,
    #[serde(default)]
    pub annex: SignalAnnex,
}
