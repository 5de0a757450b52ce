//! Hosted-database rows and their mapping onto [`Signal`].

use chrono::{DateTime, Utc};
use feed_logging::feed_debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use signal_core::{
    ChartPayload, CorrelationPoint, Impact, MarketMapPoint, Metric, MetricTrend, RelatedSignal,
    RevenuePoint, Signal, SignalAnnex, SignalCategory, SignalId, SourceCitation, TableData,
    DEFAULT_SCORE, DEFAULT_SOURCE,
};

pub const SUMMARY_CHARS: usize = 150;
pub const DEFAULT_CATEGORY: &str = "market";
pub const NO_SUMMARY: &str = "No summary available.";
pub const NO_ANALYSIS: &str = "Full analysis content would appear here.";

/// One row of the `signals` table as returned by the REST endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignalRow {
    pub id: SignalId,
    #[serde(default)]
    pub type_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Kept as raw JSON; see [`RowMetadata::from_value`].
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// Free-form `metadata` JSON column. Every field is optional.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowMetadata {
    pub source: Option<String>,
    pub score: Option<u32>,
    pub impact: Option<Impact>,
    pub metrics: Option<Vec<Metric>>,
    pub sources: Option<Vec<SourceCitation>>,
    pub related_signals: Vec<RelatedSignal>,
    pub table_data: Option<TableData>,
    pub chart_type: Option<String>,
    pub revenue_data: Option<Vec<RevenuePoint>>,
    pub correlation_data: Option<CorrelationMeta>,
    pub market_map_data: Option<MarketMapMeta>,
}

impl RowMetadata {
    /// Reads each field on its own. A field that is null or malformed counts
    /// as absent instead of failing the whole row.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            if !value.is_null() {
                feed_debug!("Ignoring non-object row metadata: {}", value);
            }
            return Self::default();
        };
        let field = |key: &str| object.get(key);
        Self {
            source: lenient(field("source")),
            score: lenient(field("score")),
            impact: lenient(field("impact")),
            metrics: lenient(field("metrics")),
            sources: lenient(field("sources")),
            related_signals: lenient::<Vec<RelatedSignal>>(field("relatedSignals"))
                .unwrap_or_default(),
            table_data: lenient(field("tableData")),
            chart_type: lenient(field("chartType")),
            revenue_data: lenient(field("revenueData")),
            correlation_data: lenient(field("correlationData")),
            market_map_data: lenient(field("marketMapData")),
        }
    }
}

fn lenient<T: DeserializeOwned>(value: Option<&Value>) -> Option<T> {
    let value = value.filter(|v| !v.is_null())?;
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            feed_debug!("Ignoring malformed metadata field {}: {}", value, err);
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationMeta {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<CorrelationPoint>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketMapMeta {
    pub x_label: String,
    pub y_label: String,
    pub quadrants: [String; 4],
    pub points: Vec<MarketMapPoint>,
}

/// Maps a row onto the view-independent signal model, filling the gaps the
/// dashboard has always filled.
pub fn normalize_row(row: SignalRow) -> Signal {
    let meta = row
        .metadata
        .as_ref()
        .map(RowMetadata::from_value)
        .unwrap_or_default();
    let content = row.content.filter(|c| !c.is_empty());

    let summary = content
        .as_deref()
        .map(|c| c.chars().take(SUMMARY_CHARS).collect())
        .unwrap_or_else(|| NO_SUMMARY.to_string());
    let full_analysis = content.unwrap_or_else(|| NO_ANALYSIS.to_string());

    let category = row
        .type_id
        .filter(|t| !t.trim().is_empty())
        .map(|t| SignalCategory::from_key(&t))
        .unwrap_or_else(|| SignalCategory::Other(DEFAULT_CATEGORY.to_string()));

    let chart = chart_from_meta(
        &row.id,
        meta.chart_type.as_deref(),
        meta.revenue_data,
        meta.correlation_data,
        meta.market_map_data,
    );

    Signal {
        id: row.id,
        category,
        title: row.title,
        published_at: row.published_at.unwrap_or(row.created_at),
        source: meta
            .source
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        score: meta.score.filter(|s| *s > 0).unwrap_or(DEFAULT_SCORE),
        impact: meta.impact.unwrap_or_default(),
        summary,
        full_analysis,
        annex: SignalAnnex {
            metrics: meta.metrics.unwrap_or_else(default_metrics),
            sources: meta.sources.unwrap_or_else(default_sources),
            related: meta.related_signals,
            table: meta.table_data,
            chart,
        },
    }
}

pub fn normalize_rows(rows: Vec<SignalRow>) -> Vec<Signal> {
    rows.into_iter().map(normalize_row).collect()
}

fn chart_from_meta(
    id: &SignalId,
    chart_type: Option<&str>,
    revenue: Option<Vec<RevenuePoint>>,
    correlation: Option<CorrelationMeta>,
    market_map: Option<MarketMapMeta>,
) -> Option<ChartPayload> {
    let chart = match chart_type? {
        "revenue" => Some(ChartPayload::Revenue {
            points: revenue.unwrap_or_default(),
        }),
        "correlation" => correlation.map(|c| ChartPayload::Correlation {
            x_label: c.x_label,
            y_label: c.y_label,
            points: c.points,
        }),
        "marketMap" => market_map.map(|m| ChartPayload::MarketMap {
            x_label: m.x_label,
            y_label: m.y_label,
            quadrants: m.quadrants,
            points: m.points,
        }),
        _ => None,
    };
    if chart.is_none() {
        feed_debug!("Signal {} declares chart {:?} without usable data", id, chart_type);
    }
    chart
}

fn default_metrics() -> Vec<Metric> {
    vec![
        Metric {
            label: "Relevance".to_string(),
            value: "High".to_string(),
            change: "+5%".to_string(),
            trend: MetricTrend::Positive,
        },
        Metric {
            label: "Urgency".to_string(),
            value: "Immediate".to_string(),
            change: "0%".to_string(),
            trend: MetricTrend::Neutral,
        },
    ]
}

fn default_sources() -> Vec<SourceCitation> {
    vec![SourceCitation {
        name: "Source A".to_string(),
        url: "#".to_string(),
    }]
}
