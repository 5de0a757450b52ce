use std::fmt::Write;

use signal_core::{
    ChartPayload, DashboardViewModel, Impact, Notice, NoticeLevel, SignalDetailView,
};

pub fn render_notices(notices: &[Notice]) -> String {
    let mut out = String::new();
    for notice in notices {
        let marker = match notice.level {
            NoticeLevel::Success => "+",
            NoticeLevel::Info => "-",
            NoticeLevel::Error => "!",
        };
        let _ = writeln!(out, "[{marker}] {}", notice.message);
    }
    out
}

pub fn render_list(view: &DashboardViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({} of {})", view.heading, view.rows.len(), view.total);
    if !view.search_query.is_empty() {
        let _ = writeln!(out, "search: {:?}", view.search_query);
    }

    let categories: Vec<String> = view
        .categories
        .iter()
        .map(|c| {
            let mark = if c.active { "*" } else { "" };
            format!("{}{} ({})", mark, c.label, c.count)
        })
        .collect();
    if !categories.is_empty() {
        let _ = writeln!(out, "categories: {}", categories.join(", "));
    }
    out.push('\n');

    for row in &view.rows {
        let cursor = if row.selected { ">" } else { " " };
        let star = if row.saved { "*" } else { " " };
        let _ = writeln!(
            out,
            "{cursor}{star} {:>6}  {}  {:<18} {:<6} {}",
            row.id.to_string(),
            row.published,
            row.category_label,
            impact_label(row.impact),
            row.title
        );
    }

    if let Some(empty) = &view.empty_state {
        let _ = writeln!(out, "{}", empty.message);
        if empty.can_clear_filters {
            let _ = writeln!(out, "Run `list` without filters to clear them.");
        }
    }
    out
}

pub fn render_detail(detail: &SignalDetailView) -> String {
    let signal = &detail.signal;
    let mut out = String::new();
    let saved = if detail.saved { " [saved]" } else { "" };
    let _ = writeln!(out, "#{} {}{}", signal.id, signal.title, saved);
    let _ = writeln!(
        out,
        "{} | {} impact | {}",
        signal.category.label(),
        impact_label(signal.impact),
        signal.published_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(out, "Source: {} | score {}", signal.source, signal.score);
    if let Some(definition) = detail.category_definition {
        let _ = writeln!(out, "{definition}");
    }
    let _ = writeln!(out, "\n{}\n\n{}", signal.summary, signal.full_analysis.trim());

    let annex = &signal.annex;
    if !annex.metrics.is_empty() {
        let _ = writeln!(out, "\nMetrics");
        for metric in &annex.metrics {
            let _ = writeln!(
                out,
                "  {:<20} {:>10} {:>8} ({:?})",
                metric.label, metric.value, metric.change, metric.trend
            );
        }
    }
    if let Some(table) = &annex.table {
        let _ = writeln!(out, "\n{}", table.headers.join(" | "));
        for row in &table.rows {
            let _ = writeln!(out, "{}", row.join(" | "));
        }
    }
    if let Some(chart) = &annex.chart {
        let _ = writeln!(out, "\nChart: {}", chart_summary(chart));
    }
    if !annex.sources.is_empty() {
        let _ = writeln!(out, "\nSources");
        for source in &annex.sources {
            let _ = writeln!(out, "  {} <{}>", source.name, source.url);
        }
    }
    if !detail.related.is_empty() {
        let _ = writeln!(out, "\nRelated");
        for related in &detail.related {
            let missing = if related.available { "" } else { " (not loaded)" };
            let _ = writeln!(
                out,
                "  #{} {} - {}{}",
                related.id, related.title, related.date, missing
            );
        }
    }
    out
}

fn chart_summary(chart: &ChartPayload) -> String {
    match chart {
        ChartPayload::Revenue { points } => format!("revenue trend, {} points", points.len()),
        ChartPayload::Correlation {
            x_label,
            y_label,
            points,
        } => format!("{y_label} vs {x_label}, {} points", points.len()),
        ChartPayload::MarketMap {
            x_label,
            y_label,
            points,
            ..
        } => format!("market map {x_label} / {y_label}, {} players", points.len()),
    }
}

fn impact_label(impact: Impact) -> &'static str {
    match impact {
        Impact::High => "high",
        Impact::Medium => "medium",
        Impact::Low => "low",
    }
}
