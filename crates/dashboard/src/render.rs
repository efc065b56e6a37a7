use chart::ChartData;
use export::TableView;
use std::fmt::Write;

use crate::state::{ChartPanel, Dashboard, NotificationKind, View};

pub const TITLE: &str = "Real Estate Market Dashboard";
pub const WELCOME: &str = "Welcome! Submit a query like \"Analyze Wakad\" or \"Compare Ambegaon Budruk and Aundh\" to get started.";
pub const PROCESSING: &str = "Processing query... This may take a moment.";

/// Render the whole dashboard as plain text.
pub fn render(dashboard: &Dashboard, max_table_rows: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", TITLE);

    if let Some(note) = dashboard.notification() {
        let tag = match note.kind {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        };
        let _ = writeln!(out, "[{}] {}", tag, note.message);
    }

    if let Some(error) = dashboard.error() {
        let _ = writeln!(out, "Error! {}", error);
    }

    match dashboard.view() {
        View::Welcome => {
            let _ = writeln!(out, "\n{}", WELCOME);
        }
        View::Processing => {
            let _ = writeln!(out, "\n{}", PROCESSING);
        }
        View::Failed => {
            let _ = writeln!(out, "\n{}", dashboard.summary());
        }
        View::Loaded(_) => {
            render_summary(&mut out, dashboard);
            if let Some(panel) = dashboard.chart_panel() {
                render_chart_panel(&mut out, &panel);
            }
            if dashboard.shows_table() {
                render_table(&mut out, &TableView::new(dashboard.table()), max_table_rows);
            }
        }
    }

    out
}

fn render_summary(out: &mut String, dashboard: &Dashboard) {
    let _ = writeln!(out, "\n-- Analysis Summary: {} --", dashboard.area_label());
    let summary = dashboard.summary();
    if summary.is_empty() {
        let _ = writeln!(out, "Submit a query to see the real estate analysis summary here.");
    } else {
        let _ = writeln!(out, "{}", summary);
    }
}

fn render_chart_panel(out: &mut String, panel: &ChartPanel) {
    match panel {
        ChartPanel::Placeholder(text) => {
            let _ = writeln!(out, "\n{}", text);
        }
        ChartPanel::Trend(chart) | ChartPanel::Comparison(chart) => {
            let _ = writeln!(out, "\n-- {} --", chart.heading);
            out.push_str(&chart_grid(chart));
        }
    }
}

/// Chart data as a year-by-dataset grid; gaps show as `-`.
pub fn chart_grid(chart: &ChartData) -> String {
    let mut headers = vec!["Year".to_string()];
    headers.extend(chart.datasets.iter().map(|d| d.label.clone()));

    let rows: Vec<Vec<String>> = chart
        .labels
        .iter()
        .enumerate()
        .map(|(i, year)| {
            let mut row = vec![year.clone()];
            row.extend(
                chart
                    .datasets
                    .iter()
                    .map(|d| format_value(d.values.get(i).copied().flatten())),
            );
            row
        })
        .collect();

    format_grid(&headers, &rows)
}

fn render_table(out: &mut String, table: &TableView<'_>, max_rows: usize) {
    let _ = writeln!(out, "\n-- Filtered Detailed Data ({} rows) --", table.len());
    let mut rows = table.display_rows();
    let hidden = rows.len().saturating_sub(max_rows);
    rows.truncate(max_rows);

    out.push_str(&format_grid(&table.headers(), &rows));
    if hidden > 0 {
        let _ = writeln!(out, "... {} more rows (use :csv to export all)", hidden);
    }
}

pub fn format_value(value: Option<f64>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
        Some(v) => format!("{:.2}", v),
    }
}

/// Left-aligned columns separated by ` | `, with a rule under the header.
pub fn format_grid(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!("{:<width$}", cell, width = *w)
            })
            .collect();
        padded.join(" | ").trim_end().to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", line(headers));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for row in rows {
        let _ = writeln!(out, "{}", line(row.as_slice()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use client::ClientError;
    use schema::QueryResponse;
    use serde_json::json;

    fn loaded(payload: serde_json::Value) -> Dashboard {
        let mut dashboard = Dashboard::default();
        dashboard.begin_query();
        dashboard.finish_query(Ok(QueryResponse::from_value(payload).unwrap()));
        dashboard
    }

    #[test]
    fn test_welcome_screen() {
        let text = render(&Dashboard::default(), 10);
        assert!(text.contains(TITLE));
        assert!(text.contains(WELCOME));
    }

    #[test]
    fn test_single_area_renders_chart_and_table() {
        let dashboard = loaded(json!({
            "area": "Wakad",
            "summary": "Market Analysis Report for: Wakad",
            "chart": {"years": ["2020", "2021"], "rates": {"overall": [5000.5, null]}, "demand": [10, 12]},
            "table": [{"id": 1, "final location": "wakad", "year": 2020}]
        }));

        let text = render(&dashboard, 10);
        assert!(text.contains("Analysis Summary: Wakad"));
        assert!(text.contains("Price & Demand Trends"));
        assert!(text.contains("5000.50"));
        assert!(text.contains("Filtered Detailed Data (1 rows)"));
        assert!(text.contains("Final Location"));
        assert!(!text.contains("| 1 |"));
    }

    #[test]
    fn test_comparison_renders_without_table() {
        let dashboard = loaded(json!({
            "comparison_areas": ["Aundh", "Wakad"],
            "summary": "Comparison analysis for: Aundh, Wakad",
            "multi_chart_data": [
                {"area": "Aundh", "chart": {"years": ["2019", "2020"], "rates": {"overall": [10.0, 11.0]}}},
                {"area": "Wakad", "chart": {"years": ["2020", "2021"], "rates": {"overall": [20.0, 21.0]}}}
            ],
            "table": [{"year": 2020}]
        }));

        let text = render(&dashboard, 10);
        assert!(text.contains("Price Comparison: Aundh vs Wakad"));
        assert!(text.contains("Aundh - Avg Rate"));
        assert!(!text.contains("Filtered Detailed Data"));
    }

    #[test]
    fn test_failed_query_screen() {
        let mut dashboard = Dashboard::default();
        dashboard.begin_query();
        dashboard.finish_query(Err(ClientError::Server {
            status: 404,
            message: "No data found for the areas specified in the comparison query.".to_string(),
        }));

        let text = render(&dashboard, 10);
        assert!(text.contains("Error! No data found for the areas specified in the comparison query."));
        assert!(text.contains("Could not perform the analysis."));
        assert!(!text.contains("Analysis Summary"));
    }

    #[test]
    fn test_table_truncation() {
        let rows: Vec<serde_json::Value> = (0..5).map(|i| json!({"n": i})).collect();
        let dashboard = loaded(json!({"area": "Baner", "summary": "s", "chart": {}, "table": rows}));

        let text = render(&dashboard, 2);
        assert!(text.contains("... 3 more rows"));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(None), "-");
        assert_eq!(format_value(Some(120.0)), "120");
        assert_eq!(format_value(Some(5123.456)), "5123.46");
    }

    #[test]
    fn test_format_grid_alignment() {
        let grid = format_grid(
            &["Year".to_string(), "Rate".to_string()],
            &[vec!["2020".to_string(), "10".to_string()], vec!["2021".to_string(), "-".to_string()]],
        );
        assert_eq!(grid, "Year | Rate\n-----+-----\n2020 | 10\n2021 | -\n");
    }
}
