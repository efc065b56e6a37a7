use chart::{ChartData, Theme};
use client::ClientError;
use schema::{QueryResponse, Row};
use tracing::debug;

pub const PROCESSING_LABEL: &str = "Processing...";
pub const ERROR_LABEL: &str = "Error";
pub const ERROR_SUMMARY: &str = "Could not perform the analysis. Please check the backend logs for errors or ensure the area name is valid.";
pub const NO_TREND_DATA: &str = "No trend data available for this query.";
pub const NOT_ENOUGH_COMPARISON_DATA: &str = "Not enough data for comparison.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone)]
pub enum View {
    /// Nothing submitted yet
    Welcome,
    Processing,
    /// Last query failed; summary and table are reset
    Failed,
    Loaded(QueryResponse),
}

/// What the chart panel shows for the current view.
#[derive(Debug, Clone)]
pub enum ChartPanel {
    Trend(ChartData),
    Comparison(ChartData),
    Placeholder(&'static str),
}

impl ChartPanel {
    pub fn chart(&self) -> Option<&ChartData> {
        match self {
            ChartPanel::Trend(chart) | ChartPanel::Comparison(chart) => Some(chart),
            ChartPanel::Placeholder(_) => None,
        }
    }
}

/// View model for the whole dashboard.
#[derive(Debug, Clone)]
pub struct Dashboard {
    view: View,
    error: Option<String>,
    notification: Option<Notification>,
    theme: Theme,
    uploading: bool,
}

impl Dashboard {
    pub fn new(theme: Theme) -> Self {
        Self {
            view: View::Welcome,
            error: None,
            notification: None,
            theme,
            uploading: false,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// A query or upload is in flight; new submissions are refused.
    pub fn is_busy(&self) -> bool {
        self.uploading || matches!(self.view, View::Processing)
    }

    pub fn begin_query(&mut self) {
        self.error = None;
        self.notification = None;
        self.view = View::Processing;
        debug!("query started");
    }

    pub fn finish_query(&mut self, result: Result<QueryResponse, ClientError>) {
        self.view = match result {
            Ok(response) => View::Loaded(response),
            Err(e) => {
                debug!(error = %e, "query failed");
                self.error = Some(e.user_message());
                View::Failed
            }
        };
    }

    pub fn begin_upload(&mut self, file_name: &str) {
        self.uploading = true;
        self.notify(NotificationKind::Info, format!("Uploading {}...", file_name));
    }

    pub fn finish_upload(&mut self, result: Result<String, ClientError>) {
        self.uploading = false;
        match result {
            Ok(message) => self.notify(
                NotificationKind::Success,
                format!("{} Please submit a new query.", message),
            ),
            Err(e) => self.notify(NotificationKind::Error, e.user_message()),
        }
    }

    pub fn notify(&mut self, kind: NotificationKind, message: String) {
        debug!(?kind, %message, "notification");
        self.notification = Some(Notification { kind, message });
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Label shown in the summary heading. Empty before the first query.
    pub fn area_label(&self) -> String {
        match &self.view {
            View::Welcome => String::new(),
            View::Processing => PROCESSING_LABEL.to_string(),
            View::Failed => ERROR_LABEL.to_string(),
            View::Loaded(response) => response.area_label(),
        }
    }

    pub fn summary(&self) -> &str {
        match &self.view {
            View::Welcome | View::Processing => "",
            View::Failed => ERROR_SUMMARY,
            View::Loaded(response) => response.summary(),
        }
    }

    pub fn chart_panel(&self) -> Option<ChartPanel> {
        match &self.view {
            View::Loaded(QueryResponse::Single(result)) => Some(
                ChartData::trend(&result.area, &result.chart)
                    .map(ChartPanel::Trend)
                    .unwrap_or(ChartPanel::Placeholder(NO_TREND_DATA)),
            ),
            View::Loaded(QueryResponse::Comparison(result)) => Some(
                ChartData::comparison(&result.multi_chart_data)
                    .map(ChartPanel::Comparison)
                    .unwrap_or(ChartPanel::Placeholder(NOT_ENOUGH_COMPARISON_DATA)),
            ),
            _ => None,
        }
    }

    /// Detail rows on screen. Comparison results never show a table.
    pub fn table(&self) -> &[Row] {
        match &self.view {
            View::Loaded(response) if !response.is_comparison() => response.table(),
            _ => &[],
        }
    }

    pub fn shows_table(&self) -> bool {
        !self.table().is_empty()
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn single() -> QueryResponse {
        QueryResponse::from_value(json!({
            "area": "Wakad",
            "summary": "Market Analysis Report for: Wakad",
            "chart": {"years": ["2020", "2021"], "rates": {"overall": [1.0, 2.0]}, "demand": [3, 4]},
            "table": [{"id": 1, "year": 2020}]
        }))
        .unwrap()
    }

    fn comparison(areas: usize) -> QueryResponse {
        let names: Vec<String> = (0..areas).map(|i| format!("Area {}", i)).collect();
        let charts: Vec<_> = names
            .iter()
            .map(|n| json!({"area": n, "chart": {"years": ["2020"], "rates": {"overall": [1.0]}, "demand": [1]}}))
            .collect();
        QueryResponse::from_value(json!({
            "comparison_areas": names,
            "summary": "Comparison analysis",
            "multi_chart_data": charts,
            "table": [{"id": 1, "year": 2020}]
        }))
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let dashboard = Dashboard::default();
        assert!(matches!(dashboard.view(), View::Welcome));
        assert_eq!(dashboard.area_label(), "");
        assert!(dashboard.chart_panel().is_none());
        assert!(!dashboard.is_busy());
        assert_eq!(dashboard.theme(), Theme::Dark);
    }

    #[test]
    fn test_query_lifecycle_single() {
        let mut dashboard = Dashboard::default();
        dashboard.begin_query();
        assert!(dashboard.is_busy());
        assert_eq!(dashboard.area_label(), PROCESSING_LABEL);

        dashboard.finish_query(Ok(single()));
        assert!(!dashboard.is_busy());
        assert_eq!(dashboard.area_label(), "Wakad");
        assert!(matches!(dashboard.chart_panel(), Some(ChartPanel::Trend(_))));
        assert!(dashboard.shows_table());
    }

    #[test]
    fn test_comparison_suppresses_table() {
        let mut dashboard = Dashboard::default();
        dashboard.begin_query();
        dashboard.finish_query(Ok(comparison(2)));

        assert_eq!(dashboard.area_label(), "Comparison: Area 0, Area 1");
        assert!(matches!(dashboard.chart_panel(), Some(ChartPanel::Comparison(_))));
        assert!(!dashboard.shows_table());
        assert!(dashboard.table().is_empty());
    }

    #[test]
    fn test_single_area_comparison_placeholder() {
        let mut dashboard = Dashboard::default();
        dashboard.finish_query(Ok(comparison(1)));
        match dashboard.chart_panel() {
            Some(ChartPanel::Placeholder(text)) => assert_eq!(text, NOT_ENOUGH_COMPARISON_DATA),
            other => panic!("unexpected panel: {:?}", other),
        }
    }

    #[test]
    fn test_empty_trend_placeholder() {
        let mut dashboard = Dashboard::default();
        let response = QueryResponse::from_value(json!({
            "area": "Baner", "summary": "", "chart": {"years": [], "rates": {}, "demand": []}, "table": []
        }))
        .unwrap();
        dashboard.finish_query(Ok(response));

        match dashboard.chart_panel() {
            Some(ChartPanel::Placeholder(text)) => assert_eq!(text, NO_TREND_DATA),
            other => panic!("unexpected panel: {:?}", other),
        }
        assert!(!dashboard.shows_table());
    }

    #[test]
    fn test_failed_query_resets_view() {
        let mut dashboard = Dashboard::default();
        dashboard.finish_query(Ok(single()));

        dashboard.begin_query();
        dashboard.finish_query(Err(ClientError::Server {
            status: 404,
            message: "No data found for Nowhere within the specified time range.".to_string(),
        }));

        assert_eq!(dashboard.area_label(), ERROR_LABEL);
        assert_eq!(dashboard.summary(), ERROR_SUMMARY);
        assert_eq!(
            dashboard.error(),
            Some("No data found for Nowhere within the specified time range.")
        );
        assert!(dashboard.table().is_empty());
        assert!(dashboard.chart_panel().is_none());
        assert!(!dashboard.is_busy());
    }

    #[test]
    fn test_new_query_clears_error_and_notification() {
        let mut dashboard = Dashboard::default();
        dashboard.finish_query(Err(ClientError::UnsupportedFile("x.txt".to_string())));
        dashboard.notify(NotificationKind::Info, "hello".to_string());

        dashboard.begin_query();
        assert!(dashboard.error().is_none());
        assert!(dashboard.notification().is_none());
    }

    #[test]
    fn test_upload_notifications() {
        let mut dashboard = Dashboard::default();
        dashboard.begin_upload("pune.xlsx");
        assert!(dashboard.is_busy());
        assert_eq!(
            dashboard.notification().unwrap(),
            &Notification {
                kind: NotificationKind::Info,
                message: "Uploading pune.xlsx...".to_string()
            }
        );

        dashboard.finish_upload(Ok("Dataset uploaded successfully: dataset.xlsx.".to_string()));
        assert!(!dashboard.is_busy());
        let note = dashboard.notification().unwrap();
        assert_eq!(note.kind, NotificationKind::Success);
        assert_eq!(
            note.message,
            "Dataset uploaded successfully: dataset.xlsx. Please submit a new query."
        );

        dashboard.finish_upload(Err(ClientError::UnsupportedFile("a.pdf".to_string())));
        assert_eq!(dashboard.notification().unwrap().kind, NotificationKind::Error);

        dashboard.dismiss_notification();
        assert!(dashboard.notification().is_none());
    }

    #[test]
    fn test_theme_toggle() {
        let mut dashboard = Dashboard::new(Theme::Light);
        assert_eq!(dashboard.toggle_theme(), Theme::Dark);
        assert_eq!(dashboard.theme(), Theme::Dark);
    }
}
