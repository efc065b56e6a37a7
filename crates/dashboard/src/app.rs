use anyhow::{bail, Context, Result};
use chart::Theme;
use client::{ClientError, DashboardClient};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::config::AppConfig;
use crate::render::{self, PROCESSING};
use crate::state::{Dashboard, NotificationKind};

/// Spinner on stderr while `fut` runs. Hidden when stderr is not a terminal.
async fn with_spinner<F, T>(message: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));

    let output = fut.await;
    bar.finish_and_clear();
    output
}

/// One dashboard session: configuration, API client and view model.
pub struct App {
    config: AppConfig,
    client: DashboardClient,
    dashboard: Dashboard,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = DashboardClient::new(config.api.base_url.clone(), config.request_timeout())
            .context("Failed to build HTTP client")?;
        let dashboard = Dashboard::new(config.display.theme);

        info!(api = client.base_url(), theme = %config.display.theme, "dashboard ready");
        Ok(Self {
            config,
            client,
            dashboard,
        })
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn render(&self) -> String {
        render::render(&self.dashboard, self.config.display.max_table_rows)
    }

    /// Submit a query. Blank input or a busy dashboard is ignored; returns
    /// whether the query was sent.
    pub async fn submit_query(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() || self.dashboard.is_busy() {
            return false;
        }

        self.dashboard.begin_query();
        let result = with_spinner(PROCESSING, self.client.query(text)).await;
        self.dashboard.finish_query(result);
        true
    }

    /// Upload a dataset. Files outside the accept filter are refused with a
    /// notification and never sent.
    pub async fn upload(&mut self, path: &Path) {
        if self.dashboard.is_busy() {
            return;
        }
        if let Err(e) = client::dataset_kind(path) {
            self.dashboard.notify(NotificationKind::Error, e.user_message());
            return;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.dashboard.begin_upload(&file_name);

        let message = format!("Uploading {}...", file_name);
        let result = with_spinner(&message, self.client.upload(path)).await;
        self.dashboard.finish_upload(result);
    }

    pub async fn list_areas(&self) -> Result<Vec<String>, ClientError> {
        with_spinner("Loading areas...", self.client.list_areas()).await
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.dashboard.toggle_theme()
    }

    pub fn dismiss_notification(&mut self) {
        self.dashboard.dismiss_notification();
    }

    /// Export the displayed table, defaulting to the configured file name.
    pub fn export_csv(&self, path: Option<&Path>) -> Result<PathBuf> {
        if !self.dashboard.shows_table() {
            bail!("There is no table to export. Run a single-area query first.");
        }

        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(&self.config.export.csv_file));
        export::export_csv(self.dashboard.table(), &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Export the current chart as PNG, defaulting to `<stem>.png`.
    pub fn export_png(&self, path: Option<&Path>) -> Result<PathBuf> {
        let Some(panel) = self.dashboard.chart_panel() else {
            bail!("There is no chart to export. Run a query first.");
        };
        let Some(chart) = panel.chart() else {
            bail!("There is no chart data to export for this query.");
        };

        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(format!("{}.png", chart.file_stem)));
        chart::render_png(chart, &path, self.config.chart_size(), self.dashboard.theme())
            .with_context(|| format!("Failed to render {}", path.display()))?;
        Ok(path)
    }
}
