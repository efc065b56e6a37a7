use chart::Theme;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

pub const ENV_API_BASE: &str = "DASHBOARD_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "DASHBOARD_TIMEOUT_SECS";
pub const ENV_THEME: &str = "DASHBOARD_THEME";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub display: DisplayConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Theme,
    pub max_table_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub csv_file: String,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: client::DEFAULT_API_BASE.to_string(),
                request_timeout_secs: 60,
            },
            display: DisplayConfig {
                theme: Theme::Dark,
                max_table_rows: 50,
            },
            export: ExportConfig {
                csv_file: export::DEFAULT_CSV_FILE.to_string(),
                chart_width: 1000,
                chart_height: 500,
            },
        }
    }
}

impl AppConfig {
    /// Defaults overlaid with `DASHBOARD_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Unparseable values are logged and skipped.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = base_url;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.api.request_timeout_secs = secs,
                _ => warn!(var = ENV_TIMEOUT_SECS, value = %raw, "ignoring invalid timeout"),
            }
        }

        if let Some(raw) = lookup(ENV_THEME) {
            match raw.parse::<Theme>() {
                Ok(theme) => self.display.theme = theme,
                Err(e) => warn!(var = ENV_THEME, error = %e, "ignoring invalid theme"),
            }
        }

        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    pub fn chart_size(&self) -> (u32, u32) {
        (self.export.chart_width, self.export.chart_height)
    }
}
