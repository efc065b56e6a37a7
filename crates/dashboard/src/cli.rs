use chart::Theme;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "dashboard", version, about = "Real estate market dashboard for the analytics API")]
pub struct Cli {
    /// Base URL of the analytics API, e.g. http://127.0.0.1:8000/api
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Chart theme (dark or light)
    #[arg(long, global = true)]
    pub theme: Option<Theme>,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Interactive session (default)
    Repl,
    /// Run one query and print the result
    Query {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Also save the detail table as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Also save the chart as PNG
        #[arg(long)]
        png: Option<PathBuf>,
    },
    /// Upload a dataset (.xlsx, .xls or .csv)
    Upload { path: PathBuf },
    /// List the areas in the loaded dataset
    Areas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Cli {
    /// Environment-derived config with command line flags on top.
    pub fn config(&self) -> AppConfig {
        self.apply(AppConfig::from_env())
    }

    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(base_url) = &self.api_base {
            config.api.base_url = base_url.clone();
        }
        if let Some(secs) = self.timeout_secs.filter(|s| *s > 0) {
            config.api.request_timeout_secs = secs;
        }
        if let Some(theme) = self.theme {
            config.display.theme = theme;
        }
        config
    }
}

/// Logs go to stderr so they never mix with the rendered dashboard.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
