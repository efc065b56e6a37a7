use anyhow::{bail, Result};
use clap::Parser;
use dashboard::cli::{self, Cli, CliCommand};
use dashboard::state::{NotificationKind, View};
use dashboard::{repl, App};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_tracing(cli.log_format);

    let config = cli.config();
    info!(api = %config.api.base_url, timeout_secs = config.api.request_timeout_secs, "starting");
    let mut app = App::new(config)?;

    match cli.command {
        None | Some(CliCommand::Repl) => repl::run(&mut app).await?,
        Some(CliCommand::Query { text, csv, png }) => {
            app.submit_query(&text.join(" ")).await;
            println!("{}", app.render());

            if let View::Failed = app.dashboard().view() {
                bail!("{}", app.dashboard().error().unwrap_or("Query failed"));
            }
            if let Some(path) = csv {
                let path = app.export_csv(Some(&path))?;
                println!("Saved table to {}", path.display());
            }
            if let Some(path) = png {
                let path = app.export_png(Some(&path))?;
                println!("Saved chart to {}", path.display());
            }
        }
        Some(CliCommand::Upload { path }) => {
            app.upload(&path).await;
            let Some(note) = app.dashboard().notification() else {
                bail!("Upload produced no response");
            };
            if note.kind == NotificationKind::Error {
                bail!("{}", note.message);
            }
            println!("{}", note.message);
        }
        Some(CliCommand::Areas) => {
            let areas = app.list_areas().await.map_err(|e| anyhow::anyhow!(e.user_message()))?;
            for area in areas {
                println!("{}", area);
            }
        }
    }

    Ok(())
}
