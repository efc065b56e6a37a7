use anyhow::Result;
use client::ACCEPTED_EXTENSIONS;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(String),
    Upload(PathBuf),
    Areas,
    Theme,
    Csv(Option<PathBuf>),
    Png(Option<PathBuf>),
    Dismiss,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Lines starting with `:` are commands; anything else is a query.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Query(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    let path_arg = || (!arg.is_empty()).then(|| PathBuf::from(arg));

    match name {
        "upload" | "u" => match path_arg() {
            Some(path) => Command::Upload(path),
            None => Command::Unknown(":upload needs a file path".to_string()),
        },
        "areas" | "a" => Command::Areas,
        "theme" | "t" => Command::Theme,
        "csv" => Command::Csv(path_arg()),
        "png" => Command::Png(path_arg()),
        "dismiss" | "d" => Command::Dismiss,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => Command::Unknown(format!("unknown command :{}", other)),
    }
}

pub fn help_text() -> String {
    format!(
        "Type a question, e.g. \"Analyze Wakad\" or \"Compare Aundh and Wakad price trends\".\n\
         Commands:\n\
         \x20 :upload <path>  upload a dataset ({})\n\
         \x20 :areas          list areas in the dataset\n\
         \x20 :theme          toggle dark/light chart theme\n\
         \x20 :csv [path]     save the detail table as CSV\n\
         \x20 :png [path]     save the chart as PNG\n\
         \x20 :dismiss        clear the notification\n\
         \x20 :quit           leave",
        ACCEPTED_EXTENSIONS.map(|e| format!(".{}", e)).join(", ")
    )
}

/// Interactive loop over stdin. Every action finishes before the next line is read.
pub async fn run(app: &mut App) -> Result<()> {
    println!("{}", app.render());
    println!("{}", help_text());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("> ");
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Command::Empty => continue,
            Command::Quit => break,
            Command::Help => println!("{}", help_text()),
            Command::Query(text) => {
                app.submit_query(&text).await;
                println!("{}", app.render());
            }
            Command::Upload(path) => {
                app.upload(&path).await;
                println!("{}", app.render());
            }
            Command::Areas => match app.list_areas().await {
                Ok(areas) if areas.is_empty() => println!("No areas in the dataset."),
                Ok(areas) => println!("{}", areas.join("\n")),
                Err(e) => println!("Error! {}", e.user_message()),
            },
            Command::Theme => println!("Theme: {}", app.toggle_theme()),
            Command::Csv(path) => match app.export_csv(path.as_deref()) {
                Ok(path) => println!("Saved table to {}", path.display()),
                Err(e) => println!("{:#}", e),
            },
            Command::Png(path) => match app.export_png(path.as_deref()) {
                Ok(path) => println!("Saved chart to {}", path.display()),
                Err(e) => println!("{:#}", e),
            },
            Command::Dismiss => {
                app.dismiss_notification();
                println!("{}", app.render());
            }
            Command::Unknown(message) => println!("{} (try :help)", message),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_query() {
        assert_eq!(
            parse_command("  Analyze Wakad  "),
            Command::Query("Analyze Wakad".to_string())
        );
        assert_eq!(parse_command("   "), Command::Empty);
    }

    #[test]
    fn test_commands() {
        assert_eq!(
            parse_command(":upload data/pune sales.xlsx"),
            Command::Upload(PathBuf::from("data/pune sales.xlsx"))
        );
        assert_eq!(parse_command(":csv"), Command::Csv(None));
        assert_eq!(
            parse_command(":png  charts/out.png"),
            Command::Png(Some(PathBuf::from("charts/out.png")))
        );
        assert_eq!(parse_command(":t"), Command::Theme);
        assert_eq!(parse_command(":q"), Command::Quit);
    }

    #[test]
    fn test_bad_commands() {
        assert!(matches!(parse_command(":upload"), Command::Unknown(_)));
        assert!(matches!(parse_command(":launch"), Command::Unknown(_)));
    }

    #[test]
    fn test_help_lists_accepted_extensions() {
        assert!(help_text().contains(".xlsx, .xls, .csv"));
    }
}
