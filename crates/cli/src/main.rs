use clap::{Parser, Subcommand};
use sift_client::{SearchBackend, SearchClient};
use sift_core::config::AppConfig;
use sift_core::{ResultRow, ResultSet};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sift - terminal client for a /api/search backend", long_about = None)]
struct Args {
    /// Search server base URL (overrides SIFT_SERVER_URL and sift.toml)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive search TUI
    Start,
    /// Run one search and print the result rows
    Search {
        /// Query text, sent verbatim
        #[arg(index = 1)]
        query: String,
        /// Print the decoded results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration
    Config,
}

fn open_log_writer(path: &Path) -> Box<dyn Write + Send> {
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    match std::fs::OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Box::new(file),
        Err(_) => Box::new(std::io::sink()),
    }
}

/// Only the interactive mode logs to the app root file.
fn is_tui(args: &Args) -> bool {
    matches!(args.command, Some(Commands::Start) | None)
}

/// One line per result, `path | rank: N`.
fn format_rows(results: &ResultSet) -> String {
    results
        .iter()
        .map(|result| format!("{}\n", ResultRow::from(result)))
        .collect()
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _guard = if is_tui(&args) {
        // TUI mode: Only log to file, keep the terminal clean
        let (non_blocking, guard) =
            tracing_appender::non_blocking(open_log_writer(&sift_core::path_utils::log_file_path()));
        tracing_subscriber::fmt()
            .with_writer(non_blocking)
            .with_ansi(false)
            .init();
        Some(guard)
    } else {
        // CLI mode: Log to stderr, stdout carries the results; no log file is touched
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .init();
        None
    };

    sift_core::init();

    let config = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ Error: Configuration invalid: {}", e);
            eprintln!("   Check sift.toml, SIFT_* environment variables and ~/.sift/.env");
            return ExitCode::FAILURE;
        }
    };
    let config = match args.server {
        Some(server) => config.with_server_url(server),
        None => config,
    };

    match args.command {
        Some(Commands::Start) | None => {
            if let Err(e) = sift_tui::run(config).await {
                eprintln!("TUI Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
        Some(Commands::Search { query, json }) => {
            let client = match SearchClient::new(&config) {
                Ok(client) => client,
                Err(e) => {
                    error!("{}", e);
                    return ExitCode::FAILURE;
                }
            };

            match client.search(&query).await {
                Ok(results) if json => match serde_json::to_string(&results) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        error!("Could not encode results: {}", e);
                        return ExitCode::FAILURE;
                    }
                },
                Ok(results) => print!("{}", format_rows(&results)),
                Err(e) => {
                    error!("❌ Search failed: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        Some(Commands::Config) => match serde_json::to_string_pretty(&config) {
            Ok(out) => {
                println!("{}", out);
                println!("search endpoint: {}", config.search_url());
                println!("log file: {}", sift_core::path_utils::log_file_path().display());
            }
            Err(e) => {
                error!("Could not encode configuration: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_core::SearchResult;

    #[test]
    fn test_no_subcommand_starts_tui() {
        let args = Args::try_parse_from(["sift"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.server.is_none());
    }

    #[test]
    fn test_search_args() {
        let args = Args::try_parse_from(["sift", "search", "borrow checker", "--json", "--server", "http://h:1"]).unwrap();

        assert_eq!(args.server.as_deref(), Some("http://h:1"));
        match args.command {
            Some(Commands::Search { query, json }) => {
                assert_eq!(query, "borrow checker");
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_only_tui_mode_logs_to_file() {
        assert!(is_tui(&Args::try_parse_from(["sift"]).unwrap()));
        assert!(is_tui(&Args::try_parse_from(["sift", "start"]).unwrap()));
        assert!(!is_tui(&Args::try_parse_from(["sift", "search", "q"]).unwrap()));
        assert!(!is_tui(&Args::try_parse_from(["sift", "config"]).unwrap()));
    }

    #[test]
    fn test_search_requires_query() {
        assert!(Args::try_parse_from(["sift", "search"]).is_err());
    }

    #[test]
    fn test_format_rows() {
        let results = ResultSet::new(vec![SearchResult::new("a/b.txt", 3.0), SearchResult::new("c/d.txt", 1.0)]);
        assert_eq!(format_rows(&results), "a/b.txt | rank: 3\nc/d.txt | rank: 1\n");
        assert_eq!(format_rows(&ResultSet::default()), "");
    }
}
