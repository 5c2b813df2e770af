use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tweetgen::app::{self, App};
use tweetgen::config::Config;
use tweetgen::feeds::generator::GeneratorFetcher;
use tweetgen::view::TweetView;

#[derive(Parser, Debug)]
#[command(name = "tweetgen")]
#[command(about = "Generate meme coin tweets from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Tweet generation endpoint (overrides the config file)
    #[arg(short, long, value_name = "URL")]
    endpoint: Option<String>,

    /// Where to write logs; the terminal itself is taken by the UI
    #[arg(long, value_name = "FILE", default_value = "tweetgen.log")]
    log_file: PathBuf,
}

fn init_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.service.endpoint = endpoint;
    }
    tracing::info!(endpoint = %config.service.endpoint, "Starting tweetgen");

    let fetcher = Arc::new(GeneratorFetcher::new(
        config.service.endpoint.clone(),
        config.service.timeout(),
    ));
    let mut app = App::new(TweetView::new(fetcher), &config.ui);

    let mut terminal = app::setup_terminal()?;
    let result = app.run(&mut terminal).await;
    app::restore_terminal(&mut terminal)?;

    if let Err(ref e) = result {
        tracing::error!(error = ?e, "tweetgen exited with an error");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["tweetgen"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.endpoint.is_none());
        assert_eq!(cli.log_file, PathBuf::from("tweetgen.log"));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "tweetgen",
            "--config",
            "/tmp/tweetgen.toml",
            "-e",
            "http://10.0.0.2:5000/generate-tweets",
            "--log-file",
            "/tmp/tg.log",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/tweetgen.toml")));
        assert_eq!(
            cli.endpoint.as_deref(),
            Some("http://10.0.0.2:5000/generate-tweets")
        );
        assert_eq!(cli.log_file, PathBuf::from("/tmp/tg.log"));
    }
}
