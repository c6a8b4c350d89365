use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use bulletin::api::NewsClient;
use bulletin::app::{App, AppEvent, Category};
use bulletin::config::Config;
use bulletin::theme::ThemeVariant;
use bulletin::ui;

/// Get the config directory path (~/.config/bulletin/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("bulletin"))
}

#[derive(Parser, Debug)]
#[command(
    name = "bulletin",
    about = "Terminal news browser with category feeds and scroll-driven pagination"
)]
struct Args {
    /// Category to open at startup
    #[arg(long, default_value = "general")]
    category: Category,

    /// Articles per page (1-100), overrides the config file
    #[arg(long, value_name = "N")]
    page_size: Option<u32>,

    /// Lower bound on publish date (YYYY-MM-DD), overrides the config file
    #[arg(long, value_name = "DATE")]
    from: Option<String>,

    /// Theme ("dark" or "light"), overrides the config file
    #[arg(long)]
    theme: Option<String>,

    /// Path to an alternate config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    let mut config = Config::load(&config_path).context("Failed to load configuration")?;

    // CLI flags win over the config file
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    if let Some(from) = &args.from {
        config.from_date = from.clone();
    }
    if let Some(theme) = &args.theme {
        config.theme = theme.clone();
    }

    if chrono::NaiveDate::parse_from_str(&config.from_date, "%Y-%m-%d").is_err() {
        tracing::warn!(
            from_date = %config.from_date,
            "from_date is not YYYY-MM-DD; the upstream API may reject it"
        );
    }

    // Missing credential is a fatal precondition: refuse to start fetching
    // rather than send malformed requests.
    let api_key = config.resolve_api_key(std::env::var("NEWS_API_KEY").ok());
    if api_key.is_none() {
        eprintln!("Error: no News API key configured.");
        eprintln!();
        eprintln!("Provide one either way:");
        eprintln!("  export NEWS_API_KEY=<your key>");
        eprintln!(
            "  or set api_key = \"<your key>\" in {}",
            config_path.display()
        );
        std::process::exit(1);
    }

    let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.theme, "Unknown theme, falling back to dark");
        ThemeVariant::Dark
    });

    let client = NewsClient::new(&config, api_key).context("Failed to build API client")?;
    let mut app = App::new(client, args.category, theme_variant);

    // Event channel for background fetch tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    // Run the TUI
    ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
