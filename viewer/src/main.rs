use std::path::PathBuf;

use anyhow::Context;
use catalog_core::{CatalogView, HttpClient, ProductService, Theme};
use clap::Parser;
use tracing::{info, warn};

mod app;
mod command;
mod config;
mod logging;
mod transport;

use app::App;
use config::Config;

/// Browse a paginated product catalog in the terminal.
#[derive(Parser, Debug)]
#[command(name = "catalog", version, about)]
struct Cli {
    /// JSON config file; missing files fall back to defaults.
    #[arg(long, default_value = "config/config.json")]
    config: PathBuf,

    /// Page to open first.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    /// Products per page; overrides the configured page size.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    limit: Option<u32>,

    /// Print one page and exit.
    #[arg(long)]
    once: bool,

    /// Disable colored header and footer bars.
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, warnings) = Config::load(&cli.config)
        .with_context(|| format!("could not load config from {}", cli.config.display()))?;
    logging::init(&config.log_level).context("failed to initialize logging")?;
    for warning in warnings {
        warn!("config: {warning}");
    }
    info!(api_url = %config.api_url, page_size = config.page_size, "starting catalog viewer");

    let service = ProductService::new(HttpClient::new(&config.api_url));
    let theme = Theme {
        color: config.color && !cli.no_color,
        ..Theme::default()
    };
    let view = CatalogView::starting_at(cli.page, cli.limit.unwrap_or(config.page_size))?;

    let app = App::new(service, theme, view);
    if cli.once {
        app.run_once()
    } else {
        app.run_interactive()
    }
}
