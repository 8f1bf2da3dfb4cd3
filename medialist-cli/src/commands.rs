//! CLI command implementations

use std::time::Duration;

use anyhow::Context;
use clap::Subcommand;
use medialist_core::MedialistConfig;
use medialist_search::{
    ControllerSnapshot, ControllerState, MediaSearchService, ResultPanel, spawn_search_controller,
};

/// How often the search command polls the controller for a settled state.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Server {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
        /// Serve the built-in demo catalog
        #[arg(long)]
        demo: bool,
    },
    /// Search movies and series
    Search {
        /// Text typed into the search box
        query: String,
        /// Search the built-in demo catalog
        #[arg(long)]
        demo: bool,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let mut config = MedialistConfig::from_env().context("Invalid configuration")?;

    match command {
        Commands::Server { host, port, demo } => {
            if let Some(host) = host {
                config.web.host = host;
            }
            if let Some(port) = port {
                config.web.port = port;
            }
            config.search.use_demo_data |= demo;
            start_server(config).await
        }
        Commands::Search { query, demo } => {
            config.search.use_demo_data |= demo;
            search(config, &query).await
        }
    }
}

/// Start the web server
///
/// # Errors
/// - Catalog provider could not be configured
/// - Bind address unavailable
pub async fn start_server(config: MedialistConfig) -> anyhow::Result<()> {
    let address = config.bind_address();
    println!("Starting Medialist web server...");
    println!("URL: http://{address}");
    if config.search.use_demo_data {
        println!("Catalog: Demo (built-in sample data)");
    } else {
        println!("Catalog: TMDB ({})", config.search.api_base_url);
    }
    println!("{:-<50}", "");
    println!("Home: http://{address}/");
    println!("Watchlist: http://{address}/watchlist");
    println!("API: http://{address}/api/search?query=...");
    println!();
    println!("Press Ctrl+C to stop the server");

    medialist_web::run_server(config)
        .await
        .map_err(|e| anyhow::anyhow!("Web server failed: {e}"))
}

/// Types `query` into a search controller and prints what the dropdown shows.
///
/// # Errors
/// - Catalog provider could not be configured
/// - No answer before the request timeout
pub async fn search(config: MedialistConfig, query: &str) -> anyhow::Result<()> {
    let service = MediaSearchService::from_config(&config.search)?;
    let wait_limit = config.search.debounce + config.search.request_timeout + Duration::from_secs(1);
    let controller = spawn_search_controller(service, config.search);

    controller.activate().await?;
    let ticket = controller.text_changed(query).await?;
    tracing::debug!(?ticket, "Search scheduled");

    let snapshot = tokio::time::timeout(wait_limit, async {
        loop {
            let snapshot = controller.snapshot().await?;
            if snapshot.state != ControllerState::ExpandedLoading {
                return Ok::<_, anyhow::Error>(snapshot);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    })
    .await
    .context("Search timed out")??;

    print_snapshot(&snapshot);
    Ok(())
}

fn print_snapshot(snapshot: &ControllerSnapshot) {
    match &snapshot.panel {
        ResultPanel::Hidden => println!("Nothing to search for"),
        ResultPanel::Unavailable { message } => {
            println!("{message}");
            if let Some(error) = &snapshot.last_error {
                println!("  {error}");
            }
        }
        ResultPanel::NoItems => println!("No items found"),
        ResultPanel::Rows { rows } => {
            println!("{} result(s) for \"{}\":", rows.len(), snapshot.text);
            for row in rows {
                let date = row.date.as_deref().unwrap_or("unknown date");
                println!(
                    "  {:<8} {:<40} {:<12} {:<18} {}",
                    row.kind_label, row.title, date, row.score_label, row.href
                );
            }
        }
    }
}
