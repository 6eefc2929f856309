use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_server::cache::{CacheConfig, CachedNetwork};
use transit_server::config::ServerConfig;
use transit_server::dataset::{load_corridors, load_stops};
use transit_server::planner::{JourneyConfig, SlimeConfig};
use transit_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,transit_server=debug")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // Datasets are loaded once; fail fast if they are missing
    let stops = load_stops(&config.stops_path())?;
    let corridors = load_corridors(&config.corridors_path())?;

    let network = CachedNetwork::new(stops, corridors, &CacheConfig::default());

    let slime = match config.sma_seed {
        Some(seed) => SlimeConfig::default().with_seed(seed),
        None => SlimeConfig::default(),
    };

    let state = AppState::new(network, slime, JourneyConfig::default());
    info!(stops = state.directory.len(), "stop directory ready");

    let static_dir = config
        .static_dir
        .as_deref()
        .and_then(|dir| dir.to_str());
    let app = create_router(state, static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, "route optimizer listening");
    info!("  GET  /health             - Health check");
    info!("  GET  /api/stops/search   - Stop name autocomplete");
    info!("  POST /api/route/plan     - Plan a journey");
    info!("  POST /api/route/compare  - Compare exact and slime-mould solvers");

    axum::serve(listener, app).await?;
    Ok(())
}
