use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use skyroute::{SkyRouteConfig, web};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Flight path weather sampling and suitability analysis"
)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Port to listen on, overriding the configuration
    #[arg(long)]
    port: Option<u16>,

    /// Log at debug level
    #[arg(long)]
    verbose: bool,
}

fn init_tracing(config: &SkyRouteConfig, verbose: bool) {
    let level = if verbose { "debug" } else { config.logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("skyroute={level},tower_http=info").into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = SkyRouteConfig::load_from_path(args.config)?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(&config, args.verbose);

    if config.providers.weather_api_key.is_none() {
        tracing::warn!("No weather API key configured; set SKYROUTE_PROVIDERS__WEATHER_API_KEY");
    }
    if config.providers.aviation_api_key.is_none() {
        tracing::warn!("No aviation API key configured; flight status lookups will fail");
    }

    web::run(&config).await
}
