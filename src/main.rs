//! Wellness Agent entry point.
//!
//! Loads configuration (optional TOML file, then `PORT`/`ENVIRONMENT`),
//! initializes tracing, compiles the advice templates, builds the router and
//! serves it until a shutdown signal arrives.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wellness_agent::config::{ApiKeyStatus, AppConfig, LogFormat, DEFAULT_LOG_FILTER};
use wellness_agent::http::start_server;
use wellness_agent::{create_router, AppState, Advisor};

/// Wellness Agent: rule-based wellness advice API
#[derive(Parser, Debug)]
#[command(name = "wellness-agent", version, about)]
struct Args {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, env = "CONFIG_PATH")]
    config: Option<String>,

    /// Log level filter (e.g., "wellness_agent=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

fn init_tracing(filter: &str, format: LogFormat) {
    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(filter));

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Configuration first: it decides the log format
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    config.apply_env()?;

    // Log filter priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, config.logging.format);

    tracing::info!(
        config = args.config.as_deref().unwrap_or("<defaults>"),
        environment = %config.environment,
        host = %config.http.host,
        port = config.http.port,
        service = %config.service.name,
        version = %config.service.version,
        "Loaded configuration"
    );

    let api_keys = ApiKeyStatus::from_env();
    if api_keys.is_empty() {
        tracing::warn!("No API keys found - using rule-based fallback mode");
    } else {
        for key in &api_keys.configured {
            tracing::info!(key = *key, "API key configured (unused by rule-based advice)");
        }
    }

    let advisor = Advisor::new()?;
    tracing::info!("Compiled advice templates");

    let state = AppState::new(config.clone(), advisor);
    let app = create_router(state);

    start_server(app, &config).await?;

    Ok(())
}
