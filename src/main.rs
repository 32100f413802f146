use std::io::Read;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use http::{Method, header::CONTENT_TYPE};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

use neura::{
    ServerConfig,
    core::document::export_pdf,
    core::narration::{NarrationController, NarrationState},
    core::tts::{AudioBroadcast, create_synthesizer},
    routes,
    state::AppState,
};

/// Neura - prompt to text, with chunked read-aloud narration and PDF export
#[derive(Parser, Debug)]
#[command(name = "neura")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Subcommand to run (defaults to serving the web UI)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Narrate a text file (or stdin) through the configured synthesizer
    Narrate {
        /// Text file to read; stdin when omitted
        file: Option<PathBuf>,
    },

    /// Export a text file as PDF
    Export {
        /// Text file to export
        input: PathBuf,

        /// Output file path
        #[arg(short = 'o', long = "output", default_value = "Neura.pdf")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Export needs no configuration
    if let Some(Commands::Export { input, output }) = &cli.command {
        return run_export(input, output);
    }

    // Load configuration from file or environment
    let config = if let Some(config_path) = &cli.config {
        info!(path = %config_path.display(), "Loading configuration");
        ServerConfig::from_file(config_path).map_err(|e| anyhow!(e.to_string()))?
    } else {
        ServerConfig::from_env().map_err(|e| anyhow!(e.to_string()))?
    };

    match cli.command {
        Some(Commands::Narrate { file }) => run_narrate(config, file).await,
        Some(Commands::Export { .. }) => Ok(()),
        None => serve(config).await,
    }
}

fn run_export(input: &Path, output: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(input)
        .map_err(|e| anyhow!("Failed to read {}: {}", input.display(), e))?;
    let document = export_pdf(&text)?;
    std::fs::write(output, &document.bytes)
        .map_err(|e| anyhow!("Failed to write to {}: {}", output.display(), e))?;
    println!(
        "Wrote {} ({} page{})",
        output.display(),
        document.page_count,
        if document.page_count == 1 { "" } else { "s" }
    );
    Ok(())
}

async fn run_narrate(config: ServerConfig, file: Option<PathBuf>) -> anyhow::Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(&path)
            .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let synthesizer = create_synthesizer(
        &config.tts_provider(),
        config.openai_synthesizer_config(),
        AudioBroadcast::new(),
    )?;
    let shutdown = CancellationToken::new();
    let narration = NarrationController::spawn(
        config.narration_config(),
        config.controller_options(),
        synthesizer,
        shutdown.clone(),
    );

    let status = narration.start(text).await?;
    info!(
        chunks = status.chunks_total,
        chars = status.total,
        synthesizer = narration.synthesizer_name(),
        "Narrating"
    );

    let finished = tokio::select! {
        status = narration.wait_for(|s| s.state != NarrationState::Speaking) => Some(status?),
        _ = tokio::signal::ctrl_c() => None,
    };
    shutdown.cancel();

    match finished {
        Some(status) if status.state == NarrationState::Completed => {
            info!(chunks = status.chunks_spoken, "Narration completed");
            Ok(())
        }
        Some(status) => Err(anyhow!(
            "Narration stopped at {}/{} chars ({})",
            status.cursor,
            status.total,
            status.state
        )),
        None => {
            warn!("Narration interrupted");
            Ok(())
        }
    }
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let address = config.address();
    let rate_limit_rps = config.rate_limit_requests_per_second;
    let rate_limit_burst = config.rate_limit_burst_size;
    let cors_origins = config.cors_allowed_origins.clone();
    info!(%address, "Starting server");

    // Create application state
    let app_state = AppState::new(config)?;
    let shutdown = app_state.shutdown.clone();

    // Configure rate limiting (disabled when rate >= 100000 for performance testing)
    let governor_layer = if rate_limit_rps < 100000 {
        let governor_config = GovernorConfigBuilder::default()
            .per_second(rate_limit_rps as u64)
            .burst_size(rate_limit_burst)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow!("Failed to build rate limiter config"))?;
        Some(GovernorLayer::new(governor_config))
    } else {
        info!("Rate limiting disabled (rate >= 100000/s)");
        None
    };

    // Configure CORS
    let cors_layer = match cors_origins.as_deref() {
        Some("*") => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE])
            .allow_credentials(false),
        Some(origins) => {
            // Parse comma-separated origins
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE])
                .allow_credentials(true)
        }
        None => {
            info!("CORS not configured, defaulting to same-origin only");
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE])
                .allow_credentials(false)
        }
    };

    // Security headers
    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_CONTENT_TYPE_OPTIONS,
            http::HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_FRAME_OPTIONS,
            http::HeaderValue::from_static("DENY"),
        ));

    let app = routes::create_app_router()
        .with_state(app_state)
        .layer(cors_layer)
        .layer(tower::util::option_layer(governor_layer))
        .layer(security_headers);

    // Parse socket address
    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;

    info!("Server listening on http://{}", socket_addr);

    let listener = TcpListener::bind(&socket_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(shutdown))
    .await?;

    Ok(())
}

/// Resolve on Ctrl+C and stop the narration controller.
async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
    shutdown.cancel();
}
