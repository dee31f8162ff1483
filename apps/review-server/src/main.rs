//! Company-formation review server
//!
//! Accepts batches of `.docx` uploads for a company incorporation and
//! returns, per batch:
//!
//! - the detected document type(s) of each file
//! - red flags found in each file, with a reviewed copy annotated inline
//! - the incorporation checklist result
//! - a structured report, also offered as `report.json`
//!
//! Batches are independent: nothing is stored between requests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use formation_compliance::ReviewEngine;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;

use api::{handle_checklist, handle_health, handle_review};

/// Command-line arguments for the review server
#[derive(Parser, Debug)]
#[command(name = "review-server")]
#[command(about = "Company-formation document review server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// Maximum request body size in megabytes
    #[arg(long, default_value = "25")]
    max_upload_mb: usize,

    /// Maximum number of files per review batch
    #[arg(long, default_value = "20")]
    max_files: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ReviewEngine>,
    /// Maximum number of files per review batch
    pub max_files: usize,
}

impl AppState {
    pub fn new(max_files: usize) -> Self {
        Self {
            engine: Arc::new(ReviewEngine::new()),
            max_files,
        }
    }
}

/// API routes without transport middleware
pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handle_health))
        // API endpoints
        .route("/api/checklist", get(handle_checklist))
        .route("/api/review", post(handle_review))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting review server on {}:{}", args.host, args.port);

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .error_handler(error::rate_limit_response)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limit: {}", args.rate_limit))?,
    );

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api_router(AppState::new(args.max_files))
        .layer(DefaultBodyLimit::max(args.max_upload_mb * 1024 * 1024))
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(cors);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!(
        "Upload limit: {} MB, {} files per batch",
        args.max_upload_mb, args.max_files
    );

    // The governor keys requests by peer IP, which needs connect info
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
