//! tassel-ui - course recommendation web application
//!
//! Students register, complete a profile (major, academic year, interests)
//! and receive course suggestions from an external scoring service, backed
//! by a local SQLite store for accounts, sessions, ratings and cached
//! recommendations. Course detail pages are served from the bundled review
//! dataset.

use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tracing::info;

use tassel_common::config;
use tassel_common::db::{init_database, settings};
use tassel_ui::catalog::{locate_dataset, CourseCatalog};
use tassel_ui::services::ml_client::{MlClient, DEFAULT_ML_API_URL, DEFAULT_TIMEOUT_MS};
use tassel_ui::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "tassel-ui", about = "Tassel course recommendation web module")]
struct Cli {
    /// Root folder holding the database and review dataset
    #[arg(long)]
    root_folder: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Tassel UI (tassel-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // Resolve and prepare the root folder
    let root_folder = config::resolve_root_folder(cli.root_folder.as_deref());
    config::ensure_root_folder(&root_folder)?;

    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    // Open or create the database
    let pool = init_database(&db_path).await?;
    info!("Database connection established");

    // Runtime settings
    let bind_addr = settings::get_setting_or(&pool, "http_bind_addr", "127.0.0.1:5730").await?;
    let session_timeout_secs =
        settings::get_setting_i64(&pool, "session_timeout_seconds", 604_800).await?;
    let ml_timeout_ms =
        settings::get_setting_i64(&pool, "ml_request_timeout_ms", DEFAULT_TIMEOUT_MS as i64).await?;

    // ML_API_URL environment variable overrides the stored setting
    let ml_api_url = match std::env::var("ML_API_URL") {
        Ok(url) if !url.is_empty() => url,
        _ => settings::get_setting_or(&pool, "ml_api_url", DEFAULT_ML_API_URL).await?,
    };
    info!("Recommendation service: {}", ml_api_url);

    let ml = MlClient::new(&ml_api_url, Duration::from_millis(ml_timeout_ms.max(0) as u64))
        .map_err(|e| anyhow::anyhow!("Failed to create recommendation service client: {}", e))?;

    // Locate the review dataset; the app stays up without it
    let configured_dataset = settings::get_setting(&pool, "reviews_dataset_path").await?;
    let dataset = locate_dataset(&root_folder, configured_dataset.as_deref());
    match &dataset {
        Some(path) => info!("Review dataset: {}", path.display()),
        None => info!("No review dataset found; course catalog will be empty"),
    }
    let catalog = CourseCatalog::new(dataset);

    // Create application state and router
    let state = AppState::new(pool, catalog, ml, session_timeout_secs);
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("tassel-ui listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
