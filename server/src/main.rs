//! Shiptrack Server - HTTP front for the shipment record store.
//!
//! Clients track shipments and download receipts; administrators create,
//! update and bulk-import shipments. All state lives in the file-backed
//! store from shiptrack-engine.

mod config;
mod error;
mod handlers;
mod routes;

use crate::config::Config;
use axum::Router;
use shiptrack_engine::{CompanyProfile, Pdftoppm, Rasterizer, RecordStore};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub company: Arc<CompanyProfile>,
    pub rasterizer: Arc<dyn Rasterizer>,
}

impl AppState {
    /// Build state from configuration, with `pdftoppm` as the rasterizer.
    pub fn from_config(config: &Config) -> Self {
        Self {
            store: Arc::new(RecordStore::open(config.data_file.clone())),
            company: Arc::new(config.company.clone()),
            rasterizer: Arc::new(Pdftoppm::new(config.pdftoppm_bin.clone(), config.raster_dpi)),
        }
    }
}

/// Build the full application router.
pub fn app(state: AppState, config: &Config) -> Router {
    let mut router = routes::create_routes();
    if let Some(dir) = &config.static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "shiptrack_server=debug,shiptrack_engine=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting Shiptrack Server on {}:{}", config.host, config.port);
    tracing::info!("Shipment data file: {}", config.data_file.display());
    if let Some(dir) = &config.static_dir {
        tracing::info!("Serving static files from {}", dir.display());
    }

    let state = AppState::from_config(&config);
    let app = app(state, &config);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
