//! Churn Risk Scoring Server
//!
//! HTTP presentation layer over the churn scoring pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CHURN RISK SERVER                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐        ┌──────────────────────────────────┐  │
//! │  │  API      │  JSON  │  Evaluator (read-only, shared)   │  │
//! │  │  (Axum)   ├───────►│  encode ► assemble ► score ►     │  │
//! │  │           │        │  decide                          │  │
//! │  └───────────┘        └────────────────┬─────────────────┘  │
//! │                                        ▼                    │
//! │                              ┌──────────────────┐           │
//! │                              │  Model artifact  │           │
//! │                              └──────────────────┘           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use churn_core::{Evaluator, FeatureSchema};
use churn_core::logic::model::load_artifact;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "churn_server=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Churn Risk Server starting ({})...", config.environment);

    // Load model artifact once; requests only read it
    let evaluator = match load_evaluator(&config) {
        Ok(evaluator) => Some(Arc::new(evaluator)),
        Err(e) if config.is_production() => return Err(e),
        Err(e) => {
            tracing::warn!("{:#} - /api/v1/evaluate will return 503", e);
            None
        }
    };

    // Build application state
    let state = AppState {
        evaluator,
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await
        .context("Server error")?;

    Ok(())
}

fn load_evaluator(config: &config::Config) -> anyhow::Result<Evaluator> {
    let schema = FeatureSchema::churn_v1();
    let artifact = load_artifact(&config.artifact_path, &schema)
        .with_context(|| format!("Failed to load artifact {}", config.artifact_path.display()))?;

    Evaluator::new(schema, artifact).context("Artifact does not match the feature schema")
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub evaluator: Option<Arc<Evaluator>>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/schema", get(handlers::schema::get))
        .route("/api/v1/evaluate", post(handlers::evaluate::evaluate));

    Router::new()
        .merge(api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
