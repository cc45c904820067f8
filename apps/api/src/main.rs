mod analysis;
mod config;
mod db;
mod errors;
mod extract;
mod models;
mod routes;
mod similarity;
mod skills;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::routes::build_router;
use crate::skills::catalog::SkillCatalog;
use crate::skills::tagger::{EntityTagger, HeuristicTagger};
use crate::state::AppState;
use crate::store::SqliteResultStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; every knob has a default.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume analysis API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite and the analysis log table
    let pool = create_pool(&config.database_url).await?;
    init_schema(&pool).await?;

    // Working directory for uploads
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    info!("Upload directory ready: {}", config.upload_dir.display());

    // Force catalog construction now so the first request doesn't pay for it
    info!(
        "Skill catalog loaded with {} terms",
        SkillCatalog::global().terms().len()
    );

    let tagger = build_tagger(&config.entity_tagger);

    let state = AppState {
        store: Arc::new(SqliteResultStore::new(pool)),
        tagger,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Selects the entity-tagger capability. "off" removes it entirely; the
/// skill extractor degrades gracefully without one.
fn build_tagger(name: &str) -> Option<Arc<dyn EntityTagger>> {
    match name {
        "off" => {
            info!("Entity tagger disabled");
            None
        }
        "heuristic" => {
            info!("Entity tagger: heuristic");
            Some(Arc::new(HeuristicTagger))
        }
        other => {
            warn!("Unknown ENTITY_TAGGER '{other}', falling back to heuristic");
            Some(Arc::new(HeuristicTagger))
        }
    }
}
