mod board;
mod config;
mod error;
mod routes;
mod store;

use axum::{extract::State, routing::get, Json, Router};
use config::Config;
use serde_json::json;
use std::net::SocketAddr;
use store::DynProfileStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    pub store: DynProfileStore,
    pub config: Config,
}

#[tokio::main]
async fn main() -> config::Result<()> {
    // 1. Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load configuration
    let cfg = config::load()?;
    info!("Starting talentkonnect backend in {:?} mode", cfg.env);

    // 3. Build the profile store client (Noop when secrets are absent)
    let profile_store = store::build_profile_store(&cfg);

    // 4. Build application state
    let state = AppState {
        store: profile_store,
        config: cfg.clone(),
    };

    // 5. Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .merge(routes::api_router())
        .with_state(state);

    // 6. Start HTTP server
    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.http_port));
    info!("Listening on http://{}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "env": format!("{:?}", state.config.env),
        "store": if state.config.store_configured() {
            "configured"
        } else {
            "unconfigured"
        },
    }))
}
