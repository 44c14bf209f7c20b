// src/routes/mod.rs

pub mod board;
pub mod debug;
pub mod profiles;

use axum::{routing::get, Router};

use crate::AppState;

/// All gateway routes, mounted by main.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/profiles",
            get(profiles::list_profiles).post(profiles::create_profile),
        )
        .route("/api/board/filters", get(board::board_filters))
        .route("/debug/store", get(debug::store_config))
}
