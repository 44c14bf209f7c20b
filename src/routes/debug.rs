// src/routes/debug.rs

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct StoreConfigResponse {
    pub has_api_key: bool,
    pub has_base_id: bool,
    pub api_key_length: usize,
    pub base_id_prefix: String,
}

/// GET /debug/store
///
/// Reports whether the store secrets are present without leaking them.
/// Handy when the board is mysteriously empty in a fresh deployment.
pub async fn store_config(State(state): State<AppState>) -> Json<StoreConfigResponse> {
    let cfg = &state.config;

    let base_id_prefix = cfg
        .airtable_base_id
        .as_deref()
        .map(|id| id.chars().take(10).collect())
        .unwrap_or_else(|| "none".to_string());

    Json(StoreConfigResponse {
        has_api_key: cfg.airtable_api_key.is_some(),
        has_base_id: cfg.airtable_base_id.is_some(),
        api_key_length: cfg.airtable_api_key.as_deref().map(str::len).unwrap_or(0),
        base_id_prefix,
    })
}
