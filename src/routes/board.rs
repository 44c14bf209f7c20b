// src/routes/board.rs

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::error;

use crate::board::{budget_options, filter_options};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct BoardFiltersResponse {
    pub success: bool,
    pub skills: Vec<String>,
    pub cities: Vec<String>,
    pub availability: Vec<String>,
    pub budgets: Vec<String>,
}

/// GET /api/board/filters
///
/// Dropdown option sets derived from the current active profiles. Store
/// failures degrade to sentinel-only options so the board still renders.
pub async fn board_filters(State(state): State<AppState>) -> Json<BoardFiltersResponse> {
    let profiles = match state.store.list_active_profiles().await {
        Ok(profiles) => profiles,
        Err(err) => {
            error!("Failed to fetch profiles for filter options: {}", err);
            Vec::new()
        }
    };

    let options = filter_options(&profiles);

    Json(BoardFiltersResponse {
        success: true,
        skills: options.skills,
        cities: options.cities,
        availability: options.availability,
        budgets: budget_options(),
    })
}
