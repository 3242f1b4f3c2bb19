use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;

use backend_application::commands::config_commands;
use backend_application::AppState;
use backend_domain::{ConsoleConfig, SimulationPlayerProfile};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn get_console_config(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ConsoleConfig>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let config = config_commands::get_console_config(&state).await?;
    Ok(Json(config))
}

pub async fn put_console_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(config): Json<ConsoleConfig>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    config_commands::put_console_config(&state, config).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct SeedResponse {
    pub stored: usize,
}

pub async fn seed_simulation_players(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(simulation_id): Path<String>,
    Json(players): Json<Vec<SimulationPlayerProfile>>,
) -> Result<Json<SeedResponse>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let stored =
        config_commands::seed_simulation_players(&state, &simulation_id, players).await?;
    Ok(Json(SeedResponse { stored }))
}
