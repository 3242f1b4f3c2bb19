use backend_domain::{ConsoleConfig, SimulationPlayerProfile};
use serde_json::{json, Value};

use crate::{AppError, AppState};

pub async fn get_console_config(state: &AppState) -> Result<ConsoleConfig, AppError> {
    state
        .console_config
        .get_console_config()
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn put_console_config(state: &AppState, config: ConsoleConfig) -> Result<(), AppError> {
    state.console_config.put_console_config(&config).await?;
    Ok(())
}

/// Seeds player profiles for a simulation run so match-result assembly can
/// enrich matched players later. Seeding is not best-effort: a failed write
/// here is surfaced to the caller.
pub async fn seed_simulation_players(
    state: &AppState,
    simulation_id: &str,
    players: Vec<SimulationPlayerProfile>,
) -> Result<usize, AppError> {
    let mut stored = 0;
    for mut player in players {
        player.simulation_id = simulation_id.to_string();
        let key = SimulationPlayerProfile::storage_key(simulation_id, &player.player_id);
        let mut item = serde_json::to_value(&player)?;
        if let Value::Object(map) = &mut item {
            map.insert("profileId".to_string(), json!(key));
        }
        state
            .store
            .put_item(&state.config.tables.simulation_players, item)
            .await?;
        stored += 1;
    }
    Ok(stored)
}
