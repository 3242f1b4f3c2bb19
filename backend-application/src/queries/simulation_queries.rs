use backend_domain::ports::ItemKey;
use backend_domain::{MatchResult, SimulationCounters, SimulationId};

use crate::{AppError, AppState};

pub async fn get_simulation_counters(
    state: &AppState,
    simulation_id: &SimulationId,
) -> Result<SimulationCounters, AppError> {
    let item = state
        .store
        .get_item(
            &state.config.tables.simulations,
            &ItemKey::new("simulationId", simulation_id.0.clone()),
        )
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(serde_json::from_value(item)?)
}

pub async fn list_match_results(
    state: &AppState,
    simulation_id: &SimulationId,
) -> Result<Vec<MatchResult>, AppError> {
    let items = state
        .store
        .query_by_field(
            &state.config.tables.simulation_results,
            "simulationId",
            &simulation_id.0,
        )
        .await?;
    let mut results = Vec::with_capacity(items.len());
    for item in items {
        results.push(serde_json::from_value(item)?);
    }
    Ok(results)
}
