use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use backend_application::queries::{event_log_queries, simulation_queries, ticket_queries};
use backend_application::AppState;
use backend_domain::{
    MatchResult, PlacementId, SimulationCounters, SimulationId, TicketAggregate, TicketId,
};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn get_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(ticket_id): Path<String>,
) -> Result<Json<TicketAggregate>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let ticket = ticket_queries::get_ticket(&state, &TicketId(ticket_id)).await?;
    Ok(Json(ticket))
}

pub async fn get_simulation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(simulation_id): Path<String>,
) -> Result<Json<SimulationCounters>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let counters =
        simulation_queries::get_simulation_counters(&state, &SimulationId(simulation_id)).await?;
    Ok(Json(counters))
}

pub async fn list_simulation_results(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(simulation_id): Path<String>,
) -> Result<Json<Vec<MatchResult>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let results =
        simulation_queries::list_match_results(&state, &SimulationId(simulation_id)).await?;
    Ok(Json(results))
}

#[derive(Debug, Deserialize)]
pub struct EventLogQuery {
    pub date: String,
}

pub async fn list_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<EventLogQuery>,
) -> Result<Json<Vec<Value>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let entries = event_log_queries::list_events_by_date(&state, &query.date).await?;
    Ok(Json(entries))
}

pub async fn get_placement_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(placement_id): Path<String>,
) -> Result<Json<Vec<Value>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let entries =
        event_log_queries::get_placement_events(&state, &PlacementId(placement_id)).await?;
    Ok(Json(entries))
}
