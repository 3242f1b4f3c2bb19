use backend_domain::services::event_log;
use backend_domain::utils::expiry_after_days;
use backend_domain::{EventEnvelope, MatchmakingEventDetail, ServerMessage};
use serde_json::Value;
use tracing::info;

use crate::commands::{best_effort, notify, simulation_commands, ticket_commands};
use crate::{AppError, AppState};

/// Matchmaking events feed the ticket aggregates and the raw event log, then
/// split: events from the configured simulator resource run the simulation
/// path, everything else is production traffic pushed to observers.
pub async fn handle_matchmaking_event(
    state: &AppState,
    raw: Value,
    event: EventEnvelope<MatchmakingEventDetail>,
) -> Result<(), AppError> {
    state.metrics.record_matchmaking_event();

    ticket_commands::apply_ticket_events(state, &event).await;
    append_event_log(state, raw, &event).await;

    if is_simulation_event(state, &event).await {
        info!(event_id = %event.id, "processing simulation matchmaking event");
        simulation_commands::handle_simulation_event(state, &event).await;
    } else {
        notify(
            state,
            ServerMessage::MatchmakingEvent {
                detail: event.detail,
                resources: event.resources,
            },
        )
        .await;
    }
    Ok(())
}

async fn append_event_log(
    state: &AppState,
    raw: Value,
    event: &EventEnvelope<MatchmakingEventDetail>,
) {
    let expires = expiry_after_days(state.config.retention_days);
    let entry = event_log::log_entry(raw, event.time, &event.id, expires);
    best_effort(
        &state.metrics,
        "matchmaking event log append",
        state.store.put_item(&state.config.tables.event_log, entry),
    )
    .await;
}

/// Simulation traffic is recognised by the first listed source resource
/// matching the simulator identifier in the console config aggregate. A
/// failed config read falls back to the production path.
async fn is_simulation_event(
    state: &AppState,
    event: &EventEnvelope<MatchmakingEventDetail>,
) -> bool {
    let config = best_effort(
        &state.metrics,
        "console config read",
        state.console_config.get_console_config(),
    )
    .await
    .flatten();

    match (
        config.and_then(|c| c.matchmaking_simulator_arn),
        event.resources.first(),
    ) {
        (Some(simulator_arn), Some(first_resource)) => simulator_arn == *first_resource,
        _ => false,
    }
}
