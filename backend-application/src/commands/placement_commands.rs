use backend_domain::services::event_log;
use backend_domain::utils::expiry_after_days;
use backend_domain::{EventEnvelope, PlacementEventDetail, ServerMessage};
use serde_json::{json, Value};

use crate::commands::{best_effort, notify};
use crate::{AppError, AppState};

/// Records the raw placement event with an extracted `placementId` for
/// indexed lookup, then pushes it to observers. Live visibility takes
/// priority over archival durability: a failed log write never blocks the
/// notification.
pub async fn handle_placement_event(
    state: &AppState,
    raw: Value,
    event: EventEnvelope<PlacementEventDetail>,
) -> Result<(), AppError> {
    state.metrics.record_placement_event();

    let expires = expiry_after_days(state.config.retention_days);
    let mut entry = event_log::log_entry(raw, event.time, &event.id, expires);
    if let Value::Object(map) = &mut entry {
        map.insert(
            "placementId".to_string(),
            json!(event.detail.placement_id),
        );
    }
    best_effort(
        &state.metrics,
        "placement event log append",
        state.store.put_item(&state.config.tables.event_log, entry),
    )
    .await;

    let duration_seconds = event.detail.duration_seconds();
    notify(
        state,
        ServerMessage::QueuePlacementEvent {
            detail: event.detail,
            resources: event.resources,
            duration_seconds,
        },
    )
    .await;
    Ok(())
}
