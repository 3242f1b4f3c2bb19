use backend_domain::PlacementId;
use serde_json::Value;

use crate::{AppError, AppState};

/// Raw log entries for one day bucket, ordered by their sortable `time-id`.
pub async fn list_events_by_date(state: &AppState, date: &str) -> Result<Vec<Value>, AppError> {
    let mut entries = state
        .store
        .query_by_field(&state.config.tables.event_log, "date", date)
        .await?;
    entries.sort_by(|a, b| {
        let a_key = a.get("time-id").and_then(Value::as_str).unwrap_or_default();
        let b_key = b.get("time-id").and_then(Value::as_str).unwrap_or_default();
        a_key.cmp(b_key)
    });
    Ok(entries)
}

pub async fn get_placement_events(
    state: &AppState,
    placement_id: &PlacementId,
) -> Result<Vec<Value>, AppError> {
    let entries = state
        .store
        .query_by_field(
            &state.config.tables.event_log,
            "placementId",
            &placement_id.0,
        )
        .await?;
    if entries.is_empty() {
        return Err(AppError::NotFound);
    }
    Ok(entries)
}
