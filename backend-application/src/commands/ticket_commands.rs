use backend_domain::ports::ItemKey;
use backend_domain::services::ticket::plan_ticket_update;
use backend_domain::utils::expiry_after_days;
use backend_domain::{EventEnvelope, MatchmakingEventDetail};

use crate::commands::best_effort;
use crate::AppState;

/// Merges one matchmaking event into every ticket aggregate it references.
/// Each ticket is updated independently; a failed write for one ticket does
/// not block the others.
pub async fn apply_ticket_events(
    state: &AppState,
    event: &EventEnvelope<MatchmakingEventDetail>,
) {
    let expires = expiry_after_days(state.config.retention_days);
    let config_arn = event
        .resources
        .first()
        .map(String::as_str)
        .unwrap_or_default();

    for ticket in &event.detail.tickets {
        let update = plan_ticket_update(
            &event.id,
            ticket.start_time,
            config_arn,
            event.detail.event_type,
            event.detail.match_id.as_deref(),
            event.detail.custom_event_data.as_deref(),
            expires,
        );
        best_effort(
            &state.metrics,
            "ticket aggregate update",
            state.store.update_item(
                &state.config.tables.ticket_log,
                ItemKey::new("ticketId", &ticket.ticket_id),
                update,
            ),
        )
        .await;
    }
}
