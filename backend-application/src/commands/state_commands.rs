use backend_domain::{EventEnvelope, ServerMessage, StateEventDetail};

use crate::commands::notify;
use crate::{AppError, AppState};

/// State snapshots are not aggregated; they are forwarded to observers as-is.
pub async fn handle_state_event(
    state: &AppState,
    event: EventEnvelope<StateEventDetail>,
) -> Result<(), AppError> {
    state.metrics.record_state_event();
    notify(
        state,
        ServerMessage::State {
            state: event.detail,
        },
    )
    .await;
    Ok(())
}
