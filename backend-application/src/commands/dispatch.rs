// Top-level router for inbound events.
// Decoding failure is fatal for the invocation and leaves no partial side
// effects; everything after a successful decode is best-effort.

use backend_domain::{EventEnvelope, MatchmakingEventDetail, PlacementEventDetail, StateEventDetail};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::commands::{matchmaking_commands, placement_commands, state_commands};
use crate::{AppError, AppState};

/// Domain tag carried by the delivery transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDomain {
    State,
    QueuePlacement,
    Matchmaking,
}

pub async fn dispatch(state: &AppState, domain: EventDomain, body: &[u8]) -> Result<(), AppError> {
    let raw: Value = serde_json::from_slice(body).map_err(|err| {
        state.metrics.record_decode_error();
        AppError::Decode(err)
    })?;

    match domain {
        EventDomain::State => {
            let event = decode::<StateEventDetail>(state, &raw)?;
            state_commands::handle_state_event(state, event).await
        }
        EventDomain::QueuePlacement => {
            let event = decode::<PlacementEventDetail>(state, &raw)?;
            placement_commands::handle_placement_event(state, raw, event).await
        }
        EventDomain::Matchmaking => {
            let event = decode::<MatchmakingEventDetail>(state, &raw)?;
            matchmaking_commands::handle_matchmaking_event(state, raw, event).await
        }
    }
}

fn decode<D: DeserializeOwned>(
    state: &AppState,
    raw: &Value,
) -> Result<EventEnvelope<D>, AppError> {
    serde_json::from_value(raw.clone()).map_err(|err| {
        state.metrics.record_decode_error();
        AppError::Decode(err)
    })
}
