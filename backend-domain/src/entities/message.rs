// Normalized messages fanned out to connected observers.

use serde::{Deserialize, Serialize};

use crate::entities::event::{MatchmakingEventDetail, PlacementEventDetail, StateEventDetail};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    State {
        state: StateEventDetail,
    },
    QueuePlacementEvent {
        detail: PlacementEventDetail,
        resources: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_seconds: Option<i64>,
    },
    MatchmakingEvent {
        detail: MatchmakingEventDetail,
        resources: Vec<String>,
    },
}
