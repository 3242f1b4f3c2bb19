// Inbound event envelopes
// One detail shape per event domain: backend state snapshots, queue
// placements, matchmaking lifecycle notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw notification as delivered by the event bus. Delivery is at-least-once
/// and unordered; the envelope itself is immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope<D> {
    pub id: String,
    pub time: DateTime<Utc>,
    /// Originating resource identifiers. Index 0 is significant: matchmaking
    /// events are routed to the simulation path when it matches the
    /// configured simulator resource.
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(
        default,
        rename = "detail-type",
        skip_serializing_if = "Option::is_none"
    )]
    pub detail_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub detail: D,
}

/// Backend state snapshot pushed by the poller. Forwarded verbatim to
/// observers, so the payload stays opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateEventDetail(pub serde_json::Value);

/// Matchmaking lifecycle categories. The set is closed on purpose: an
/// unknown type string is a decode error, and every updater matches
/// exhaustively so a new category cannot silently no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchmakingEventType {
    PotentialMatchCreated,
    MatchmakingSearching,
    MatchmakingTimedOut,
    MatchmakingFailed,
    MatchmakingCancelled,
    MatchmakingSucceeded,
}

impl MatchmakingEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchmakingEventType::PotentialMatchCreated => "PotentialMatchCreated",
            MatchmakingEventType::MatchmakingSearching => "MatchmakingSearching",
            MatchmakingEventType::MatchmakingTimedOut => "MatchmakingTimedOut",
            MatchmakingEventType::MatchmakingFailed => "MatchmakingFailed",
            MatchmakingEventType::MatchmakingCancelled => "MatchmakingCancelled",
            MatchmakingEventType::MatchmakingSucceeded => "MatchmakingSucceeded",
        }
    }

    /// Searching plus the four terminal outcomes overwrite the ticket's
    /// `lastEventType`; `PotentialMatchCreated` is a side branch and does not.
    pub fn updates_last_event_type(&self) -> bool {
        !matches!(self, MatchmakingEventType::PotentialMatchCreated)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchmakingEventDetail {
    #[serde(rename = "type")]
    pub event_type: MatchmakingEventType,
    #[serde(default)]
    pub tickets: Vec<TicketHeader>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_id: Option<String>,
    /// Carries the simulation id for synthetic traffic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_event_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_session_info: Option<GameSessionInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_evaluation_metrics: Option<Vec<RuleEvaluationMetric>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_wait_millis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl MatchmakingEventDetail {
    /// Number of players the event affected, per the matchmaker's session
    /// info. Zero when the event carries no session info.
    pub fn player_count(&self) -> i64 {
        self.game_session_info
            .as_ref()
            .map(|info| info.players.len() as i64)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketHeader {
    pub ticket_id: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub players: Vec<MatchedPlayer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedPlayer {
    pub player_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSessionInfo {
    #[serde(default)]
    pub players: Vec<MatchedPlayer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_session_arn: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEvaluationMetric {
    pub rule_name: String,
    #[serde(default)]
    pub passed_count: i64,
    #[serde(default)]
    pub failed_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementEventDetail {
    #[serde(rename = "type")]
    pub event_type: String,
    pub placement_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_session_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_session_region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(default)]
    pub placed_player_sessions: Vec<PlacedPlayerSession>,
}

impl PlacementEventDetail {
    /// Whole-second placement duration. Unavailable when the queue never
    /// reported a start time for this placement.
    pub fn duration_seconds(&self) -> Option<i64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((end - start).num_seconds()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedPlayerSession {
    pub player_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_session_id: Option<String>,
}
