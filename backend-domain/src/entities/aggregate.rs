// Derived aggregates built incrementally from the event stream.
// All of them are written through the durable store's atomic primitives,
// never through in-process shared state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::event::{MatchmakingEventType, RuleEvaluationMetric};

/// Per-ticket view of a matchmaking request, merged from every event that
/// references the ticket. The `events` id set is the dedup mechanism for
/// at-least-once delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketAggregate {
    pub ticket_id: String,
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matchmaking_config_arn: Option<String>,
    /// Most recently *processed* progress event, not necessarily the most
    /// recently occurred one. Arrival order is not guaranteed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_event_type: Option<MatchmakingEventType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_event_data: Option<String>,
    #[serde(default)]
    pub expires: i64,
}

/// Monotonic per-simulation counters, one family per matchmaking event
/// category plus the derived player/match totals. Increments are atomic
/// adds and are not deduplicated by event id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationCounters {
    pub simulation_id: String,
    #[serde(default)]
    pub potential_match_created_events: i64,
    #[serde(default)]
    pub matchmaking_searching_events: i64,
    #[serde(default)]
    pub matchmaking_timed_out_events: i64,
    #[serde(default)]
    pub matchmaking_failed_events: i64,
    #[serde(default)]
    pub matchmaking_cancelled_events: i64,
    #[serde(default)]
    pub matchmaking_succeeded_events: i64,
    #[serde(default)]
    pub matches_made: i64,
    #[serde(default)]
    pub matches_failed: i64,
    #[serde(default)]
    pub players_matched: i64,
    #[serde(default)]
    pub players_failed: i64,
}

/// Composite record built when the matchmaker forms a potential match in
/// simulation mode. Written once, immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Storage key, `simulationId#matchId`.
    pub result_id: String,
    pub simulation_id: String,
    pub match_id: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_evaluation_metrics: Option<Vec<RuleEvaluationMetric>>,
    pub num_players: i64,
    #[serde(default)]
    pub players: Vec<MatchResultPlayer>,
}

impl MatchResult {
    pub fn storage_key(simulation_id: &str, match_id: &str) -> String {
        format!("{simulation_id}#{match_id}")
    }
}

/// One player slot in a match result: the team the matchmaker assigned plus
/// the seeded profile, when the enrichment lookup hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResultPlayer {
    pub player_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<SimulationPlayerProfile>,
    #[serde(default)]
    pub profile_missing: bool,
}

/// Player profile seeded before a simulation run, looked up per
/// `(simulationId, playerId)` during match-result assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationPlayerProfile {
    #[serde(default)]
    pub simulation_id: String,
    pub player_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_name: Option<String>,
    #[serde(default)]
    pub player_attributes: serde_json::Value,
}

impl SimulationPlayerProfile {
    pub fn storage_key(simulation_id: &str, player_id: &str) -> String {
        format!("{simulation_id}#{player_id}")
    }
}

/// Console configuration aggregate, stored under a single well-known name.
/// The simulator resource identifier drives simulation-path routing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleConfig {
    #[serde(default)]
    pub config_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matchmaking_simulator_arn: Option<String>,
}
