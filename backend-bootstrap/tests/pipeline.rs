// End-to-end pipeline tests: dispatch raw envelopes through the application
// commands against the in-memory store and assert on the derived aggregates
// and observer fan-out.

use std::sync::Arc;

use anyhow::bail;
use async_trait::async_trait;
use serde_json::{json, Value};

use backend_application::commands::dispatch::{dispatch, EventDomain};
use backend_application::commands::{config_commands, simulation_commands};
use backend_application::commands::simulation_commands::AssembleOutcome;
use backend_application::ops::StreamHub;
use backend_application::queries::{event_log_queries, simulation_queries, ticket_queries};
use backend_application::{AppError, AppState, Metrics};
use backend_domain::ports::{AggregateStore, ItemKey, Update};
use backend_domain::{
    ConsoleConfig, EventEnvelope, MatchmakingEventDetail, MatchmakingEventType, PlacementId,
    RuntimeConfig, ServerMessage, SimulationId, SimulationPlayerProfile, TableNames,
    TicketAggregate, TicketId,
};
use backend_infrastructure::{MemoryStore, StoreConfigRepository, StreamHubRegistry};

const SIMULATOR_ARN: &str = "arn:matchmaking:simulator/console";
const PRODUCTION_ARN: &str = "arn:matchmaking:configuration/live";

fn test_tables() -> TableNames {
    TableNames {
        event_log: "event-log".to_string(),
        ticket_log: "ticket-log".to_string(),
        simulations: "matchmaking-simulations".to_string(),
        simulation_results: "simulation-results".to_string(),
        simulation_players: "simulation-players".to_string(),
        console_config: "console-config".to_string(),
    }
}

fn test_state() -> AppState {
    state_with_store(Arc::new(MemoryStore::new(&test_tables())))
}

fn state_with_store(store: Arc<dyn AggregateStore>) -> AppState {
    let config = RuntimeConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        api_token: None,
        tables: test_tables(),
        retention_days: 7,
        sweep_interval_seconds: 300,
        max_body_bytes: 1024 * 1024,
        request_timeout_seconds: 15,
    };
    let console_config = Arc::new(StoreConfigRepository::new(
        store.clone(),
        config.tables.console_config.clone(),
    ));
    let hub = Arc::new(StreamHub::new());
    let registry = Arc::new(StreamHubRegistry::new(hub.clone()));
    AppState {
        config,
        store,
        console_config,
        registry,
        hub,
        metrics: Arc::new(Metrics::default()),
    }
}

/// Store double that fails selected operations while delegating everything
/// else, for exercising the fire-log-continue policy.
struct FlakyStore {
    inner: MemoryStore,
    fail_puts_to: Option<String>,
    fail_updates_for: Option<String>,
}

impl FlakyStore {
    fn new(fail_puts_to: Option<&str>, fail_updates_for: Option<&str>) -> Self {
        Self {
            inner: MemoryStore::new(&test_tables()),
            fail_puts_to: fail_puts_to.map(str::to_string),
            fail_updates_for: fail_updates_for.map(str::to_string),
        }
    }
}

#[async_trait]
impl AggregateStore for FlakyStore {
    async fn put_item(&self, table: &str, item: Value) -> anyhow::Result<()> {
        if self.fail_puts_to.as_deref() == Some(table) {
            bail!("store unavailable");
        }
        self.inner.put_item(table, item).await
    }

    async fn put_item_if_absent(&self, table: &str, item: Value) -> anyhow::Result<bool> {
        self.inner.put_item_if_absent(table, item).await
    }

    async fn update_item(&self, table: &str, key: ItemKey, update: Update) -> anyhow::Result<()> {
        if self.fail_updates_for.as_deref() == Some(key.value.as_str()) {
            bail!("store unavailable");
        }
        self.inner.update_item(table, key, update).await
    }

    async fn get_item(&self, table: &str, key: &ItemKey) -> anyhow::Result<Option<Value>> {
        self.inner.get_item(table, key).await
    }

    async fn query_by_field(
        &self,
        table: &str,
        field: &str,
        value: &str,
    ) -> anyhow::Result<Vec<Value>> {
        self.inner.query_by_field(table, field, value).await
    }

    async fn purge_expired(&self, table: &str, now: i64) -> anyhow::Result<usize> {
        self.inner.purge_expired(table, now).await
    }
}

async fn enable_simulator(state: &AppState) {
    config_commands::put_console_config(
        state,
        ConsoleConfig {
            config_name: String::new(),
            matchmaking_simulator_arn: Some(SIMULATOR_ARN.to_string()),
        },
    )
    .await
    .expect("store console config");
}

fn matchmaking_event(
    event_id: &str,
    resource: &str,
    event_type: &str,
    ticket_ids: &[&str],
    player_ids: &[&str],
    match_id: Option<&str>,
    simulation_id: Option<&str>,
) -> Value {
    let tickets: Vec<Value> = ticket_ids
        .iter()
        .map(|id| json!({"ticketId": id, "startTime": "2024-03-01T09:59:58Z"}))
        .collect();
    let players: Vec<Value> = player_ids
        .iter()
        .enumerate()
        .map(|(i, id)| json!({"playerId": id, "team": if i % 2 == 0 { "red" } else { "blue" }}))
        .collect();
    let mut detail = json!({
        "type": event_type,
        "tickets": tickets,
        "gameSessionInfo": {"players": players},
    });
    if let Some(match_id) = match_id {
        detail["matchId"] = json!(match_id);
    }
    if let Some(simulation_id) = simulation_id {
        detail["customEventData"] = json!(simulation_id);
    }
    json!({
        "id": event_id,
        "time": "2024-03-01T10:00:00Z",
        "resources": [resource],
        "detail": detail,
    })
}

async fn dispatch_value(state: &AppState, domain: EventDomain, body: &Value) {
    let bytes = serde_json::to_vec(body).expect("serialize body");
    dispatch(state, domain, &bytes).await.expect("dispatch event");
}

async fn get_ticket(state: &AppState, ticket_id: &str) -> TicketAggregate {
    ticket_queries::get_ticket(state, &TicketId(ticket_id.to_string()))
        .await
        .expect("ticket aggregate")
}

#[tokio::test]
async fn succeeded_event_updates_ticket_and_simulation_counters() {
    let state = test_state();
    enable_simulator(&state).await;

    let body = matchmaking_event(
        "e-1",
        SIMULATOR_ARN,
        "MatchmakingSucceeded",
        &["t-1"],
        &["p1", "p2"],
        Some("m-1"),
        Some("sim-1"),
    );
    dispatch_value(&state, EventDomain::Matchmaking, &body).await;

    let ticket = get_ticket(&state, "t-1").await;
    assert_eq!(
        ticket.last_event_type,
        Some(MatchmakingEventType::MatchmakingSucceeded)
    );
    assert_eq!(ticket.match_id.as_deref(), Some("m-1"));
    assert_eq!(ticket.custom_event_data.as_deref(), Some("sim-1"));
    assert_eq!(ticket.matchmaking_config_arn.as_deref(), Some(SIMULATOR_ARN));
    assert_eq!(ticket.events, vec!["e-1".to_string()]);

    let counters =
        simulation_queries::get_simulation_counters(&state, &SimulationId("sim-1".to_string()))
            .await
            .expect("simulation counters");
    assert_eq!(counters.matchmaking_succeeded_events, 1);
    assert_eq!(counters.matches_made, 1);
    assert_eq!(counters.players_matched, 2);
    assert_eq!(counters.matches_failed, 0);
    assert_eq!(counters.players_failed, 0);
}

#[tokio::test]
async fn failed_event_moves_failure_totals_by_player_count() {
    let state = test_state();
    enable_simulator(&state).await;

    let body = matchmaking_event(
        "e-2",
        SIMULATOR_ARN,
        "MatchmakingFailed",
        &["t-2"],
        &["p1", "p2", "p3"],
        None,
        Some("sim-2"),
    );
    dispatch_value(&state, EventDomain::Matchmaking, &body).await;

    let counters =
        simulation_queries::get_simulation_counters(&state, &SimulationId("sim-2".to_string()))
            .await
            .expect("simulation counters");
    assert_eq!(counters.matchmaking_failed_events, 1);
    assert_eq!(counters.matches_failed, 1);
    assert_eq!(counters.players_failed, 3);
    assert_eq!(counters.matches_made, 0);
    assert_eq!(counters.players_matched, 0);
}

#[tokio::test]
async fn redelivered_event_leaves_the_ticket_unchanged() {
    let state = test_state();

    let body = matchmaking_event(
        "e-3",
        PRODUCTION_ARN,
        "MatchmakingSearching",
        &["t-3"],
        &[],
        None,
        None,
    );
    dispatch_value(&state, EventDomain::Matchmaking, &body).await;
    let first = get_ticket(&state, "t-3").await;

    dispatch_value(&state, EventDomain::Matchmaking, &body).await;
    let second = get_ticket(&state, "t-3").await;

    assert_eq!(second.events, vec!["e-3".to_string()]);
    assert_eq!(first.events, second.events);
    assert_eq!(first.time, second.time);
    assert_eq!(first.last_event_type, second.last_event_type);
    assert_eq!(first.matchmaking_config_arn, second.matchmaking_config_arn);
}

#[tokio::test]
async fn reordered_events_agree_on_everything_but_last_event_type() {
    let state = test_state();

    let searching = |ticket: &str| {
        matchmaking_event(
            "e-search",
            PRODUCTION_ARN,
            "MatchmakingSearching",
            &[ticket],
            &[],
            None,
            None,
        )
    };
    let succeeded = |ticket: &str| {
        matchmaking_event(
            "e-succeed",
            PRODUCTION_ARN,
            "MatchmakingSucceeded",
            &[ticket],
            &["p1"],
            Some("m-9"),
            None,
        )
    };

    dispatch_value(&state, EventDomain::Matchmaking, &searching("t-fwd")).await;
    dispatch_value(&state, EventDomain::Matchmaking, &succeeded("t-fwd")).await;

    dispatch_value(&state, EventDomain::Matchmaking, &succeeded("t-rev")).await;
    dispatch_value(&state, EventDomain::Matchmaking, &searching("t-rev")).await;

    let forward = get_ticket(&state, "t-fwd").await;
    let reversed = get_ticket(&state, "t-rev").await;

    assert_eq!(forward.events, reversed.events);
    assert_eq!(forward.time, reversed.time);
    assert_eq!(forward.matchmaking_config_arn, reversed.matchmaking_config_arn);
    assert_eq!(forward.match_id, reversed.match_id);
    // lastEventType reflects processing order, a known ordering weakness.
    assert_eq!(
        forward.last_event_type,
        Some(MatchmakingEventType::MatchmakingSucceeded)
    );
    assert_eq!(
        reversed.last_event_type,
        Some(MatchmakingEventType::MatchmakingSearching)
    );
}

#[tokio::test]
async fn match_result_enriches_seeded_players_and_marks_misses() {
    let state = test_state();
    enable_simulator(&state).await;

    config_commands::seed_simulation_players(
        &state,
        "sim-3",
        vec![SimulationPlayerProfile {
            simulation_id: String::new(),
            player_id: "p1".to_string(),
            profile_name: Some("aggressive".to_string()),
            player_attributes: json!({"skill": 42}),
        }],
    )
    .await
    .expect("seed profiles");

    let body = matchmaking_event(
        "e-4",
        SIMULATOR_ARN,
        "PotentialMatchCreated",
        &["t-4"],
        &["p1", "p2"],
        Some("m-2"),
        Some("sim-3"),
    );
    dispatch_value(&state, EventDomain::Matchmaking, &body).await;

    let results =
        simulation_queries::list_match_results(&state, &SimulationId("sim-3".to_string()))
            .await
            .expect("match results");
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.match_id, "m-2");
    assert_eq!(result.num_players, 2);
    assert_eq!(result.players.len(), 2);

    let enriched = result
        .players
        .iter()
        .find(|p| p.player_id == "p1")
        .expect("enriched slot");
    assert!(!enriched.profile_missing);
    let profile = enriched.profile.as_ref().expect("profile present");
    assert_eq!(profile.profile_name.as_deref(), Some("aggressive"));

    let missed = result
        .players
        .iter()
        .find(|p| p.player_id == "p2")
        .expect("missed slot");
    assert!(missed.profile_missing);
    assert!(missed.profile.is_none());
}

#[tokio::test]
async fn match_result_is_written_at_most_once() {
    let state = test_state();

    let body = matchmaking_event(
        "e-5",
        SIMULATOR_ARN,
        "PotentialMatchCreated",
        &["t-5"],
        &["p1"],
        Some("m-3"),
        Some("sim-4"),
    );
    let envelope: EventEnvelope<MatchmakingEventDetail> =
        serde_json::from_value(body).expect("decode envelope");

    let first = simulation_commands::assemble_match_result(&state, "sim-4", &envelope).await;
    assert_eq!(first, AssembleOutcome::Stored);

    let second = simulation_commands::assemble_match_result(&state, "sim-4", &envelope).await;
    assert_eq!(second, AssembleOutcome::Duplicate);

    let results =
        simulation_queries::list_match_results(&state, &SimulationId("sim-4".to_string()))
            .await
            .expect("match results");
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn assembler_reports_not_applicable_for_other_event_types() {
    let state = test_state();

    let body = matchmaking_event(
        "e-6",
        SIMULATOR_ARN,
        "MatchmakingSucceeded",
        &["t-6"],
        &["p1"],
        Some("m-4"),
        Some("sim-5"),
    );
    let envelope: EventEnvelope<MatchmakingEventDetail> =
        serde_json::from_value(body).expect("decode envelope");

    let outcome = simulation_commands::assemble_match_result(&state, "sim-5", &envelope).await;
    assert_eq!(outcome, AssembleOutcome::NotApplicable);
}

#[tokio::test]
async fn production_event_is_broadcast_and_skips_simulation_counters() {
    let state = test_state();
    enable_simulator(&state).await;
    let mut observer = state.hub.subscribe();

    let body = matchmaking_event(
        "e-7",
        PRODUCTION_ARN,
        "MatchmakingSucceeded",
        &["t-7"],
        &["p1"],
        Some("m-5"),
        Some("sim-6"),
    );
    dispatch_value(&state, EventDomain::Matchmaking, &body).await;

    match observer.try_recv().expect("broadcast message") {
        ServerMessage::MatchmakingEvent { detail, resources } => {
            assert_eq!(detail.event_type, MatchmakingEventType::MatchmakingSucceeded);
            assert_eq!(resources, vec![PRODUCTION_ARN.to_string()]);
        }
        other => panic!("unexpected message: {other:?}"),
    }

    let counters =
        simulation_queries::get_simulation_counters(&state, &SimulationId("sim-6".to_string()))
            .await;
    assert!(matches!(counters, Err(AppError::NotFound)));
}

#[tokio::test]
async fn placement_event_is_logged_and_broadcast_with_duration() {
    let state = test_state();
    let mut observer = state.hub.subscribe();

    let body = json!({
        "id": "e-8",
        "time": "2024-03-01T10:01:00Z",
        "resources": ["arn:queue/main"],
        "detail": {
            "type": "PlacementFulfilled",
            "placementId": "pl-1",
            "startTime": "2024-03-01T10:00:18Z",
            "endTime": "2024-03-01T10:01:00Z"
        }
    });
    dispatch_value(&state, EventDomain::QueuePlacement, &body).await;

    match observer.try_recv().expect("broadcast message") {
        ServerMessage::QueuePlacementEvent {
            detail,
            duration_seconds,
            ..
        } => {
            assert_eq!(detail.placement_id, "pl-1");
            assert_eq!(duration_seconds, Some(42));
        }
        other => panic!("unexpected message: {other:?}"),
    }

    let entries =
        event_log_queries::get_placement_events(&state, &PlacementId("pl-1".to_string()))
            .await
            .expect("placement log entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["time-id"], "2024-03-01T10:01:00-e-8");
    assert_eq!(entries[0]["date"], "2024-03-01");
}

#[tokio::test]
async fn placement_without_start_time_reports_no_duration() {
    let state = test_state();
    let mut observer = state.hub.subscribe();

    let body = json!({
        "id": "e-9",
        "time": "2024-03-01T10:02:00Z",
        "detail": {
            "type": "PlacementTimedOut",
            "placementId": "pl-2",
            "endTime": "2024-03-01T10:02:00Z"
        }
    });
    dispatch_value(&state, EventDomain::QueuePlacement, &body).await;

    match observer.try_recv().expect("broadcast message") {
        ServerMessage::QueuePlacementEvent {
            duration_seconds, ..
        } => assert_eq!(duration_seconds, None),
        other => panic!("unexpected message: {other:?}"),
    }
}

#[tokio::test]
async fn state_event_is_forwarded_verbatim() {
    let state = test_state();
    let mut observer = state.hub.subscribe();

    let body = json!({
        "id": "e-10",
        "time": "2024-03-01T10:03:00Z",
        "detail": {"fleets": [{"fleetId": "f-1", "status": "ACTIVE"}]}
    });
    dispatch_value(&state, EventDomain::State, &body).await;

    match observer.try_recv().expect("broadcast message") {
        ServerMessage::State { state: snapshot } => {
            assert_eq!(snapshot.0["fleets"][0]["fleetId"], "f-1");
        }
        other => panic!("unexpected message: {other:?}"),
    }
}

#[tokio::test]
async fn decode_failure_is_fatal_and_leaves_no_side_effects() {
    let state = test_state();
    let mut observer = state.hub.subscribe();

    let result = dispatch(&state, EventDomain::Matchmaking, b"{not json").await;
    assert!(matches!(result, Err(AppError::Decode(_))));

    let garbled = json!({
        "id": "e-11",
        "time": "2024-03-01T10:04:00Z",
        "detail": {"type": "MatchmakingExploded"}
    });
    let bytes = serde_json::to_vec(&garbled).unwrap();
    let result = dispatch(&state, EventDomain::Matchmaking, &bytes).await;
    assert!(matches!(result, Err(AppError::Decode(_))));

    let entries = event_log_queries::list_events_by_date(&state, "2024-03-01")
        .await
        .expect("event log query");
    assert!(entries.is_empty());
    assert!(observer.try_recv().is_err());
}

#[tokio::test]
async fn event_log_keeps_the_raw_envelope_sorted_by_time_id() {
    let state = test_state();

    let later = matchmaking_event(
        "e-b",
        PRODUCTION_ARN,
        "MatchmakingSearching",
        &["t-8"],
        &[],
        None,
        None,
    );
    let mut earlier = later.clone();
    earlier["id"] = json!("e-a");
    dispatch_value(&state, EventDomain::Matchmaking, &later).await;
    dispatch_value(&state, EventDomain::Matchmaking, &earlier).await;

    let entries = event_log_queries::list_events_by_date(&state, "2024-03-01")
        .await
        .expect("event log query");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], "e-a");
    assert_eq!(entries[1]["id"], "e-b");
    assert_eq!(entries[0]["detail"]["type"], "MatchmakingSearching");
}

#[tokio::test]
async fn placement_is_still_broadcast_when_the_log_write_fails() {
    let state = state_with_store(Arc::new(FlakyStore::new(Some("event-log"), None)));
    let mut observer = state.hub.subscribe();

    let body = json!({
        "id": "e-12",
        "time": "2024-03-01T10:05:00Z",
        "resources": ["arn:queue/main"],
        "detail": {
            "type": "PlacementFulfilled",
            "placementId": "pl-9",
            "startTime": "2024-03-01T10:04:18Z",
            "endTime": "2024-03-01T10:05:00Z"
        }
    });
    dispatch_value(&state, EventDomain::QueuePlacement, &body).await;

    match observer.try_recv().expect("broadcast message") {
        ServerMessage::QueuePlacementEvent {
            detail,
            duration_seconds,
            ..
        } => {
            assert_eq!(detail.placement_id, "pl-9");
            assert_eq!(duration_seconds, Some(42));
        }
        other => panic!("unexpected message: {other:?}"),
    }

    let entries =
        event_log_queries::get_placement_events(&state, &PlacementId("pl-9".to_string())).await;
    assert!(matches!(entries, Err(AppError::NotFound)));
}

#[tokio::test]
async fn failed_ticket_write_does_not_block_the_other_tickets() {
    let state = state_with_store(Arc::new(FlakyStore::new(None, Some("t-bad"))));
    let mut observer = state.hub.subscribe();

    let body = matchmaking_event(
        "e-13",
        PRODUCTION_ARN,
        "MatchmakingSearching",
        &["t-bad", "t-good"],
        &[],
        None,
        None,
    );
    dispatch_value(&state, EventDomain::Matchmaking, &body).await;

    let good = get_ticket(&state, "t-good").await;
    assert_eq!(good.events, vec!["e-13".to_string()]);
    assert_eq!(
        good.last_event_type,
        Some(MatchmakingEventType::MatchmakingSearching)
    );

    let bad = ticket_queries::get_ticket(&state, &TicketId("t-bad".to_string())).await;
    assert!(matches!(bad, Err(AppError::NotFound)));

    assert!(matches!(
        observer.try_recv(),
        Ok(ServerMessage::MatchmakingEvent { .. })
    ));
}
