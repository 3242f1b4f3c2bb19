// Simulation path: per-simulation counters plus composite match results.

use backend_domain::ports::{AttrValue, ItemKey, Update};
use backend_domain::services::counters::counter_deltas;
use backend_domain::{
    EventEnvelope, MatchResult, MatchResultPlayer, MatchmakingEventDetail, MatchmakingEventType,
    SimulationPlayerProfile,
};
use tracing::{debug, warn};

use crate::commands::best_effort;
use crate::AppState;

/// What the match-result assembler did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssembleOutcome {
    Stored,
    /// Redelivery of an already-recorded match; the store kept the first
    /// record.
    Duplicate,
    NotApplicable,
    Failed,
}

pub async fn handle_simulation_event(
    state: &AppState,
    event: &EventEnvelope<MatchmakingEventDetail>,
) {
    let Some(simulation_id) = event
        .detail
        .custom_event_data
        .as_deref()
        .filter(|data| !data.is_empty())
    else {
        warn!(event_id = %event.id, "simulation event carries no simulation id");
        return;
    };

    increment_counters(state, simulation_id, &event.detail).await;
    assemble_match_result(state, simulation_id, event).await;
}

/// Applies the counter deltas for one event as a single atomic update.
/// Increments are commutative, so concurrent events for the same simulation
/// never lose counts; they are not deduplicated by event id.
async fn increment_counters(state: &AppState, simulation_id: &str, detail: &MatchmakingEventDetail) {
    let mut update = Update::default();
    for delta in counter_deltas(detail.event_type, detail.player_count()) {
        update = update.add(delta.field, AttrValue::N(delta.amount));
    }
    best_effort(
        &state.metrics,
        "simulation counter increment",
        state.store.update_item(
            &state.config.tables.simulations,
            ItemKey::new("simulationId", simulation_id),
            update,
        ),
    )
    .await;
}

/// Builds the composite match record when a potential match forms. Profile
/// lookups are best-effort per player: a miss marks the slot and moves on.
/// The record is written at most once per `(simulationId, matchId)`.
pub async fn assemble_match_result(
    state: &AppState,
    simulation_id: &str,
    event: &EventEnvelope<MatchmakingEventDetail>,
) -> AssembleOutcome {
    if event.detail.event_type != MatchmakingEventType::PotentialMatchCreated {
        return AssembleOutcome::NotApplicable;
    }
    let Some(match_id) = event.detail.match_id.as_deref() else {
        warn!(event_id = %event.id, "potential match event without a match id");
        return AssembleOutcome::NotApplicable;
    };

    let mut players = Vec::new();
    if let Some(info) = &event.detail.game_session_info {
        for player in &info.players {
            let profile = lookup_profile(state, simulation_id, &player.player_id).await;
            if profile.is_none() {
                warn!(
                    simulation_id,
                    player_id = %player.player_id,
                    "no stored profile for matched player"
                );
            }
            players.push(MatchResultPlayer {
                player_id: player.player_id.clone(),
                matched_team: player.team.clone(),
                profile_missing: profile.is_none(),
                profile,
            });
        }
    }

    let result = MatchResult {
        result_id: MatchResult::storage_key(simulation_id, match_id),
        simulation_id: simulation_id.to_string(),
        match_id: match_id.to_string(),
        date: event.time,
        rule_evaluation_metrics: event.detail.rule_evaluation_metrics.clone(),
        num_players: players.len() as i64,
        players,
    };
    let item = match serde_json::to_value(&result) {
        Ok(item) => item,
        Err(err) => {
            warn!("match result serialization failed: {err}");
            return AssembleOutcome::Failed;
        }
    };

    match best_effort(
        &state.metrics,
        "match result persist",
        state
            .store
            .put_item_if_absent(&state.config.tables.simulation_results, item),
    )
    .await
    {
        Some(true) => AssembleOutcome::Stored,
        Some(false) => {
            debug!(
                simulation_id,
                match_id, "match result already recorded, keeping the first"
            );
            AssembleOutcome::Duplicate
        }
        None => AssembleOutcome::Failed,
    }
}

async fn lookup_profile(
    state: &AppState,
    simulation_id: &str,
    player_id: &str,
) -> Option<SimulationPlayerProfile> {
    let key = ItemKey::new(
        "profileId",
        SimulationPlayerProfile::storage_key(simulation_id, player_id),
    );
    let item = best_effort(
        &state.metrics,
        "player profile lookup",
        state
            .store
            .get_item(&state.config.tables.simulation_players, &key),
    )
    .await
    .flatten()?;
    match serde_json::from_value(item) {
        Ok(profile) => Some(profile),
        Err(err) => {
            warn!(simulation_id, player_id, "stored profile is malformed: {err}");
            None
        }
    }
}
