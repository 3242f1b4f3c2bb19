// Simulation counter mapping
// Every matchmaking event category increments one primary counter; failure
// and success outcomes additionally move the match/player totals.

use crate::entities::MatchmakingEventType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterDelta {
    pub field: &'static str,
    pub amount: i64,
}

fn delta(field: &'static str, amount: i64) -> CounterDelta {
    CounterDelta { field, amount }
}

/// Add-deltas to apply for one event. All deltas are additive and applied as
/// atomic store adds, never read-modify-write, so concurrent events for the
/// same simulation stay correct.
pub fn counter_deltas(event_type: MatchmakingEventType, player_count: i64) -> Vec<CounterDelta> {
    match event_type {
        MatchmakingEventType::PotentialMatchCreated => {
            vec![delta("potentialMatchCreatedEvents", 1)]
        }
        MatchmakingEventType::MatchmakingSearching => {
            vec![delta("matchmakingSearchingEvents", 1)]
        }
        MatchmakingEventType::MatchmakingTimedOut => vec![
            delta("matchmakingTimedOutEvents", 1),
            delta("matchesFailed", 1),
            delta("playersFailed", player_count),
        ],
        MatchmakingEventType::MatchmakingFailed => vec![
            delta("matchmakingFailedEvents", 1),
            delta("matchesFailed", 1),
            delta("playersFailed", player_count),
        ],
        MatchmakingEventType::MatchmakingCancelled => vec![
            delta("matchmakingCancelledEvents", 1),
            delta("matchesFailed", 1),
            delta("playersFailed", player_count),
        ],
        MatchmakingEventType::MatchmakingSucceeded => vec![
            delta("matchmakingSucceededEvents", 1),
            delta("matchesMade", 1),
            delta("playersMatched", player_count),
        ],
    }
}
