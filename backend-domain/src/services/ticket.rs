// Ticket update planning
// Translates one matchmaking event into the conditional multi-field update
// merged into the ticket aggregate. Pure; the store applies it atomically.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::entities::MatchmakingEventType;
use crate::ports::{AttrValue, Update};

/// Plans the aggregate update for a single ticket referenced by an event.
///
/// The event id lands in the `events` string set, which makes redelivery a
/// no-op. `time` and `matchmakingConfigArn` are last-writer-wins; both are
/// stable per ticket so that is safe under reordering. `lastEventType` is
/// only overwritten by progress/terminal events.
pub fn plan_ticket_update(
    event_id: &str,
    start_time: DateTime<Utc>,
    config_arn: &str,
    event_type: MatchmakingEventType,
    match_id: Option<&str>,
    custom_event_data: Option<&str>,
    expires: i64,
) -> Update {
    let mut update = Update::default()
        .add("events", AttrValue::Ss(vec![event_id.to_string()]))
        .set(
            "time",
            AttrValue::S(start_time.to_rfc3339_opts(SecondsFormat::Millis, true)),
        )
        .set("matchmakingConfigArn", AttrValue::S(config_arn.to_string()))
        .set("expires", AttrValue::N(expires));

    if event_type.updates_last_event_type() {
        update = update.set(
            "lastEventType",
            AttrValue::S(event_type.as_str().to_string()),
        );
    }
    if let Some(match_id) = match_id {
        update = update.set("matchId", AttrValue::S(match_id.to_string()));
    }
    if let Some(data) = custom_event_data {
        if !data.is_empty() {
            update = update.set("customEventData", AttrValue::S(data.to_string()));
        }
    }
    update
}
