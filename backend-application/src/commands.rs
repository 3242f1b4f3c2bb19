// Application commands, one module per event domain.

pub mod config_commands;
pub mod dispatch;
pub mod matchmaking_commands;
pub mod placement_commands;
pub mod simulation_commands;
pub mod state_commands;
pub mod ticket_commands;

use std::future::Future;

use backend_domain::ServerMessage;
use tracing::warn;

use crate::{AppState, Metrics};

/// Uniform policy for store calls: fire, log, continue. A failed write
/// degrades to missing aggregate data and must never block the rest of the
/// event's processing.
pub(crate) async fn best_effort<T, F>(metrics: &Metrics, op: &str, fut: F) -> Option<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match fut.await {
        Ok(value) => Some(value),
        Err(err) => {
            metrics.record_store_error();
            warn!("{op} failed: {err:#}");
            None
        }
    }
}

/// Forwards a normalized message to the live-connection registry. No local
/// retry; delivery is the registry's responsibility.
pub(crate) async fn notify(state: &AppState, message: ServerMessage) {
    match state.registry.broadcast(message).await {
        Ok(()) => state.metrics.record_broadcast(),
        Err(err) => {
            state.metrics.record_broadcast_error();
            warn!("broadcast failed: {err:#}");
        }
    }
}
