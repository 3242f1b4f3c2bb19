// Event ingest surface. Each endpoint carries the domain tag for the
// dispatcher; the body is the raw envelope from the event bus.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use tracing::error;

use backend_application::commands::dispatch::{self, EventDomain};
use backend_application::{AppError, AppState};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn ingest_state_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<StatusCode, HttpError> {
    ingest(state, headers, body, EventDomain::State).await
}

pub async fn ingest_placement_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<StatusCode, HttpError> {
    ingest(state, headers, body, EventDomain::QueuePlacement).await
}

pub async fn ingest_matchmaking_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<StatusCode, HttpError> {
    ingest(state, headers, body, EventDomain::Matchmaking).await
}

async fn ingest(
    state: AppState,
    headers: HeaderMap,
    body: axum::body::Bytes,
    domain: EventDomain,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    match dispatch::dispatch(&state, domain, &body).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(err @ AppError::Decode(_)) => {
            error!("failed to decode inbound envelope: {err}");
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}
