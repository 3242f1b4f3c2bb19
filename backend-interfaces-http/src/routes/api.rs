use axum::Router;

use backend_application::AppState;

use crate::handlers::{
    config_handlers, ingest_handlers, ops_handlers, query_handlers, ws_handlers,
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/events/state",
            axum::routing::post(ingest_handlers::ingest_state_event),
        )
        .route(
            "/api/events/placement",
            axum::routing::post(ingest_handlers::ingest_placement_event),
        )
        .route(
            "/api/events/matchmaking",
            axum::routing::post(ingest_handlers::ingest_matchmaking_event),
        )
        .route(
            "/api/tickets/:ticket_id",
            axum::routing::get(query_handlers::get_ticket),
        )
        .route(
            "/api/simulations/:simulation_id",
            axum::routing::get(query_handlers::get_simulation),
        )
        .route(
            "/api/simulations/:simulation_id/results",
            axum::routing::get(query_handlers::list_simulation_results),
        )
        .route(
            "/api/simulations/:simulation_id/players",
            axum::routing::put(config_handlers::seed_simulation_players),
        )
        .route("/api/events", axum::routing::get(query_handlers::list_events))
        .route(
            "/api/placements/:placement_id",
            axum::routing::get(query_handlers::get_placement_events),
        )
        .route(
            "/api/config",
            axum::routing::get(config_handlers::get_console_config)
                .put(config_handlers::put_console_config),
        )
        .route("/api/observe", axum::routing::get(ws_handlers::observe))
        .route("/health/live", axum::routing::get(ops_handlers::health_live))
        .route(
            "/metrics",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
