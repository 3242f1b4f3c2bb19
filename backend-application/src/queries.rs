// Read-side queries over the derived aggregates.

pub mod event_log_queries;
pub mod simulation_queries;
pub mod ticket_queries;
