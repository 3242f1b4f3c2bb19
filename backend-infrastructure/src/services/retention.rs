// Retention sweeper
// Log-style records expire after the configured retention window; this task
// emulates store-side TTL by periodically dropping expired rows.

use std::time::Duration;

use tracing::{info, warn};

use backend_application::AppState;
use backend_domain::utils::unix_now;

pub async fn schedule_expiry_sweep(state: AppState) {
    let mut interval =
        tokio::time::interval(Duration::from_secs(state.config.sweep_interval_seconds));
    loop {
        interval.tick().await;
        let now = unix_now();
        for table in [
            &state.config.tables.event_log,
            &state.config.tables.ticket_log,
        ] {
            match state.store.purge_expired(table, now).await {
                Ok(0) => {}
                Ok(removed) => info!("expired {removed} rows from {table}"),
                Err(err) => warn!("expiry sweep failed for {table}: {err:#}"),
            }
        }
    }
}
