use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    state_events: AtomicU64,
    placement_events: AtomicU64,
    matchmaking_events: AtomicU64,
    decode_errors: AtomicU64,
    store_errors: AtomicU64,
    broadcasts: AtomicU64,
    broadcast_errors: AtomicU64,
}

impl Metrics {
    pub fn record_state_event(&self) {
        self.state_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_placement_event(&self) {
        self.placement_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_matchmaking_event(&self) {
        self.matchmaking_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decode_error(&self) {
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_error(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_broadcast(&self) {
        self.broadcasts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_broadcast_error(&self) {
        self.broadcast_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let state_events = self.state_events.load(Ordering::Relaxed);
        let placement_events = self.placement_events.load(Ordering::Relaxed);
        let matchmaking_events = self.matchmaking_events.load(Ordering::Relaxed);
        let decode_errors = self.decode_errors.load(Ordering::Relaxed);
        let store_errors = self.store_errors.load(Ordering::Relaxed);
        let broadcasts = self.broadcasts.load(Ordering::Relaxed);
        let broadcast_errors = self.broadcast_errors.load(Ordering::Relaxed);

        format!(
            "# TYPE matchboard_state_events_total counter\n\
matchboard_state_events_total {}\n\
# TYPE matchboard_placement_events_total counter\n\
matchboard_placement_events_total {}\n\
# TYPE matchboard_matchmaking_events_total counter\n\
matchboard_matchmaking_events_total {}\n\
# TYPE matchboard_decode_errors_total counter\n\
matchboard_decode_errors_total {}\n\
# TYPE matchboard_store_errors_total counter\n\
matchboard_store_errors_total {}\n\
# TYPE matchboard_broadcasts_total counter\n\
matchboard_broadcasts_total {}\n\
# TYPE matchboard_broadcast_errors_total counter\n\
matchboard_broadcast_errors_total {}\n",
            state_events,
            placement_events,
            matchmaking_events,
            decode_errors,
            store_errors,
            broadcasts,
            broadcast_errors
        )
    }
}
