use std::sync::Arc;

use anyhow::Result;

use backend_application::ops::StreamHub;
use backend_application::{AppState, Metrics};
use backend_infrastructure::{AppConfig, MemoryStore, StoreConfigRepository, StreamHubRegistry};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();

        let store = Arc::new(MemoryStore::new(&runtime_config.tables));
        let console_config = Arc::new(StoreConfigRepository::new(
            store.clone(),
            runtime_config.tables.console_config.clone(),
        ));
        let hub = Arc::new(StreamHub::new());
        let registry = Arc::new(StreamHubRegistry::new(hub.clone()));

        let state = AppState {
            config: runtime_config,
            store,
            console_config,
            registry,
            hub,
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
