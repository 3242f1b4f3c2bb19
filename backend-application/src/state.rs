use std::sync::Arc;

use backend_domain::ports::{AggregateStore, ConfigRepository, ConnectionRegistry};
use backend_domain::RuntimeConfig;

use crate::ops::StreamHub;
use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub store: Arc<dyn AggregateStore>,
    pub console_config: Arc<dyn ConfigRepository>,
    pub registry: Arc<dyn ConnectionRegistry>,
    pub hub: Arc<StreamHub>,
    pub metrics: Arc<Metrics>,
}
