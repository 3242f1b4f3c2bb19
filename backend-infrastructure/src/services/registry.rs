// Live-connection registry backed by the application stream hub.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use backend_application::ops::StreamHub;
use backend_domain::ports::ConnectionRegistry;
use backend_domain::ServerMessage;

pub struct StreamHubRegistry {
    hub: Arc<StreamHub>,
}

impl StreamHubRegistry {
    pub fn new(hub: Arc<StreamHub>) -> Self {
        Self { hub }
    }
}

#[async_trait]
impl ConnectionRegistry for StreamHubRegistry {
    async fn broadcast(&self, message: ServerMessage) -> Result<()> {
        self.hub.publish(message);
        Ok(())
    }
}
