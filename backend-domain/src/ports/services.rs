use async_trait::async_trait;

use crate::entities::ServerMessage;

/// Live-connection registry boundary. Delivers a message to every currently
/// connected observer; fire-and-forget, no per-observer addressing and no
/// acknowledgment.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    async fn broadcast(&self, message: ServerMessage) -> anyhow::Result<()>;
}
