use backend_domain::ServerMessage;
use tokio::sync::broadcast;

const CHANNEL_BUFFER: usize = 256;

/// Single fan-out channel backing the live-connection registry. Slow
/// observers lag and drop messages rather than block publication.
pub struct StreamHub {
    sender: broadcast::Sender<ServerMessage>,
}

impl Default for StreamHub {
    fn default() -> Self {
        let (sender, _rx) = broadcast::channel(CHANNEL_BUFFER);
        Self { sender }
    }
}

impl StreamHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerMessage> {
        self.sender.subscribe()
    }

    pub fn publish(&self, message: ServerMessage) {
        // No receivers connected is not an error.
        let _ = self.sender.send(message);
    }
}
