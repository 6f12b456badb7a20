use roomlink_core::RoomId;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://0.0.0.0:3000";
pub const DEFAULT_FRAME_QUEUE_CAPACITY: usize = 256;

/// Connection settings shared by the control and push channels.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Origin of the room service, e.g. `http://localhost:3000`.
    pub base_url: String,
    /// Applied to every control-plane HTTP call. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    /// Upper bound on the push handshake. `None` waits indefinitely.
    pub handshake_timeout: Option<Duration>,
    /// Inbound events buffered between the socket and the dispatcher.
    pub frame_queue_capacity: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            request_timeout: None,
            handshake_timeout: None,
            frame_queue_capacity: DEFAULT_FRAME_QUEUE_CAPACITY,
        }
    }
}

impl TransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = Some(timeout);
        self
    }

    pub fn with_frame_queue_capacity(mut self, capacity: usize) -> Self {
        self.frame_queue_capacity = capacity;
        self
    }

    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// WebSocket endpoint of a room's push channel, derived from the HTTP origin.
    pub fn channel_url(&self, room_id: &RoomId) -> String {
        let origin = self.base_url.trim_end_matches('/');
        let origin = if let Some(rest) = origin.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = origin.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            origin.to_owned()
        };

        format!("{origin}/room/{room_id}/channel")
    }
}
