use roomlink_core::{ModelError, RoomId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RoomError>;

#[derive(Debug, Error)]
pub enum RoomError {
    /// The HTTP client could not be constructed from the configuration.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The room service could not be reached.
    #[error("room service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The room service answered with a non-success status.
    #[error("room service returned {status} for {endpoint}")]
    Status {
        status: reqwest::StatusCode,
        endpoint: String,
    },

    /// A response body was missing required fields or was otherwise unusable.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The push connection failed its handshake.
    #[error("failed to open room channel: {0}")]
    ChannelOpen(String),

    #[error("room {0} not found")]
    RoomNotFound(RoomId),
}

impl RoomError {
    /// Unreachable service or non-success status.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}

impl From<ModelError> for RoomError {
    fn from(err: ModelError) -> Self {
        Self::Protocol(err.to_string())
    }
}
