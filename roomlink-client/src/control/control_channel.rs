use crate::error::Result;
use async_trait::async_trait;
use roomlink_core::{RequestCommand, RoomCommand, RoomId, SessionConfigs, UserId};

/// Parameters of `open`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenOptions {
    pub user_id: Option<UserId>,
    /// How long the service keeps the room alive.
    pub lifetime_sec: Option<u64>,
    /// Maximum number of sessions in the room.
    pub capacity: Option<u64>,
}

impl OpenOptions {
    pub fn with_user_id(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_lifetime_sec(mut self, lifetime_sec: u64) -> Self {
        self.lifetime_sec = Some(lifetime_sec);
        self
    }

    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

/// Request/response plane of the room service.
///
/// Every session-scoped call authenticates with the descriptor's session id.
#[async_trait]
pub trait ControlChannel: Send + Sync {
    /// Opens a new room owned by the caller.
    async fn open(&self, options: &OpenOptions) -> Result<SessionConfigs>;

    /// Joins an existing room.
    async fn join(&self, room_id: &RoomId, user_id: Option<&UserId>) -> Result<SessionConfigs>;

    /// Submits a request. Resulting commands arrive later on the push channel.
    async fn send_request(&self, session: &SessionConfigs, request: &RequestCommand) -> Result<()>;

    /// Hands owner-generated commands to the service for delivery, in order.
    async fn send_commands(&self, session: &SessionConfigs, commands: &[RoomCommand])
    -> Result<()>;

    /// Leaves the room. The descriptor must not be used afterwards.
    async fn leave(&self, session: &SessionConfigs) -> Result<()>;
}
