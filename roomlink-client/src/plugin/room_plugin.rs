use crate::plugin::reply::Reply;
use async_trait::async_trait;
use roomlink_core::{RoomCommand, UserRequest};

/// Turns user requests into room commands. Only registered on the session
/// that opened the room.
///
/// Invocations for different frames may overlap, so implementations must not
/// assume exclusive access to shared state.
#[async_trait]
pub trait RoomOwnerPlugin: Send + Sync + 'static {
    async fn on_request(&self, request: UserRequest) -> anyhow::Result<Reply>;
}

/// Reacts to commands delivered to this session.
#[async_trait]
pub trait RoomCommandPlugin: Send + Sync + 'static {
    async fn execute(&self, command: RoomCommand) -> anyhow::Result<()>;
}
