use crate::error::Result;
use async_trait::async_trait;
use roomlink_core::RoomCommand;

/// Destination for the commands owner plugins generate.
#[async_trait]
pub trait CommandRelay: Send + Sync {
    async fn relay(&self, commands: Vec<RoomCommand>) -> Result<()>;
}
