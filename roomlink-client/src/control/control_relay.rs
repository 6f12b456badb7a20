use crate::control::control_channel::ControlChannel;
use crate::error::Result;
use crate::plugin::CommandRelay;
use async_trait::async_trait;
use roomlink_core::{RoomCommand, SessionConfigs};
use std::sync::Arc;

/// Sends owner-generated commands back through the control plane.
pub struct ControlRelay {
    control: Arc<dyn ControlChannel>,
    session: SessionConfigs,
}

impl ControlRelay {
    pub fn new(control: Arc<dyn ControlChannel>, session: SessionConfigs) -> Self {
        Self { control, session }
    }
}

#[async_trait]
impl CommandRelay for ControlRelay {
    async fn relay(&self, commands: Vec<RoomCommand>) -> Result<()> {
        self.control.send_commands(&self.session, &commands).await
    }
}
