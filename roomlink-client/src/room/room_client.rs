use crate::channel::{ChannelState, PushChannel};
use crate::control::{ControlChannel, OpenOptions};
use crate::error::Result;
use crate::plugin::{RoomCommandPlugin, RoomOwnerPlugin};
use crate::room::room_connector::RoomConnector;
use crate::transport::TransportConfig;
use roomlink_core::{RequestCommand, RoomId, SessionConfigs, SessionId, UserId};
use std::sync::Arc;
use tokio::sync::watch;

/// A live membership in a room.
///
/// Requests go out over the control channel; commands come in over the push
/// channel and are handed to the registered plugins. Call [`leave`] for an
/// orderly shutdown. Dropping the client still closes the push connection,
/// but skips the service-side leave.
///
/// [`leave`]: RoomClient::leave
pub struct RoomClient {
    session: SessionConfigs,
    control: Arc<dyn ControlChannel>,
    channel: PushChannel,
}

impl RoomClient {
    pub(crate) fn new(
        session: SessionConfigs,
        control: Arc<dyn ControlChannel>,
        channel: PushChannel,
    ) -> Self {
        Self {
            session,
            control,
            channel,
        }
    }

    /// Opens a room over HTTP and WebSocket as its owner.
    pub async fn open(
        config: TransportConfig,
        options: OpenOptions,
        owners: Vec<Arc<dyn RoomOwnerPlugin>>,
        commands: Vec<Arc<dyn RoomCommandPlugin>>,
    ) -> Result<Self> {
        RoomConnector::new(config)?
            .open(options, owners, commands)
            .await
    }

    /// Joins a room over HTTP and WebSocket.
    pub async fn join(
        config: TransportConfig,
        room_id: &RoomId,
        user_id: Option<&UserId>,
        commands: Vec<Arc<dyn RoomCommandPlugin>>,
    ) -> Result<Self> {
        RoomConnector::new(config)?
            .join(room_id, user_id, commands)
            .await
    }

    pub async fn request(&self, request: RequestCommand) -> Result<()> {
        self.control.send_request(&self.session, &request).await
    }

    /// Closes the push channel, then tells the service this session is gone.
    pub async fn leave(mut self) -> Result<()> {
        self.channel.close().await;
        self.control.leave(&self.session).await
    }

    pub fn session(&self) -> &SessionConfigs {
        &self.session
    }

    pub fn room_id(&self) -> &RoomId {
        self.session.room_id()
    }

    pub fn session_id(&self) -> &SessionId {
        self.session.session_id()
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.session.user_id()
    }

    pub fn channel_state(&self) -> ChannelState {
        self.channel.state()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<ChannelState> {
        self.channel.subscribe()
    }
}
