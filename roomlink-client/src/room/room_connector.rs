use crate::channel::PushChannel;
use crate::control::{ControlChannel, ControlRelay, HttpControlChannel, OpenOptions};
use crate::error::Result;
use crate::plugin::{Dispatcher, RoomCommandPlugin, RoomOwnerPlugin};
use crate::room::room_client::RoomClient;
use crate::transport::{PushTransport, TransportConfig, WsTransport};
use roomlink_core::{RoomId, SessionConfigs, UserId};
use std::sync::Arc;
use tracing::warn;

/// Builds [`RoomClient`]s from a control channel and a push transport.
#[derive(Clone)]
pub struct RoomConnector {
    control: Arc<dyn ControlChannel>,
    transport: Arc<dyn PushTransport>,
    config: TransportConfig,
}

impl RoomConnector {
    /// HTTP control plane and WebSocket push plane against `config.base_url`.
    pub fn new(config: TransportConfig) -> Result<Self> {
        let control = Arc::new(HttpControlChannel::new(config.clone())?);
        let transport = Arc::new(WsTransport::new(config.clone()));

        Ok(Self {
            control,
            transport,
            config,
        })
    }

    pub fn with_parts(
        control: Arc<dyn ControlChannel>,
        transport: Arc<dyn PushTransport>,
        config: TransportConfig,
    ) -> Self {
        Self {
            control,
            transport,
            config,
        }
    }

    /// Opens a new room. This session becomes the owner: both plugin roles
    /// are registered and owner replies are relayed through the control plane.
    pub async fn open(
        &self,
        options: OpenOptions,
        owners: Vec<Arc<dyn RoomOwnerPlugin>>,
        commands: Vec<Arc<dyn RoomCommandPlugin>>,
    ) -> Result<RoomClient> {
        let session = self.control.open(&options).await?;

        let relay = Arc::new(ControlRelay::new(Arc::clone(&self.control), session.clone()));
        let dispatcher = Dispatcher::owner(owners, commands, relay);

        self.attach(session, dispatcher).await
    }

    /// Joins an existing room. Joined sessions never hold the owner role.
    pub async fn join(
        &self,
        room_id: &RoomId,
        user_id: Option<&UserId>,
        commands: Vec<Arc<dyn RoomCommandPlugin>>,
    ) -> Result<RoomClient> {
        let session = self.control.join(room_id, user_id).await?;
        self.attach(session, Dispatcher::member(commands)).await
    }

    async fn attach(&self, session: SessionConfigs, dispatcher: Dispatcher) -> Result<RoomClient> {
        let opened = PushChannel::open(
            session.clone(),
            self.transport.as_ref(),
            dispatcher,
            &self.config,
        )
        .await;

        match opened {
            Ok(channel) => Ok(RoomClient::new(session, Arc::clone(&self.control), channel)),
            Err(e) => {
                if let Err(leave_err) = self.control.leave(&session).await {
                    warn!(
                        "Failed to leave room {} after channel error: {}",
                        session.room_id(),
                        leave_err
                    );
                }
                Err(e)
            }
        }
    }
}
