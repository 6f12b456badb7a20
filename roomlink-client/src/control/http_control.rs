use crate::control::control_channel::{ControlChannel, OpenOptions};
use crate::error::{Result, RoomError};
use crate::transport::{SESSION_HEADER, TransportConfig, session_credential};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use roomlink_core::{
    JoinRoomBody, JoinedRoom, OpenRoomBody, OpenedRoom, RequestCommand, RoomCommand, RoomId,
    SessionConfigs, UserId,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// [`ControlChannel`] over the room service's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpControlChannel {
    client: Client,
    config: TransportConfig,
}

impl HttpControlChannel {
    /// Builds an HTTP client honouring `config.request_timeout`.
    pub fn new(config: TransportConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build().map_err(RoomError::HttpClient)?,
            config,
        })
    }

    /// Uses a pre-configured HTTP client.
    pub fn with_client(client: Client, config: TransportConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn authorized(&self, builder: RequestBuilder, session: &SessionConfigs) -> RequestBuilder {
        builder.header(SESSION_HEADER, session_credential(session))
    }

    async fn send(&self, builder: RequestBuilder, endpoint: &str) -> Result<Response> {
        debug!("Calling room service {}", endpoint);
        let response = builder.send().await?;
        ensure_success(response, endpoint)
    }
}

fn ensure_success(response: Response, endpoint: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    warn!("Room service returned {} for {}", status, endpoint);
    Err(RoomError::Status {
        status,
        endpoint: endpoint.to_owned(),
    })
}

async fn read_body<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| RoomError::Protocol(format!("unexpected response from {endpoint}: {e}")))
}

#[async_trait]
impl ControlChannel for HttpControlChannel {
    async fn open(&self, options: &OpenOptions) -> Result<SessionConfigs> {
        let endpoint = "room/open";
        let body = OpenRoomBody {
            user_id: options.user_id.clone(),
            lifetime_sec: options.lifetime_sec,
            capacity: options.capacity,
        };

        let builder = self.client.post(self.config.api_url(endpoint)).json(&body);
        let response = self.send(builder, endpoint).await?;
        let opened: OpenedRoom = read_body(response, endpoint).await?;

        let session = SessionConfigs::new(opened.room_id, opened.session_id, opened.user_id)?;
        info!("Opened room {} as session {}", session.room_id(), session.session_id());
        Ok(session)
    }

    async fn join(&self, room_id: &RoomId, user_id: Option<&UserId>) -> Result<SessionConfigs> {
        let endpoint = format!("room/{room_id}/join");
        let body = JoinRoomBody {
            user_id: user_id.cloned(),
        };

        debug!("Calling room service {}", endpoint);
        let response = self
            .client
            .post(self.config.api_url(&endpoint))
            .json(&body)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(RoomError::RoomNotFound(room_id.clone()));
        }

        let response = ensure_success(response, &endpoint)?;
        let joined: JoinedRoom = read_body(response, &endpoint).await?;

        let session = SessionConfigs::new(room_id.clone(), joined.session_id, joined.user_id)?;
        info!("Joined room {} as session {}", session.room_id(), session.session_id());
        Ok(session)
    }

    async fn send_request(&self, session: &SessionConfigs, request: &RequestCommand) -> Result<()> {
        let endpoint = format!("room/{}/request", session.room_id());
        let builder = self
            .authorized(self.client.post(self.config.api_url(&endpoint)), session)
            .json(request);

        self.send(builder, &endpoint).await?;
        Ok(())
    }

    async fn send_commands(
        &self,
        session: &SessionConfigs,
        commands: &[RoomCommand],
    ) -> Result<()> {
        let endpoint = format!("room/{}/command", session.room_id());
        let builder = self
            .authorized(self.client.post(self.config.api_url(&endpoint)), session)
            .json(commands);

        self.send(builder, &endpoint).await?;
        Ok(())
    }

    async fn leave(&self, session: &SessionConfigs) -> Result<()> {
        let endpoint = format!("room/{}", session.room_id());
        let builder = self.authorized(self.client.delete(self.config.api_url(&endpoint)), session);

        self.send(builder, &endpoint).await?;
        info!("Left room {}", session.room_id());
        Ok(())
    }
}
