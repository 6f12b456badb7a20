use crate::transport::push_connection::{
    PushConnection, PushTransport, SESSION_HEADER, session_credential,
};
use crate::transport::transport_config::TransportConfig;
use crate::transport::transport_event::TransportEvent;
use futures::{SinkExt, StreamExt};
use roomlink_core::SessionConfigs;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tracing::{debug, info};

/// WebSocket push transport for `/room/{room_id}/channel`.
#[derive(Debug, Clone, Default)]
pub struct WsTransport {
    config: TransportConfig,
}

impl WsTransport {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }
}

impl PushTransport for WsTransport {
    fn connect(
        &self,
        session: &SessionConfigs,
        events: mpsc::Sender<TransportEvent>,
    ) -> PushConnection {
        let url = self.config.channel_url(session.room_id());
        let credential = session_credential(session);

        PushConnection::spawn(move |shutdown| drive(url, credential, events, shutdown))
    }
}

fn build_request(url: &str, credential: &str) -> Result<Request, String> {
    let mut request = url
        .into_client_request()
        .map_err(|e| format!("invalid channel url {url}: {e}"))?;
    let credential =
        HeaderValue::from_str(credential).map_err(|e| format!("invalid session credential: {e}"))?;
    request.headers_mut().insert(SESSION_HEADER, credential);
    Ok(request)
}

async fn drive(
    url: String,
    credential: String,
    events: mpsc::Sender<TransportEvent>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let request = match build_request(&url, &credential) {
        Ok(request) => request,
        Err(reason) => {
            let _ = events.send(TransportEvent::Failed(reason)).await;
            return;
        }
    };

    debug!("Connecting room channel {}", url);

    let stream = tokio::select! {
        connected = connect_async(request) => match connected {
            Ok((stream, _)) => stream,
            Err(e) => {
                let _ = events.send(TransportEvent::Failed(e.to_string())).await;
                return;
            }
        },
        _ = &mut shutdown => return,
    };

    if events.send(TransportEvent::Opened).await.is_err() {
        return;
    }

    let (mut write, mut read) = stream.split();

    loop {
        tokio::select! {
            incoming = read.next() => {
                let event = match incoming {
                    Some(Ok(Message::Text(text))) => TransportEvent::Frame(text),
                    Some(Ok(Message::Close(frame))) => TransportEvent::Closed(
                        frame
                            .map(|f| f.reason.to_string())
                            .unwrap_or_else(|| "closed by server".to_owned()),
                    ),
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => TransportEvent::Closed(e.to_string()),
                    None => TransportEvent::Closed("stream ended".to_owned()),
                };

                let last = matches!(event, TransportEvent::Closed(_));
                if events.send(event).await.is_err() || last {
                    break;
                }
            }
            _ = &mut shutdown => {
                let _ = write.send(Message::Close(None)).await;
                break;
            }
        }
    }

    info!("Room channel {} disconnected", url);
}
