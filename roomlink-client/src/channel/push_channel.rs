use crate::channel::lifecycle::{ChannelState, HandshakeLatch};
use crate::error::{Result, RoomError};
use crate::plugin::Dispatcher;
use crate::transport::{PushConnection, PushTransport, TransportConfig, TransportEvent};
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use roomlink_core::{RoomId, SessionConfigs};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// The receive-only event plane of one session.
///
/// Owns exactly one push connection. Frames are dispatched in arrival order
/// from a single task; a slow plugin only delays its own frame.
pub struct PushChannel {
    session: SessionConfigs,
    connection: PushConnection,
    state: Arc<watch::Sender<ChannelState>>,
    run_task: Option<JoinHandle<()>>,
}

impl PushChannel {
    /// Connects and waits for the handshake.
    ///
    /// Fails with [`RoomError::ChannelOpen`] if the transport reports an error
    /// first, ends before answering, or exceeds `config.handshake_timeout`.
    /// The connection is closed on every failure path.
    pub async fn open(
        session: SessionConfigs,
        transport: &dyn PushTransport,
        dispatcher: Dispatcher,
        config: &TransportConfig,
    ) -> Result<Self> {
        let (event_tx, mut event_rx) = mpsc::channel(config.frame_queue_capacity.max(1));
        let mut connection = transport.connect(&session, event_tx);
        let mut latch = HandshakeLatch::new();

        let handshake = wait_for_handshake(&mut event_rx, &mut latch);
        let outcome = match config.handshake_timeout {
            Some(limit) => match tokio::time::timeout(limit, handshake).await {
                Ok(outcome) => outcome,
                Err(_) => Err(format!("handshake timed out after {limit:?}")),
            },
            None => handshake.await,
        };

        if let Err(reason) = outcome {
            warn!(
                "Room channel for {} failed to open: {}",
                session.room_id(),
                reason
            );
            connection.close().await;
            return Err(RoomError::ChannelOpen(reason));
        }

        info!("Room channel open for room {}", session.room_id());

        let state = Arc::new(watch::Sender::new(ChannelState::Open));
        let run_task = tokio::spawn(run(
            event_rx,
            Arc::new(dispatcher),
            latch,
            Arc::clone(&state),
            session.room_id().clone(),
        ));

        Ok(Self {
            session,
            connection,
            state,
            run_task: Some(run_task),
        })
    }

    pub fn session(&self) -> &SessionConfigs {
        &self.session
    }

    pub fn state(&self) -> ChannelState {
        *self.state.borrow()
    }

    /// Watches state transitions, e.g. to notice a server-side close.
    pub fn subscribe(&self) -> watch::Receiver<ChannelState> {
        self.state.subscribe()
    }

    /// Closes the connection and stops dispatching. Safe to call repeatedly.
    pub async fn close(&mut self) {
        let Some(run_task) = self.run_task.take() else {
            return;
        };

        self.connection.close().await;
        run_task.abort();
        let _ = run_task.await;
        self.state.send_replace(ChannelState::Closed);

        info!("Room channel for {} closed", self.session.room_id());
    }
}

impl Drop for PushChannel {
    fn drop(&mut self) {
        if let Some(run_task) = self.run_task.take() {
            run_task.abort();
            self.state.send_replace(ChannelState::Closed);
        }
    }
}

async fn wait_for_handshake(
    events: &mut mpsc::Receiver<TransportEvent>,
    latch: &mut HandshakeLatch,
) -> std::result::Result<(), String> {
    while let Some(event) = events.recv().await {
        if latch.offer(&event) {
            break;
        }
        debug!("Ignoring {:?} before handshake", event);
    }

    match latch.outcome() {
        Some(Ok(())) => Ok(()),
        Some(Err(reason)) => Err(reason.clone()),
        None => Err("transport closed before handshake".to_owned()),
    }
}

async fn run(
    mut events: mpsc::Receiver<TransportEvent>,
    dispatcher: Arc<Dispatcher>,
    mut latch: HandshakeLatch,
    state: Arc<watch::Sender<ChannelState>>,
    room_id: RoomId,
) {
    // Polled by this task only, so plugin code never runs in parallel and
    // is dropped with the task on close.
    let mut in_flight = FuturesUnordered::new();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(TransportEvent::Frame(text)) => {
                    let dispatcher = Arc::clone(&dispatcher);
                    in_flight.push(async move { dispatcher.dispatch(&text).await });
                }
                Some(TransportEvent::Closed(reason)) => {
                    info!("Room channel for {} closed by transport: {}", room_id, reason);
                    break;
                }
                Some(event) => {
                    if !latch.offer(&event) {
                        debug!("Ignoring late handshake event {:?}", event);
                    }
                }
                None => {
                    info!("Room channel for {} lost its transport", room_id);
                    break;
                }
            },
            Some(()) = in_flight.next(), if !in_flight.is_empty() => {}
        }
    }

    state.send_replace(ChannelState::Closed);

    while in_flight.next().await.is_some() {}
}
