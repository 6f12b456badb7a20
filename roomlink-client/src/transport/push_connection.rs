use crate::transport::transport_event::TransportEvent;
use roomlink_core::SessionConfigs;
use std::future::Future;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::warn;

/// Header carrying the session credential on every session-scoped call.
pub const SESSION_HEADER: &str = "set-cookie";

pub fn session_credential(session: &SessionConfigs) -> String {
    format!("session_id={}", session.session_id())
}

/// Opens push connections for a session.
///
/// Implementations report everything that happens on the connection through
/// `events`, starting with exactly one of `Opened` or `Failed`.
pub trait PushTransport: Send + Sync {
    fn connect(
        &self,
        session: &SessionConfigs,
        events: mpsc::Sender<TransportEvent>,
    ) -> PushConnection;
}

/// Handle to a running transport driver.
///
/// Closing is idempotent. Dropping an open handle aborts the driver, which
/// releases the underlying socket.
pub struct PushConnection {
    shutdown: Option<oneshot::Sender<()>>,
    driver: Option<JoinHandle<()>>,
}

impl PushConnection {
    /// Spawns `driver`, handing it the receiver that fires on `close`.
    pub fn spawn<F, Fut>(driver: F) -> Self
    where
        F: FnOnce(oneshot::Receiver<()>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(driver(shutdown_rx));

        Self {
            shutdown: Some(shutdown_tx),
            driver: Some(handle),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.driver.is_none()
    }

    /// Signals the driver to stop and waits for it to finish.
    pub async fn close(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }

        let Some(driver) = self.driver.take() else {
            return;
        };
        if let Err(e) = driver.await {
            if e.is_panic() {
                warn!("Push transport driver panicked: {}", e);
            }
        }
    }
}

impl Drop for PushConnection {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
    }
}
