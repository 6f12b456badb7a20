use crate::transport::TransportEvent;

/// Lifecycle of a push channel. `Failed` is only reachable from `Connecting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Connecting,
    Open,
    Closed,
    Failed,
}

/// Resolves the push handshake exactly once.
///
/// The first `Opened` or `Failed` event wins; every later handshake event is
/// a no-op, so a transport that reports both cannot resolve twice.
#[derive(Debug, Default)]
pub struct HandshakeLatch {
    outcome: Option<Result<(), String>>,
}

impl HandshakeLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `event` resolved the latch.
    pub fn offer(&mut self, event: &TransportEvent) -> bool {
        if self.outcome.is_some() {
            return false;
        }

        match event {
            TransportEvent::Opened => self.outcome = Some(Ok(())),
            TransportEvent::Failed(reason) => self.outcome = Some(Err(reason.clone())),
            TransportEvent::Frame(_) | TransportEvent::Closed(_) => return false,
        }
        true
    }

    pub fn outcome(&self) -> Option<&Result<(), String>> {
        self.outcome.as_ref()
    }

    pub fn state(&self) -> ChannelState {
        match self.outcome {
            None => ChannelState::Connecting,
            Some(Ok(())) => ChannelState::Open,
            Some(Err(_)) => ChannelState::Failed,
        }
    }
}
