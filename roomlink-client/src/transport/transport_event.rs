/// Events a push transport reports to the channel that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Handshake acknowledged; the connection is usable.
    Opened,

    /// Handshake failed. Only meaningful before `Opened`.
    Failed(String),

    /// A text frame arrived.
    Frame(String),

    /// The connection ended after it was opened.
    Closed(String),
}
