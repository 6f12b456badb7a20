mod push_connection;
mod transport_config;
mod transport_event;
mod ws_transport;

pub use push_connection::*;
pub use transport_config::*;
pub use transport_event::*;
pub use ws_transport::*;
