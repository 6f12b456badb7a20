mod room_client;
mod room_connector;

pub use room_client::*;
pub use room_connector::*;
