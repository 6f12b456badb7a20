mod control_channel;
mod control_relay;
mod http_control;

pub use control_channel::*;
pub use control_relay::*;
pub use http_control::*;
