mod command_relay;
mod dispatcher;
mod reply;
mod room_plugin;

pub use command_relay::*;
pub use dispatcher::*;
pub use reply::*;
pub use room_plugin::*;
