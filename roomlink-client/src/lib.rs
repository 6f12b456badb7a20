mod channel;
mod control;
mod error;
mod plugin;
mod room;
mod transport;

pub use channel::*;
pub use control::*;
pub use error::*;
pub use plugin::*;
pub use room::*;
pub use transport::*;
