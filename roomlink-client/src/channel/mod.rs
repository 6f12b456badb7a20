mod lifecycle;
mod push_channel;

pub use lifecycle::*;
pub use push_channel::*;
