pub use roomlink_core::model::{RoomId, SessionConfigs, SessionId, UserId};

pub mod model {
    pub use roomlink_core::model::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use roomlink_client::*;
}
