mod command;
mod frame;
mod room;
mod session;
mod user;
mod wire;

pub use command::{RequestCommand, RoomCommand, UserRequest};
pub use frame::InboundFrame;
pub use room::RoomId;
pub use session::{SessionConfigs, SessionId};
pub use user::UserId;
pub use wire::{JoinRoomBody, JoinedRoom, OpenRoomBody, OpenedRoom};
