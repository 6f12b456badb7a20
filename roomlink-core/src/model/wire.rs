use crate::model::room::RoomId;
use crate::model::session::SessionId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

/// Body of `POST /room/open`.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OpenRoomBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifetime_sec: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u64>,
}

/// Body of `POST /room/{room_id}/join`.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct JoinRoomBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OpenedRoom {
    pub room_id: RoomId,
    pub session_id: SessionId,
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// The join response does not echo the room id; it comes from the request path.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct JoinedRoom {
    pub session_id: SessionId,
    #[serde(default)]
    pub user_id: Option<UserId>,
}
