use crate::error::ModelError;
use crate::model::room::RoomId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Session identifier; doubles as the credential on every session-scoped call.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Describes one membership in a room.
///
/// Produced once by an open or join handshake and never mutated afterwards;
/// both channels hold clones of the same descriptor.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(try_from = "RawSessionConfigs")]
pub struct SessionConfigs {
    room_id: RoomId,
    session_id: SessionId,
    user_id: Option<UserId>,
}

#[derive(Deserialize)]
struct RawSessionConfigs {
    room_id: RoomId,
    session_id: SessionId,
    #[serde(default)]
    user_id: Option<UserId>,
}

impl TryFrom<RawSessionConfigs> for SessionConfigs {
    type Error = ModelError;

    fn try_from(raw: RawSessionConfigs) -> Result<Self, Self::Error> {
        Self::new(raw.room_id, raw.session_id, raw.user_id)
    }
}

impl SessionConfigs {
    pub fn new(
        room_id: RoomId,
        session_id: SessionId,
        user_id: Option<UserId>,
    ) -> Result<Self, ModelError> {
        if room_id.0.is_empty() {
            return Err(ModelError::EmptyField("room_id"));
        }
        if session_id.0.is_empty() {
            return Err(ModelError::EmptyField("session_id"));
        }

        Ok(Self {
            room_id,
            session_id,
            user_id,
        })
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }
}
