use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An instruction a session sends to its room.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RequestCommand {
    pub name: String,
    #[serde(default)]
    pub data: Value,
}

impl RequestCommand {
    pub fn new(name: impl Into<String>, data: Value) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// A [`RequestCommand`] as seen by the room owner, tagged with its sender.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserRequest {
    pub from: UserId,
    pub data: RequestCommand,
}

/// An instruction the room delivers to its sessions.
///
/// `to: None` reaches every member; `Some(ids)` reaches exactly those ids.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RoomCommand {
    #[serde(default)]
    pub to: Option<Vec<String>>,
    pub name: String,
    #[serde(default)]
    pub data: Value,
}

impl RoomCommand {
    pub fn broadcast(name: impl Into<String>, data: Value) -> Self {
        Self {
            to: None,
            name: name.into(),
            data,
        }
    }

    pub fn targeted<I, S>(to: I, name: impl Into<String>, data: Value) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            to: Some(to.into_iter().map(Into::into).collect()),
            name: name.into(),
            data,
        }
    }

    pub fn is_broadcast(&self) -> bool {
        self.to.is_none()
    }

    /// Whether a session or user with this id is addressed by the command.
    pub fn targets(&self, id: &str) -> bool {
        match &self.to {
            None => true,
            Some(ids) => ids.iter().any(|target| target == id),
        }
    }
}
