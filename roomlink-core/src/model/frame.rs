use crate::error::FrameError;
use crate::model::command::{RoomCommand, UserRequest};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// One message received on the push channel, classified by its `type` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundFrame {
    /// A user request forwarded to the room owner.
    Request(UserRequest),
    /// A command addressed to this session.
    Command(RoomCommand),
    /// A tag this client does not understand. Carried, not rejected.
    Unknown(String),
}

impl InboundFrame {
    pub const REQUEST: &'static str = "request";
    pub const COMMAND: &'static str = "command";

    pub fn parse(text: &str) -> Result<Self, FrameError> {
        let mut value: Value = serde_json::from_str(text)?;

        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(FrameError::MissingType)?
            .to_owned();
        let data = value.get_mut("data").map(Value::take).unwrap_or(Value::Null);

        match kind.as_str() {
            Self::REQUEST => payload(Self::REQUEST, data).map(Self::Request),
            Self::COMMAND => payload(Self::COMMAND, data).map(Self::Command),
            _ => Ok(Self::Unknown(kind)),
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::Request(_) => Self::REQUEST,
            Self::Command(_) => Self::COMMAND,
            Self::Unknown(kind) => kind,
        }
    }
}

fn payload<T: DeserializeOwned>(kind: &'static str, data: Value) -> Result<T, FrameError> {
    // The service may double-encode the payload as a JSON string.
    let data = match data {
        Value::String(embedded) => match serde_json::from_str(&embedded) {
            Ok(inner) => inner,
            Err(_) => Value::String(embedded),
        },
        other => other,
    };

    serde_json::from_value(data).map_err(|source| FrameError::InvalidPayload { kind, source })
}
