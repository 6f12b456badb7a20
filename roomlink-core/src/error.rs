use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("`{0}` must not be empty")]
    EmptyField(&'static str),
}

/// Reasons an inbound push frame could not be classified.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("frame has no string `type` field")]
    MissingType,

    #[error("`{kind}` frame carries an invalid payload: {source}")]
    InvalidPayload {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
