pub mod error;
pub mod model;

pub use error::{FrameError, ModelError};
pub use model::*;
