//! Error types for embedding, configuration and audio I/O

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegoError {
    #[error("Message too large: needs {needed} slots, channel offers {available}")]
    Capacity { needed: usize, available: usize },

    #[error("Character {ch:?} at position {position} does not fit in 8 bits")]
    Encoding { ch: char, position: usize },

    #[error("Bit sequence of length {len} is not a multiple of 8")]
    Alignment { len: usize },

    #[error("Message bits reproduce the end marker at bit {position}")]
    MarkerCollision { position: usize },

    #[error("Channel is silent, cannot normalize by peak amplitude")]
    SilentChannel,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Transform failed: {0}")]
    Transform(String),

    #[error("Audio error: {0}")]
    Audio(String),

    #[error("Config file error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StegoError>;
