use std::fmt;

use crate::chains;

#[derive(Debug)]
pub enum ClientError {
    /// No endpoint is configured for the chain id. A configuration error:
    /// fail fast, never retry.
    UnsupportedChain { chain_id: u64 },
    /// Transport-level failure: timeout, non-2xx, malformed JSON.
    Transport(reqwest::Error),
    /// The endpoint answered, but not in the promised shape.
    InvalidResponse(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::UnsupportedChain { chain_id } => write!(
                f,
                "unsupported chain_id: {}. Supported chains: {:?}",
                chain_id,
                chains::supported_ids()
            ),
            ClientError::Transport(error) => write!(f, "transport failure: {error}"),
            ClientError::InvalidResponse(detail) => {
                write!(f, "invalid response from log API: {detail}")
            }
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        ClientError::Transport(value)
    }
}
