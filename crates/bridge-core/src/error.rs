use thiserror::Error;

/// Errors from the shared bridge-core types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown chain: {0}")]
    UnknownChain(String),
}
