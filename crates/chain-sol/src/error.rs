use thiserror::Error;

/// Solana chain operation errors.
#[derive(Debug, Error)]
pub enum SolError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid transaction id: {0}")]
    InvalidTxId(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("signature verification failed for fee payer {fee_payer} (message {message_b58})")]
    SignatureVerification {
        fee_payer: String,
        message_b58: String,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("unsupported chain: {0}")]
    UnsupportedChain(String),

    #[error(transparent)]
    Registry(#[from] bridge_core::CoreError),
}
