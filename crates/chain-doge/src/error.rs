use thiserror::Error;

/// Dogecoin chain operation errors.
#[derive(Debug, Error)]
pub enum DogeError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid transaction id: {0}")]
    InvalidTxId(String),

    #[error("address derivation failed: {0}")]
    AddressDerivation(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error(transparent)]
    Registry(#[from] bridge_core::CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_address() {
        let err = DogeError::InvalidAddress("bad length".into());
        assert_eq!(err.to_string(), "invalid address: bad length");
    }

    #[test]
    fn display_rpc_error() {
        let err = DogeError::Rpc {
            code: -25,
            message: "missing inputs".into(),
        };
        assert_eq!(err.to_string(), "rpc error -25: missing inputs");
    }

    #[test]
    fn display_address_derivation() {
        let err = DogeError::AddressDerivation("prefix mismatch".into());
        assert_eq!(err.to_string(), "address derivation failed: prefix mismatch");
    }

    #[test]
    fn registry_error_is_transparent() {
        let err: DogeError = bridge_core::CoreError::UnknownChain("2001".into()).into();
        assert_eq!(err.to_string(), "unknown chain: 2001");
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> = Box::new(DogeError::Transport("refused".into()));
        assert!(err.to_string().contains("refused"));
    }
}
