use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuiError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid transaction id: {0}")]
    InvalidTxId(String),

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    #[error("no coin can cover the gas budget of {0}")]
    NoGasCoin(u64),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("deadline expired during {0}")]
    Timeout(String),

    #[error("effects not yet materialized for {0}")]
    EffectsMissing(String),

    #[error("unsupported transaction shape: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Registry(#[from] bridge_core::CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_address() {
        let err = SuiError::InvalidAddress("missing 0x prefix".into());
        assert_eq!(err.to_string(), "invalid address: missing 0x prefix");
    }

    #[test]
    fn display_insufficient_balance_carries_both_sides() {
        let err = SuiError::InsufficientBalance {
            needed: 1_500,
            available: 200,
        };
        assert_eq!(err.to_string(), "insufficient balance: need 1500, have 200");
    }

    #[test]
    fn display_no_gas_coin() {
        let err = SuiError::NoGasCoin(2_000_000);
        assert_eq!(
            err.to_string(),
            "no coin can cover the gas budget of 2000000"
        );
    }

    #[test]
    fn display_rpc_error() {
        let err = SuiError::Rpc {
            code: -32602,
            message: "Invalid params".into(),
        };
        assert_eq!(err.to_string(), "rpc error -32602: Invalid params");
    }

    #[test]
    fn display_timeout_names_the_method() {
        let err = SuiError::Timeout("sui_getCoins".into());
        assert_eq!(err.to_string(), "deadline expired during sui_getCoins");
    }

    #[test]
    fn registry_error_is_transparent() {
        let err: SuiError = bridge_core::CoreError::UnknownChain("3003".into()).into();
        assert_eq!(err.to_string(), "unknown chain: 3003");
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> = Box::new(SuiError::Transport("refused".into()));
        assert!(err.to_string().contains("refused"));
    }
}
