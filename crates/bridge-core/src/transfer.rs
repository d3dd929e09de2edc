use serde::{Deserialize, Serialize};

/// Sentinel token address used for native transfers on every chain.
///
/// Cross-chain normalization uses the 20-byte all-zero hex address even on
/// chains whose own addresses are not 20 bytes.
pub const NATIVE_TOKEN_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// A normalized transfer extracted from a confirmed transaction.
///
/// Every chain adapter reduces its native transaction representation to
/// this record. Invariant: `format_units(scaled_amount, decimals)` equals
/// `amount`, where `decimals` is the token's on-chain precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Chain-native sender address, or empty when the chain does not
    /// expose it without further lookups.
    pub from: String,
    /// Chain-native recipient address, or empty.
    pub to: String,
    /// Human-scaled decimal amount, e.g. "1.000000000".
    pub amount: String,
    /// Token symbol for native transfers, token identifier otherwise.
    pub token: String,
    /// Whether this moves the chain's native token.
    pub is_native: bool,
    /// Token contract/mint/coin-type identifier; native transfers use
    /// [`NATIVE_TOKEN_ADDRESS`].
    pub token_address: String,
    /// Integer amount at native precision, as a decimal string.
    pub scaled_amount: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::format_units;

    #[test]
    fn native_sentinel_is_20_zero_bytes() {
        assert_eq!(NATIVE_TOKEN_ADDRESS.len(), 42);
        assert!(NATIVE_TOKEN_ADDRESS.starts_with("0x"));
        assert!(NATIVE_TOKEN_ADDRESS[2..].bytes().all(|b| b == b'0'));
    }

    #[test]
    fn amount_matches_scaled_amount() {
        let transfer = Transfer {
            from: "A".into(),
            to: "B".into(),
            amount: format_units(1_000_000_000, 9),
            token: "SOL".into(),
            is_native: true,
            token_address: NATIVE_TOKEN_ADDRESS.into(),
            scaled_amount: "1000000000".into(),
        };
        let scaled: u128 = transfer.scaled_amount.parse().unwrap();
        assert_eq!(format_units(scaled, 9), transfer.amount);
    }

    #[test]
    fn serde_roundtrip() {
        let transfer = Transfer {
            from: "addr1".into(),
            to: "addr2".into(),
            amount: "0.50000000".into(),
            token: "DOGE".into(),
            is_native: true,
            token_address: NATIVE_TOKEN_ADDRESS.into(),
            scaled_amount: "50000000".into(),
        };
        let json = serde_json::to_string(&transfer).unwrap();
        let back: Transfer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, transfer);
    }
}
