//! Confirmation probe and transfer extraction for the Dogecoin chain.

use bridge_core::{format_units, ChainRegistry, Transfer, NATIVE_TOKEN_ADDRESS};

use crate::error::DogeError;
use crate::rpc::DogeRpcClient;

/// Dogecoin native precision: 8 decimals, like Bitcoin.
pub const DECIMALS: u32 = 8;

const SATOSHIS_PER_COIN: f64 = 100_000_000.0;

/// Whether `tx_id` has at least one confirmation on the chain behind
/// `chain_id`.
pub async fn is_confirmed(
    registry: &dyn ChainRegistry,
    chain_id: &str,
    tx_id: &str,
) -> Result<bool, DogeError> {
    let chain = registry.get_chain(chain_id)?;
    validate_txid(tx_id)?;

    let client = DogeRpcClient::new(&chain.chain_url);
    let tx = client.get_raw_transaction(tx_id).await?;

    Ok(tx.confirmations >= 1)
}

/// Extract normalized transfers from a confirmed transaction.
///
/// One record is emitted per output that carries an address. Resolving
/// the sender would need a lookup per input outpoint, so `from` is left
/// empty.
pub async fn get_transfers(
    registry: &dyn ChainRegistry,
    chain_id: &str,
    tx_id: &str,
) -> Result<Vec<Transfer>, DogeError> {
    let chain = registry.get_chain(chain_id)?;
    validate_txid(tx_id)?;

    let client = DogeRpcClient::new(&chain.chain_url);
    let tx = client.get_raw_transaction(tx_id).await?;

    let mut transfers = Vec::new();
    for vout in &tx.vout {
        let Some(to) = vout.script_pub_key.addresses.first() else {
            continue;
        };

        let scaled = coins_to_satoshis(vout.value)?;
        transfers.push(Transfer {
            from: String::new(),
            to: to.clone(),
            amount: format_units(scaled as u128, DECIMALS),
            token: chain.token_symbol.clone(),
            is_native: true,
            token_address: NATIVE_TOKEN_ADDRESS.to_string(),
            scaled_amount: scaled.to_string(),
        });
    }

    Ok(transfers)
}

fn validate_txid(tx_id: &str) -> Result<(), DogeError> {
    if tx_id.len() != 64 || !tx_id.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(DogeError::InvalidTxId(format!(
            "expected 64 hex characters, got {tx_id:?}"
        )));
    }
    Ok(())
}

/// Convert the node's coin-unit value into satoshis.
///
/// The node reports eight decimal places, so rounding only strips float
/// representation noise.
fn coins_to_satoshis(value: f64) -> Result<u64, DogeError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DogeError::Serialization(format!(
            "invalid output value: {value}"
        )));
    }
    Ok((value * SATOSHIS_PER_COIN).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::StaticRegistry;

    #[test]
    fn txid_validation() {
        assert!(validate_txid(&"a".repeat(64)).is_ok());
        assert!(matches!(
            validate_txid("invalid"),
            Err(DogeError::InvalidTxId(_))
        ));
        assert!(validate_txid(&"g".repeat(64)).is_err());
    }

    #[test]
    fn coin_conversion_is_exact_at_eight_decimals() {
        assert_eq!(coins_to_satoshis(12.5).unwrap(), 1_250_000_000);
        assert_eq!(coins_to_satoshis(0.00000001).unwrap(), 1);
        assert_eq!(coins_to_satoshis(0.1).unwrap(), 10_000_000);
        assert_eq!(coins_to_satoshis(0.0).unwrap(), 0);
    }

    #[test]
    fn coin_conversion_rejects_negative_and_nan() {
        assert!(coins_to_satoshis(-1.0).is_err());
        assert!(coins_to_satoshis(f64::NAN).is_err());
        assert!(coins_to_satoshis(f64::INFINITY).is_err());
    }

    #[tokio::test]
    async fn unknown_chain_fails_before_any_network_io() {
        let registry = StaticRegistry::new();
        let result = is_confirmed(&registry, "2000", &"a".repeat(64)).await;
        assert!(matches!(result, Err(DogeError::Registry(_))));
    }

    #[tokio::test]
    async fn invalid_txid_fails_before_any_network_io() {
        let registry = StaticRegistry::with_defaults();
        let result = get_transfers(&registry, "2000", "not-a-txid").await;
        assert!(matches!(result, Err(DogeError::InvalidTxId(_))));
    }
}
