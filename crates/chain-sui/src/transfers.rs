//! Confirmation probe and transfer extraction for the Sui chain.

use bridge_core::{format_units, ChainRegistry, Transfer};

use crate::address::parse_digest;
use crate::error::SuiError;
use crate::rpc::SuiRpcClient;
use crate::withdraw::SUI_COIN_TYPE;

/// Whether the digest executed successfully.
///
/// Effects must be present; querying before the node has materialized
/// them is an error, not a `false`.
pub async fn is_confirmed(
    registry: &dyn ChainRegistry,
    chain_id: &str,
    tx_id: &str,
) -> Result<bool, SuiError> {
    let chain = registry.get_chain(chain_id)?;
    parse_digest(tx_id)?;

    let client = SuiRpcClient::new(&chain.chain_url);
    let response = client
        .get_transaction_block(tx_id, serde_json::json!({"showEffects": true}))
        .await?;

    let effects = response
        .effects
        .ok_or_else(|| SuiError::EffectsMissing(tx_id.to_string()))?;
    Ok(effects.status.is_success())
}

/// Extract the single transfer a two-sided balance change describes.
///
/// `balance_changes[0]` is the sender's debit and `[1]` the recipient's
/// credit; anything with fewer than two entries is a transaction shape
/// this extractor does not handle.
pub async fn get_transfers(
    registry: &dyn ChainRegistry,
    chain_id: &str,
    tx_id: &str,
) -> Result<Vec<Transfer>, SuiError> {
    let chain = registry.get_chain(chain_id)?;
    parse_digest(tx_id)?;

    let client = SuiRpcClient::new(&chain.chain_url);
    let response = client
        .get_transaction_block(tx_id, serde_json::json!({"showBalanceChanges": true}))
        .await?;

    let changes = response
        .balance_changes
        .unwrap_or_default();
    if changes.len() < 2 {
        return Err(SuiError::Unsupported(format!(
            "expected a debit and a credit, got {} balance changes",
            changes.len()
        )));
    }
    let debit = &changes[0];
    let credit = &changes[1];

    let metadata = client.get_coin_metadata(&credit.coin_type).await?;
    let scaled: i128 = credit
        .amount
        .parse()
        .map_err(|e| SuiError::Serialization(format!("invalid balance change amount: {e}")))?;

    Ok(vec![Transfer {
        from: debit.owner.address().to_string(),
        to: credit.owner.address().to_string(),
        amount: format_units(scaled.unsigned_abs(), metadata.decimals as u32),
        token: metadata.symbol,
        is_native: credit.coin_type == SUI_COIN_TYPE,
        token_address: credit.coin_type.clone(),
        scaled_amount: credit.amount.clone(),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::StaticRegistry;

    const DIGEST: &str = "9K4ab1uerCaTbSBfF2GANgV5nQcTSQn2oCntPvxkSiGL";

    #[tokio::test]
    async fn rejects_unknown_chain() {
        let registry = StaticRegistry::new();
        let result = is_confirmed(&registry, "3002", DIGEST).await;
        assert!(matches!(result, Err(SuiError::Registry(_))));
    }

    #[tokio::test]
    async fn rejects_bad_digest_before_any_network_io() {
        let registry = StaticRegistry::with_defaults();
        let result = is_confirmed(&registry, "3002", "nope!").await;
        assert!(matches!(result, Err(SuiError::InvalidTxId(_))));

        let result = get_transfers(&registry, "3002", "nope!").await;
        assert!(matches!(result, Err(SuiError::InvalidTxId(_))));
    }

    #[test]
    fn credit_amount_formats_at_coin_precision() {
        // A 9-decimal credit of 1000000 MIST reads as 0.001.
        assert_eq!(format_units(1_000_000, 9), "0.001000000");
    }

    #[test]
    fn debit_amount_abs_matches_credit_path() {
        let scaled: i128 = "-3011996".parse().unwrap();
        assert_eq!(scaled.unsigned_abs(), 3_011_996);
    }
}
