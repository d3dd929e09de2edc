//! Confirmation probe and transfer extraction for the Solana chain.

use bridge_core::{format_units, ChainRegistry, Transfer, NATIVE_TOKEN_ADDRESS};

use crate::enrichment::EnrichmentClient;
use crate::error::SolError;
use crate::mint::decode_mint_decimals;
use crate::rpc::SolRpcClient;

/// Lamports per SOL: 9 decimals.
pub const DECIMALS: u32 = 9;

/// The only chain id the enrichment path serves (Solana devnet).
pub const DEVNET_CHAIN_ID: &str = "901";

/// Whether the node knows `tx_id` at confirmed commitment.
///
/// Contract: `Ok(true)` means the node returned the transaction;
/// `Ok(false)` means exactly one thing, the node answered and does not
/// know the signature (it never landed or has not landed yet). Every
/// other condition, transport failures included, is an `Err` and never
/// collapses into `false`.
pub async fn is_confirmed(
    registry: &dyn ChainRegistry,
    chain_id: &str,
    tx_id: &str,
) -> Result<bool, SolError> {
    let chain = registry.get_chain(chain_id)?;
    validate_signature(tx_id)?;

    let client = SolRpcClient::new(&chain.chain_url);
    match client.get_transaction(tx_id).await? {
        Some(_) => Ok(true),
        None => {
            tracing::warn!(tx_id, "transaction not found at confirmed commitment");
            Ok(false)
        }
    }
}

/// Extract normalized transfers via the enrichment API.
///
/// Native entries are formatted at 9 decimals; token entries are limited
/// to the Fungible standard and formatted at the mint's own precision.
pub async fn get_transfers(
    registry: &dyn ChainRegistry,
    chain_id: &str,
    tx_id: &str,
    api_key: &str,
) -> Result<Vec<Transfer>, SolError> {
    if chain_id != DEVNET_CHAIN_ID {
        return Err(SolError::UnsupportedChain(chain_id.to_string()));
    }
    let chain = registry.get_chain(chain_id)?;
    validate_signature(tx_id)?;

    let enrichment = EnrichmentClient::devnet(api_key);
    let rpc = SolRpcClient::new(&chain.chain_url);

    let mut transfers = Vec::new();
    for enriched in enrichment.parse_transaction(tx_id).await? {
        for native in &enriched.native_transfers {
            transfers.push(Transfer {
                from: native.from_user_account.clone(),
                to: native.to_user_account.clone(),
                amount: format_units(native.amount as u128, DECIMALS),
                token: chain.token_symbol.clone(),
                is_native: true,
                token_address: NATIVE_TOKEN_ADDRESS.to_string(),
                scaled_amount: native.amount.to_string(),
            });
        }

        for token in &enriched.token_transfers {
            if !token.is_fungible() {
                continue;
            }

            let decimals = mint_decimals(&rpc, &token.mint).await?;
            transfers.push(Transfer {
                from: token.from_user_account.clone(),
                to: token.to_user_account.clone(),
                amount: format_units(token.token_amount as u128, decimals as u32),
                token: token.mint.clone(),
                is_native: false,
                token_address: token.mint.clone(),
                scaled_amount: token.token_amount.to_string(),
            });
        }
    }

    Ok(transfers)
}

async fn mint_decimals(rpc: &SolRpcClient, mint: &str) -> Result<u8, SolError> {
    let data = rpc
        .get_account_info(mint)
        .await?
        .ok_or_else(|| SolError::Serialization(format!("mint account {mint} not found")))?;
    decode_mint_decimals(&data)
}

fn validate_signature(tx_id: &str) -> Result<(), SolError> {
    let bytes = bs58::decode(tx_id)
        .into_vec()
        .map_err(|e| SolError::InvalidTxId(format!("invalid base58: {e}")))?;
    if bytes.len() != 64 {
        return Err(SolError::InvalidTxId(format!(
            "signature must decode to 64 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(())
}
