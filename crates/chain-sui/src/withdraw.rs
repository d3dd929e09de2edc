//! Withdraw build and submit for the Sui chain.
//!
//! Both builders lean on the node's transaction constructors: we select
//! input coins and a gas budget, the node returns BCS bytes, and the
//! signer's payload is those bytes themselves.

use crate::address::{format_address, parse_address};
use crate::coin_select::GreedySelection;
use crate::error::SuiError;
use crate::rpc::{CoinPage, SuiRpcClient, COIN_PAGE_SIZE};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// The native coin type tag.
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

/// Gas units budgeted per withdraw; multiplied by the reference gas
/// price to obtain the budget in MIST.
const GAS_UNITS: u64 = 1000;

/// An unsigned withdraw: BCS transaction bytes and the signing payload,
/// both base64-encoded. For Sui the two are the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedWithdraw {
    pub tx_bytes_b64: String,
    pub data_to_sign_b64: String,
}

/// Build a native SUI withdraw via `sui_paySui`.
///
/// Input coins are greedily selected to cover `amount` plus the gas
/// budget, since `paySui` draws gas from the inputs.
pub async fn build_withdraw_native(
    client: &SuiRpcClient,
    sender: &str,
    recipient: &str,
    amount: u64,
) -> Result<UnsignedWithdraw, SuiError> {
    let sender = format_address(&parse_address(sender)?);
    let recipient = format_address(&parse_address(recipient)?);
    if amount == 0 {
        return Err(SuiError::InvalidAmount("amount must be positive".into()));
    }

    let gas_budget = gas_budget(client).await?;
    let target = amount
        .checked_add(gas_budget)
        .ok_or_else(|| SuiError::InvalidAmount("amount plus gas budget overflows".into()))?;

    let mut selection = GreedySelection::new(target);
    for coin in client.get_sui_coins_owned(&sender).await? {
        if selection.offer(&coin.coin_object_id, coin.balance()?) {
            break;
        }
    }
    let input_coins = selection.finish()?;

    tracing::debug!(
        sender = %sender,
        inputs = input_coins.len(),
        gas_budget,
        "building native sui withdraw"
    );

    let tx = client
        .pay_sui(&sender, &input_coins, &[recipient], &[amount], gas_budget)
        .await?;
    Ok(unsigned(tx.tx_bytes))
}

/// Build a token withdraw via `sui_pay` with a dedicated gas coin.
///
/// Token coins are selected page by page so a large coin set is never
/// fetched past the point where the amount is covered.
pub async fn build_withdraw_token(
    client: &SuiRpcClient,
    sender: &str,
    recipient: &str,
    amount: u64,
    coin_type: &str,
) -> Result<UnsignedWithdraw, SuiError> {
    let sender = format_address(&parse_address(sender)?);
    let recipient = format_address(&parse_address(recipient)?);
    if amount == 0 {
        return Err(SuiError::InvalidAmount("amount must be positive".into()));
    }

    let gas_budget = gas_budget(client).await?;
    let gas_coin = pick_gas_coin(client, &sender, gas_budget).await?;

    let mut selection = GreedySelection::new(amount);
    let mut cursor: Option<String> = None;
    loop {
        let page = client
            .get_coins(&sender, Some(coin_type), cursor.as_deref(), COIN_PAGE_SIZE)
            .await?;
        if consume_page(&mut selection, &page)? {
            break;
        }
        cursor = page.next_cursor;
    }
    let token_coins = selection.finish()?;

    tracing::debug!(
        sender = %sender,
        coin_type,
        inputs = token_coins.len(),
        gas_budget,
        "building token sui withdraw"
    );

    let tx = client
        .pay(
            &sender,
            &token_coins,
            &[recipient],
            &[amount],
            &gas_coin,
            gas_budget,
        )
        .await?;
    Ok(unsigned(tx.tx_bytes))
}

/// Submit signed BCS bytes; returns the effects digest.
pub async fn submit_withdraw(
    client: &SuiRpcClient,
    tx_bytes_b64: &str,
    signature_b64: &str,
) -> Result<String, SuiError> {
    if tx_bytes_b64.is_empty() {
        return Err(SuiError::Serialization("empty transaction bytes".into()));
    }
    if signature_b64.is_empty() {
        return Err(SuiError::Serialization("empty signature".into()));
    }
    BASE64
        .decode(tx_bytes_b64)
        .map_err(|e| SuiError::Serialization(format!("invalid transaction base64: {e}")))?;
    BASE64
        .decode(signature_b64)
        .map_err(|e| SuiError::Serialization(format!("invalid signature base64: {e}")))?;

    let response = client
        .execute_transaction_block(tx_bytes_b64, &[signature_b64.to_string()])
        .await?;

    let effects = response
        .effects
        .ok_or_else(|| SuiError::EffectsMissing(response.digest.clone()))?;
    let digest = effects.transaction_digest.unwrap_or(response.digest);
    tracing::debug!(digest = %digest, "sui transaction submitted");
    Ok(digest)
}

async fn gas_budget(client: &SuiRpcClient) -> Result<u64, SuiError> {
    let gas_price = client.get_reference_gas_price().await?;
    gas_price
        .checked_mul(GAS_UNITS)
        .ok_or_else(|| SuiError::Serialization(format!("gas price {gas_price} overflows budget")))
}

/// First native coin whose balance alone covers the budget.
async fn pick_gas_coin(
    client: &SuiRpcClient,
    sender: &str,
    gas_budget: u64,
) -> Result<String, SuiError> {
    for coin in client.get_sui_coins_owned(sender).await? {
        if coin.balance()? >= gas_budget {
            return Ok(coin.coin_object_id);
        }
    }
    Err(SuiError::NoGasCoin(gas_budget))
}

/// Feed one coin page into the selection, in the node's order.
/// Returns whether fetching should stop: the target is covered or there
/// are no further pages.
fn consume_page(selection: &mut GreedySelection, page: &CoinPage) -> Result<bool, SuiError> {
    for coin in &page.data {
        if selection.offer(&coin.coin_object_id, coin.balance()?) {
            return Ok(true);
        }
    }
    Ok(!page.has_next_page)
}

fn unsigned(tx_bytes: String) -> UnsignedWithdraw {
    UnsignedWithdraw {
        data_to_sign_b64: tx_bytes.clone(),
        tx_bytes_b64: tx_bytes,
    }
}
