//! Withdraw build and submit for the Dogecoin chain.
//!
//! The builder emits a skeleton transaction: a single placeholder input
//! with a zero outpoint and the real P2PKH payout output. A downstream
//! component owns UTXO selection and replaces the placeholder before the
//! operator signature is requested; the signing payload here is the txid
//! of the skeleton.

use crate::address::decode_address;
use crate::error::DogeError;
use crate::rpc::DogeRpcClient;
use crate::transaction::{p2pkh_script, push_data, DogeTransaction, TxIn, TxOut};

/// An unsigned withdraw: the serialized transaction and the bytes the
/// operator must sign, both hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedWithdraw {
    pub tx_hex: String,
    pub data_to_sign_hex: String,
}

/// Build a native-coin withdraw skeleton paying `amount_sat` to `recipient`.
///
/// The sender address is carried for parity with the other chains but the
/// skeleton does not reference it; inputs are populated downstream.
pub fn build_withdraw_native(
    _sender: &str,
    recipient: &str,
    amount_sat: u64,
) -> Result<UnsignedWithdraw, DogeError> {
    if amount_sat == 0 {
        return Err(DogeError::InvalidAmount("amount must be > 0".into()));
    }

    let recipient_hash = decode_address(recipient)?;

    let tx = DogeTransaction {
        version: 1,
        inputs: vec![TxIn {
            prev_txid: [0u8; 32],
            prev_vout: 0,
            script_sig: Vec::new(),
            sequence: 0xFFFF_FFFF,
        }],
        outputs: vec![TxOut {
            value: amount_sat,
            script_pubkey: p2pkh_script(&recipient_hash),
        }],
        lock_time: 0,
    };

    Ok(UnsignedWithdraw {
        tx_hex: hex::encode(tx.serialize()),
        data_to_sign_hex: tx.txid(),
    })
}

/// Attach the operator signature and broadcast.
///
/// Builds a `<signature> <pubkey>` scriptSig and installs it on every
/// input of the decoded transaction, then calls `sendrawtransaction`.
pub async fn submit_withdraw(
    client: &DogeRpcClient,
    tx_hex: &str,
    pubkey_hex: &str,
    signature_hex: &str,
) -> Result<String, DogeError> {
    let tx_bytes = hex::decode(tx_hex)
        .map_err(|e| DogeError::Serialization(format!("invalid transaction hex: {e}")))?;
    let mut tx = DogeTransaction::deserialize(&tx_bytes)?;

    let pubkey = hex::decode(pubkey_hex)
        .map_err(|e| DogeError::InvalidPublicKey(format!("invalid hex: {e}")))?;
    let signature = hex::decode(signature_hex)
        .map_err(|e| DogeError::Serialization(format!("invalid signature hex: {e}")))?;

    let mut script_sig = Vec::with_capacity(signature.len() + pubkey.len() + 4);
    push_data(&mut script_sig, &signature)?;
    push_data(&mut script_sig, &pubkey)?;

    for input in &mut tx.inputs {
        input.script_sig = script_sig.clone();
    }

    client.send_raw_transaction(&hex::encode(tx.serialize())).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPIENT_TESTNET: &str = "nVKnX46PTjyTaVXc6m9uLncgGXqC6ZDUww";
    const SENDER_TESTNET: &str = "naPvQVSd2YGVjuvc1xDFeTAWP4qixahRr6";

    #[test]
    fn builds_skeleton_with_placeholder_input() {
        let withdraw =
            build_withdraw_native(SENDER_TESTNET, RECIPIENT_TESTNET, 1_000_000).unwrap();

        assert!(!withdraw.tx_hex.is_empty());
        assert_eq!(withdraw.data_to_sign_hex.len(), 64);
        assert!(withdraw
            .data_to_sign_hex
            .chars()
            .all(|c| c.is_ascii_hexdigit()));

        let tx =
            DogeTransaction::deserialize(&hex::decode(&withdraw.tx_hex).unwrap()).unwrap();
        assert_eq!(tx.version, 1);
        assert_eq!(tx.inputs.len(), 1);
        assert_eq!(tx.inputs[0].prev_txid, [0u8; 32]);
        assert_eq!(tx.inputs[0].prev_vout, 0);
        assert!(tx.inputs[0].script_sig.is_empty());
        assert_eq!(tx.outputs.len(), 1);
        assert_eq!(tx.outputs[0].value, 1_000_000);
    }

    #[test]
    fn output_script_hashes_the_recipient() {
        let withdraw =
            build_withdraw_native(SENDER_TESTNET, RECIPIENT_TESTNET, 1_000_000).unwrap();
        let tx =
            DogeTransaction::deserialize(&hex::decode(&withdraw.tx_hex).unwrap()).unwrap();

        let expected = p2pkh_script(&decode_address(RECIPIENT_TESTNET).unwrap());
        assert_eq!(tx.outputs[0].script_pubkey, expected);
        assert_eq!(tx.outputs[0].script_pubkey.len(), 25);
    }

    #[test]
    fn mainnet_recipient_is_accepted() {
        let withdraw = build_withdraw_native(
            SENDER_TESTNET,
            "DFpN6QqFfUm3gKNaxN6tNcab1FArL9cZLE",
            5_000,
        )
        .unwrap();
        assert_eq!(withdraw.data_to_sign_hex.len(), 64);
    }

    #[test]
    fn data_to_sign_is_the_txid() {
        let withdraw =
            build_withdraw_native(SENDER_TESTNET, RECIPIENT_TESTNET, 42).unwrap();
        let tx =
            DogeTransaction::deserialize(&hex::decode(&withdraw.tx_hex).unwrap()).unwrap();
        assert_eq!(withdraw.data_to_sign_hex, tx.txid());
    }

    #[test]
    fn invalid_recipient_fails() {
        let result = build_withdraw_native(SENDER_TESTNET, "invalid_address", 1_000);
        assert!(matches!(result, Err(DogeError::InvalidAddress(_))));
    }

    #[test]
    fn zero_amount_fails() {
        let result = build_withdraw_native(SENDER_TESTNET, RECIPIENT_TESTNET, 0);
        assert!(matches!(result, Err(DogeError::InvalidAmount(_))));
    }

    #[test]
    fn signed_script_sig_is_two_pushes() {
        // Exercise the scriptSig assembly without touching the network by
        // rebuilding what submit_withdraw installs.
        let signature = vec![0x30; 71];
        let pubkey = vec![0x02; 33];

        let mut script_sig = Vec::new();
        push_data(&mut script_sig, &signature).unwrap();
        push_data(&mut script_sig, &pubkey).unwrap();

        assert_eq!(script_sig[0], 71);
        assert_eq!(script_sig[1 + 71], 33);
        assert_eq!(script_sig.len(), 1 + 71 + 1 + 33);
    }

    #[tokio::test]
    async fn submit_rejects_malformed_transaction_hex() {
        let client = DogeRpcClient::new("http://localhost:1");
        let result = submit_withdraw(&client, "zz", "02", "30").await;
        assert!(matches!(result, Err(DogeError::Serialization(_))));
    }

    #[tokio::test]
    async fn submit_rejects_malformed_pubkey_hex() {
        let withdraw =
            build_withdraw_native(SENDER_TESTNET, RECIPIENT_TESTNET, 1_000).unwrap();
        let client = DogeRpcClient::new("http://localhost:1");
        let result = submit_withdraw(&client, &withdraw.tx_hex, "not-hex", "30").await;
        assert!(matches!(result, Err(DogeError::InvalidPublicKey(_))));
    }
}
