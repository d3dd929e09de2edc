//! Sui address and digest handling.
//!
//! Addresses are 32 bytes, written as `0x`-prefixed hex. Transaction
//! digests are 32 bytes, written as base58.

use crate::error::SuiError;

const ADDRESS_LEN: usize = 32;
const DIGEST_LEN: usize = 32;

/// Parse a `0x`-prefixed hex address into its 32 raw bytes.
///
/// Short forms are accepted and zero-padded on the left, matching how
/// nodes render system addresses such as `0x2`.
pub fn parse_address(address: &str) -> Result<[u8; ADDRESS_LEN], SuiError> {
    let hex_part = address
        .strip_prefix("0x")
        .ok_or_else(|| SuiError::InvalidAddress(format!("missing 0x prefix: {address}")))?;
    if hex_part.is_empty() || hex_part.len() > ADDRESS_LEN * 2 {
        return Err(SuiError::InvalidAddress(format!(
            "address must be 1..={} hex chars, got {}",
            ADDRESS_LEN * 2,
            hex_part.len()
        )));
    }

    let padded = format!("{hex_part:0>64}");
    let bytes = hex::decode(&padded)
        .map_err(|e| SuiError::InvalidAddress(format!("invalid hex: {e}")))?;

    let mut out = [0u8; ADDRESS_LEN];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Canonical rendering: `0x` plus 64 lowercase hex chars.
pub fn format_address(bytes: &[u8; ADDRESS_LEN]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a base58 transaction digest into its 32 raw bytes.
pub fn parse_digest(digest: &str) -> Result<[u8; DIGEST_LEN], SuiError> {
    let bytes = bs58::decode(digest)
        .into_vec()
        .map_err(|e| SuiError::InvalidTxId(format!("invalid base58: {e}")))?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        SuiError::InvalidTxId(format!(
            "digest must decode to {DIGEST_LEN} bytes, got {}",
            bytes.len()
        ))
    })
}
