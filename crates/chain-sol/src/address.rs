//! Solana address parsing and validation.
//!
//! A Solana address is the Base58 encoding of a raw 32-byte Ed25519
//! public key. No hashing step, no checksum.

use crate::error::SolError;

/// Parse a Base58 address into its 32-byte public key.
pub fn parse_address(address: &str) -> Result<[u8; 32], SolError> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|e| SolError::InvalidAddress(format!("invalid base58: {e}")))?;

    bytes
        .try_into()
        .map_err(|_| SolError::InvalidAddress("address must decode to 32 bytes".into()))
}

/// Format a 32-byte public key as a Base58 address.
pub fn format_address(pubkey: &[u8; 32]) -> String {
    bs58::encode(pubkey).into_string()
}

/// Whether `address` is a well-formed Solana address.
pub fn validate_address(address: &str) -> bool {
    parse_address(address).is_ok()
}
