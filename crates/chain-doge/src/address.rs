//! Dogecoin P2PKH address derivation and validation.
//!
//! Addresses are Base58Check over a one-byte network version followed by
//! the HASH160 of the compressed public key. Mainnet addresses start with
//! 'D' (version 0x1E), testnet addresses with 'n' (version 0x71).

use k256::elliptic_curve::sec1::ToEncodedPoint;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::error::DogeError;
use crate::network::DogeNetwork;

/// The Bitcoin Base58 alphabet (no 0, O, I, l).
const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Derive a P2PKH address from a hex-encoded secp256k1 public key.
///
/// The key may be in compressed or uncompressed SEC1 form; it is
/// re-serialized compressed before hashing. Fails with
/// [`DogeError::AddressDerivation`] if the encoded address does not carry
/// the network's expected leading character.
pub fn pubkey_to_address(pubkey_hex: &str, network: DogeNetwork) -> Result<String, DogeError> {
    let pubkey_bytes = hex::decode(pubkey_hex)
        .map_err(|e| DogeError::InvalidPublicKey(format!("invalid hex: {e}")))?;

    let pubkey = k256::PublicKey::from_sec1_bytes(&pubkey_bytes)
        .map_err(|e| DogeError::InvalidPublicKey(format!("malformed SEC1 point: {e}")))?;
    let compressed = pubkey.to_encoded_point(true);

    let pubkey_hash = hash160(compressed.as_bytes());

    let mut payload = Vec::with_capacity(21);
    payload.push(network.version_byte());
    payload.extend_from_slice(&pubkey_hash);

    let address = bs58::encode(payload).with_check().into_string();

    if !address.starts_with(network.address_prefix()) {
        return Err(DogeError::AddressDerivation(format!(
            "derived address {address} does not start with '{}' for {network}",
            network.address_prefix(),
        )));
    }

    Ok(address)
}

/// Syntactic mainnet address check: Base58 alphabet, length exactly 34,
/// leading character 'D' (P2PKH), 'A' or '9' (P2SH).
///
/// The checksum is deliberately not verified; callers that need the
/// payload go through [`decode_address`].
pub fn validate_address(address: &str) -> bool {
    address.len() == 34
        && address
            .chars()
            .next()
            .is_some_and(|c| matches!(c, 'D' | 'A' | '9'))
        && address.chars().all(|c| BASE58_ALPHABET.contains(c))
}

/// Decode a P2PKH address into its 20-byte pubkey hash.
///
/// Accepts mainnet (0x1E) and testnet (0x71) version bytes and verifies
/// the 4-byte double-SHA-256 checksum.
pub fn decode_address(address: &str) -> Result<[u8; 20], DogeError> {
    let decoded = bs58::decode(address)
        .into_vec()
        .map_err(|e| DogeError::InvalidAddress(format!("invalid base58: {e}")))?;

    if decoded.len() != 25 {
        return Err(DogeError::InvalidAddress(format!(
            "expected 25 bytes, got {}",
            decoded.len()
        )));
    }

    let payload = &decoded[..21];
    let checksum = &decoded[21..];
    if checksum != double_sha256_checksum(payload) {
        return Err(DogeError::InvalidAddress("invalid checksum".into()));
    }

    let version = decoded[0];
    if version != DogeNetwork::Mainnet.version_byte()
        && version != DogeNetwork::Testnet.version_byte()
    {
        return Err(DogeError::InvalidAddress(format!(
            "unsupported version byte 0x{version:02x}"
        )));
    }

    let mut pubkey_hash = [0u8; 20];
    pubkey_hash.copy_from_slice(&decoded[1..21]);
    Ok(pubkey_hash)
}

/// HASH160: RIPEMD-160 of SHA-256.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    Ripemd160::digest(sha).into()
}

fn double_sha256_checksum(data: &[u8]) -> [u8; 4] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut checksum = [0u8; 4];
    checksum.copy_from_slice(&second[..4]);
    checksum
}
