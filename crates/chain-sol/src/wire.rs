//! Solana transaction wire format: encode, decode, verify.
//!
//! The compact binary layout:
//!
//! ```text
//! Transaction:
//!   num_signatures          compact-u16
//!   signatures              64 bytes * num_signatures
//!   message:
//!     num_required_sigs     u8
//!     num_readonly_signed   u8
//!     num_readonly_unsigned u8
//!     num_accounts          compact-u16
//!     account_keys          32 bytes * num_accounts
//!     recent_blockhash      32 bytes
//!     num_instructions      compact-u16
//!     instructions[]        (see below)
//!
//! Instruction:
//!   program_id_index        u8
//!   num_accounts            compact-u16
//!   account_indices         u8 * num_accounts
//!   data_len                compact-u16
//!   data                    u8 * data_len
//! ```
//!
//! Unlike a wallet, the bridge operator never signs here: signatures are
//! produced externally and only attached and verified.

use ed25519_dalek::{Signature, VerifyingKey};

use crate::address::format_address;
use crate::error::SolError;

/// The Solana System Program public key: 32 zero bytes.
pub const SYSTEM_PROGRAM_ID: [u8; 32] = [0u8; 32];

/// System Program `Transfer` instruction index (little-endian u32).
const SYSTEM_TRANSFER_IX_INDEX: u32 = 2;

// ---------------------------------------------------------------------------
// Compact-u16 encoding
// ---------------------------------------------------------------------------

/// Encode a `u16` value in Solana's compact-u16 format.
///
/// - Values 0..0x7f       -> 1 byte
/// - Values 0x80..0x3fff  -> 2 bytes
/// - Values 0x4000..      -> 3 bytes
pub fn encode_compact_u16(value: u16) -> Vec<u8> {
    let mut val = value as u32;
    let mut out = Vec::with_capacity(3);

    loop {
        let mut byte = (val & 0x7f) as u8;
        val >>= 7;
        if val > 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if val == 0 {
            break;
        }
    }

    out
}

/// Decode a compact-u16 value; returns `(value, bytes_consumed)`.
pub fn decode_compact_u16(data: &[u8]) -> Result<(u16, usize), SolError> {
    let mut value: u32 = 0;
    let mut shift = 0u32;
    let mut consumed = 0usize;

    loop {
        if consumed >= data.len() {
            return Err(SolError::Serialization(
                "unexpected end of data while decoding compact-u16".into(),
            ));
        }
        let byte = data[consumed];
        consumed += 1;

        value |= ((byte & 0x7f) as u32) << shift;
        shift += 7;

        if byte & 0x80 == 0 {
            break;
        }
        if consumed >= 3 {
            break;
        }
    }

    if value > u16::MAX as u32 {
        return Err(SolError::Serialization("compact-u16 value overflow".into()));
    }

    Ok((value as u16, consumed))
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// The three-byte message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub num_required_signatures: u8,
    pub num_readonly_signed: u8,
    pub num_readonly_unsigned: u8,
}

/// An instruction with account references compiled to u8 indices into the
/// message's account keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub account_indices: Vec<u8>,
    pub data: Vec<u8>,
}

/// A Solana message: the signed portion of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    /// Canonical order: writable signers (fee payer first), read-only
    /// signers, writable non-signers, read-only non-signers.
    pub account_keys: Vec<[u8; 32]>,
    pub recent_blockhash: [u8; 32],
    pub instructions: Vec<CompiledInstruction>,
}

impl Message {
    /// The fee payer is always `account_keys[0]`.
    pub fn fee_payer(&self) -> Option<&[u8; 32]> {
        self.account_keys.first()
    }

    /// Serialize into the wire layout (the exact bytes that get signed).
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(256);

        buf.push(self.header.num_required_signatures);
        buf.push(self.header.num_readonly_signed);
        buf.push(self.header.num_readonly_unsigned);

        buf.extend_from_slice(&encode_compact_u16(self.account_keys.len() as u16));
        for key in &self.account_keys {
            buf.extend_from_slice(key);
        }

        buf.extend_from_slice(&self.recent_blockhash);

        buf.extend_from_slice(&encode_compact_u16(self.instructions.len() as u16));
        for ix in &self.instructions {
            buf.push(ix.program_id_index);

            buf.extend_from_slice(&encode_compact_u16(ix.account_indices.len() as u16));
            buf.extend_from_slice(&ix.account_indices);

            buf.extend_from_slice(&encode_compact_u16(ix.data.len() as u16));
            buf.extend_from_slice(&ix.data);
        }

        buf
    }

    /// Decode a message from wire bytes. Trailing bytes are rejected.
    pub fn deserialize(data: &[u8]) -> Result<Self, SolError> {
        let (message, consumed) = Self::deserialize_prefix(data)?;
        if consumed != data.len() {
            return Err(SolError::Serialization(
                "trailing bytes after message".into(),
            ));
        }
        Ok(message)
    }

    /// Decode a message from the front of `data`; returns the message and
    /// the number of bytes consumed.
    fn deserialize_prefix(data: &[u8]) -> Result<(Self, usize), SolError> {
        if data.len() < 3 {
            return Err(SolError::Serialization("message too short".into()));
        }

        let header = MessageHeader {
            num_required_signatures: data[0],
            num_readonly_signed: data[1],
            num_readonly_unsigned: data[2],
        };
        let mut pos = 3;

        let (num_accounts, len) = decode_compact_u16(&data[pos..])?;
        pos += len;

        let mut account_keys = Vec::with_capacity(num_accounts as usize);
        for _ in 0..num_accounts {
            let key: [u8; 32] = data
                .get(pos..pos + 32)
                .ok_or_else(|| SolError::Serialization("message too short for account keys".into()))?
                .try_into()
                .unwrap();
            account_keys.push(key);
            pos += 32;
        }

        let recent_blockhash: [u8; 32] = data
            .get(pos..pos + 32)
            .ok_or_else(|| SolError::Serialization("message too short for blockhash".into()))?
            .try_into()
            .unwrap();
        pos += 32;

        let (num_instructions, len) = decode_compact_u16(&data[pos..])?;
        pos += len;

        let mut instructions = Vec::with_capacity(num_instructions as usize);
        for _ in 0..num_instructions {
            let program_id_index = *data
                .get(pos)
                .ok_or_else(|| SolError::Serialization("message too short for instruction".into()))?;
            pos += 1;

            let (num_indices, len) = decode_compact_u16(&data[pos..])?;
            pos += len;
            let account_indices = data
                .get(pos..pos + num_indices as usize)
                .ok_or_else(|| {
                    SolError::Serialization("message too short for account indices".into())
                })?
                .to_vec();
            pos += num_indices as usize;

            let (data_len, len) = decode_compact_u16(&data[pos..])?;
            pos += len;
            let ix_data = data
                .get(pos..pos + data_len as usize)
                .ok_or_else(|| {
                    SolError::Serialization("message too short for instruction data".into())
                })?
                .to_vec();
            pos += data_len as usize;

            instructions.push(CompiledInstruction {
                program_id_index,
                account_indices,
                data: ix_data,
            });
        }

        Ok((
            Message {
                header,
                account_keys,
                recent_blockhash,
                instructions,
            },
            pos,
        ))
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A message plus its parallel-ordered Ed25519 signatures.
///
/// Invariant at submission: `signatures.len()` equals
/// `header.num_required_signatures`, and `signatures[i]` is by
/// `account_keys[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolTransaction {
    pub signatures: Vec<[u8; 64]>,
    pub message: Message,
}

impl SolTransaction {
    /// Serialize into the wire layout for `sendTransaction`.
    pub fn serialize(&self) -> Vec<u8> {
        let message_bytes = self.message.serialize();
        let mut wire = Vec::with_capacity(3 + 64 * self.signatures.len() + message_bytes.len());

        wire.extend_from_slice(&encode_compact_u16(self.signatures.len() as u16));
        for signature in &self.signatures {
            wire.extend_from_slice(signature);
        }
        wire.extend_from_slice(&message_bytes);
        wire
    }

    /// Decode a transaction from wire bytes.
    pub fn deserialize(data: &[u8]) -> Result<Self, SolError> {
        let (num_sigs, consumed) = decode_compact_u16(data)?;
        let mut pos = consumed;

        let mut signatures = Vec::with_capacity(num_sigs as usize);
        for _ in 0..num_sigs {
            let signature: [u8; 64] = data
                .get(pos..pos + 64)
                .ok_or_else(|| {
                    SolError::Serialization("transaction too short for signatures".into())
                })?
                .try_into()
                .unwrap();
            signatures.push(signature);
            pos += 64;
        }

        let message = Message::deserialize(&data[pos..])?;
        Ok(SolTransaction { signatures, message })
    }

    /// Verify every attached signature against the corresponding signer key.
    ///
    /// Requires exactly `num_required_signatures` signatures; on any
    /// mismatch the error carries the fee-payer address and the base58 of
    /// the signed message for diagnostics.
    pub fn verify_signatures(&self) -> Result<(), SolError> {
        let message_bytes = self.message.serialize();
        let required = self.message.header.num_required_signatures as usize;

        let fail = || {
            let fee_payer = self
                .message
                .fee_payer()
                .map(format_address)
                .unwrap_or_default();
            SolError::SignatureVerification {
                fee_payer,
                message_b58: bs58::encode(&message_bytes).into_string(),
            }
        };

        if self.signatures.len() != required || required > self.message.account_keys.len() {
            return Err(fail());
        }

        for (signature, pubkey) in self.signatures.iter().zip(&self.message.account_keys) {
            let verifying_key = VerifyingKey::from_bytes(pubkey).map_err(|_| fail())?;
            let signature = Signature::from_bytes(signature);
            verifying_key
                .verify_strict(&message_bytes, &signature)
                .map_err(|_| fail())?;
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Transfer message construction
// ---------------------------------------------------------------------------

/// Build a System Program transfer message moving `lamports` from
/// `from_pubkey` (the fee payer and sole signer) to `to_pubkey`.
pub fn build_transfer_message(
    from_pubkey: &[u8; 32],
    to_pubkey: &[u8; 32],
    lamports: u64,
    recent_blockhash: &[u8; 32],
) -> Result<Message, SolError> {
    if lamports == 0 {
        return Err(SolError::InvalidAmount("lamports must be > 0".into()));
    }

    // Instruction data: u32 LE index (2 = Transfer) + u64 LE lamports.
    let mut data = Vec::with_capacity(12);
    data.extend_from_slice(&SYSTEM_TRANSFER_IX_INDEX.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());

    // Account layout: sender (writable signer), recipient (writable),
    // system program (read-only). A self-transfer collapses the first two.
    let (account_keys, recipient_index) = if from_pubkey == to_pubkey {
        (vec![*from_pubkey, SYSTEM_PROGRAM_ID], 0u8)
    } else {
        (vec![*from_pubkey, *to_pubkey, SYSTEM_PROGRAM_ID], 1u8)
    };
    let program_id_index = (account_keys.len() - 1) as u8;

    Ok(Message {
        header: MessageHeader {
            num_required_signatures: 1,
            num_readonly_signed: 0,
            num_readonly_unsigned: 1,
        },
        account_keys,
        recent_blockhash: *recent_blockhash,
        instructions: vec![CompiledInstruction {
            program_id_index,
            account_indices: vec![0, recipient_index],
            data,
        }],
    })
}
