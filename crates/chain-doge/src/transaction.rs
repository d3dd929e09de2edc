//! Legacy Bitcoin-derivative transaction wire format.
//!
//! Dogecoin kept Bitcoin's pre-segwit encoding:
//!
//! ```text
//! Transaction:
//!   version        u32 LE
//!   num_inputs     varint
//!   inputs[]       outpoint (32-byte txid, internal order + u32 LE vout)
//!                  | varint script_sig length | script_sig | u32 LE sequence
//!   num_outputs    varint
//!   outputs[]      u64 LE value (satoshis) | varint script length | script
//!   lock_time      u32 LE
//! ```
//!
//! The transaction id is the double-SHA-256 of the serialized bytes,
//! displayed byte-reversed in hex.

use sha2::{Digest, Sha256};

use crate::error::DogeError;

/// A transaction input: an outpoint plus the unlocking script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxIn {
    /// Previous transaction id in internal (little-endian) byte order.
    pub prev_txid: [u8; 32],
    pub prev_vout: u32,
    pub script_sig: Vec<u8>,
    pub sequence: u32,
}

/// A transaction output: a satoshi amount and the locking script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut {
    pub value: u64,
    pub script_pubkey: Vec<u8>,
}

/// A complete legacy transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DogeTransaction {
    pub version: u32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl DogeTransaction {
    /// Serialize to the canonical wire encoding.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(128);

        buf.extend_from_slice(&self.version.to_le_bytes());

        write_varint(&mut buf, self.inputs.len() as u64);
        for input in &self.inputs {
            buf.extend_from_slice(&input.prev_txid);
            buf.extend_from_slice(&input.prev_vout.to_le_bytes());
            write_varint(&mut buf, input.script_sig.len() as u64);
            buf.extend_from_slice(&input.script_sig);
            buf.extend_from_slice(&input.sequence.to_le_bytes());
        }

        write_varint(&mut buf, self.outputs.len() as u64);
        for output in &self.outputs {
            buf.extend_from_slice(&output.value.to_le_bytes());
            write_varint(&mut buf, output.script_pubkey.len() as u64);
            buf.extend_from_slice(&output.script_pubkey);
        }

        buf.extend_from_slice(&self.lock_time.to_le_bytes());
        buf
    }

    /// Decode a transaction from wire bytes. Trailing bytes are rejected.
    pub fn deserialize(data: &[u8]) -> Result<Self, DogeError> {
        let mut reader = Reader::new(data);

        let version = reader.read_u32()?;

        let num_inputs = reader.read_varint()?;
        let mut inputs = Vec::with_capacity(num_inputs.min(64) as usize);
        for _ in 0..num_inputs {
            let mut prev_txid = [0u8; 32];
            prev_txid.copy_from_slice(reader.read_bytes(32)?);
            let prev_vout = reader.read_u32()?;
            let script_len = reader.read_varint()? as usize;
            let script_sig = reader.read_bytes(script_len)?.to_vec();
            let sequence = reader.read_u32()?;
            inputs.push(TxIn {
                prev_txid,
                prev_vout,
                script_sig,
                sequence,
            });
        }

        let num_outputs = reader.read_varint()?;
        let mut outputs = Vec::with_capacity(num_outputs.min(64) as usize);
        for _ in 0..num_outputs {
            let value = reader.read_u64()?;
            let script_len = reader.read_varint()? as usize;
            let script_pubkey = reader.read_bytes(script_len)?.to_vec();
            outputs.push(TxOut {
                value,
                script_pubkey,
            });
        }

        let lock_time = reader.read_u32()?;

        if !reader.is_empty() {
            return Err(DogeError::Serialization(
                "trailing bytes after transaction".into(),
            ));
        }

        Ok(DogeTransaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    /// Transaction id: double-SHA-256 of the serialization, hex-encoded in
    /// display (byte-reversed) order.
    pub fn txid(&self) -> String {
        let first = Sha256::digest(self.serialize());
        let mut hash: [u8; 32] = Sha256::digest(first).into();
        hash.reverse();
        hex::encode(hash)
    }
}

/// Build a P2PKH locking script:
/// `OP_DUP OP_HASH160 <20-byte hash> OP_EQUALVERIFY OP_CHECKSIG`.
pub fn p2pkh_script(pubkey_hash: &[u8; 20]) -> Vec<u8> {
    let mut script = Vec::with_capacity(25);
    script.push(0x76); // OP_DUP
    script.push(0xA9); // OP_HASH160
    script.push(0x14); // push 20 bytes
    script.extend_from_slice(pubkey_hash);
    script.push(0x88); // OP_EQUALVERIFY
    script.push(0xAC); // OP_CHECKSIG
    script
}

/// Append a canonical data push to `script`.
///
/// Lengths below 0x4C use the direct push opcode; longer data (signatures
/// never exceed 255 bytes) uses OP_PUSHDATA1.
pub fn push_data(script: &mut Vec<u8>, data: &[u8]) -> Result<(), DogeError> {
    match data.len() {
        0..=0x4B => script.push(data.len() as u8),
        0x4C..=0xFF => {
            script.push(0x4C); // OP_PUSHDATA1
            script.push(data.len() as u8);
        }
        _ => {
            return Err(DogeError::Serialization(format!(
                "push of {} bytes not supported",
                data.len()
            )))
        }
    }
    script.extend_from_slice(data);
    Ok(())
}

/// Parse a display-order hex txid into internal byte order.
pub fn parse_txid(txid_hex: &str) -> Result<[u8; 32], DogeError> {
    let bytes = hex::decode(txid_hex)
        .map_err(|e| DogeError::InvalidTxId(format!("invalid hex: {e}")))?;
    let mut txid: [u8; 32] = bytes
        .try_into()
        .map_err(|_| DogeError::InvalidTxId("txid must be 32 bytes".into()))?;
    txid.reverse();
    Ok(txid)
}

fn write_varint(buf: &mut Vec<u8>, value: u64) {
    match value {
        0..=0xFC => buf.push(value as u8),
        0xFD..=0xFFFF => {
            buf.push(0xFD);
            buf.extend_from_slice(&(value as u16).to_le_bytes());
        }
        0x1_0000..=0xFFFF_FFFF => {
            buf.push(0xFE);
            buf.extend_from_slice(&(value as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xFF);
            buf.extend_from_slice(&value.to_le_bytes());
        }
    }
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DogeError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| DogeError::Serialization("unexpected end of data".into()))?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u32(&mut self) -> Result<u32, DogeError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes(bytes.try_into().unwrap()))
    }

    fn read_u64(&mut self) -> Result<u64, DogeError> {
        let bytes = self.read_bytes(8)?;
        Ok(u64::from_le_bytes(bytes.try_into().unwrap()))
    }

    fn read_varint(&mut self) -> Result<u64, DogeError> {
        let prefix = self.read_bytes(1)?[0];
        Ok(match prefix {
            0xFD => u16::from_le_bytes(self.read_bytes(2)?.try_into().unwrap()) as u64,
            0xFE => u32::from_le_bytes(self.read_bytes(4)?.try_into().unwrap()) as u64,
            0xFF => u64::from_le_bytes(self.read_bytes(8)?.try_into().unwrap()),
            direct => direct as u64,
        })
    }
}
