//! SPL mint-account layout.
//!
//! Only the `decimals` field is needed; it sits at a fixed offset in the
//! 82-byte packed Mint layout:
//!
//! ```text
//! mint_authority   COption<Pubkey>   36 bytes (4 tag + 32 key)
//! supply           u64                8 bytes
//! decimals         u8                 1 byte   <- offset 44
//! is_initialized   bool               1 byte
//! freeze_authority COption<Pubkey>   36 bytes
//! ```

use crate::error::SolError;

/// Packed length of an SPL mint account.
pub const MINT_ACCOUNT_LEN: usize = 82;

const DECIMALS_OFFSET: usize = 44;

/// Read the `decimals` field out of raw mint-account data.
pub fn decode_mint_decimals(data: &[u8]) -> Result<u8, SolError> {
    if data.len() != MINT_ACCOUNT_LEN {
        return Err(SolError::Serialization(format!(
            "mint account must be {MINT_ACCOUNT_LEN} bytes, got {}",
            data.len()
        )));
    }
    Ok(data[DECIMALS_OFFSET])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mint_data(decimals: u8) -> Vec<u8> {
        let mut data = vec![0u8; MINT_ACCOUNT_LEN];
        data[DECIMALS_OFFSET] = decimals;
        data[DECIMALS_OFFSET + 1] = 1; // is_initialized
        data
    }

    #[test]
    fn reads_decimals() {
        assert_eq!(decode_mint_decimals(&mint_data(6)).unwrap(), 6);
        assert_eq!(decode_mint_decimals(&mint_data(0)).unwrap(), 0);
        assert_eq!(decode_mint_decimals(&mint_data(9)).unwrap(), 9);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(decode_mint_decimals(&[0u8; 10]).is_err());
        assert!(decode_mint_decimals(&[0u8; 165]).is_err());
        assert!(decode_mint_decimals(&[]).is_err());
    }
}
