//! Solana chain support for the bridge operator.
//!
//! Implements Solana's compact binary wire format by hand, without a
//! `solana-sdk` dependency. Operator signatures are verified with
//! `ed25519-dalek` before anything reaches the network, and enriched
//! transfer records come from the Helius transaction API.

pub mod address;
pub mod enrichment;
pub mod error;
pub mod mint;
pub mod rpc;
pub mod transfers;
pub mod wire;
pub mod withdraw;

pub use address::{format_address, parse_address, validate_address};
pub use error::SolError;
pub use rpc::SolRpcClient;
pub use transfers::{get_transfers, is_confirmed};
pub use wire::{
    build_transfer_message, decode_compact_u16, encode_compact_u16, CompiledInstruction,
    Message, MessageHeader, SolTransaction, SYSTEM_PROGRAM_ID,
};
pub use withdraw::{
    build_withdraw_native, submit_signed_transaction, submit_withdraw, UnsignedWithdraw,
};
