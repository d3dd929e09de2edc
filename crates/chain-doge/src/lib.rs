//! Dogecoin chain support for the bridge operator.
//!
//! Provides P2PKH address derivation and validation, the legacy
//! Bitcoin-derivative transaction wire format, a minimal JSON-RPC 1.0
//! client, and the withdraw build/submit/inspect pipeline.

pub mod address;
pub mod error;
pub mod network;
pub mod rpc;
pub mod transaction;
pub mod transfers;
pub mod withdraw;

pub use address::{decode_address, pubkey_to_address, validate_address};
pub use error::DogeError;
pub use network::DogeNetwork;
pub use rpc::DogeRpcClient;
pub use transaction::{DogeTransaction, TxIn, TxOut};
pub use transfers::{get_transfers, is_confirmed};
pub use withdraw::{build_withdraw_native, submit_withdraw, UnsignedWithdraw};
