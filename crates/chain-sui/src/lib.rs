//! Sui chain support for the bridge operator.
//!
//! Transactions are constructed by the node (`sui_pay` / `sui_paySui`
//! return BCS bytes), so this crate's work is coin selection against the
//! paged coin API, gas budgeting, signed submission, and normalizing
//! balance changes into transfer records. Every network call carries a
//! 30-second deadline.

pub mod address;
pub mod coin_select;
pub mod error;
pub mod rpc;
pub mod transfers;
pub mod withdraw;

pub use address::{format_address, parse_address, parse_digest};
pub use coin_select::GreedySelection;
pub use error::SuiError;
pub use rpc::SuiRpcClient;
pub use transfers::{get_transfers, is_confirmed};
pub use withdraw::{
    build_withdraw_native, build_withdraw_token, submit_withdraw, UnsignedWithdraw,
    SUI_COIN_TYPE,
};
