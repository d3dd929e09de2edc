//! Shared types for the bridge-operator chain adapters.
//!
//! This crate holds the pieces every chain adapter needs: fixed-point
//! amount formatting, the normalized [`Transfer`](transfer::Transfer)
//! record, and the chain-registry port that maps a chain id to its RPC
//! endpoint and native-token symbol.

pub mod error;
pub mod registry;
pub mod transfer;
pub mod units;

pub use error::CoreError;
pub use registry::{ChainDescriptor, ChainRegistry, StaticRegistry};
pub use transfer::{Transfer, NATIVE_TOKEN_ADDRESS};
pub use units::format_units;
