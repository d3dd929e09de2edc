//! Chain-registry port.
//!
//! The registry maps an external chain id to the node endpoint and the
//! native-token symbol for that chain. In production the lookup is backed
//! by a registry service; the adapters only see the trait.

use std::collections::HashMap;

use crate::error::CoreError;

/// What the adapters need to know about a chain: where to talk to it and
/// what its native token is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainDescriptor {
    pub chain_url: String,
    pub token_symbol: String,
}

/// Lookup from chain id to [`ChainDescriptor`].
///
/// Resolved per call; descriptors are not cached by the adapters.
pub trait ChainRegistry: Send + Sync {
    fn get_chain(&self, chain_id: &str) -> Result<ChainDescriptor, CoreError>;
}

/// An in-memory registry backed by a fixed table.
#[derive(Debug, Default, Clone)]
pub struct StaticRegistry {
    chains: HashMap<String, ChainDescriptor>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the chains this operator serves.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert("2000", "http://localhost:22555", "DOGE");
        registry.insert("901", "https://api.devnet.solana.com", "SOL");
        registry.insert("3002", "https://fullnode.testnet.sui.io:443", "SUI");
        registry
    }

    pub fn insert(&mut self, chain_id: &str, chain_url: &str, token_symbol: &str) {
        self.chains.insert(
            chain_id.to_string(),
            ChainDescriptor {
                chain_url: chain_url.to_string(),
                token_symbol: token_symbol.to_string(),
            },
        );
    }
}

impl ChainRegistry for StaticRegistry {
    fn get_chain(&self, chain_id: &str) -> Result<ChainDescriptor, CoreError> {
        self.chains
            .get(chain_id)
            .cloned()
            .ok_or_else(|| CoreError::UnknownChain(chain_id.to_string()))
    }
}
