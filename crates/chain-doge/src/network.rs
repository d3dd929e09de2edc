/// Supported Dogecoin networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DogeNetwork {
    Mainnet,
    Testnet,
}

impl DogeNetwork {
    /// Base58Check version byte for P2PKH addresses.
    pub fn version_byte(self) -> u8 {
        match self {
            DogeNetwork::Mainnet => 0x1E,
            DogeNetwork::Testnet => 0x71,
        }
    }

    /// The leading character every P2PKH address on this network carries.
    pub fn address_prefix(self) -> char {
        match self {
            DogeNetwork::Mainnet => 'D',
            DogeNetwork::Testnet => 'n',
        }
    }
}

impl std::fmt::Display for DogeNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DogeNetwork::Mainnet => write!(f, "mainnet"),
            DogeNetwork::Testnet => write!(f, "testnet"),
        }
    }
}
