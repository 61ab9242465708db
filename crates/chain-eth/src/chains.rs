use serde::Serialize;

/// Definition of an EVM-compatible blockchain network.
#[derive(Debug, Clone, Serialize)]
pub struct EvmChain {
    pub chain_id: u64,
    pub name: &'static str,
    /// Symbol of the chain's native asset.
    pub native_symbol: &'static str,
    /// Display name of the chain's native asset.
    pub native_name: &'static str,
    pub decimals: u8,
    pub is_testnet: bool,
}

/// Ethereum Mainnet (chain ID 1).
pub const ETHEREUM: EvmChain = EvmChain {
    chain_id: 1,
    name: "Ethereum",
    native_symbol: "ETH",
    native_name: "Ethereum",
    decimals: 18,
    is_testnet: false,
};

/// Sepolia Testnet (chain ID 11155111).
pub const SEPOLIA: EvmChain = EvmChain {
    chain_id: 11_155_111,
    name: "Sepolia",
    native_symbol: "ETH",
    native_name: "Ethereum",
    decimals: 18,
    is_testnet: true,
};

/// Base (chain ID 8453).
pub const BASE: EvmChain = EvmChain {
    chain_id: 8453,
    name: "Base",
    native_symbol: "ETH",
    native_name: "Ethereum",
    decimals: 18,
    is_testnet: false,
};

/// Base Sepolia Testnet (chain ID 84532).
pub const BASE_SEPOLIA: EvmChain = EvmChain {
    chain_id: 84_532,
    name: "Base Sepolia",
    native_symbol: "ETH",
    native_name: "Ethereum",
    decimals: 18,
    is_testnet: true,
};

/// Arbitrum One (chain ID 42161).
pub const ARBITRUM: EvmChain = EvmChain {
    chain_id: 42_161,
    name: "Arbitrum One",
    native_symbol: "ETH",
    native_name: "Ethereum",
    decimals: 18,
    is_testnet: false,
};

/// Optimism (chain ID 10).
pub const OPTIMISM: EvmChain = EvmChain {
    chain_id: 10,
    name: "Optimism",
    native_symbol: "ETH",
    native_name: "Ethereum",
    decimals: 18,
    is_testnet: false,
};

/// Polygon PoS (chain ID 137).
pub const POLYGON: EvmChain = EvmChain {
    chain_id: 137,
    name: "Polygon",
    native_symbol: "MATIC",
    native_name: "Polygon",
    decimals: 18,
    is_testnet: false,
};

/// Polygon Amoy Testnet (chain ID 80002).
pub const POLYGON_AMOY: EvmChain = EvmChain {
    chain_id: 80_002,
    name: "Polygon Amoy",
    native_symbol: "MATIC",
    native_name: "Polygon",
    decimals: 18,
    is_testnet: true,
};

/// All supported EVM chains.
const ALL_CHAINS: &[&EvmChain] = &[
    &ETHEREUM,
    &SEPOLIA,
    &BASE,
    &BASE_SEPOLIA,
    &ARBITRUM,
    &OPTIMISM,
    &POLYGON,
    &POLYGON_AMOY,
];

/// Returns the chain definition for a given chain ID, or `None` if unsupported.
pub fn get_chain(chain_id: u64) -> Option<&'static EvmChain> {
    ALL_CHAINS.iter().find(|c| c.chain_id == chain_id).copied()
}

/// Returns all supported EVM chain definitions.
pub fn supported_chains() -> Vec<&'static EvmChain> {
    ALL_CHAINS.to_vec()
}

/// Symbol and name of a chain's native asset, defaulting for unknown ids.
pub fn native_token_info(chain_id: u64) -> (&'static str, &'static str) {
    match get_chain(chain_id) {
        Some(chain) => (chain.native_symbol, chain.native_name),
        None => ("ETH", "Native Token"),
    }
}
