/// Solana cluster selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolanaCluster {
    MainnetBeta,
    Devnet,
    Testnet,
}

impl SolanaCluster {
    /// Public JSON-RPC endpoint for this cluster.
    pub fn endpoint(&self) -> &'static str {
        match self {
            SolanaCluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
            SolanaCluster::Devnet => "https://api.devnet.solana.com",
            SolanaCluster::Testnet => "https://api.testnet.solana.com",
        }
    }

    /// Network id used by the indexed balances API.
    pub fn network_id(&self) -> u64 {
        match self {
            SolanaCluster::MainnetBeta => 101,
            SolanaCluster::Devnet => 102,
            SolanaCluster::Testnet => 103,
        }
    }

    /// Display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            SolanaCluster::MainnetBeta => "Mainnet Beta",
            SolanaCluster::Devnet => "Devnet",
            SolanaCluster::Testnet => "Testnet",
        }
    }
}
