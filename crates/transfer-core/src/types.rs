//! Domain model: tokens, wallet handles and transfer intents.

use serde::{Deserialize, Serialize};

use chain_eth::chains;
use chain_eth::EvmTransactionRequest;
use chain_sol::SolanaCluster;

use crate::units;

/// Pseudo-mint reserved for native SOL (the wrapped-SOL mint address).
pub const WRAPPED_SOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// Chain family tag carried by wallet handles from the external SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainKind {
    Evm,
    Sol,
}

impl ChainKind {
    /// Chain-family segment used by the indexed balances API.
    pub fn api_name(&self) -> &'static str {
        match self {
            ChainKind::Evm => "EVM",
            ChainKind::Sol => "SOL",
        }
    }
}

/// Read-only view of a wallet owned by the external SDK. Never mutated
/// here; only `address` and `chain` are consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub address: String,
    pub chain: ChainKind,
}

/// A fungible or native token on an EVM chain.
///
/// `contract_address` is `None` exactly when the token is the chain's
/// native asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub contract_address: Option<String>,
    pub chain_id: u64,
    /// Base-unit balance as a decimal string.
    pub balance: String,
    pub logo: Option<String>,
}

impl Token {
    pub fn is_native(&self) -> bool {
        self.contract_address.is_none()
    }

    /// Synthetic zero-balance native token for a chain, used when the
    /// balances API is unavailable.
    pub fn native(chain_id: u64) -> Token {
        let (symbol, name) = chains::native_token_info(chain_id);
        Token {
            id: format!("native-{chain_id}"),
            symbol: symbol.to_string(),
            name: name.to_string(),
            decimals: 18,
            contract_address: None,
            chain_id,
            balance: "0".to_string(),
            logo: None,
        }
    }

    pub fn formatted_balance(&self) -> String {
        units::format_balance(&self.balance, self.decimals)
    }
}

/// A token on Solana, identified by its mint address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolanaToken {
    pub mint_address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    /// Base-unit balance as a decimal string.
    pub balance: String,
    pub logo: Option<String>,
    pub is_native: bool,
}

impl SolanaToken {
    /// The native SOL entry, carried under the wrapped-SOL pseudo-mint.
    pub fn native_sol(balance: impl Into<String>) -> SolanaToken {
        SolanaToken {
            mint_address: WRAPPED_SOL_MINT.to_string(),
            symbol: "SOL".to_string(),
            name: "Solana".to_string(),
            decimals: 9,
            balance: balance.into(),
            logo: None,
            is_native: true,
        }
    }

    pub fn formatted_balance(&self) -> String {
        units::format_balance(&self.balance, self.decimals)
    }
}

/// A single user-initiated transfer intent; consumed once by the
/// orchestrator, never persisted.
#[derive(Debug, Clone)]
pub enum TransferRequest {
    Evm {
        wallet: Wallet,
        token: Token,
        to: String,
        amount: String,
        chain_id: u64,
    },
    Solana {
        wallet: Wallet,
        token: SolanaToken,
        to: String,
        amount: String,
        cluster: SolanaCluster,
    },
}

/// Chain-specific unsigned payload handed to the external signer, then
/// discarded; never cached or retried.
#[derive(Debug, Clone)]
pub enum RawTransactionPayload {
    /// An EIP-1559 transaction request.
    Evm(EvmTransactionRequest),
    /// A base64-encoded Solana wire transaction.
    Solana(String),
}
