//! Chain-agnostic transfer construction and balance resolution.
//!
//! This crate turns a user-level transfer intent ("send X of token T to
//! address A") into either an EVM transaction request for an external
//! signer or a raw unsigned Solana wire transaction, and aggregates token
//! balances from an indexed API with a JSON-RPC fallback for Solana.
//!
//! Key custody, authentication flows and UI state belong to the external
//! wallet SDK, which plugs in through the traits in [`signer`]. There is
//! no global state: [`TransferService`] is an explicitly constructed value
//! holding only the collaborator handles it needs, and every operation is
//! a stateless request/response call.

pub mod balances;
pub mod error;
pub mod rpc;
pub mod signer;
pub mod transfer;
pub mod types;
pub mod units;

use std::sync::Arc;
use std::time::Duration;

use log::warn;

pub use chain_eth::EvmTransactionRequest;
pub use chain_sol::SolanaCluster;

pub use balances::{BalanceRecord, BalanceResolver};
pub use error::TransferError;
pub use signer::{AuthSession, GasPriceSource, TransactionSigner};
pub use transfer::TransferOrchestrator;
pub use types::{
    ChainKind, RawTransactionPayload, SolanaToken, Token, TransferRequest, Wallet,
    WRAPPED_SOL_MINT,
};

/// Static configuration for the indexed balances API.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the wallet API, e.g. `https://app.dynamic.xyz/api/v0`.
    pub api_base_url: String,
    /// Environment id issued with the API project.
    pub environment_id: String,
}

/// Composition root: balance resolution plus transfer orchestration over
/// one shared HTTP client.
pub struct TransferService {
    pub balances: BalanceResolver,
    pub transfers: TransferOrchestrator,
}

impl TransferService {
    pub fn new(
        config: ServiceConfig,
        session: Arc<dyn AuthSession>,
        signer: Arc<dyn TransactionSigner>,
        gas: Arc<dyn GasPriceSource>,
    ) -> Result<Self, TransferError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                TransferError::TransactionFailed(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            balances: BalanceResolver::new(
                http.clone(),
                config.api_base_url,
                config.environment_id,
                session,
            ),
            transfers: TransferOrchestrator::new(http, signer, gas),
        })
    }

    /// EVM balances with the degraded-result policy: the indexed API has
    /// no RPC fallback, so on failure the wallet still shows a single
    /// zero-balance native entry instead of an error.
    pub async fn evm_balances_or_default(&self, wallet: &Wallet, chain_id: u64) -> Vec<Token> {
        match self
            .balances
            .get_balances(wallet, Some(chain_id), true, false)
            .await
        {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!("EVM balance resolution failed, degrading to native zero: {err}");
                vec![Token::native(chain_id)]
            }
        }
    }
}
