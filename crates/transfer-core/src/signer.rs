//! Seams to the external wallet SDK.
//!
//! Key custody, session management and gas estimation all live in the
//! SDK; this core only depends on the three capabilities below, injected
//! at construction time.

use alloy_primitives::U256;
use async_trait::async_trait;

use crate::error::TransferError;
use crate::types::{RawTransactionPayload, Wallet};

/// Authenticated session owned by the external SDK.
pub trait AuthSession: Send + Sync {
    /// Bearer token for the indexed balances API; `None` when logged out.
    fn bearer_token(&self) -> Option<String>;
}

/// Sign-and-broadcast capability of the external SDK.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// Sign and submit a payload for `wallet`, returning the transaction
    /// hash or signature string unchanged.
    async fn sign_and_send(
        &self,
        wallet: &Wallet,
        payload: RawTransactionPayload,
    ) -> Result<String, TransferError>;
}

/// Current gas price for an EVM chain (the SDK's public client).
#[async_trait]
pub trait GasPriceSource: Send + Sync {
    async fn gas_price(&self, chain_id: u64) -> Result<U256, TransferError>;
}
