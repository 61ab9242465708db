//! Transfer orchestration.
//!
//! One entry point per transfer shape plus a [`TransferRequest`] dispatch.
//! Every build is a pure function of its inputs and one freshly fetched
//! blockhash; payloads are handed to the external signer and discarded.
//! Validation and encoding run before any network round trip, and nothing
//! is retried; failures propagate to the caller verbatim.

use std::sync::Arc;

use log::debug;

use chain_eth::{address as eth_address, transaction as eth_tx};
use chain_sol::{base58, spl_token, transaction as sol_tx, SolanaCluster};

use crate::error::TransferError;
use crate::rpc::SolanaRpcClient;
use crate::signer::{GasPriceSource, TransactionSigner};
use crate::types::{ChainKind, RawTransactionPayload, SolanaToken, Token, TransferRequest, Wallet};
use crate::units;

/// Decimal places of the native asset on EVM chains (wei).
const NATIVE_EVM_DECIMALS: u32 = 18;

/// Decimal places of native SOL (lamports).
const LAMPORT_DECIMALS: u32 = 9;

pub struct TransferOrchestrator {
    http: reqwest::Client,
    signer: Arc<dyn TransactionSigner>,
    gas: Arc<dyn GasPriceSource>,
}

impl TransferOrchestrator {
    pub fn new(
        http: reqwest::Client,
        signer: Arc<dyn TransactionSigner>,
        gas: Arc<dyn GasPriceSource>,
    ) -> Self {
        Self { http, signer, gas }
    }

    /// Build and submit a transfer, returning the transaction hash or
    /// signature from the signer unchanged.
    pub async fn send(&self, request: TransferRequest) -> Result<String, TransferError> {
        match request {
            TransferRequest::Evm {
                wallet,
                token,
                to,
                amount,
                chain_id,
            } => {
                if token.is_native() {
                    self.send_native_evm(&wallet, &to, &amount, chain_id).await
                } else {
                    self.send_erc20(&wallet, &token, &to, &amount, chain_id).await
                }
            }
            TransferRequest::Solana {
                wallet,
                token,
                to,
                amount,
                cluster,
            } => {
                if token.is_native {
                    self.send_native_sol(&wallet, &to, &amount, cluster).await
                } else {
                    self.send_spl(&wallet, &token, &to, &amount, cluster).await
                }
            }
        }
    }

    /// Native-value transfer on an EVM chain.
    pub async fn send_native_evm(
        &self,
        wallet: &Wallet,
        to: &str,
        amount: &str,
        chain_id: u64,
    ) -> Result<String, TransferError> {
        ensure_chain(wallet, ChainKind::Evm)?;
        let value = units::to_base_units(amount, NATIVE_EVM_DECIMALS)?;
        eth_address::validate_address(to)?;

        let gas_price = self.gas.gas_price(chain_id).await?;
        let request = eth_tx::build_native_transfer(&wallet.address, to, value, gas_price)?;

        debug!("submitting native transfer on chain {chain_id}");
        self.signer
            .sign_and_send(wallet, RawTransactionPayload::Evm(request))
            .await
    }

    /// ERC-20 token transfer. The token must carry a contract address;
    /// native tokens are rejected before anything touches the network.
    pub async fn send_erc20(
        &self,
        wallet: &Wallet,
        token: &Token,
        to: &str,
        amount: &str,
        chain_id: u64,
    ) -> Result<String, TransferError> {
        ensure_chain(wallet, ChainKind::Evm)?;
        let contract = token.contract_address.as_deref().ok_or_else(|| {
            TransferError::TransactionFailed("Cannot send native token as ERC-20".into())
        })?;
        let base_units = units::to_base_units(amount, u32::from(token.decimals))?;
        eth_address::validate_address(to)?;

        let gas_price = self.gas.gas_price(chain_id).await?;
        let request =
            eth_tx::build_erc20_transfer(&wallet.address, contract, to, base_units, gas_price)?;

        debug!("submitting {} transfer on chain {chain_id}", token.symbol);
        self.signer
            .sign_and_send(wallet, RawTransactionPayload::Evm(request))
            .await
    }

    /// Native SOL transfer.
    pub async fn send_native_sol(
        &self,
        wallet: &Wallet,
        to: &str,
        amount: &str,
        cluster: SolanaCluster,
    ) -> Result<String, TransferError> {
        ensure_chain(wallet, ChainKind::Sol)?;
        let lamports = units::to_base_units_u64(amount, LAMPORT_DECIMALS)?;
        let from = base58::decode_pubkey(&wallet.address)?;
        let to_key = base58::decode_pubkey(to)?;

        let blockhash = self.fresh_blockhash(cluster).await?;
        let tx = sol_tx::build_native_transfer(&from, &to_key, lamports, &blockhash)?;

        debug!("submitting native transfer on {}", cluster.display_name());
        self.signer
            .sign_and_send(wallet, RawTransactionPayload::Solana(tx.to_base64()))
            .await
    }

    /// SPL token transfer between the derived associated token accounts of
    /// sender and recipient.
    pub async fn send_spl(
        &self,
        wallet: &Wallet,
        token: &SolanaToken,
        to: &str,
        amount: &str,
        cluster: SolanaCluster,
    ) -> Result<String, TransferError> {
        ensure_chain(wallet, ChainKind::Sol)?;
        let base_units = units::to_base_units_u64(amount, u32::from(token.decimals))?;
        let owner = base58::decode_pubkey(&wallet.address)?;
        let recipient = base58::decode_pubkey(to)?;
        let mint = base58::decode_pubkey(&token.mint_address)?;

        let source_ata = spl_token::derive_associated_token_address(&owner, &mint)?;
        let dest_ata = spl_token::derive_associated_token_address(&recipient, &mint)?;

        let blockhash = self.fresh_blockhash(cluster).await?;
        let tx =
            spl_token::build_token_transfer(&owner, &source_ata, &dest_ata, base_units, &blockhash)?;

        debug!(
            "submitting {} transfer on {}",
            token.symbol,
            cluster.display_name()
        );
        self.signer
            .sign_and_send(wallet, RawTransactionPayload::Solana(tx.to_base64()))
            .await
    }

    /// Fetch and decode a blockhash for one build. Blockhashes are
    /// single-use; each build fetches its own and nothing is cached.
    async fn fresh_blockhash(&self, cluster: SolanaCluster) -> Result<[u8; 32], TransferError> {
        let rpc = SolanaRpcClient::new(self.http.clone(), cluster);
        let blockhash = rpc.latest_blockhash().await?;
        Ok(base58::decode_pubkey(&blockhash)?)
    }
}

fn ensure_chain(wallet: &Wallet, expected: ChainKind) -> Result<(), TransferError> {
    if wallet.chain != expected {
        return Err(TransferError::TransactionFailed(format!(
            "wallet {} is not on the {} chain family",
            wallet.address,
            expected.api_name()
        )));
    }
    Ok(())
}
