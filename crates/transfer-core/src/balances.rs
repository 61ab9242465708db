//! Token balance resolution.
//!
//! The primary source is the indexed balances API; when it is unavailable
//! for a Solana wallet the resolver degrades to direct JSON-RPC queries
//! against the cluster. Balance display must degrade gracefully, so the
//! RPC path swallows transport errors into zero/empty results instead of
//! failing the caller.

use std::sync::Arc;

use log::warn;
use serde::Deserialize;

use chain_sol::SolanaCluster;

use crate::error::TransferError;
use crate::rpc::{SolanaRpcClient, TokenAccount};
use crate::signer::AuthSession;
use crate::types::{SolanaToken, Token, Wallet};

/// Well-known mainnet mints the RPC fallback can label without metadata.
const KNOWN_MINTS: &[(&str, &str, &str)] = &[
    ("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", "USDC", "USD Coin"),
    ("Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB", "USDT", "Tether USD"),
    ("So11111111111111111111111111111111111111112", "SOL", "Wrapped SOL"),
    ("mSoLzYCxHdYgdzU16g5QSh3i5K3z3KZK7ytfqcJm7So", "mSOL", "Marinade staked SOL"),
    ("7dHbWXmci3dT8UFYWYZweBLXgycu7Y3iL6trKn1Y7ARj", "stSOL", "Lido Staked SOL"),
    ("DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263", "BONK", "Bonk"),
    ("JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN", "JUP", "Jupiter"),
    ("4k3Dyjzvzp8eMZWUXbBCjEvwSkkk59S5iCNLY3QrkX6R", "RAY", "Raydium"),
    ("orcaEKTdK7LKz57vaAYr9QeNsVEPfiu6QeMU1kektZE", "ORCA", "Orca"),
];

/// One record from the indexed balances API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRecord {
    pub network_id: Option<u64>,
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(rename = "logoURI")]
    pub logo_uri: Option<String>,
    pub balance: f64,
    /// Authoritative base-unit value.
    pub raw_balance: f64,
    pub price: Option<f64>,
    pub market_value: Option<f64>,
    pub is_native: Option<bool>,
}

/// Balance resolver over the indexed API with Solana RPC fallback.
pub struct BalanceResolver {
    http: reqwest::Client,
    api_base: String,
    environment_id: String,
    session: Arc<dyn AuthSession>,
}

impl BalanceResolver {
    pub fn new(
        http: reqwest::Client,
        api_base: impl Into<String>,
        environment_id: impl Into<String>,
        session: Arc<dyn AuthSession>,
    ) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            environment_id: environment_id.into(),
            session,
        }
    }

    /// Balances for a wallet via the indexed API. EVM wallets have no
    /// fallback: the caller substitutes [`Token::native`] on failure.
    pub async fn get_balances(
        &self,
        wallet: &Wallet,
        network_id: Option<u64>,
        include_native: bool,
        include_prices: bool,
    ) -> Result<Vec<Token>, TransferError> {
        let records = self
            .fetch_records(
                wallet.chain.api_name(),
                &wallet.address,
                network_id,
                include_native,
                include_prices,
            )
            .await?;
        Ok(records
            .into_iter()
            .map(|r| token_from_record(r, network_id))
            .collect())
    }

    /// Solana balances, degrading to direct RPC queries when the indexed
    /// API returns a non-200 status or is unreachable.
    pub async fn get_solana_balances(
        &self,
        wallet: &Wallet,
        cluster: SolanaCluster,
    ) -> Result<Vec<SolanaToken>, TransferError> {
        match self
            .fetch_records("SOL", &wallet.address, Some(cluster.network_id()), true, false)
            .await
        {
            Ok(records) => Ok(records.into_iter().map(solana_token_from_record).collect()),
            // A missing session or an undecodable 200 response is a caller
            // or contract error, not an API outage.
            Err(err @ (TransferError::NotAuthenticated | TransferError::MalformedResponse(_))) => {
                Err(err)
            }
            Err(err) => {
                warn!("indexed balances unavailable, falling back to RPC: {err}");
                let rpc = SolanaRpcClient::new(self.http.clone(), cluster);
                Ok(solana_balances_from_rpc(&rpc, &wallet.address).await)
            }
        }
    }

    async fn fetch_records(
        &self,
        chain: &str,
        address: &str,
        network_id: Option<u64>,
        include_native: bool,
        include_prices: bool,
    ) -> Result<Vec<BalanceRecord>, TransferError> {
        let token = self
            .session
            .bearer_token()
            .ok_or(TransferError::NotAuthenticated)?;

        let url = format!(
            "{}/sdk/{}/chains/{chain}/balances",
            self.api_base, self.environment_id
        );

        let mut query: Vec<(&str, String)> = vec![("accountAddress", address.to_string())];
        if let Some(network_id) = network_id {
            query.push(("networkId", network_id.to_string()));
        }
        query.push(("includeNative", include_native.to_string()));
        query.push(("includePrices", include_prices.to_string()));
        query.push(("filterSpamTokens", "true".to_string()));

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(&query)
            .send()
            .await
            .map_err(|e| TransferError::TransactionFailed(format!("balance request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransferError::TransactionFailed(format!(
                "API error ({status}): {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| TransferError::MalformedResponse(format!("balances: {e}")))
    }
}

/// Native balance plus SPL token accounts straight from the cluster.
async fn solana_balances_from_rpc(rpc: &SolanaRpcClient, owner: &str) -> Vec<SolanaToken> {
    let lamports = match rpc.balance(owner).await {
        Ok(value) => value,
        Err(err) => {
            warn!("getBalance failed, reporting zero: {err}");
            0
        }
    };

    let accounts = match rpc.token_accounts_by_owner(owner).await {
        Ok(accounts) => accounts,
        Err(err) => {
            warn!("getTokenAccountsByOwner failed, reporting none: {err}");
            Vec::new()
        }
    };

    fallback_tokens(lamports, accounts)
}

/// The fallback result always leads with the native SOL entry.
fn fallback_tokens(lamports: u64, accounts: Vec<TokenAccount>) -> Vec<SolanaToken> {
    let mut tokens = vec![SolanaToken::native_sol(lamports.to_string())];

    for account in accounts {
        if account.amount == "0" {
            continue;
        }
        let (symbol, name) = mint_metadata(&account.mint);
        tokens.push(SolanaToken {
            mint_address: account.mint,
            symbol,
            name,
            decimals: account.decimals,
            balance: account.amount,
            logo: None,
            is_native: false,
        });
    }

    tokens
}

/// Symbol and name for a mint: the static table for well-known mints, a
/// synthesized `XXXX...YYYY` label otherwise.
fn mint_metadata(mint: &str) -> (String, String) {
    if let Some(&(_, symbol, name)) = KNOWN_MINTS.iter().find(|(m, _, _)| *m == mint) {
        return (symbol.to_string(), name.to_string());
    }

    let short = if mint.len() > 8 {
        format!("{}...{}", &mint[..4], &mint[mint.len() - 4..])
    } else {
        mint.to_string()
    };
    (short, "SPL Token".to_string())
}

fn token_from_record(record: BalanceRecord, requested_network: Option<u64>) -> Token {
    let is_native = record.is_native.unwrap_or(false);
    Token {
        id: record.address.clone(),
        symbol: record.symbol,
        name: record.name,
        decimals: record.decimals,
        contract_address: if is_native { None } else { Some(record.address) },
        chain_id: record.network_id.or(requested_network).unwrap_or(1),
        balance: format!("{:.0}", record.raw_balance),
        logo: record.logo_uri,
    }
}

fn solana_token_from_record(record: BalanceRecord) -> SolanaToken {
    SolanaToken {
        mint_address: record.address,
        symbol: record.symbol,
        name: record.name,
        decimals: record.decimals,
        balance: format!("{:.0}", record.raw_balance),
        logo: record.logo_uri,
        is_native: record.is_native.unwrap_or(false),
    }
}
