//! JSON-RPC client for Solana cluster endpoints.
//!
//! Wraps `reqwest::Client` with a cluster endpoint and provides one typed
//! method per RPC call the core needs. Responses are deserialized into
//! typed structs at the boundary; a missing `result` is a
//! [`TransferError::MalformedResponse`], not a silent default.

use serde::Deserialize;

use chain_sol::SolanaCluster;

use crate::error::TransferError;

/// SPL Token Program id, used to filter token accounts by owner.
pub const SPL_TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// A parsed SPL token account balance.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenAccount {
    pub mint: String,
    /// Base-unit amount as a decimal string.
    pub amount: String,
    pub decimals: u8,
}

#[derive(Clone)]
pub struct SolanaRpcClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SolanaRpcClient {
    pub fn new(http: reqwest::Client, cluster: SolanaCluster) -> Self {
        Self {
            http,
            endpoint: cluster.endpoint().to_string(),
        }
    }

    /// Send a JSON-RPC request and deserialize the `result` member.
    async fn rpc_call<T>(&self, method: &str, params: serde_json::Value) -> Result<T, TransferError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransferError::TransactionFailed(format!("{method} request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(TransferError::TransactionFailed(format!(
                "{method} returned HTTP {}",
                response.status()
            )));
        }

        let envelope: RpcEnvelope<T> = response
            .json()
            .await
            .map_err(|e| TransferError::MalformedResponse(format!("{method}: {e}")))?;

        if let Some(err) = envelope.error {
            return Err(TransferError::TransactionFailed(format!(
                "{method} RPC error {}: {}",
                err.code, err.message
            )));
        }

        envelope
            .result
            .ok_or_else(|| TransferError::MalformedResponse(format!("{method}: missing result")))
    }

    /// Fetch a fresh blockhash at `finalized` commitment. Blockhashes are
    /// single-use anti-replay nonces; callers must not cache them.
    pub async fn latest_blockhash(&self) -> Result<String, TransferError> {
        let result: ValueEnvelope<BlockhashValue> = self
            .rpc_call(
                "getLatestBlockhash",
                serde_json::json!([{ "commitment": "finalized" }]),
            )
            .await?;
        Ok(result.value.blockhash)
    }

    /// Native balance of `address` in lamports.
    pub async fn balance(&self, address: &str) -> Result<u64, TransferError> {
        let result: ValueEnvelope<u64> = self
            .rpc_call("getBalance", serde_json::json!([address]))
            .await?;
        Ok(result.value)
    }

    /// SPL token accounts owned by `owner`, via `jsonParsed` encoding.
    /// Individually malformed entries are skipped rather than failing the
    /// whole listing.
    pub async fn token_accounts_by_owner(
        &self,
        owner: &str,
    ) -> Result<Vec<TokenAccount>, TransferError> {
        let result: ValueEnvelope<Vec<serde_json::Value>> = self
            .rpc_call(
                "getTokenAccountsByOwner",
                serde_json::json!([
                    owner,
                    { "programId": SPL_TOKEN_PROGRAM_ID },
                    { "encoding": "jsonParsed" },
                ]),
            )
            .await?;
        Ok(parse_token_accounts(result.value))
    }
}

pub(crate) fn parse_token_accounts(entries: Vec<serde_json::Value>) -> Vec<TokenAccount> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let entry: TokenAccountEntry = serde_json::from_value(entry).ok()?;
            let TokenAccountInfo { mint, token_amount } = entry.account.data.parsed.info;
            Some(TokenAccount {
                mint,
                amount: token_amount.amount,
                decimals: token_amount.decimals,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Wire structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ValueEnvelope<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
struct BlockhashValue {
    blockhash: String,
}

#[derive(Debug, Deserialize)]
struct TokenAccountEntry {
    account: AccountField,
}

#[derive(Debug, Deserialize)]
struct AccountField {
    data: AccountData,
}

#[derive(Debug, Deserialize)]
struct AccountData {
    parsed: ParsedData,
}

#[derive(Debug, Deserialize)]
struct ParsedData {
    info: TokenAccountInfo,
}

#[derive(Debug, Deserialize)]
struct TokenAccountInfo {
    mint: String,
    #[serde(rename = "tokenAmount")]
    token_amount: TokenAmount,
}

#[derive(Debug, Deserialize)]
struct TokenAmount {
    amount: String,
    decimals: u8,
}
