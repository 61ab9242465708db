//! Transfer construction end to end against mock SDK collaborators.
//!
//! Everything here runs without a network: the mock gas source and signer
//! record how they were used, and the failure-path tests assert that
//! validation errors surface before either collaborator is consulted.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy_primitives::U256;
use async_trait::async_trait;

use transfer_core::{
    ChainKind, GasPriceSource, RawTransactionPayload, SolanaCluster, SolanaToken, Token,
    TransactionSigner, TransferError, TransferOrchestrator, TransferRequest, Wallet,
};

// ---------------------------------------------------------------------------
// Mock collaborators
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingSigner {
    sent: Mutex<Vec<RawTransactionPayload>>,
}

#[async_trait]
impl TransactionSigner for RecordingSigner {
    async fn sign_and_send(
        &self,
        _wallet: &Wallet,
        payload: RawTransactionPayload,
    ) -> Result<String, TransferError> {
        self.sent.lock().unwrap().push(payload);
        Ok("0xf00d".to_string())
    }
}

struct FixedGas {
    price: U256,
    calls: AtomicUsize,
}

impl FixedGas {
    fn new(price: u64) -> Self {
        Self {
            price: U256::from(price),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl GasPriceSource for FixedGas {
    async fn gas_price(&self, _chain_id: u64) -> Result<U256, TransferError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.price)
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const GWEI_30: u64 = 30_000_000_000;

fn evm_wallet() -> Wallet {
    Wallet {
        address: "0x1111111111111111111111111111111111111111".into(),
        chain: ChainKind::Evm,
    }
}

fn sol_wallet() -> Wallet {
    Wallet {
        address: "83astBRguLMdt2h5U1Tpdq5tjFoJ6noeGwaY3mDLVcri".into(),
        chain: ChainKind::Sol,
    }
}

fn usdc() -> Token {
    Token {
        id: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".into(),
        symbol: "USDC".into(),
        name: "USD Coin".into(),
        decimals: 6,
        contract_address: Some("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".into()),
        chain_id: 1,
        balance: "10000000".into(),
        logo: None,
    }
}

fn bonk() -> SolanaToken {
    SolanaToken {
        mint_address: "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263".into(),
        symbol: "BONK".into(),
        name: "Bonk".into(),
        decimals: 5,
        balance: "123456".into(),
        logo: None,
        is_native: false,
    }
}

fn orchestrator(
    signer: &Arc<RecordingSigner>,
    gas: &Arc<FixedGas>,
) -> TransferOrchestrator {
    TransferOrchestrator::new(reqwest::Client::new(), signer.clone(), gas.clone())
}

// ---------------------------------------------------------------------------
// EVM paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn native_evm_transfer_builds_expected_request() {
    let signer = Arc::new(RecordingSigner::default());
    let gas = Arc::new(FixedGas::new(GWEI_30));
    let svc = orchestrator(&signer, &gas);

    let result = svc
        .send(TransferRequest::Evm {
            wallet: evm_wallet(),
            token: Token::native(1),
            to: "0x000000000000000000000000000000000000dEaD".into(),
            amount: "1.5".into(),
            chain_id: 1,
        })
        .await
        .unwrap();

    assert_eq!(result, "0xf00d");
    assert_eq!(gas.calls.load(Ordering::SeqCst), 1);

    let sent = signer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let RawTransactionPayload::Evm(request) = &sent[0] else {
        panic!("expected an EVM payload");
    };

    assert_eq!(request.from, "0x1111111111111111111111111111111111111111");
    assert_eq!(request.to, "0x000000000000000000000000000000000000dEaD");
    assert_eq!(request.value, U256::from(1_500_000_000_000_000_000u64));
    assert!(request.data.is_none());
    assert_eq!(request.gas_limit, 21_000);
    assert_eq!(request.max_fee_per_gas, U256::from(2 * GWEI_30));
    assert_eq!(request.max_priority_fee_per_gas, U256::from(2 * GWEI_30));
}

#[tokio::test]
async fn erc20_transfer_builds_expected_request() {
    let signer = Arc::new(RecordingSigner::default());
    let gas = Arc::new(FixedGas::new(GWEI_30));
    let svc = orchestrator(&signer, &gas);

    svc.send(TransferRequest::Evm {
        wallet: evm_wallet(),
        token: usdc(),
        to: "0x000000000000000000000000000000000000dEaD".into(),
        amount: "2.5".into(),
        chain_id: 1,
    })
    .await
    .unwrap();

    let sent = signer.sent.lock().unwrap();
    let RawTransactionPayload::Evm(request) = &sent[0] else {
        panic!("expected an EVM payload");
    };

    // The call goes to the token contract with zero value.
    assert_eq!(request.to, "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
    assert_eq!(request.value, U256::ZERO);
    assert_eq!(request.gas_limit, 100_000);
    assert_eq!(request.max_fee_per_gas, U256::from(2 * GWEI_30));
    assert_eq!(request.max_priority_fee_per_gas, U256::from(GWEI_30 / 2));

    // transfer(address,uint256) with recipient and 2.5 USDC in base units.
    let data = request.data.as_deref().unwrap();
    assert!(data.starts_with("0xa9059cbb"));
    assert!(data.contains("000000000000000000000000000000000000dead"));
    assert!(data.ends_with(&format!("{:064x}", 2_500_000u64)));
}

#[tokio::test]
async fn native_token_through_erc20_path_fails_fast() {
    let signer = Arc::new(RecordingSigner::default());
    let gas = Arc::new(FixedGas::new(GWEI_30));
    let svc = orchestrator(&signer, &gas);

    let err = svc
        .send_erc20(
            &evm_wallet(),
            &Token::native(1),
            "0x000000000000000000000000000000000000dEaD",
            "1",
            1,
        )
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Cannot send native token as ERC-20"));
    // Neither the gas oracle nor the signer was consulted.
    assert_eq!(gas.calls.load(Ordering::SeqCst), 0);
    assert!(signer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_amount_fails_before_gas_lookup() {
    let signer = Arc::new(RecordingSigner::default());
    let gas = Arc::new(FixedGas::new(GWEI_30));
    let svc = orchestrator(&signer, &gas);

    for amount in ["1.2.3", "", "12a"] {
        let err = svc
            .send(TransferRequest::Evm {
                wallet: evm_wallet(),
                token: Token::native(1),
                to: "0x000000000000000000000000000000000000dEaD".into(),
                amount: amount.into(),
                chain_id: 1,
            })
            .await
            .unwrap_err();
        assert!(
            matches!(err, TransferError::InvalidAmount(_)),
            "{amount:?} should be an amount error"
        );
    }

    assert_eq!(gas.calls.load(Ordering::SeqCst), 0);
    assert!(signer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_recipient_fails_before_gas_lookup() {
    let signer = Arc::new(RecordingSigner::default());
    let gas = Arc::new(FixedGas::new(GWEI_30));
    let svc = orchestrator(&signer, &gas);

    let err = svc
        .send_native_evm(&evm_wallet(), "not-an-address", "1", 1)
        .await
        .unwrap_err();

    assert!(matches!(err, TransferError::InvalidAddress(_)));
    assert_eq!(gas.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn wallet_chain_mismatch_is_rejected() {
    let signer = Arc::new(RecordingSigner::default());
    let gas = Arc::new(FixedGas::new(GWEI_30));
    let svc = orchestrator(&signer, &gas);

    let err = svc
        .send(TransferRequest::Evm {
            wallet: sol_wallet(),
            token: Token::native(1),
            to: "0x000000000000000000000000000000000000dEaD".into(),
            amount: "1".into(),
            chain_id: 1,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, TransferError::TransactionFailed(_)));
    assert!(signer.sent.lock().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Solana paths (pre-network validation only; wire assembly is covered by
// the chain-sol unit tests)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn solana_recipient_with_excluded_character_is_rejected() {
    let signer = Arc::new(RecordingSigner::default());
    let gas = Arc::new(FixedGas::new(GWEI_30));
    let svc = orchestrator(&signer, &gas);

    // '0' is not part of the Base58 alphabet; this fails during decoding,
    // before the blockhash fetch.
    let err = svc
        .send_native_sol(&sol_wallet(), "bad0recipient", "1", SolanaCluster::Devnet)
        .await
        .unwrap_err();

    assert!(matches!(err, TransferError::InvalidAddress(_)));
    assert!(signer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn solana_amount_is_validated_first() {
    let signer = Arc::new(RecordingSigner::default());
    let gas = Arc::new(FixedGas::new(GWEI_30));
    let svc = orchestrator(&signer, &gas);

    let err = svc
        .send_native_sol(&sol_wallet(), "bad0recipient", "", SolanaCluster::Devnet)
        .await
        .unwrap_err();

    assert!(matches!(err, TransferError::InvalidAmount(_)));
}

#[tokio::test]
async fn spl_transfer_with_invalid_mint_is_rejected() {
    let signer = Arc::new(RecordingSigner::default());
    let gas = Arc::new(FixedGas::new(GWEI_30));
    let svc = orchestrator(&signer, &gas);

    let mut token = bonk();
    token.mint_address = "IllegalMint".into();

    let err = svc
        .send_spl(
            &sol_wallet(),
            &token,
            "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin",
            "0.5",
            SolanaCluster::Devnet,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, TransferError::InvalidAddress(_)));
    assert!(signer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn solana_wallet_required_for_solana_paths() {
    let signer = Arc::new(RecordingSigner::default());
    let gas = Arc::new(FixedGas::new(GWEI_30));
    let svc = orchestrator(&signer, &gas);

    let err = svc
        .send(TransferRequest::Solana {
            wallet: evm_wallet(),
            token: SolanaToken::native_sol("0"),
            to: sol_wallet().address,
            amount: "1".into(),
            cluster: SolanaCluster::Devnet,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, TransferError::TransactionFailed(_)));
}
